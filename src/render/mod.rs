//! Module for anything related to rendering.
//!
//! This module contains the static quad geometry, the per-frame transform math and the
//! embedded shader sources.

pub mod quad;
pub mod transform;

/// Vertex stage shared by both quad programs.
pub const QUAD_VERTEX_SHADER: &str = include_str!("shaders/quad/vert.glsl");
/// Fragment stage shared by both quad programs.
pub const QUAD_FRAGMENT_SHADER: &str = include_str!("shaders/quad/frag.glsl");
