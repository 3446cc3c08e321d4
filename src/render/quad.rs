//! The textured quad both scene instances share.

use std::mem::{offset_of, size_of};

use glam::{Vec2, Vec3};
use glow::HasContext;

use crate::abs::Vertex;

/// Interleaved position, color and texture coordinate.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadVertex {
    pub position: Vec3,
    pub color: Vec3,
    pub uv: Vec2,
}

impl QuadVertex {
    const fn new(position: [f32; 3], color: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position: Vec3::from_array(position),
            color: Vec3::from_array(color),
            uv: Vec2::from_array(uv),
        }
    }
}

impl Vertex for QuadVertex {
    fn vertex_attribs(gl: &glow::Context) {
        unsafe {
            let stride = size_of::<QuadVertex>() as i32;
            // Position attribute
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(
                0,
                3,
                glow::FLOAT,
                false,
                stride,
                offset_of!(QuadVertex, position) as i32,
            );
            // Color attribute
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(
                1,
                3,
                glow::FLOAT,
                false,
                stride,
                offset_of!(QuadVertex, color) as i32,
            );
            // UV attribute
            gl.enable_vertex_attrib_array(2);
            gl.vertex_attrib_pointer_f32(
                2,
                2,
                glow::FLOAT,
                false,
                stride,
                offset_of!(QuadVertex, uv) as i32,
            );
        }
    }
}

#[rustfmt::skip]
pub const QUAD_VERTICES: [QuadVertex; 4] = [
    //              position            color              uv
    QuadVertex::new([ 0.5,  0.5, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0]), // top right
    QuadVertex::new([ 0.5, -0.5, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0]), // bottom right
    QuadVertex::new([-0.5, -0.5, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0]), // bottom left
    QuadVertex::new([-0.5,  0.5, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0]), // top left
];

#[rustfmt::skip]
pub const QUAD_INDICES: [u32; 6] = [
    0, 1, 3,
    1, 2, 3,
];
