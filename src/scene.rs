//! The two spinning quads.
//!
//! [`Scene`] owns every GPU object the program draws with. It is built once after the GL
//! context exists and rendered every frame until the window closes.

use std::sync::Arc;

use glam::Vec2;
use glow::HasContext;
use thiserror::Error;

use crate::{
    abs::{Mesh, ProgramRegistry, ShaderError, Texture, unbind_unit},
    config::Config,
    render::{
        QUAD_FRAGMENT_SHADER, QUAD_VERTEX_SHADER,
        quad::{QUAD_INDICES, QUAD_VERTICES},
        transform::{QuadInstance, Spin},
    },
};

/// Number of shader programs the scene links.
pub const PROGRAM_COUNT: usize = 2;

/// Left quad spins counter-clockwise, right quad clockwise.
pub const QUADS: [QuadInstance; 2] = [
    QuadInstance {
        program_slot: 0,
        texture_unit: 0,
        offset: Vec2::new(-0.5, 0.0),
        spin: Spin::CounterClockwise,
    },
    QuadInstance {
        program_slot: 1,
        texture_unit: 1,
        offset: Vec2::new(0.5, 0.0),
        spin: Spin::Clockwise,
    },
];

#[derive(Debug, Error)]
pub enum SceneError {
    #[error(transparent)]
    Shader(#[from] ShaderError),
    #[error("failed to create quad mesh: {0}")]
    Mesh(String),
    #[error("no shader program in slot {0}")]
    MissingProgram(usize),
}

/// Everything needed to draw a frame.
pub struct Scene {
    gl: Arc<glow::Context>,
    mesh: Mesh,
    programs: ProgramRegistry,
    /// One per quad. `None` when the image could not be loaded.
    textures: [Option<Texture>; 2],
}

impl Scene {
    /// Uploads the quad, links the programs, loads the textures and wires samplers to units.
    ///
    /// A texture that fails to load is logged and left empty; the quad is still drawn.
    pub fn new(gl: &Arc<glow::Context>, config: &Config) -> Result<Self, SceneError> {
        let mesh = Mesh::new(gl, &QUAD_VERTICES, &QUAD_INDICES, glow::TRIANGLES)
            .map_err(SceneError::Mesh)?;

        let mut programs = ProgramRegistry::with_capacity(PROGRAM_COUNT);
        for _ in 0..PROGRAM_COUNT {
            programs.register(gl, QUAD_VERTEX_SHADER, QUAD_FRAGMENT_SHADER)?;
        }

        let textures = config.textures.each_ref().map(|path| {
            Texture::load(gl, path)
                .inspect_err(|e| log::error!("Failed to load texture: {e}"))
                .ok()
        });

        for quad in &QUADS {
            let program = programs
                .get(quad.program_slot)
                .ok_or(SceneError::MissingProgram(quad.program_slot))?;
            program
                .bind()
                .set_uniform("u_texture", quad.texture_unit as i32);
        }

        let [r, g, b, a] = config.clear_color;
        unsafe {
            gl.clear_color(r, g, b, a);
        }

        log::info!(
            "scene ready: {} programs, {} of {} textures",
            programs.len(),
            textures.iter().flatten().count(),
            textures.len()
        );

        Ok(Self {
            gl: Arc::clone(gl),
            mesh,
            programs,
            textures,
        })
    }

    /// Draws one frame `elapsed` seconds after startup and returns the number of draw calls.
    pub fn render(&self, elapsed: f32) -> usize {
        unsafe {
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }

        let mut draws = 0;
        for (quad, texture) in QUADS.iter().zip(&self.textures) {
            let Some(program) = self.programs.get(quad.program_slot) else {
                continue;
            };
            let program = program.bind();
            program.set_uniform("transform", quad.transform_at(elapsed));

            let _texture = match texture {
                Some(texture) => Some(texture.bind(quad.texture_unit)),
                None => {
                    unbind_unit(&self.gl, quad.texture_unit);
                    None
                }
            };
            self.mesh.draw();
            draws += 1;
        }

        log::trace!("frame at {elapsed:.3}s: {draws} draw calls");
        draws
    }

    /// Number of linked programs.
    pub fn program_count(&self) -> usize {
        self.programs.len()
    }

    /// Number of textures that loaded successfully.
    pub fn texture_count(&self) -> usize {
        self.textures.iter().flatten().count()
    }

    /// Indices drawn per quad.
    pub fn index_count(&self) -> usize {
        self.mesh.index_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_quad_has_its_own_program_and_unit() {
        assert_eq!(QUADS.len(), PROGRAM_COUNT);
        for (i, quad) in QUADS.iter().enumerate() {
            assert_eq!(quad.program_slot, i);
            assert_eq!(quad.texture_unit, i as u32);
        }
    }

    #[test]
    fn quads_differ_only_in_offset_sign_and_spin() {
        let [a, b] = QUADS;
        assert_eq!(a.offset, Vec2::new(-0.5, 0.0));
        assert_eq!(b.offset, -a.offset);
        assert_eq!(a.spin, Spin::CounterClockwise);
        assert_eq!(b.spin, Spin::Clockwise);
    }

    #[test]
    fn shader_errors_pass_through_unchanged() {
        let err = SceneError::from(ShaderError::Link("undefined symbol".to_string()));
        assert_eq!(err.to_string(), "program failed to link:\nundefined symbol");
    }
}
