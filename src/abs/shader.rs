//! OpenGL Shaders
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] structs for managing OpenGL shaders,
//! and the [`ProgramRegistry`] that owns every linked program of the scene. It also provides the
//! [`Uniform`] trait for setting uniform variables in shader programs.

use std::sync::Arc;

use glam::Mat4;
use glow::HasContext;
use thiserror::Error;

/// Errors produced while building shader programs.
#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("failed to create GL object: {0}")]
    Create(String),
    #[error("{stage} shader failed to compile:\n{log}")]
    Compile { stage: &'static str, log: String },
    #[error("program failed to link:\n{0}")]
    Link(String),
    #[error("program registry is full (capacity {capacity})")]
    RegistryFull { capacity: usize },
}

fn stage_name(shader_type: u32) -> &'static str {
    match shader_type {
        glow::VERTEX_SHADER => "vertex",
        glow::FRAGMENT_SHADER => "fragment",
        _ => "unknown",
    }
}

/// Represents an individual OpenGL shader stage.
pub struct Shader {
    gl: Arc<glow::Context>,
    id: glow::Shader,
}

impl Shader {
    /// Compiles a new shader from the given source code.
    pub fn new(
        gl: &Arc<glow::Context>,
        shader_type: u32,
        source: &str,
    ) -> Result<Self, ShaderError> {
        unsafe {
            let shader = gl.create_shader(shader_type).map_err(ShaderError::Create)?;
            gl.shader_source(shader, source);
            gl.compile_shader(shader);

            if !gl.get_shader_compile_status(shader) {
                let log = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                return Err(ShaderError::Compile {
                    stage: stage_name(shader_type),
                    log,
                });
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: shader,
            })
        }
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_shader(self.id);
        }
    }
}

/// Represents a uniform variable in a shader program.
pub trait Uniform {
    /// Sets the value of the uniform variable in the given shader program.
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str);
}

impl Uniform for i32 {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        unsafe {
            let location = gl.get_uniform_location(program, name);
            if let Some(loc) = location {
                gl.uniform_1_i32(Some(&loc), *self);
            }
        }
    }
}

impl Uniform for f32 {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        unsafe {
            let location = gl.get_uniform_location(program, name);
            if let Some(loc) = location {
                gl.uniform_1_f32(Some(&loc), *self);
            }
        }
    }
}

impl Uniform for Mat4 {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        unsafe {
            let location = gl.get_uniform_location(program, name);
            if let Some(loc) = location {
                gl.uniform_matrix_4_f32_slice(Some(&loc), false, self.as_ref());
            }
        }
    }
}

impl<T: Uniform> Uniform for &T {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        (*self).set_uniform(gl, program, name);
    }
}

/// Represents an OpenGL shader program composed of multiple shaders.
pub struct ShaderProgram {
    gl: Arc<glow::Context>,
    id: glow::Program,
}

impl ShaderProgram {
    /// Links a new shader program from the given shaders.
    pub fn new(gl: &Arc<glow::Context>, shaders: &[&Shader]) -> Result<Self, ShaderError> {
        unsafe {
            let program = gl.create_program().map_err(ShaderError::Create)?;

            for shader in shaders {
                gl.attach_shader(program, shader.id);
            }

            gl.link_program(program);

            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(ShaderError::Link(log));
            }

            for shader in shaders {
                gl.detach_shader(program, shader.id);
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: program,
            })
        }
    }

    /// Makes this the active program.
    pub fn use_program(&self) {
        unsafe {
            self.gl.use_program(Some(self.id));
        }
    }

    /// Makes this the active program until the returned binding is dropped.
    pub fn bind(&self) -> ProgramBinding<'_> {
        self.use_program();
        ProgramBinding { program: self }
    }

    /// Sets a uniform variable in the shader program.
    ///
    /// The program has to be active for the upload to land.
    pub fn set_uniform<T: Uniform>(&self, name: &str, value: T) {
        value.set_uniform(&self.gl, self.id, name);
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.id);
        }
    }
}

/// Scoped activation of a [`ShaderProgram`]. Deactivates the program when dropped.
pub struct ProgramBinding<'a> {
    program: &'a ShaderProgram,
}

impl ProgramBinding<'_> {
    /// Sets a uniform on the bound program.
    pub fn set_uniform<T: Uniform>(&self, name: &str, value: T) {
        self.program.set_uniform(name, value);
    }
}

impl Drop for ProgramBinding<'_> {
    fn drop(&mut self) {
        unsafe {
            self.program.gl.use_program(None);
        }
    }
}

/// An ordered list of linked programs with a fixed upper bound on its size.
///
/// Slots are handed out in insertion order and never reused; programs live as long as the
/// registry does.
pub struct ProgramRegistry<P = ShaderProgram> {
    programs: Vec<P>,
    capacity: usize,
}

impl<P> ProgramRegistry<P> {
    /// Creates an empty registry that accepts at most `capacity` programs.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            programs: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a program and returns its slot.
    pub fn push(&mut self, program: P) -> Result<usize, ShaderError> {
        if self.is_full() {
            return Err(ShaderError::RegistryFull {
                capacity: self.capacity,
            });
        }
        self.programs.push(program);
        Ok(self.programs.len() - 1)
    }

    /// Returns the program in the given slot.
    pub fn get(&self, slot: usize) -> Option<&P> {
        self.programs.get(slot)
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.programs.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl ProgramRegistry<ShaderProgram> {
    /// Compiles a vertex/fragment pair, links it, activates it and appends it to the registry.
    ///
    /// The intermediate stage objects are released before returning. Compiler and linker
    /// diagnostics are logged and handed back in the error.
    pub fn register(
        &mut self,
        gl: &Arc<glow::Context>,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<usize, ShaderError> {
        if self.is_full() {
            return Err(ShaderError::RegistryFull {
                capacity: self.capacity,
            });
        }

        let program = Shader::new(gl, glow::VERTEX_SHADER, vertex_source)
            .and_then(|vert| {
                let frag = Shader::new(gl, glow::FRAGMENT_SHADER, fragment_source)?;
                ShaderProgram::new(gl, &[&vert, &frag])
            })
            .inspect_err(|e| log::error!("{e}"))?;
        program.use_program();

        let slot = self.push(program)?;
        log::info!("registered shader program in slot {slot}");
        Ok(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_grows_by_one_and_returns_slot() {
        let mut registry = ProgramRegistry::with_capacity(2);
        assert!(registry.is_empty());

        assert_eq!(registry.push("first").unwrap(), 0);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.push("second").unwrap(), 1);
        assert_eq!(registry.len(), 2);

        assert_eq!(registry.get(0), Some(&"first"));
        assert_eq!(registry.get(1), Some(&"second"));
        assert_eq!(registry.get(2), None);
    }

    #[test]
    fn push_past_capacity_is_rejected() {
        let mut registry = ProgramRegistry::with_capacity(2);
        registry.push(1).unwrap();
        registry.push(2).unwrap();
        assert!(registry.is_full());

        match registry.push(3) {
            Err(ShaderError::RegistryFull { capacity }) => assert_eq!(capacity, 2),
            other => panic!("expected RegistryFull, got {other:?}"),
        }
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(1), Some(&2));
    }

    #[test]
    fn zero_capacity_registry_is_always_full() {
        let mut registry: ProgramRegistry<()> = ProgramRegistry::with_capacity(0);
        assert!(registry.is_full());
        assert!(registry.push(()).is_err());
        assert_eq!(registry.capacity(), 0);
    }

    #[test]
    fn stage_names() {
        assert_eq!(stage_name(glow::VERTEX_SHADER), "vertex");
        assert_eq!(stage_name(glow::FRAGMENT_SHADER), "fragment");
        assert_eq!(stage_name(glow::GEOMETRY_SHADER), "unknown");
    }

    #[test]
    fn compile_error_carries_log() {
        let err = ShaderError::Compile {
            stage: "fragment",
            log: "0:3: syntax error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "fragment shader failed to compile:\n0:3: syntax error"
        );
    }
}
