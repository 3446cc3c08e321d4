//! Structs and functions for handling textures.
//!
//! The module provides the [`Texture`] struct which is a CPU representation of a GPU texture,
//! and [`decode_image`] which turns an image file into pixels ready for upload.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use glow::HasContext;
use image::RgbaImage;
use thiserror::Error;

/// Errors produced while loading a texture.
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to create GL texture: {0}")]
    Create(String),
}

/// Decodes the image at `path` into RGBA8 pixels, flipped vertically so that the first row is
/// the bottom of the image as OpenGL expects.
pub fn decode_image(path: impl AsRef<Path>) -> Result<RgbaImage, TextureError> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|source| TextureError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image.flipv().to_rgba8())
}

/// Represents a texture stored on the GPU side.
pub struct Texture {
    gl: Arc<glow::Context>,
    id: glow::Texture,
    width: u32,
    height: u32,
}

impl Texture {
    /// Decodes the file at `path` and uploads it as a new texture.
    pub fn load(gl: &Arc<glow::Context>, path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let image = decode_image(&path)?;
        let texture = Self::from_image(gl, &image)?;
        log::info!(
            "loaded texture {} ({}x{})",
            path.as_ref().display(),
            texture.width(),
            texture.height()
        );
        Ok(texture)
    }

    /// Creates a new texture from already decoded RGBA8 pixels.
    ///
    /// Wrapping repeats on both axes, minification is trilinear and magnification nearest.
    /// Mipmaps are generated after upload.
    pub fn from_image(gl: &Arc<glow::Context>, image: &RgbaImage) -> Result<Self, TextureError> {
        let (width, height) = image.dimensions();
        unsafe {
            let texture = gl.create_texture().map_err(TextureError::Create)?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR_MIPMAP_LINEAR as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::NEAREST as i32,
            );
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA8 as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(image.as_raw().as_slice())),
            );
            gl.generate_mipmap(glow::TEXTURE_2D);
            gl.bind_texture(glow::TEXTURE_2D, None);

            Ok(Self {
                gl: Arc::clone(gl),
                id: texture,
                width,
                height,
            })
        }
    }

    /// Returns the width of the texture.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the texture.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Binds the texture to the specified texture unit until the returned binding is dropped.
    pub fn bind(&self, unit: u32) -> TextureBinding<'_> {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.id));
        }
        TextureBinding { gl: &self.gl, unit }
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_texture(self.id);
        }
    }
}

/// Scoped binding of a texture to a texture unit.
pub struct TextureBinding<'a> {
    gl: &'a glow::Context,
    unit: u32,
}

impl Drop for TextureBinding<'_> {
    fn drop(&mut self) {
        unbind_unit(self.gl, self.unit);
    }
}

/// Leaves the given texture unit with no 2D texture bound.
pub fn unbind_unit(gl: &glow::Context, unit: u32) {
    unsafe {
        gl.active_texture(glow::TEXTURE0 + unit);
        gl.bind_texture(glow::TEXTURE_2D, None);
    }
}
