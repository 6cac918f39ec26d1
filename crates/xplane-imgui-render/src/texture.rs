//! Texture allocation and binding through the host.
//!
//! X-Plane tracks GL texture state in its own cache; textures it should know
//! about must be allocated through `XPLMGenerateTextureNumbers` and bound
//! through `XPLMBindTexture2d`, never raw `glGenTextures`/`glBindTexture`.
//! The renderer only sees this trait, so the same rasterizer runs inside the
//! sim and in standalone embedders.

use std::num::NonZeroU32;

use glow::HasContext;
use xplane_imgui_core::{OverlayError, Result};

/// Allocates and binds GL texture names the way the host expects.
///
/// The returned names are raw GL texture ids; `bind` must leave the texture
/// bound to unit 0 on the `TEXTURE_2D` target.
pub trait TextureHost {
    /// Allocates one texture name.
    fn allocate(&mut self, gl: &glow::Context) -> Result<u32>;

    /// Binds `texture` to unit 0.
    fn bind(&self, gl: &glow::Context, texture: u32);
}

/// Plain-GL implementation for embedders without a texture-numbering API.
#[derive(Debug, Default)]
pub struct GlTextureHost;

impl TextureHost for GlTextureHost {
    fn allocate(&mut self, gl: &glow::Context) -> Result<u32> {
        let texture = unsafe { gl.create_texture() }
            .map_err(|err| OverlayError::Texture(format!("create_texture: {err}")))?;
        Ok(texture.0.get())
    }

    fn bind(&self, gl: &glow::Context, texture: u32) {
        unsafe {
            gl.active_texture(glow::TEXTURE0);
            gl.bind_texture(glow::TEXTURE_2D, NonZeroU32::new(texture).map(glow::NativeTexture));
        }
    }
}
