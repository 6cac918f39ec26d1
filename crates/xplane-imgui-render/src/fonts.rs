//! Font-atlas configuration and GPU upload.
//!
//! The atlas is rasterized CPU-side at init time so frames can run before any
//! GL work happens; the texture itself is uploaded later, once a context is
//! current, through whatever [`TextureHost`] the embedder provides.

use std::fs;
use std::path::PathBuf;

use glow::HasContext;
use imgui::{FontConfig, FontGlyphRanges, FontSource, TextureId};
use log::debug;
use xplane_imgui_core::{OverlayError, Result};

use crate::texture::TextureHost;

/// What to put in the font atlas.
#[derive(Debug, Clone)]
pub struct FontSettings {
    /// Pixel size for the TrueType font, if one is given.
    pub size_px: f32,
    /// Optional TrueType file loaded in addition to the built-in font.
    pub ttf_file: Option<PathBuf>,
    /// TrueType data given directly, used when no file is set.
    pub ttf_data: Option<Vec<u8>>,
    /// Optional glyph-range restriction for the TrueType font, as an
    /// imgui-style zero-terminated list of inclusive range pairs.
    pub glyph_ranges: Option<&'static [u32]>,
}

impl Default for FontSettings {
    fn default() -> Self {
        Self {
            size_px: 13.0,
            ttf_file: None,
            ttf_data: None,
            glyph_ranges: None,
        }
    }
}

/// Fills the atlas and rasterizes it CPU-side.
///
/// The built-in font is always added first, so a failed TrueType load leaves
/// a usable atlas behind; the caller logs the error and carries on with the
/// default font.
pub fn configure_atlas(ctx: &mut imgui::Context, settings: &FontSettings) -> Result<()> {
    ctx.fonts().add_font(&[FontSource::DefaultFontData { config: None }]);

    let mut result = Ok(());
    let data = if let Some(path) = &settings.ttf_file {
        match fs::read(path) {
            Ok(data) => {
                debug!("loaded font {} at {}px", path.display(), settings.size_px);
                Some(data)
            }
            Err(err) => {
                result = Err(OverlayError::Font(format!(
                    "cannot read {}: {err}",
                    path.display()
                )));
                None
            }
        }
    } else {
        settings.ttf_data.clone()
    };
    if let Some(data) = data {
        let config = settings.glyph_ranges.map(|ranges| FontConfig {
            glyph_ranges: FontGlyphRanges::from_slice(ranges),
            ..FontConfig::default()
        });
        ctx.fonts().add_font(&[FontSource::TtfData {
            data: &data,
            size_pixels: settings.size_px,
            config,
        }]);
    }

    // Rasterize now; upload waits until a GL context is current.
    ctx.fonts().build_rgba32_texture();
    result
}

/// Uploads the rasterized atlas and points the UI at the new texture.
///
/// Returns the texture name the host allocated.
pub fn upload_atlas(
    gl: &glow::Context,
    ctx: &mut imgui::Context,
    host: &mut dyn TextureHost,
) -> Result<u32> {
    let texture = host.allocate(gl)?;
    host.bind(gl, texture);

    let atlas = ctx.fonts();
    {
        let rgba = atlas.build_rgba32_texture();
        unsafe {
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                rgba.width as i32,
                rgba.height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(rgba.data)),
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_S,
                glow::CLAMP_TO_EDGE as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_T,
                glow::CLAMP_TO_EDGE as i32,
            );
        }
    }
    atlas.tex_id = TextureId::new(texture as usize);
    Ok(texture)
}
