//! OpenGL rendering backend for the X-Plane ImGui overlay.
//!
//! This crate submits finalized ImGui draw lists to a GL context the host
//! owns. It provides:
//! - [`GlowRenderer`], a minimal draw-data rasterizer over `glow`
//! - [`GlStateBackup`], exact capture/restore of the GL state the rasterizer
//!   touches, so the sim's own rendering is never disturbed
//! - Font-atlas configuration and upload through the [`TextureHost`] trait,
//!   which abstracts over the sim's texture-numbering API
//!
//! The GL context itself is never created here; the host brings one to every
//! draw callback and the facade hands it down.

// Every GL entry point is unsafe in glow; this crate is the one place in the
// workspace that talks to GL directly.
#![allow(unsafe_code)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

pub mod fonts;
pub mod renderer;
pub mod state;
pub mod texture;

pub use fonts::{configure_atlas, upload_atlas, FontSettings};
pub use renderer::{scissor_rect, GlowRenderer};
pub use state::GlStateBackup;
pub use texture::{GlTextureHost, TextureHost};
