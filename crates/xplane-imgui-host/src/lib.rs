//! X-Plane SDK glue for the ImGui overlay.
//!
//! Everything that references an XPLM symbol sits behind the `xplm` cargo
//! feature: plugins resolve those symbols against the running sim at load
//! time, so default builds and tests need no SDK on the machine. The pure
//! helpers (log-line formatting, name sanitizing, path derivation) are
//! always compiled and unit-tested.

#![cfg_attr(feature = "xplm", allow(unsafe_code))]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod logger;
pub mod paths;

#[cfg(feature = "xplm")]
pub mod ffi;
#[cfg(feature = "xplm")]
pub mod gl;
#[cfg(feature = "xplm")]
pub mod menu;
#[cfg(feature = "xplm")]
pub mod window;

pub use logger::format_line;
#[cfg(feature = "xplm")]
pub use logger::XPlaneLogger;
#[cfg(feature = "xplm")]
pub use menu::OverlayMenu;
#[cfg(feature = "xplm")]
pub use window::{OverlayWindow, WindowHandlers};
