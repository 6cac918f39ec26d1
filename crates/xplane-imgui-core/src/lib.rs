//! Host-independent core for the X-Plane ImGui overlay.
//!
//! This crate holds everything about the overlay that does not need the
//! simulator or the UI library to be present:
//! - [`WindowGeometry`] tracking and the screen-to-UI coordinate flip
//! - The virtual-key table and [`KeyFlags`] word ([`keys`])
//! - The translated input-event queue ([`events`])
//! - The render-callback registry with visibility flags ([`registry`])
//! - [`OverlaySession`], which ties translation, focus bookkeeping, and the
//!   registry together behind one testable object
//!
//! The facade crate instantiates the session with the UI library's frame
//! context and wires the host callbacks to it.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder-ish accessors don't all need must_use
#![allow(clippy::must_use_candidate)]
// Screen coordinates and wheel clicks fit comfortably in f32
#![allow(clippy::cast_precision_loss)]

pub mod error;
pub mod events;
pub mod geometry;
pub mod keys;
pub mod options;
pub mod registry;
pub mod session;

pub use error::{OverlayError, Result};
pub use events::{
    EventDisposition, FocusRequest, MouseButton, MouseStatus, UiInputEvent, WheelAxis,
};
pub use geometry::WindowGeometry;
pub use keys::{ui_key_for_virtual_key, KeyFlags, UiKey};
pub use options::OverlayOptions;
pub use registry::{CallbackRegistry, RenderHandle, VisibilityFlag};
pub use session::{
    CursorShape, HookDirective, HostCursor, OverlaySession, SessionQueue, UiCapture,
};
