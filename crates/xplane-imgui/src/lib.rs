//! Dear ImGui overlay for X-Plane.
//!
//! The overlay owns one UI context for the whole plugin binary. Code
//! anywhere in the binary registers render callbacks; the overlay runs them
//! every frame the sim draws its windows, routes mouse and keyboard input to
//! the UI while it wants them, and hands everything else back to the sim.
//!
//! ```no_run
//! use xplane_imgui::imgui::Ui;
//!
//! xplane_imgui::init()?;
//! let (_handle, visible) = xplane_imgui::register_window("Fuel", |ui: &Ui| {
//!     ui.text("left tank: 402 kg");
//! })?;
//! visible.set(true);
//! # Ok::<(), xplane_imgui::OverlayError>(())
//! ```
//!
//! With the `plugin` feature the crate also exports the five `XPlugin*`
//! entry points, making a `cdylib` build a complete plugin: it creates the
//! transparent input window, the Plugins-menu toggles, and the per-frame
//! draw hook, and renders through the sim's own GL context. Without the
//! feature the crate is a plain library; the embedder drives
//! [`run_frame`] and the `handle_*` functions itself, which is also how the
//! integration tests exercise the full input contract without a sim.

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

pub use glow;
pub use imgui;

mod frame;
mod keys;
mod overlay;

#[cfg(feature = "plugin")]
mod plugin;

pub use frame::FrameStats;
pub use xplane_imgui_core::{
    EventDisposition, FocusRequest, HookDirective, HostCursor, KeyFlags, MouseButton, MouseStatus,
    OverlayError, OverlayOptions, RenderHandle, Result, SessionQueue, UiCapture, VisibilityFlag,
    WheelAxis, WindowGeometry,
};
pub use xplane_imgui_render::{FontSettings, GlTextureHost, TextureHost};

/// Queue handle for registering and unregistering from inside a render
/// callback.
pub type OverlayQueue = SessionQueue<imgui::Ui>;

/// Initializes the overlay with default options.
pub fn init() -> Result<()> {
    overlay::install(OverlayOptions::default())
}

/// Initializes the overlay with explicit options.
pub fn init_with_options(options: OverlayOptions) -> Result<()> {
    overlay::install(options)
}

/// Shuts the overlay down, dropping every registration and the UI context.
pub fn shutdown() -> Result<()> {
    overlay::uninstall()
}

/// Whether [`init`] has run and [`shutdown`] has not.
pub fn is_initialized() -> bool {
    overlay::is_installed()
}

/// Registers a render callback, drawn each frame after all earlier
/// registrations.
///
/// With `visible` set, frames skip the callback while the flag is false; the
/// registration itself stays alive. Must not be called from inside a render
/// callback; use [`session_queue`] there.
pub fn register(
    render: impl FnMut(&mut imgui::Ui) + 'static,
    visible: Option<VisibilityFlag>,
) -> Result<RenderHandle> {
    let handle = overlay::with(|o| o.register(render, visible))?;
    #[cfg(feature = "plugin")]
    plugin::sync_draw_hook();
    Ok(handle)
}

/// Registers a titled window with its own visibility flag.
///
/// The callback draws the window's contents; the window itself, and a
/// Plugins-menu item toggling it in plugin builds, are managed here.
pub fn register_window(
    title: &str,
    mut draw: impl FnMut(&imgui::Ui) + 'static,
) -> Result<(RenderHandle, VisibilityFlag)> {
    let flag = VisibilityFlag::new(true);
    let window_title = title.to_string();
    let handle = register(
        move |ui| {
            ui.window(&window_title).build(|| draw(ui));
        },
        Some(flag.clone()),
    )?;
    #[cfg(feature = "plugin")]
    plugin::add_menu_toggle(title, flag.clone());
    Ok((handle, flag))
}

/// Removes a registration by its handle.
pub fn unregister(handle: RenderHandle) -> Result<()> {
    let result = overlay::with(|o| o.unregister(handle))?;
    #[cfg(feature = "plugin")]
    plugin::sync_draw_hook();
    result
}

/// A cloneable queue for structural changes from inside render callbacks.
pub fn session_queue() -> Result<OverlayQueue> {
    overlay::with(|o| o.queue_handle())
}

/// Number of registered callbacks.
pub fn callback_count() -> Result<usize> {
    overlay::with(|o| o.callback_count())
}

/// Replaces the tracked overlay-window rectangle.
pub fn update_geometry(geometry: WindowGeometry) -> Result<()> {
    overlay::with(|o| o.update_geometry(geometry))
}

/// Feeds a host mouse-click callback to the overlay.
pub fn handle_mouse_click(
    x: i32,
    y: i32,
    status: MouseStatus,
    button: MouseButton,
) -> Result<EventDisposition> {
    overlay::with(|o| o.handle_mouse_click(x, y, status, button))
}

/// Feeds a host cursor callback, answering which cursor the host shows.
pub fn handle_cursor(x: i32, y: i32) -> Result<HostCursor> {
    overlay::with(|o| o.handle_cursor(x, y))
}

/// Feeds a host scroll-wheel callback to the overlay.
pub fn handle_wheel(x: i32, y: i32, axis: WheelAxis, clicks: i32) -> Result<EventDisposition> {
    overlay::with(|o| o.handle_wheel(x, y, axis, clicks))
}

/// Feeds a host keyboard callback to the overlay.
pub fn handle_key(
    key_char: u8,
    flags: KeyFlags,
    virtual_key: u8,
    losing_focus: bool,
) -> Result<()> {
    overlay::with(|o| o.handle_key(key_char, flags, virtual_key, losing_focus))
}

/// Takes the pending keyboard-focus action, if a click produced one.
pub fn take_focus_request() -> Result<Option<FocusRequest>> {
    overlay::with(|o| o.take_focus_request())
}

/// Compares desired and installed draw-hook state, returning the transition
/// to perform if they differ. Plugin builds handle this internally.
pub fn hook_directive() -> Result<Option<HookDirective>> {
    overlay::with(|o| o.hook_directive())
}

/// Applies queued registrations and removals without running a frame.
pub fn apply_deferred() -> Result<()> {
    overlay::with(|o| o.apply_deferred())
}

/// Capture flags from the most recently completed frame.
pub fn capture() -> Result<UiCapture> {
    overlay::with(|o| o.capture())
}

/// The options the overlay was initialized with.
pub fn options() -> Result<OverlayOptions> {
    overlay::with(|o| o.options().clone())
}

/// Attaches the GL context the overlay renders through, with plain-GL
/// texture allocation.
pub fn attach_gl(gl: glow::Context) -> Result<()> {
    overlay::with(|o| o.attach_gl(gl))
}

/// Attaches a GL context with a custom [`TextureHost`].
pub fn attach_gl_with_host(gl: glow::Context, host: Box<dyn TextureHost>) -> Result<()> {
    overlay::with(|o| o.attach_gl_with_host(gl, host))
}

/// Tears down the GL pipeline; the overlay keeps running headless.
pub fn detach_gl() -> Result<()> {
    overlay::with(|o| o.detach_gl())
}

/// Runs one overlay frame.
///
/// Headless until [`attach_gl`]; with a context attached the finalized draw
/// data is rendered before returning. `delta_seconds` is the wall time since
/// the previous frame.
pub fn run_frame(delta_seconds: f32) -> Result<FrameStats> {
    overlay::with(|o| o.run_frame(delta_seconds))
}
