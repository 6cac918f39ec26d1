//! X-Plane plugin entry points and host wiring.
//!
//! This module turns the crate into a complete plugin when built as a
//! `cdylib` with the `plugin` feature. The lifecycle:
//! - `XPluginStart`: fill the identity strings and install the logger
//! - `XPluginEnable`: load options, create the UI context, resolve GL,
//!   create the input window and menu
//! - `XPluginDisable`: uninstall the draw hook and destroy the overlay,
//!   the window, and the menu
//! - `XPluginStop`: flush the log
//!
//! Every `extern "C"` boundary is wrapped in a panic guard: a panic crossing
//! into the sim is undefined behavior, so panics are reported to `Log.txt`
//! and swallowed.

#![allow(unsafe_code)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

use std::os::raw::{c_char, c_int, c_void};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::ptr;
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{error, info, warn, LevelFilter};
use xplane_imgui_core::{
    EventDisposition, HookDirective, HostCursor, KeyFlags, MouseButton, MouseStatus, OverlayError,
    OverlayOptions, Result, VisibilityFlag, WheelAxis,
};
use xplane_imgui_host::ffi;
use xplane_imgui_host::gl::GlLibrary;
use xplane_imgui_host::paths::{layout_file_name, sibling_path, OPTIONS_FILE};
use xplane_imgui_host::{OverlayMenu, OverlayWindow, WindowHandlers, XPlaneLogger};
use xplane_imgui_render::TextureHost;

use crate::overlay;

const PLUGIN_SIGNATURE: &str = "rs.xplane-imgui.overlay";
const PLUGIN_DESCRIPTION: &str = "Dear ImGui overlay host";

/// Host-side state created at enable and destroyed at disable.
struct HostState {
    window: OverlayWindow,
    menu: Option<OverlayMenu>,
    draw_hook_installed: bool,
    last_frame_time: f32,
    // Must stay open while the attached glow context resolves through it.
    _gl_library: GlLibrary,
}

/// Wrapper making the host state storable in a static.
///
/// The window id and menu id are raw sim pointers; the sim calls every
/// entry point from its main thread, so the slot is only locked there.
struct HostSlot(Option<HostState>);

unsafe impl Send for HostSlot {}

static HOST: Mutex<HostSlot> = Mutex::new(HostSlot(None));

/// Menu toggles requested before the menu exists, added at enable.
static PENDING_TOGGLES: Mutex<Vec<(String, VisibilityFlag)>> = Mutex::new(Vec::new());

fn host_lock() -> MutexGuard<'static, HostSlot> {
    HOST.lock().unwrap_or_else(PoisonError::into_inner)
}

fn pending_lock() -> MutexGuard<'static, Vec<(String, VisibilityFlag)>> {
    PENDING_TOGGLES.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Runs `f`, reporting a panic to `Log.txt` and substituting `default`.
fn guard_callback<R>(name: &str, default: R, f: impl FnOnce() -> R) -> R {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => value,
        Err(_) => {
            ffi::debug_string(&format!("xplane-imgui: panic in {name}\n"));
            default
        }
    }
}

fn level_filter(name: &str) -> LevelFilter {
    match name.to_ascii_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Debug,
    }
}

/// Copies `text` into one of the sim's 256-byte start strings.
unsafe fn write_cstr(dst: *mut c_char, text: &str) {
    let bytes = text.as_bytes();
    let len = bytes.len().min(255);
    ptr::copy_nonoverlapping(bytes.as_ptr().cast::<c_char>(), dst, len);
    *dst.add(len) = 0;
}

/// Adds a Plugins-menu toggle for `flag`, deferring if the menu is not up.
pub(crate) fn add_menu_toggle(label: &str, flag: VisibilityFlag) {
    let mut guard = host_lock();
    if let Some(menu) = guard.0.as_mut().and_then(|state| state.menu.as_mut()) {
        menu.add_toggle(label, flag);
    } else {
        pending_lock().push((label.to_string(), flag));
    }
}

/// Brings the sim-side draw hook in line with the registry.
pub(crate) fn sync_draw_hook() {
    let directive = overlay::with(|o| o.hook_directive()).ok().flatten();
    let Some(directive) = directive else { return };
    let mut guard = host_lock();
    let Some(state) = guard.0.as_mut() else { return };
    match directive {
        HookDirective::Install => install_draw_hook(state),
        HookDirective::Uninstall => uninstall_draw_hook(state),
    }
}

fn install_draw_hook(state: &mut HostState) {
    if !state.draw_hook_installed {
        unsafe {
            ffi::XPLMRegisterDrawCallback(draw_overlay, ffi::XPLM_PHASE_WINDOW, 0, ptr::null_mut());
        }
        state.draw_hook_installed = true;
        info!("per-frame draw hook installed");
    }
}

fn uninstall_draw_hook(state: &mut HostState) {
    if state.draw_hook_installed {
        unsafe {
            ffi::XPLMUnregisterDrawCallback(
                draw_overlay,
                ffi::XPLM_PHASE_WINDOW,
                0,
                ptr::null_mut(),
            );
        }
        state.draw_hook_installed = false;
        info!("per-frame draw hook removed");
    }
}

struct XplmTextureHost;

impl TextureHost for XplmTextureHost {
    fn allocate(&mut self, _gl: &glow::Context) -> Result<u32> {
        let texture = ffi::generate_texture_number();
        u32::try_from(texture)
            .map_err(|_| OverlayError::Texture(format!("sim returned texture id {texture}")))
    }

    fn bind(&self, _gl: &glow::Context, texture: u32) {
        ffi::bind_texture_2d(texture as i32, 0);
    }
}

// Per-frame draw callback, registered in the sim's window drawing phase
// while at least one render callback exists.
unsafe extern "C" fn draw_overlay(
    _phase: ffi::XPLMDrawingPhase,
    _is_before: c_int,
    _refcon: *mut c_void,
) -> c_int {
    guard_callback("draw callback", (), || {
        let timing = {
            let mut guard = host_lock();
            guard.0.as_mut().map(|state| {
                let now = ffi::elapsed_time();
                let delta = now - state.last_frame_time;
                state.last_frame_time = now;
                (delta, state.window.follow_screen_bounds())
            })
        };
        let Some((delta, geometry)) = timing else {
            return;
        };
        let _ = overlay::with(|o| {
            o.update_geometry(geometry);
            o.run_frame(delta)
        });
        sync_draw_hook();
    });
    1
}

// Overlay-window draw handler. The window never draws anything itself; this
// runs queued registry changes while the per-frame hook is uninstalled, so
// the first registration still brings the hook up.
unsafe extern "C" fn window_draw(_window: ffi::XPLMWindowID, _refcon: *mut c_void) {
    guard_callback("window draw handler", (), || {
        let _ = overlay::with(|o| o.apply_deferred());
        sync_draw_hook();
    });
}

fn route_click(x: c_int, y: c_int, status: ffi::XPLMMouseStatus, button: MouseButton) -> c_int {
    let status = match status {
        ffi::XPLM_MOUSE_DOWN => MouseStatus::Down,
        ffi::XPLM_MOUSE_DRAG => MouseStatus::Drag,
        _ => MouseStatus::Up,
    };
    let Ok((disposition, focus)) = overlay::with(|o| {
        let disposition = o.handle_mouse_click(x, y, status, button);
        (disposition, o.take_focus_request())
    }) else {
        return 0;
    };
    if let Some(request) = focus {
        let guard = host_lock();
        if let Some(state) = guard.0.as_ref() {
            state.window.apply_focus(request);
        }
    }
    disposition.as_host_return()
}

unsafe extern "C" fn window_mouse(
    _window: ffi::XPLMWindowID,
    x: c_int,
    y: c_int,
    status: ffi::XPLMMouseStatus,
    _refcon: *mut c_void,
) -> c_int {
    guard_callback("mouse handler", 0, || {
        route_click(x, y, status, MouseButton::Left)
    })
}

unsafe extern "C" fn window_right_mouse(
    _window: ffi::XPLMWindowID,
    x: c_int,
    y: c_int,
    status: ffi::XPLMMouseStatus,
    _refcon: *mut c_void,
) -> c_int {
    guard_callback("right mouse handler", 0, || {
        route_click(x, y, status, MouseButton::Right)
    })
}

unsafe extern "C" fn window_key(
    _window: ffi::XPLMWindowID,
    key: c_char,
    flags: ffi::XPLMKeyFlags,
    virtual_key: c_char,
    _refcon: *mut c_void,
    losing_focus: c_int,
) {
    guard_callback("key handler", (), || {
        let _ = overlay::with(|o| {
            o.handle_key(
                key as u8,
                KeyFlags::from_bits_truncate(flags as u32),
                virtual_key as u8,
                losing_focus != 0,
            );
        });
    });
}

unsafe extern "C" fn window_cursor(
    _window: ffi::XPLMWindowID,
    x: c_int,
    y: c_int,
    _refcon: *mut c_void,
) -> ffi::XPLMCursorStatus {
    guard_callback("cursor handler", ffi::XPLM_CURSOR_DEFAULT, || {
        match overlay::with(|o| o.handle_cursor(x, y)) {
            Ok(HostCursor::Hidden) => ffi::XPLM_CURSOR_HIDDEN,
            Ok(HostCursor::Arrow) => ffi::XPLM_CURSOR_ARROW,
            Ok(HostCursor::Default) | Err(_) => ffi::XPLM_CURSOR_DEFAULT,
        }
    })
}

unsafe extern "C" fn window_wheel(
    _window: ffi::XPLMWindowID,
    x: c_int,
    y: c_int,
    wheel: c_int,
    clicks: c_int,
    _refcon: *mut c_void,
) -> c_int {
    guard_callback("wheel handler", 0, || {
        overlay::with(|o| o.handle_wheel(x, y, WheelAxis::from_wire(wheel), clicks))
            .map_or(0, EventDisposition::as_host_return)
    })
}

fn start() -> String {
    let defaults = OverlayOptions::default();
    if let Err(err) =
        XPlaneLogger::install(&defaults.plugin_name, level_filter(&defaults.log_level))
    {
        ffi::debug_string(&format!(
            "{}: logger install failed: {err}\n",
            defaults.plugin_name
        ));
    }
    info!("{} started", defaults.plugin_name);
    defaults.plugin_name
}

fn enable() -> Result<()> {
    let binary = ffi::plugin_binary_path();
    let mut options = OverlayOptions::load_or_default(&sibling_path(&binary, OPTIONS_FILE));
    log::set_max_level(level_filter(&options.log_level));
    if options.layout_file.is_none() {
        options.layout_file = Some(sibling_path(
            &binary,
            &layout_file_name(&options.plugin_name),
        ));
    }
    let plugin_name = options.plugin_name.clone();
    crate::init_with_options(options)?;

    let gl_library = GlLibrary::open()?;
    let gl =
        unsafe { glow::Context::from_loader_function(|name| gl_library.get_proc_address(name)) };
    overlay::with(|o| o.attach_gl_with_host(gl, Box::new(XplmTextureHost)))?;

    let handlers = WindowHandlers {
        draw: window_draw,
        mouse_click: window_mouse,
        right_click: window_right_mouse,
        key: window_key,
        cursor: window_cursor,
        wheel: window_wheel,
    };
    let (window, geometry) = OverlayWindow::create_fullscreen(handlers)?;
    overlay::with(|o| o.update_geometry(geometry))?;

    let menu = match OverlayMenu::create(&plugin_name) {
        Ok(menu) => Some(menu),
        Err(err) => {
            warn!("continuing without a Plugins-menu entry: {err}");
            None
        }
    };

    let mut state = HostState {
        window,
        menu,
        draw_hook_installed: false,
        last_frame_time: ffi::elapsed_time(),
        _gl_library: gl_library,
    };
    if let Some(menu) = state.menu.as_mut() {
        for (label, flag) in pending_lock().drain(..) {
            menu.add_toggle(&label, flag);
        }
    }

    host_lock().0 = Some(state);
    info!("{plugin_name} enabled");
    Ok(())
}

fn disable() {
    let state = host_lock().0.take();
    let was_enabled = state.is_some();
    if let Some(mut state) = state {
        uninstall_draw_hook(&mut state);
        // Pipeline teardown needs the sim's GL context current, so the
        // overlay comes down before the window and library close.
        if crate::is_initialized() {
            let _ = crate::shutdown();
        }
        drop(state);
    } else if crate::is_initialized() {
        // Enable failed partway through; release the UI context too.
        let _ = crate::shutdown();
    }
    pending_lock().clear();
    if was_enabled {
        info!("overlay disabled");
    }
}

/// # Safety
/// Called by X-Plane with three 256-byte output buffers.
#[no_mangle]
pub unsafe extern "C" fn XPluginStart(
    out_name: *mut c_char,
    out_signature: *mut c_char,
    out_description: *mut c_char,
) -> c_int {
    guard_callback("XPluginStart", 0, || {
        let name = start();
        unsafe {
            write_cstr(out_name, &name);
            write_cstr(out_signature, PLUGIN_SIGNATURE);
            write_cstr(out_description, PLUGIN_DESCRIPTION);
        }
        1
    })
}

#[no_mangle]
pub extern "C" fn XPluginEnable() -> c_int {
    guard_callback("XPluginEnable", 0, || match enable() {
        Ok(()) => 1,
        Err(err) => {
            error!("enable failed: {err}");
            disable();
            0
        }
    })
}

#[no_mangle]
pub extern "C" fn XPluginDisable() {
    guard_callback("XPluginDisable", (), disable);
}

#[no_mangle]
pub extern "C" fn XPluginStop() {
    guard_callback("XPluginStop", (), || {
        disable();
        log::logger().flush();
    });
}

#[no_mangle]
pub extern "C" fn XPluginReceiveMessage(_from: c_int, _message: c_int, _param: *mut c_void) {}
