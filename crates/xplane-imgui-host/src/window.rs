//! The transparent full-screen overlay window.
//!
//! One undecorated window on the floating-windows layer spans the whole
//! desktop; it exists to receive input and to give the overlay a draw
//! handler for per-frame maintenance. All actual drawing happens in the
//! sim's window drawing phase, not in the window itself.

use std::os::raw::c_void;
use std::ptr;

use log::info;
use xplane_imgui_core::{FocusRequest, OverlayError, Result, WindowGeometry};

use crate::ffi;

/// The callback set wired into the overlay window.
///
/// The facade supplies `extern "C"` shims here because the refcon-free
/// global slot lives on its side.
#[derive(Clone, Copy)]
pub struct WindowHandlers {
    pub draw: ffi::XPLMDrawWindowF,
    pub mouse_click: ffi::XPLMHandleMouseClickF,
    pub right_click: ffi::XPLMHandleMouseClickF,
    pub key: ffi::XPLMHandleKeyF,
    pub cursor: ffi::XPLMHandleCursorF,
    pub wheel: ffi::XPLMHandleMouseWheelF,
}

/// Owning handle to the overlay window; destroys it on drop.
pub struct OverlayWindow {
    id: ffi::XPLMWindowID,
}

impl OverlayWindow {
    /// Creates the undecorated full-screen window over the global desktop.
    ///
    /// The lower-left of the primary monitor is not necessarily (0, 0), so
    /// the rectangle starts at the global bounds origin and extends by the
    /// main-window size.
    pub fn create_fullscreen(handlers: WindowHandlers) -> Result<(Self, WindowGeometry)> {
        let (left, _, _, bottom) = ffi::screen_bounds_global();
        let (width, height) = ffi::screen_size();
        let geometry = WindowGeometry::from_bounds(left, bottom + height, left + width, bottom);

        let mut params = ffi::XPLMCreateWindowT {
            struct_size: std::mem::size_of::<ffi::XPLMCreateWindowT>() as i32,
            left: geometry.left,
            top: geometry.top,
            right: geometry.right,
            bottom: geometry.bottom,
            visible: 1,
            draw_window_func: handlers.draw,
            handle_mouse_click_func: handlers.mouse_click,
            handle_key_func: handlers.key,
            handle_cursor_func: handlers.cursor,
            handle_mouse_wheel_func: handlers.wheel,
            refcon: ptr::null_mut(),
            decorate_as_floating_window: ffi::XPLM_WINDOW_DECORATION_NONE,
            layer: ffi::XPLM_WINDOW_LAYER_FLOATING_WINDOWS,
            handle_right_click_func: handlers.right_click,
        };

        let id = unsafe { ffi::XPLMCreateWindowEx(&mut params) };
        if id.is_null() {
            return Err(OverlayError::WindowCreation);
        }
        info!(
            "overlay window created over [{}, {}] x [{}, {}]",
            geometry.left, geometry.bottom, geometry.right, geometry.top
        );
        Ok((Self { id }, geometry))
    }

    /// Fresh window bounds as the sim reports them.
    pub fn geometry(&self) -> WindowGeometry {
        let (mut left, mut top, mut right, mut bottom) = (0, 0, 0, 0);
        unsafe {
            ffi::XPLMGetWindowGeometry(self.id, &mut left, &mut top, &mut right, &mut bottom);
        }
        WindowGeometry::from_bounds(left, top, right, bottom)
    }

    /// Re-stretches the window over the current global desktop if the
    /// monitor layout changed, returning the up-to-date bounds.
    pub fn follow_screen_bounds(&self) -> WindowGeometry {
        let (left, _, _, bottom) = ffi::screen_bounds_global();
        let (width, height) = ffi::screen_size();
        let desired = WindowGeometry::from_bounds(left, bottom + height, left + width, bottom);
        let current = self.geometry();
        if current != desired {
            unsafe {
                ffi::XPLMSetWindowGeometry(
                    self.id,
                    desired.left,
                    desired.top,
                    desired.right,
                    desired.bottom,
                );
            }
        }
        desired
    }

    /// Performs a keyboard-focus action the translator requested.
    ///
    /// `Acquire` also brings the window to the front so subsequent key
    /// events route to it; `Release` hands focus back to the sim (a null
    /// window id means "X-Plane itself" in the SDK).
    pub fn apply_focus(&self, request: FocusRequest) {
        unsafe {
            match request {
                FocusRequest::Acquire => {
                    ffi::XPLMTakeKeyboardFocus(self.id);
                    ffi::XPLMBringWindowToFront(self.id);
                }
                FocusRequest::Release => ffi::XPLMTakeKeyboardFocus(ptr::null_mut()),
            }
        }
    }

    /// The raw window id, for comparing against callback arguments.
    pub fn id(&self) -> *mut c_void {
        self.id
    }
}

impl Drop for OverlayWindow {
    fn drop(&mut self) {
        unsafe { ffi::XPLMDestroyWindow(self.id) };
    }
}
