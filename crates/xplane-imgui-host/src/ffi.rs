//! C ABI of the X-Plane SDK, limited to what the overlay uses.
//!
//! Declarations follow `XPLMDisplay.h`, `XPLMMenus.h`, `XPLMGraphics.h`,
//! `XPLMUtilities.h`, `XPLMPlugin.h`, and `XPLMProcessing.h`. The symbols
//! resolve against the running sim when the plugin is loaded; nothing here
//! can be called outside that environment.

use std::ffi::CString;
use std::os::raw::{c_char, c_float, c_int, c_void};
use std::path::PathBuf;

pub type XPLMWindowID = *mut c_void;
pub type XPLMMenuID = *mut c_void;
pub type XPLMPluginID = c_int;
pub type XPLMMouseStatus = c_int;
pub type XPLMCursorStatus = c_int;
pub type XPLMKeyFlags = c_int;
pub type XPLMDrawingPhase = c_int;

pub const XPLM_MOUSE_DOWN: XPLMMouseStatus = 1;
pub const XPLM_MOUSE_DRAG: XPLMMouseStatus = 2;
pub const XPLM_MOUSE_UP: XPLMMouseStatus = 3;

pub const XPLM_CURSOR_DEFAULT: XPLMCursorStatus = 0;
pub const XPLM_CURSOR_HIDDEN: XPLMCursorStatus = 1;
pub const XPLM_CURSOR_ARROW: XPLMCursorStatus = 2;

pub const XPLM_WINDOW_LAYER_FLOATING_WINDOWS: c_int = 1;
pub const XPLM_WINDOW_DECORATION_NONE: c_int = 0;

pub const XPLM_PHASE_WINDOW: XPLMDrawingPhase = 50;

pub const XPLM_MENU_UNCHECKED: c_int = 1;
pub const XPLM_MENU_CHECKED: c_int = 2;

pub type XPLMDrawWindowF = unsafe extern "C" fn(XPLMWindowID, *mut c_void);
pub type XPLMHandleMouseClickF =
    unsafe extern "C" fn(XPLMWindowID, c_int, c_int, XPLMMouseStatus, *mut c_void) -> c_int;
pub type XPLMHandleKeyF =
    unsafe extern "C" fn(XPLMWindowID, c_char, XPLMKeyFlags, c_char, *mut c_void, c_int);
pub type XPLMHandleCursorF =
    unsafe extern "C" fn(XPLMWindowID, c_int, c_int, *mut c_void) -> XPLMCursorStatus;
pub type XPLMHandleMouseWheelF =
    unsafe extern "C" fn(XPLMWindowID, c_int, c_int, c_int, c_int, *mut c_void) -> c_int;
pub type XPLMDrawCallbackF =
    unsafe extern "C" fn(XPLMDrawingPhase, c_int, *mut c_void) -> c_int;
pub type XPLMMenuHandlerF = unsafe extern "C" fn(*mut c_void, *mut c_void);

/// `XPLMCreateWindow_t`, XPLM300 layout.
#[repr(C)]
pub struct XPLMCreateWindowT {
    pub struct_size: c_int,
    pub left: c_int,
    pub top: c_int,
    pub right: c_int,
    pub bottom: c_int,
    pub visible: c_int,
    pub draw_window_func: XPLMDrawWindowF,
    pub handle_mouse_click_func: XPLMHandleMouseClickF,
    pub handle_key_func: XPLMHandleKeyF,
    pub handle_cursor_func: XPLMHandleCursorF,
    pub handle_mouse_wheel_func: XPLMHandleMouseWheelF,
    pub refcon: *mut c_void,
    pub decorate_as_floating_window: c_int,
    pub layer: c_int,
    pub handle_right_click_func: XPLMHandleMouseClickF,
}

extern "C" {
    pub fn XPLMCreateWindowEx(params: *mut XPLMCreateWindowT) -> XPLMWindowID;
    pub fn XPLMDestroyWindow(window: XPLMWindowID);
    pub fn XPLMGetWindowGeometry(
        window: XPLMWindowID,
        left: *mut c_int,
        top: *mut c_int,
        right: *mut c_int,
        bottom: *mut c_int,
    );
    pub fn XPLMSetWindowGeometry(
        window: XPLMWindowID,
        left: c_int,
        top: c_int,
        right: c_int,
        bottom: c_int,
    );
    pub fn XPLMGetScreenBoundsGlobal(
        left: *mut c_int,
        top: *mut c_int,
        right: *mut c_int,
        bottom: *mut c_int,
    );
    pub fn XPLMGetScreenSize(width: *mut c_int, height: *mut c_int);
    pub fn XPLMTakeKeyboardFocus(window: XPLMWindowID);
    pub fn XPLMBringWindowToFront(window: XPLMWindowID);
    pub fn XPLMRegisterDrawCallback(
        callback: XPLMDrawCallbackF,
        phase: XPLMDrawingPhase,
        want_before: c_int,
        refcon: *mut c_void,
    ) -> c_int;
    pub fn XPLMUnregisterDrawCallback(
        callback: XPLMDrawCallbackF,
        phase: XPLMDrawingPhase,
        want_before: c_int,
        refcon: *mut c_void,
    ) -> c_int;

    pub fn XPLMFindPluginsMenu() -> XPLMMenuID;
    pub fn XPLMAppendMenuItem(
        menu: XPLMMenuID,
        item_name: *const c_char,
        item_ref: *mut c_void,
        deprecated: c_int,
    ) -> c_int;
    pub fn XPLMCreateMenu(
        name: *const c_char,
        parent_menu: XPLMMenuID,
        parent_item: c_int,
        handler: Option<XPLMMenuHandlerF>,
        menu_ref: *mut c_void,
    ) -> XPLMMenuID;
    pub fn XPLMCheckMenuItem(menu: XPLMMenuID, index: c_int, check: c_int);
    pub fn XPLMClearAllMenuItems(menu: XPLMMenuID);
    pub fn XPLMRemoveMenuItem(menu: XPLMMenuID, index: c_int);
    pub fn XPLMDestroyMenu(menu: XPLMMenuID);

    pub fn XPLMDebugString(string: *const c_char);
    pub fn XPLMGetMyID() -> XPLMPluginID;
    pub fn XPLMGetPluginInfo(
        plugin: XPLMPluginID,
        out_name: *mut c_char,
        out_file_path: *mut c_char,
        out_signature: *mut c_char,
        out_description: *mut c_char,
    );

    pub fn XPLMGenerateTextureNumbers(out_texture_ids: *mut c_int, count: c_int);
    pub fn XPLMBindTexture2d(texture_num: c_int, texture_unit: c_int);

    pub fn XPLMGetElapsedTime() -> c_float;
}

/// Writes a line to the sim's `Log.txt` channel. Embedded NULs are dropped.
pub fn debug_string(message: &str) {
    if let Ok(cstring) = CString::new(message) {
        unsafe { XPLMDebugString(cstring.as_ptr()) };
    }
}

/// Global desktop bounds as `(left, top, right, bottom)`.
pub fn screen_bounds_global() -> (i32, i32, i32, i32) {
    let (mut left, mut top, mut right, mut bottom) = (0, 0, 0, 0);
    unsafe { XPLMGetScreenBoundsGlobal(&mut left, &mut top, &mut right, &mut bottom) };
    (left, top, right, bottom)
}

/// Main-window size in boxels.
pub fn screen_size() -> (i32, i32) {
    let (mut width, mut height) = (0, 0);
    unsafe { XPLMGetScreenSize(&mut width, &mut height) };
    (width, height)
}

/// Seconds since the sim started.
pub fn elapsed_time() -> f32 {
    unsafe { XPLMGetElapsedTime() }
}

/// Allocates one texture name through the sim's texture numbering.
pub fn generate_texture_number() -> i32 {
    let mut texture = 0;
    unsafe { XPLMGenerateTextureNumbers(&mut texture, 1) };
    texture
}

/// Binds a sim-tracked texture to the given unit.
pub fn bind_texture_2d(texture: i32, unit: i32) {
    unsafe { XPLMBindTexture2d(texture, unit) };
}

/// Absolute path of this plugin's binary, as the sim reports it.
pub fn plugin_binary_path() -> PathBuf {
    let mut buf = [0u8; 512];
    unsafe {
        XPLMGetPluginInfo(
            XPLMGetMyID(),
            std::ptr::null_mut(),
            buf.as_mut_ptr().cast::<c_char>(),
            std::ptr::null_mut(),
            std::ptr::null_mut(),
        );
    }
    let len = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    PathBuf::from(String::from_utf8_lossy(&buf[..len]).into_owned())
}
