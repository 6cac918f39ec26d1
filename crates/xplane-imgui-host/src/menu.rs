//! A submenu under the sim's Plugins menu toggling overlay windows.
//!
//! One item per labeled window; clicking an item flips the window's
//! visibility flag and updates the checkmark. The item index doubles as the
//! handler refcon, the same scheme the sim's own samples use.

use std::ffi::CString;
use std::os::raw::c_void;

use log::warn;
use xplane_imgui_core::registry::VisibilityFlag;
use xplane_imgui_core::{OverlayError, Result};

use crate::ffi;

struct MenuState {
    menu_id: ffi::XPLMMenuID,
    toggles: Vec<VisibilityFlag>,
}

/// Owning handle to the overlay submenu; removes it on drop.
pub struct OverlayMenu {
    // Boxed so the handler refcon stays valid while items are appended.
    state: Box<MenuState>,
    plugins_item: i32,
}

impl OverlayMenu {
    /// Creates an empty submenu titled `title` under the Plugins menu.
    pub fn create(title: &str) -> Result<Self> {
        let c_title =
            CString::new(title.replace('\0', "_")).map_err(|_| OverlayError::WindowCreation)?;

        let mut state = Box::new(MenuState {
            menu_id: std::ptr::null_mut(),
            toggles: Vec::new(),
        });
        let state_ptr: *mut MenuState = &mut *state;

        unsafe {
            let plugins_menu = ffi::XPLMFindPluginsMenu();
            let plugins_item =
                ffi::XPLMAppendMenuItem(plugins_menu, c_title.as_ptr(), std::ptr::null_mut(), 1);
            let menu_id = ffi::XPLMCreateMenu(
                c_title.as_ptr(),
                plugins_menu,
                plugins_item,
                Some(menu_handler),
                state_ptr.cast::<c_void>(),
            );
            if menu_id.is_null() {
                ffi::XPLMRemoveMenuItem(plugins_menu, plugins_item);
                return Err(OverlayError::WindowCreation);
            }
            state.menu_id = menu_id;
            Ok(Self {
                state,
                plugins_item,
            })
        }
    }

    /// Appends a checkable item driving `flag`.
    pub fn add_toggle(&mut self, label: &str, flag: VisibilityFlag) {
        let Ok(c_label) = CString::new(label) else {
            warn!("skipping menu item with NUL in label: {label}");
            return;
        };
        let index = self.state.toggles.len();
        unsafe {
            ffi::XPLMAppendMenuItem(self.state.menu_id, c_label.as_ptr(), index as *mut c_void, 1);
            ffi::XPLMCheckMenuItem(self.state.menu_id, index as i32, check_value(flag.get()));
        }
        self.state.toggles.push(flag);
    }
}

impl Drop for OverlayMenu {
    fn drop(&mut self) {
        unsafe {
            ffi::XPLMClearAllMenuItems(self.state.menu_id);
            ffi::XPLMDestroyMenu(self.state.menu_id);
            ffi::XPLMRemoveMenuItem(ffi::XPLMFindPluginsMenu(), self.plugins_item);
        }
    }
}

fn check_value(visible: bool) -> i32 {
    if visible {
        ffi::XPLM_MENU_CHECKED
    } else {
        ffi::XPLM_MENU_UNCHECKED
    }
}

unsafe extern "C" fn menu_handler(menu_ref: *mut c_void, item_ref: *mut c_void) {
    let state = &*menu_ref.cast::<MenuState>();
    let index = item_ref as usize;
    if let Some(flag) = state.toggles.get(index) {
        let visible = flag.toggle();
        ffi::XPLMCheckMenuItem(state.menu_id, index as i32, check_value(visible));
    }
}
