//! Runtime OpenGL symbol resolution.
//!
//! The sim owns the GL context; the overlay only needs the function
//! pointers. They are resolved from the system GL library at enable time and
//! fed to the renderer's loader.

use std::ffi::c_void;

use xplane_imgui_core::{OverlayError, Result};

#[cfg(target_os = "linux")]
const GL_LIBRARY_NAMES: &[&str] = &["libGL.so.1", "libGL.so"];
#[cfg(target_os = "windows")]
const GL_LIBRARY_NAMES: &[&str] = &["opengl32.dll"];
#[cfg(target_os = "macos")]
const GL_LIBRARY_NAMES: &[&str] =
    &["/System/Library/Frameworks/OpenGL.framework/Versions/A/OpenGL"];

/// Open handle to the system GL library.
pub struct GlLibrary {
    library: libloading::Library,
}

impl GlLibrary {
    /// Opens the platform GL library.
    pub fn open() -> Result<Self> {
        let mut last_error = String::new();
        for name in GL_LIBRARY_NAMES {
            match unsafe { libloading::Library::new(name) } {
                Ok(library) => return Ok(Self { library }),
                Err(err) => last_error = format!("{name}: {err}"),
            }
        }
        Err(OverlayError::GlLoad(last_error))
    }

    /// Resolves one GL entry point, null when absent.
    pub fn get_proc_address(&self, name: &str) -> *const c_void {
        match unsafe { self.library.get::<unsafe extern "C" fn()>(name.as_bytes()) } {
            Ok(symbol) => *symbol as *const c_void,
            Err(_) => std::ptr::null(),
        }
    }
}
