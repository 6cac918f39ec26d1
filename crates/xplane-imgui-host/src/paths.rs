//! File-name and path derivation for files living next to the plugin binary.
//!
//! The sim reports where the plugin binary was loaded from; the log file,
//! the options file, and the UI layout file all live in that directory.

use std::path::{Path, PathBuf};

/// File name of the optional JSON options file.
pub const OPTIONS_FILE: &str = "overlay_options.json";

/// Replaces every character that is not alphanumeric or `_` with `_`, so a
/// display name can be used as a file name on any platform.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Log file name for a plugin display name.
pub fn log_file_name(plugin_name: &str) -> String {
    format!("{}.log", sanitize_name(plugin_name))
}

/// Layout (ini) file name for a plugin display name.
pub fn layout_file_name(plugin_name: &str) -> String {
    format!("{}.ini", sanitize_name(plugin_name))
}

/// Resolves `file_name` next to the plugin binary.
///
/// Falls back to the bare file name (current working directory) when the
/// binary path has no parent, so a misreported path degrades instead of
/// failing.
pub fn sibling_path(plugin_binary: &Path, file_name: &str) -> PathBuf {
    match plugin_binary.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(file_name),
        _ => PathBuf::from(file_name),
    }
}
