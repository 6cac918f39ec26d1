//! Plugin logging behind the `log` facade.
//!
//! Two sinks: a line-buffered file next to the plugin binary, and the sim's
//! debug-string channel (which lands in `Log.txt`). Records are flushed on
//! info or worse so a crash loses at most debug chatter.

use log::Level;

/// Formats one log record as a single line.
///
/// Embedded CR/LF are stripped so multi-line payloads cannot forge extra
/// records; every line ends in exactly one newline. The level name is
/// uppercase, matching the sim's own log style.
pub fn format_line(timestamp: &str, level: Level, message: &str) -> String {
    let clean: String = message.chars().filter(|&c| c != '\r' && c != '\n').collect();
    format!("{timestamp} [{level}] {clean}\n")
}

#[cfg(feature = "xplm")]
pub use xplm_impl::XPlaneLogger;

#[cfg(feature = "xplm")]
mod xplm_impl {
    use std::fs::File;
    use std::io::{BufWriter, Write};
    use std::sync::Mutex;

    use log::{LevelFilter, Log, Metadata, Record};
    use xplane_imgui_core::Result;

    use super::format_line;
    use crate::ffi;
    use crate::paths::{log_file_name, sibling_path};

    /// `log::Log` implementation writing to the plugin log file and the
    /// sim's debug channel.
    pub struct XPlaneLogger {
        level: LevelFilter,
        file: Mutex<Option<BufWriter<File>>>,
    }

    impl XPlaneLogger {
        /// Installs the logger as the global `log` backend.
        ///
        /// The log file is `<sanitized plugin name>.log` next to the plugin
        /// binary, truncated on each start. A file that cannot be opened
        /// degrades to the debug channel alone.
        pub fn install(plugin_name: &str, level: LevelFilter) -> Result<()> {
            let path = sibling_path(&ffi::plugin_binary_path(), &log_file_name(plugin_name));
            let file = File::create(&path).ok().map(BufWriter::new);
            if file.is_none() {
                ffi::debug_string(&format!(
                    "{plugin_name}: cannot open {}, logging to Log.txt only\n",
                    path.display()
                ));
            }
            let logger = Self {
                level,
                file: Mutex::new(file),
            };
            log::set_boxed_logger(Box::new(logger))
                .map_err(|err| std::io::Error::other(err.to_string()))?;
            log::set_max_level(level);
            Ok(())
        }
    }

    impl Log for XPlaneLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= self.level
        }

        fn log(&self, record: &Record) {
            if !self.enabled(record.metadata()) {
                return;
            }
            let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
            let line = format_line(&timestamp, record.level(), &record.args().to_string());

            if let Ok(mut guard) = self.file.lock() {
                if let Some(file) = guard.as_mut() {
                    let _ = file.write_all(line.as_bytes());
                    if record.level() <= log::Level::Info {
                        let _ = file.flush();
                    }
                }
            }
            ffi::debug_string(&line);
        }

        fn flush(&self) {
            if let Ok(mut guard) = self.file.lock() {
                if let Some(file) = guard.as_mut() {
                    let _ = file.flush();
                }
            }
        }
    }
}
