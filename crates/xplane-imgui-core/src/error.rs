//! Error types for the overlay workspace.

use thiserror::Error;

/// The main error type for overlay operations.
#[derive(Error, Debug)]
pub enum OverlayError {
    /// The overlay has not been initialized.
    #[error("overlay not initialized - call xplane_imgui::init() first")]
    NotInitialized,

    /// The overlay has already been initialized.
    #[error("overlay already initialized")]
    AlreadyInitialized,

    /// No registration matches the given handle.
    #[error("no render callback registered under handle {0}")]
    UnknownHandle(u64),

    /// A font could not be loaded or added to the atlas.
    #[error("font error: {0}")]
    Font(String),

    /// A GL shader failed to compile.
    #[error("shader compile error: {0}")]
    ShaderCompile(String),

    /// The GL program failed to link.
    #[error("program link error: {0}")]
    ProgramLink(String),

    /// A GPU texture could not be allocated or uploaded.
    #[error("texture error: {0}")]
    Texture(String),

    /// A GL object (buffer, vertex array) could not be created.
    #[error("render resource error: {0}")]
    RenderResource(String),

    /// The OpenGL entry points could not be resolved.
    #[error("OpenGL loader error: {0}")]
    GlLoad(String),

    /// The host refused to create the overlay window.
    #[error("overlay window creation failed")]
    WindowCreation,

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for overlay operations.
pub type Result<T> = std::result::Result<T, OverlayError>;
