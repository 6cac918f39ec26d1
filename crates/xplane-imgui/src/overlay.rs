//! The process-wide overlay instance.
//!
//! One [`Overlay`] owns the UI context, the translation session, and the GL
//! pipeline state. It lives in a private global slot because the host's
//! callback ABI carries no useful closure state; everything public in the
//! crate root goes through [`with`].

use std::sync::{Mutex, MutexGuard, PoisonError};

use imgui::Ui;
use log::{error, info, warn};
use xplane_imgui_core::{
    EventDisposition, FocusRequest, HookDirective, HostCursor, KeyFlags, MouseButton, MouseStatus,
    OverlayError, OverlayOptions, OverlaySession, RenderHandle, Result, SessionQueue, UiCapture,
    VisibilityFlag, WheelAxis, WindowGeometry,
};
use xplane_imgui_render::{configure_atlas, FontSettings, GlTextureHost, GlowRenderer, TextureHost};

use crate::frame::{self, FrameStats};

/// GL pipeline lifecycle.
///
/// The pipeline is built lazily inside the first frame after a context is
/// attached, because building needs that context current and attachment
/// happens at plugin enable, outside any draw callback.
enum RendererState {
    /// No GL context attached; frames still run, draw data is discarded.
    Headless,
    /// Context attached, pipeline not yet built.
    Pending {
        gl: glow::Context,
        host: Box<dyn TextureHost>,
    },
    /// Pipeline live.
    Ready {
        gl: glow::Context,
        renderer: GlowRenderer,
        host: Box<dyn TextureHost>,
    },
    /// Pipeline construction failed; the overlay stays input-only.
    Disabled,
}

/// The overlay: UI context, translation session, and render pipeline.
pub(crate) struct Overlay {
    ctx: imgui::Context,
    session: OverlaySession<Ui>,
    options: OverlayOptions,
    renderer: RendererState,
}

impl Overlay {
    fn new(options: OverlayOptions) -> Result<Self> {
        let mut ctx = imgui::Context::create();
        ctx.set_ini_filename(options.layout_file.clone());
        ctx.set_platform_name(Some(format!("xplane-imgui {}", env!("CARGO_PKG_VERSION"))));
        if options.dark_style {
            ctx.style_mut().use_dark_colors();
        }

        let fonts = FontSettings {
            size_px: options.font_size_px,
            ttf_file: options.font_file.clone(),
            ..FontSettings::default()
        };
        if let Err(err) = configure_atlas(&mut ctx, &fonts) {
            warn!("falling back to the built-in font: {err}");
        }

        info!("overlay initialized for {}", options.plugin_name);
        Ok(Self {
            ctx,
            session: OverlaySession::new(),
            options,
            renderer: RendererState::Headless,
        })
    }

    pub(crate) fn options(&self) -> &OverlayOptions {
        &self.options
    }

    pub(crate) fn register(
        &mut self,
        render: impl FnMut(&mut Ui) + 'static,
        visible: Option<VisibilityFlag>,
    ) -> RenderHandle {
        self.session.register(render, visible)
    }

    pub(crate) fn unregister(&mut self, handle: RenderHandle) -> Result<()> {
        self.session.unregister(handle)
    }

    pub(crate) fn queue_handle(&self) -> SessionQueue<Ui> {
        self.session.queue_handle()
    }

    pub(crate) fn callback_count(&self) -> usize {
        self.session.callback_count()
    }

    pub(crate) fn update_geometry(&mut self, geometry: WindowGeometry) {
        self.session.update_geometry(geometry);
    }

    pub(crate) fn handle_mouse_click(
        &mut self,
        x: i32,
        y: i32,
        status: MouseStatus,
        button: MouseButton,
    ) -> EventDisposition {
        self.session.handle_mouse_click(x, y, status, button)
    }

    pub(crate) fn handle_cursor(&mut self, x: i32, y: i32) -> HostCursor {
        self.session.handle_cursor(x, y)
    }

    pub(crate) fn handle_wheel(
        &mut self,
        x: i32,
        y: i32,
        axis: WheelAxis,
        clicks: i32,
    ) -> EventDisposition {
        self.session.handle_wheel(x, y, axis, clicks)
    }

    pub(crate) fn handle_key(
        &mut self,
        key_char: u8,
        flags: KeyFlags,
        virtual_key: u8,
        losing_focus: bool,
    ) {
        self.session
            .handle_key(key_char, flags, virtual_key, losing_focus);
    }

    pub(crate) fn take_focus_request(&mut self) -> Option<FocusRequest> {
        self.session.take_focus_request()
    }

    pub(crate) fn hook_directive(&mut self) -> Option<HookDirective> {
        self.session.hook_directive()
    }

    pub(crate) fn apply_deferred(&mut self) {
        self.session.apply_deferred();
    }

    pub(crate) fn capture(&self) -> UiCapture {
        self.session.capture()
    }

    /// Attaches a GL context using plain-GL texture allocation.
    pub(crate) fn attach_gl(&mut self, gl: glow::Context) {
        self.attach_gl_with_host(gl, Box::new(GlTextureHost));
    }

    /// Attaches a GL context with a custom texture allocator.
    ///
    /// The pipeline is built inside the next frame, which must run with this
    /// context current.
    pub(crate) fn attach_gl_with_host(&mut self, gl: glow::Context, host: Box<dyn TextureHost>) {
        self.renderer = RendererState::Pending { gl, host };
    }

    /// Tears down the GL pipeline and returns to headless operation.
    ///
    /// Must run with the attached context current, so it belongs in the
    /// host's disable path, not in Drop.
    pub(crate) fn detach_gl(&mut self) {
        let state = std::mem::replace(&mut self.renderer, RendererState::Headless);
        if let RendererState::Ready {
            gl, mut renderer, ..
        } = state
        {
            renderer.destroy(&gl);
            info!("GL pipeline destroyed");
        }
    }

    fn promote_renderer(&mut self) {
        if !matches!(self.renderer, RendererState::Pending { .. }) {
            return;
        }
        let state = std::mem::replace(&mut self.renderer, RendererState::Disabled);
        if let RendererState::Pending { gl, mut host } = state {
            match GlowRenderer::new(&gl, &mut self.ctx, host.as_mut()) {
                Ok(renderer) => {
                    info!(
                        "GL pipeline ready, font atlas in texture {}",
                        renderer.font_texture()
                    );
                    self.renderer = RendererState::Ready { gl, renderer, host };
                }
                Err(err) => {
                    error!("GL pipeline unavailable, overlay will not draw: {err}");
                }
            }
        }
    }

    /// Runs one overlay frame.
    ///
    /// Applies deferred registry changes, feeds queued input to the UI,
    /// invokes the visible render callbacks, stores the new capture flags,
    /// and submits the resulting draw data if a pipeline is live.
    pub(crate) fn run_frame(&mut self, delta_seconds: f32) -> FrameStats {
        self.session.apply_deferred();
        self.promote_renderer();

        let geometry = self.session.geometry();
        let io = self.ctx.io_mut();
        io.display_size = [geometry.width as f32, geometry.height as f32];
        // The UI library rejects non-positive frame deltas.
        io.delta_time = delta_seconds.max(1e-4);
        frame::apply_events(io, self.session.drain_events());

        let ui = self.ctx.new_frame();
        let invoked = self.session.run_frame(&mut *ui);
        self.session.set_capture(frame::read_capture(ui));

        let draw_data = self.ctx.render();
        let stats = FrameStats {
            callbacks: invoked,
            draw_lists: draw_data.draw_lists_count(),
            vertices: draw_data.total_vtx_count as usize,
            indices: draw_data.total_idx_count as usize,
        };

        if let RendererState::Ready { gl, renderer, host } = &mut self.renderer {
            if let Err(err) = renderer.render(gl, draw_data, host.as_ref()) {
                error!("draw submission failed: {err}");
            }
        }
        stats
    }
}

/// Wrapper making the slot storable in a static.
///
/// Neither the UI context nor the GL context is `Send`; the sim drives every
/// entry point from its main thread, so the slot is only ever locked there.
struct Slot(Option<Overlay>);

#[allow(unsafe_code)]
unsafe impl Send for Slot {}

static OVERLAY: Mutex<Slot> = Mutex::new(Slot(None));

fn lock() -> MutexGuard<'static, Slot> {
    OVERLAY.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Creates the overlay in the global slot.
pub(crate) fn install(options: OverlayOptions) -> Result<()> {
    // Inside the plugin the sim logger is installed before this runs.
    #[cfg(not(feature = "plugin"))]
    let _ = env_logger::try_init();

    let mut guard = lock();
    if guard.0.is_some() {
        return Err(OverlayError::AlreadyInitialized);
    }
    guard.0 = Some(Overlay::new(options)?);
    Ok(())
}

/// Destroys the overlay, releasing the UI context and any GL resources.
pub(crate) fn uninstall() -> Result<()> {
    let mut guard = lock();
    match guard.0.take() {
        Some(mut overlay) => {
            overlay.detach_gl();
            info!("overlay shut down");
            Ok(())
        }
        None => Err(OverlayError::NotInitialized),
    }
}

pub(crate) fn is_installed() -> bool {
    lock().0.is_some()
}

/// Runs `f` against the installed overlay.
pub(crate) fn with<R>(f: impl FnOnce(&mut Overlay) -> R) -> Result<R> {
    match lock().0.as_mut() {
        Some(overlay) => Ok(f(overlay)),
        None => Err(OverlayError::NotInitialized),
    }
}
