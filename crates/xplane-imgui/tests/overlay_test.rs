//! End-to-end exercise of the overlay without a sim: headless frames drive
//! the real UI context through the public API, covering registration order,
//! input routing, focus handoff, visibility toggles, and the draw-hook
//! transitions.
//!
//! Everything lives in one test because the UI library allows a single live
//! context per process.

use std::sync::{Arc, Mutex};

use xplane_imgui::imgui::Condition;
use xplane_imgui::{
    EventDisposition, FocusRequest, HookDirective, HostCursor, KeyFlags, MouseButton, MouseStatus,
    OverlayError, OverlayOptions, WheelAxis, WindowGeometry,
};

const DT: f32 = 1.0 / 60.0;

/// Pumps frames until `done` holds. Queued button transitions reach the UI
/// one per frame, so capture flags can take several frames to settle after
/// a burst of events.
fn run_until(done: impl Fn() -> bool) {
    for _ in 0..8 {
        xplane_imgui::run_frame(DT).unwrap();
        if done() {
            return;
        }
    }
    panic!("capture flags did not settle");
}

#[test]
fn test_overlay_lifecycle_headless() {
    let _ = env_logger::builder().is_test(true).try_init();

    assert!(!xplane_imgui::is_initialized());
    assert!(matches!(
        xplane_imgui::run_frame(DT),
        Err(OverlayError::NotInitialized)
    ));

    let options = OverlayOptions {
        plugin_name: "Overlay Test".to_string(),
        layout_file: None,
        ..OverlayOptions::default()
    };
    xplane_imgui::init_with_options(options).unwrap();
    assert!(xplane_imgui::is_initialized());
    assert_eq!(xplane_imgui::options().unwrap().plugin_name, "Overlay Test");
    assert!(matches!(
        xplane_imgui::init(),
        Err(OverlayError::AlreadyInitialized)
    ));

    xplane_imgui::update_geometry(WindowGeometry::from_bounds(0, 600, 800, 0)).unwrap();

    let order = Arc::new(Mutex::new(Vec::new()));

    let first = Arc::clone(&order);
    let background =
        xplane_imgui::register(move |_ui| first.lock().unwrap().push(1), None).unwrap();
    assert_eq!(
        xplane_imgui::hook_directive().unwrap(),
        Some(HookDirective::Install)
    );
    assert_eq!(xplane_imgui::hook_directive().unwrap(), None);

    let second = Arc::clone(&order);
    let panel = xplane_imgui::register(
        move |ui| {
            ui.window("panel")
                .position([10.0, 10.0], Condition::Always)
                .size([200.0, 100.0], Condition::Always)
                .build(|| {
                    second.lock().unwrap().push(2);
                    ui.text("panel body");
                });
        },
        None,
    )
    .unwrap();

    let third = Arc::clone(&order);
    let (stats_handle, stats_visible) = xplane_imgui::register_window("stats", move |ui| {
        third.lock().unwrap().push(3);
        ui.text("frame stats");
    })
    .unwrap();

    assert_eq!(xplane_imgui::callback_count().unwrap(), 3);

    let stats = xplane_imgui::run_frame(DT).unwrap();
    assert_eq!(stats.callbacks, 3);
    assert!(stats.draw_lists > 0);
    assert!(stats.vertices > 0);
    assert_eq!(*order.lock().unwrap(), vec![1, 2, 3]);

    // Host (50, 550) flips to UI (50, 50), inside the panel. Capture flags
    // answer on the following frame: an immediate-mode UI only knows what
    // it wants after drawing.
    assert_eq!(
        xplane_imgui::handle_cursor(50, 550).unwrap(),
        HostCursor::Default
    );
    run_until(|| xplane_imgui::capture().unwrap().wants_mouse);
    assert_eq!(
        xplane_imgui::handle_cursor(50, 550).unwrap(),
        HostCursor::Arrow
    );

    // An owned click gesture is consumed and pulls keyboard focus in.
    assert_eq!(
        xplane_imgui::handle_mouse_click(50, 550, MouseStatus::Down, MouseButton::Left).unwrap(),
        EventDisposition::Consumed
    );
    assert_eq!(
        xplane_imgui::take_focus_request().unwrap(),
        Some(FocusRequest::Acquire)
    );
    assert_eq!(
        xplane_imgui::handle_mouse_click(50, 550, MouseStatus::Up, MouseButton::Left).unwrap(),
        EventDisposition::Consumed
    );
    assert_eq!(
        xplane_imgui::handle_wheel(50, 550, WheelAxis::Vertical, 2).unwrap(),
        EventDisposition::Consumed
    );

    // Unmapped virtual keys are dropped without error.
    xplane_imgui::handle_key(0, KeyFlags::DOWN, 0xFE, false).unwrap();

    // Away from every window the sim keeps its input, and a left click
    // outside hands keyboard focus back.
    xplane_imgui::handle_cursor(500, 100).unwrap();
    run_until(|| !xplane_imgui::capture().unwrap().wants_mouse);
    assert_eq!(
        xplane_imgui::handle_cursor(500, 100).unwrap(),
        HostCursor::Default
    );
    assert_eq!(
        xplane_imgui::handle_mouse_click(500, 100, MouseStatus::Down, MouseButton::Left).unwrap(),
        EventDisposition::PassThrough
    );
    assert_eq!(
        xplane_imgui::take_focus_request().unwrap(),
        Some(FocusRequest::Release)
    );
    xplane_imgui::handle_mouse_click(500, 100, MouseStatus::Up, MouseButton::Left).unwrap();

    // Hidden windows keep their registration but skip their callback, and
    // the frame stats count only what actually ran.
    stats_visible.set(false);
    order.lock().unwrap().clear();
    let stats = xplane_imgui::run_frame(DT).unwrap();
    assert_eq!(stats.callbacks, 2);
    assert_eq!(xplane_imgui::callback_count().unwrap(), 3);
    assert_eq!(*order.lock().unwrap(), vec![1, 2]);
    stats_visible.set(true);

    // Structural changes from inside a callback go through the queue and
    // settle at the start of the next frame.
    let queue = xplane_imgui::session_queue().unwrap();
    let fourth = Arc::clone(&order);
    let remover = queue.clone();
    let fourth_handle = queue.register(
        move |_ui| {
            fourth.lock().unwrap().push(4);
            remover.unregister(background);
        },
        None,
    );

    order.lock().unwrap().clear();
    xplane_imgui::run_frame(DT).unwrap();
    assert_eq!(*order.lock().unwrap(), vec![1, 2, 3, 4]);

    order.lock().unwrap().clear();
    xplane_imgui::run_frame(DT).unwrap();
    assert_eq!(*order.lock().unwrap(), vec![2, 3, 4]);

    assert!(matches!(
        xplane_imgui::unregister(background),
        Err(OverlayError::UnknownHandle(_))
    ));

    // Removing one registration leaves the rest drawing.
    xplane_imgui::unregister(panel).unwrap();
    order.lock().unwrap().clear();
    xplane_imgui::run_frame(DT).unwrap();
    assert_eq!(*order.lock().unwrap(), vec![3, 4]);

    // The draw hook comes down with the last registration.
    xplane_imgui::unregister(stats_handle).unwrap();
    xplane_imgui::unregister(fourth_handle).unwrap();
    assert_eq!(xplane_imgui::callback_count().unwrap(), 0);
    assert_eq!(
        xplane_imgui::hook_directive().unwrap(),
        Some(HookDirective::Uninstall)
    );

    xplane_imgui::shutdown().unwrap();
    assert!(!xplane_imgui::is_initialized());
    assert!(matches!(
        xplane_imgui::capture(),
        Err(OverlayError::NotInitialized)
    ));
    assert!(matches!(
        xplane_imgui::shutdown(),
        Err(OverlayError::NotInitialized)
    ));
}
