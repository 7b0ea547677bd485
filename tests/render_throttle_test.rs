use blockfall::core::GameState;
use blockfall::term::{frame_fingerprint, HudState, RenderThrottle};

#[test]
fn render_throttle_renders_first_frame() {
    let mut t = RenderThrottle::new(250);
    assert!(t.should_render(0, 1, true));
}

#[test]
fn render_throttle_static_renders_on_change() {
    let mut t = RenderThrottle::new(250);
    assert!(t.should_render(0, 1, true));
    assert!(t.should_render(1, 2, true));
}

#[test]
fn render_throttle_static_throttles_when_unchanged() {
    let mut t = RenderThrottle::new(250);
    assert!(t.should_render(0, 1, true));
    assert!(!t.should_render(10, 1, true));
    assert!(!t.should_render(249, 1, true));
    assert!(t.should_render(250, 1, true));
}

#[test]
fn render_throttle_dynamic_always_renders() {
    let mut t = RenderThrottle::new(250);
    assert!(t.should_render(0, 1, false));
    assert!(t.should_render(1, 1, false));
    assert!(t.should_render(2, 1, false));
}

#[test]
fn render_throttle_reset_forces_next_frame() {
    let mut t = RenderThrottle::new(250);
    assert!(t.should_render(0, 1, true));
    t.reset();
    assert!(t.should_render(5, 1, true));
}

#[test]
fn fingerprint_tracks_visible_state_only() {
    let mut game = GameState::new(1);
    game.start(0.0);
    let hud = HudState::default();

    let before = game.snapshot();
    let fp = frame_fingerprint(&before, &hud);

    // Timers advance without moving anything.
    game.update(100.0);
    let after = game.snapshot();
    assert_ne!(before.timers, after.timers);
    assert_eq!(frame_fingerprint(&after, &hud), fp);

    game.move_horizontal(-1);
    assert_ne!(frame_fingerprint(&game.snapshot(), &hud), fp);

    let muted_hud = HudState {
        music_muted: true,
        ..hud
    };
    assert_ne!(frame_fingerprint(&after, &muted_hud), fp);
}
