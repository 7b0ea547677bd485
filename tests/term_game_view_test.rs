use blockfall::core::GameState;
use blockfall::term::{AnchorY, FrameBuffer, GameView, HudState, Rgb, Viewport};

fn all_text(fb: &FrameBuffer) -> String {
    (0..fb.height()).map(|y| fb.row_text(y) + "\n").collect()
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1:
    // board pixels = 10*2 by 20*1 => 20x20
    // plus border => 22x22
    let fb = view.render(&snap, &HudState::default(), Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = GameState::new(1).snapshot();
    snap.board[19][0] = 1;

    let view = GameView::default();
    let fb = view.render(&snap, &HudState::default(), Viewport::new(22, 22));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    let y0 = 1 + 19;
    assert_eq!(fb.get(1, y0).unwrap().ch, '█');
    assert_eq!(fb.get(2, y0).unwrap().ch, '█');
    assert_eq!(fb.get(3, y0).unwrap().ch, '·');
}

#[test]
fn term_view_draws_current_and_ghost() {
    let snap = GameState::new(1).snapshot();
    let fb = GameView::default().render(&snap, &HudState::default(), Viewport::new(22, 22));

    for (x, y, _) in snap.current.cells() {
        let cell = fb.get(1 + 2 * x as u16, 1 + y as u16).unwrap();
        assert_eq!(cell.ch, '█', "current cell ({x}, {y})");
    }
    for (x, y, _) in snap.ghost.cells() {
        let cell = fb.get(1 + 2 * x as u16, 1 + y as u16).unwrap();
        assert_eq!(cell.ch, '░', "ghost cell ({x}, {y})");
    }
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut gs = GameState::new(1);
    gs.start(0.0);
    let snap = gs.snapshot();
    let hud = HudState {
        score: 1234,
        level: 2,
        lines: 10,
        music_muted: true,
        ..HudState::default()
    };

    let fb = GameView::default().render(&snap, &hud, Viewport::new(60, 22));
    let all = all_text(&fb);

    assert!(all.contains("SCORE"));
    assert!(all.contains("1234"));
    assert!(all.contains("LEVEL"));
    assert!(all.contains("LINES"));
    assert!(all.contains("NEXT"));
    assert!(all.contains("MUSIC off"));
    assert!(all.contains("SOUND on"));
    assert!(all.contains("SPACE hard drop"));
}

#[test]
fn term_view_skips_panel_when_narrow() {
    let snap = GameState::new(1).snapshot();
    let fb = GameView::default().render(&snap, &HudState::default(), Viewport::new(26, 22));
    assert!(!fb.contains_text("SCORE"));
}

#[test]
fn term_view_highlights_level_during_pulse() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let hud = HudState {
        level_highlight: true,
        ..HudState::default()
    };
    let fb = view.render(&snap, &hud, Viewport::new(60, 22));

    // Board frame is centered: (60 - 40) / 2 = 10, so the panel starts at 10 + 22 + 2.
    let label = fb.get(34, 3).unwrap();
    assert_eq!(label.ch, 'L');
    assert_eq!(label.style.bg, Rgb::new(250, 210, 60));

    let score = fb.get(34, 0).unwrap();
    assert_eq!(score.ch, 'S');
    assert_ne!(score.style.bg, Rgb::new(250, 210, 60));
}

#[test]
fn term_view_shows_game_over_overlay() {
    let mut snap = GameState::new(1).snapshot();
    snap.game_over = true;
    let hud = HudState {
        final_score: Some(300),
        ..HudState::default()
    };

    let fb = GameView::default().render(&snap, &hud, Viewport::new(60, 24));
    assert!(fb.contains_text("GAME OVER"));
    assert!(fb.contains_text("SCORE 300"));
    assert!(!fb.contains_text("PAUSED"));
    // Pieces are hidden once the game is over.
    assert!(!fb.contains_text("░"));
}

#[test]
fn term_view_shows_paused_overlay() {
    let mut snap = GameState::new(1).snapshot();
    snap.paused = true;

    let fb = GameView::default().render(&snap, &HudState::default(), Viewport::new(60, 24));
    assert!(fb.contains_text("PAUSED"));
    assert!(!fb.contains_text("GAME OVER"));
}

#[test]
fn term_view_render_into_reuses_buffer_across_sizes() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default();
    let hud = HudState::default();
    let mut fb = FrameBuffer::new(0, 0);

    view.render_into(&snap, &hud, Viewport::new(80, 24), &mut fb);
    assert_eq!((fb.width(), fb.height()), (80, 24));

    view.render_into(&snap, &hud, Viewport::new(30, 10), &mut fb);
    assert_eq!((fb.width(), fb.height()), (30, 10));
    assert_eq!(fb.cells().len(), 300);
}
