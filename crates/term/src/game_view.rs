//! GameView: maps a [`GameSnapshot`] plus the HUD into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, Piece};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::hud::HudState;
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Board, ghost, current piece, side panel and overlays.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
    show_help: bool,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
            show_help: true,
        }
    }
}

/// Board frame placement inside the viewport.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            ..Self::default()
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn with_help(mut self, show_help: bool) -> Self {
        self.show_help = show_help;
        self
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    ///
    /// Callers reuse one framebuffer across frames; nothing here allocates once it is sized.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        hud: &HudState,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).cell(' '));

        let board_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame = Frame {
            x: viewport.width.saturating_sub(board_w + 2 + self.panel_width()) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(board_h + 2) / 2,
                AnchorY::Top => 0,
            },
            w: board_w + 2,
            h: board_h + 2,
        };

        let bg = CellStyle::new(Rgb::new(80, 80, 90), PLAY_BG);
        fb.fill_rect(frame.x + 1, frame.y + 1, board_w, board_h, ' ', bg);
        draw_border(fb, frame, CellStyle::default());

        for y in 0..BOARD_HEIGHT as i16 {
            for x in 0..BOARD_WIDTH as i16 {
                match PieceKind::from_tag(snap.cell(x, y)) {
                    Some(kind) => self.draw_block(fb, frame, x, y, kind),
                    None => self.fill_cell(fb, frame, x, y, '·', bg.dim()),
                }
            }
        }

        if !snap.game_over {
            let ghost_style = CellStyle::new(Rgb::new(140, 140, 140), PLAY_BG).dim();
            for (x, y, _) in snap.ghost.cells() {
                self.fill_cell(fb, frame, x, y, '░', ghost_style);
            }
            for (x, y, tag) in snap.current.cells() {
                if let Some(kind) = PieceKind::from_tag(tag) {
                    self.draw_block(fb, frame, x, y, kind);
                }
            }
        }

        self.draw_side_panel(fb, snap, hud, viewport, frame);

        if let Some(final_score) = hud.final_score {
            draw_overlay(fb, frame, 0, "GAME OVER");
            let mut label = [0u8; 24];
            draw_overlay(fb, frame, 2, score_line(final_score, &mut label));
            draw_overlay(fb, frame, 3, "R to restart");
        } else if snap.paused {
            draw_overlay(fb, frame, 0, "PAUSED");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, hud: &HudState, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    fn panel_width(&self) -> u16 {
        2 + 4 * self.cell_w.max(4)
    }

    /// Fill one board cell; coordinates outside the visible board are skipped.
    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: i16, y: i16, ch: char, style: CellStyle) {
        if x < 0 || x >= BOARD_WIDTH as i16 || y < 0 || y >= BOARD_HEIGHT as i16 {
            return;
        }
        let px = frame.x + 1 + (x as u16) * self.cell_w;
        let py = frame.y + 1 + (y as u16) * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, x: i16, y: i16, kind: PieceKind) {
        let style = CellStyle::new(piece_color(kind), PLAY_BG).bold();
        self.fill_cell(fb, frame, x, y, '█', style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        hud: &HudState,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let pulse = CellStyle::new(Rgb::new(20, 20, 20), Rgb::new(250, 210, 60)).bold();

        let mut y = frame.y;
        for (name, v) in [("SCORE", hud.score), ("LEVEL", hud.level), ("LINES", hud.lines)] {
            let style = if name == "LEVEL" && hud.level_highlight {
                pulse
            } else {
                label
            };
            fb.put_str(panel_x, y, name, style);
            fb.put_u32(panel_x, y + 1, v, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        if let Some(next) = snap.next {
            self.draw_preview(fb, panel_x, y, &next);
        }
        y = y.saturating_add(5);

        let on_off = |muted: bool| if muted { "off" } else { "on" };
        let x = fb.put_str(panel_x, y, "MUSIC ", label);
        fb.put_str(x, y, on_off(hud.music_muted), value);
        y = y.saturating_add(1);
        let x = fb.put_str(panel_x, y, "SOUND ", label);
        fb.put_str(x, y, on_off(hud.sound_muted), value);
        y = y.saturating_add(2);

        if self.show_help {
            let help = value.dim();
            for line in [
                "←→ move  ↓ drop",
                "↑/X rotate  Z ccw",
                "SPACE hard drop",
                "ENTER/P pause",
                "R restart  Q quit",
                "M music  N sound",
            ] {
                if y >= viewport.height {
                    break;
                }
                fb.put_str(panel_x, y, line, help);
                y = y.saturating_add(1);
            }
        }
    }

    /// Draw a piece matrix at panel coordinates, one board cell per `cell_w` columns.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, piece: &Piece) {
        for (dx, dy, tag) in piece.matrix.filled() {
            if let Some(kind) = PieceKind::from_tag(tag) {
                let style = CellStyle::new(piece_color(kind), PANEL_BG).bold();
                fb.fill_rect(
                    x + (dx as u16) * self.cell_w,
                    y + (dy as u16) * self.cell_h,
                    self.cell_w,
                    self.cell_h,
                    '█',
                    style,
                );
            }
        }
    }
}

pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
    let Frame { x, y, w, h } = frame;
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

/// Centered text on the board, `row` lines below the middle.
fn draw_overlay(fb: &mut FrameBuffer, frame: Frame, row: u16, text: &str) {
    let y = frame.y.saturating_add(frame.h / 2).saturating_add(row);
    let text_w = text.chars().count() as u16;
    let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
    let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
    fb.put_str(x, y, text, style);
}

/// "SCORE <n>" into a stack buffer.
fn score_line(score: u32, buf: &mut [u8; 24]) -> &str {
    use std::io::Write;

    let mut cursor = std::io::Cursor::new(&mut buf[..]);
    let _ = write!(cursor, "SCORE {score}");
    let len = cursor.position() as usize;
    std::str::from_utf8(&buf[..len]).unwrap_or("SCORE")
}
