//! GameView: draws a [`Round`] into a framebuffer.
//!
//! Pure, no I/O. Reads the round only through its query methods.

use crate::core::{Phase, Round};
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::{PieceKind, BOARD_COLUMNS, BOARD_ROWS, DEFAULT_PREVIEW};

/// Terminal size in columns and rows.
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

pub const GAME_OVER_TEXT: &str = "GAME OVER";
pub const PROMPT_TEXT: &str = "[R]eplay / [Q]uit";

const WELL: Rgb = Rgb::new(30, 30, 40);
const EMPTY: Style = Style::fg(Rgb::new(90, 90, 100)).on(WELL).dim();
const BORDER: Style = Style::fg(Rgb::new(200, 200, 200));
const LABEL: Style = Style::PLAIN.bold();
const VALUE: Style = Style::fg(Rgb::new(200, 200, 200));

/// Display color of a kind.
pub fn kind_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Terminal columns per board cell; 2 keeps cells roughly square.
    cell_w: u16,
    show_ghost: bool,
    preview: usize,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            cell_w: 2,
            show_ghost: true,
            preview: DEFAULT_PREVIEW,
        }
    }
}

impl GameView {
    pub fn with_ghost(mut self, show: bool) -> Self {
        self.show_ghost = show;
        self
    }

    /// Number of upcoming kinds listed under NEXT.
    pub fn with_preview(mut self, preview: usize) -> Self {
        self.preview = preview;
        self
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, round: &Round, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear();

        let frame_w = BOARD_COLUMNS as u16 * self.cell_w + 2;
        let frame_h = BOARD_ROWS as u16 + 2;
        let x0 = viewport.width.saturating_sub(frame_w) / 2;
        let y0 = viewport.height.saturating_sub(frame_h) / 2;

        draw_border(fb, x0, y0, frame_w, frame_h);

        let board = round.board();
        for row in 0..BOARD_ROWS {
            for col in 0..BOARD_COLUMNS {
                match board.get(row, col).flatten() {
                    Some(kind) => self.cell(fb, x0, y0, row, col, '█', block(kind)),
                    None => self.cell(fb, x0, y0, row, col, '·', EMPTY),
                }
            }
        }

        if round.phase() == Phase::Active {
            if self.show_ghost {
                if let Some(ghost) = round.ghost() {
                    let style = Style::fg(Rgb::new(140, 140, 140)).on(WELL).dim();
                    for (row, col) in ghost.cells() {
                        self.cell(fb, x0, y0, row, col, '░', style);
                    }
                }
            }
            if let Some(active) = round.active() {
                for (row, col) in active.cells() {
                    self.cell(fb, x0, y0, row, col, '█', block(active.kind()).bold());
                }
            }
        }

        self.draw_panel(fb, round, viewport, x0 + frame_w + 2, y0);

        if round.is_game_over() {
            let mid = y0 + frame_h / 2;
            let banner = Style::fg(Rgb::new(255, 255, 255)).bold();
            centered(fb, x0, frame_w, mid, GAME_OVER_TEXT, banner);
            centered(fb, x0, frame_w, mid + 1, PROMPT_TEXT, VALUE);
        }
    }

    /// Allocating convenience wrapper over [`GameView::render_into`].
    pub fn render(&self, round: &Round, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(round, viewport, &mut fb);
        fb
    }

    #[allow(clippy::too_many_arguments)]
    fn cell(
        &self,
        fb: &mut FrameBuffer,
        x0: u16,
        y0: u16,
        row: usize,
        col: usize,
        ch: char,
        style: Style,
    ) {
        let x = x0 + 1 + col as u16 * self.cell_w;
        let y = y0 + 1 + row as u16;
        fb.fill(x, y, self.cell_w, 1, ch, style);
    }

    fn draw_panel(
        &self,
        fb: &mut FrameBuffer,
        round: &Round,
        viewport: Viewport,
        x: u16,
        y0: u16,
    ) {
        if viewport.width.saturating_sub(x) < 8 {
            return;
        }
        let mut y = y0;

        fb.text(x, y, "HOLD", LABEL);
        match round.hold() {
            Some(kind) => {
                let style = Style::fg(kind_color(kind));
                let style = if round.can_hold() { style.bold() } else { style.dim() };
                fb.put(x, y + 1, kind.symbol(), style);
            }
            None => fb.put(x, y + 1, '-', VALUE),
        }
        y += 3;

        fb.text(x, y, "NEXT", LABEL);
        for (i, kind) in round.peek(self.preview).into_iter().enumerate() {
            fb.put(x, y + 1 + i as u16, kind.symbol(), Style::fg(kind_color(kind)).bold());
        }
        y += self.preview as u16 + 2;

        fb.text(x, y, "LINES", LABEL);
        fb.text(x, y + 1, &round.lines().to_string(), VALUE);
        y += 3;

        fb.text(x, y, "PIECES", LABEL);
        fb.text(x, y + 1, &round.pieces_locked().to_string(), VALUE);
    }
}

fn block(kind: PieceKind) -> Style {
    Style::fg(kind_color(kind)).on(WELL)
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
    let (right, bottom) = (x + w - 1, y + h - 1);
    fb.put(x, y, '┌', BORDER);
    fb.put(right, y, '┐', BORDER);
    fb.put(x, bottom, '└', BORDER);
    fb.put(right, bottom, '┘', BORDER);
    fb.fill(x + 1, y, w - 2, 1, '─', BORDER);
    fb.fill(x + 1, bottom, w - 2, 1, '─', BORDER);
    fb.fill(x, y + 1, 1, h - 2, '│', BORDER);
    fb.fill(right, y + 1, 1, h - 2, '│', BORDER);
}

fn centered(fb: &mut FrameBuffer, x: u16, w: u16, y: u16, text: &str, style: Style) {
    let len = text.chars().count() as u16;
    fb.text(x + w.saturating_sub(len) / 2, y, text, style);
}
