//! GameView: maps the application state into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::app::{App, BestScore, LeaderboardView, Submission, WalletStatus};
use crate::core::{Card, GameSnapshot};
use crate::fb::{palette, CellStyle, FrameBuffer, Rgb};
use crate::ledger::{short_address, short_hash};
use crate::types::{
    CardFace, GamePhase, NoticeLevel, Symbol, BOARD_COLS, BOARD_ROWS, SYMBOL_COUNT,
};

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

pub const NO_SCORES: &str = "No scores yet. Be the first!";
pub const LEADERBOARD_ERROR: &str = "Error loading leaderboard";
pub const HELP_LINE: &str =
    "arrows/hjkl move  space flip  n new  c connect  s submit  b best  r board  q quit";

const PANEL_MIN_W: u16 = 24;
const NOTICE_MAX_W: u16 = 48;

/// Card grid, side panel, result overlay and notifications.
pub struct GameView {
    /// Card width in terminal columns.
    card_w: u16,
    /// Card height in terminal rows.
    card_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        Self::new(5, 3)
    }
}

/// Where the card grid landed on screen.
#[derive(Debug, Clone, Copy)]
struct GridFrame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(card_w: u16, card_h: u16) -> Self {
        Self {
            card_w: card_w.max(3),
            card_h: card_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, app: &App, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        // One column / row of gap around every card.
        let grid_w = BOARD_COLS as u16 * (self.card_w + 1) + 1;
        let grid_h = BOARD_ROWS as u16 * (self.card_h + 1) + 1;
        let frame_w = grid_w + 2;
        let frame_h = grid_h + 2;
        let total_w = frame_w + 2 + PANEL_MIN_W + 10;
        let total_h = frame_h + 2;

        let x = viewport.width.saturating_sub(total_w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(total_h) / 2,
            AnchorY::Top => 0,
        };
        let frame = GridFrame {
            x,
            y: y + 1,
            w: frame_w,
            h: frame_h,
        };

        let title = CellStyle::default().bold();
        fb.put_str(frame.x, y, "MEMO MATCH", title);

        self.draw_grid(fb, app, snap, frame);
        self.draw_side_panel(fb, app, snap, viewport, frame);

        if snap.phase == GamePhase::Ended {
            self.draw_result_overlay(fb, snap, app, frame);
        }

        let help_y = frame.y + frame.h;
        if help_y < viewport.height {
            fb.put_str_max(
                frame.x,
                help_y,
                HELP_LINE,
                viewport.width.saturating_sub(frame.x),
                CellStyle::plain(palette::MUTED, palette::BACKGROUND),
            );
        }

        self.draw_notices(fb, app, viewport);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, app: &App, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(app, &app.snapshot(), viewport, &mut fb);
        fb
    }

    fn draw_grid(&self, fb: &mut FrameBuffer, app: &App, snap: &GameSnapshot, frame: GridFrame) {
        let table = CellStyle::plain(palette::MUTED, palette::TABLE);
        fb.fill_rect(frame.x + 1, frame.y + 1, frame.w - 2, frame.h - 2, ' ', table);
        fb.draw_box(frame.x, frame.y, frame.w, frame.h, CellStyle::default());

        for card in snap.cards.iter() {
            let i = card.index as usize;
            let (col, row) = ((i % BOARD_COLS) as u16, (i / BOARD_COLS) as u16);
            let cx = frame.x + 2 + col * (self.card_w + 1);
            let cy = frame.y + 2 + row * (self.card_h + 1);
            self.draw_card(fb, card, cx, cy);

            if i == app.cursor() {
                let mid = cy + self.card_h / 2;
                let marker = CellStyle::plain(palette::CURSOR, palette::TABLE).bold();
                fb.put_char(cx - 1, mid, '▶', marker);
                fb.put_char(cx + self.card_w, mid, '◀', marker);
            }
        }
    }

    fn draw_card(&self, fb: &mut FrameBuffer, card: &Card, x: u16, y: u16) {
        let (ch, style) = match card.face {
            CardFace::Hidden => ('?', CellStyle::plain(palette::TEXT, palette::CARD_BACK)),
            CardFace::Revealed => (
                card.symbol.glyph(),
                CellStyle::plain(symbol_color(card.symbol), palette::CARD_FACE).bold(),
            ),
            CardFace::Matched => (
                card.symbol.glyph(),
                CellStyle::plain(Rgb::new(255, 255, 255), palette::CARD_MATCHED).bold(),
            ),
        };
        fb.fill_rect(x, y, self.card_w, self.card_h, ' ', style);
        fb.put_char(x + self.card_w / 2, y + self.card_h / 2, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        app: &App,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: GridFrame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < PANEL_MIN_W {
            return;
        }
        let panel_w = viewport.width - panel_x;

        let label = CellStyle::default().bold();
        let value = CellStyle::default();
        let muted = CellStyle::plain(palette::MUTED, palette::BACKGROUND);
        let value_x = panel_x + 10;
        let mut y = frame.y;

        fb.put_str(panel_x, y, "MOVES", label);
        fb.put_u32(value_x, y, snap.moves, value);
        y += 1;

        fb.put_str(panel_x, y, "TIME", label);
        let end = fb.put_u32(value_x, y, snap.elapsed_seconds, value);
        fb.put_char(end, y, 's', value);
        y += 1;

        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(value_x, y, snap.final_score.unwrap_or(snap.score), value);
        y += 1;

        fb.put_str(panel_x, y, "PAIRS", label);
        let end = fb.put_u32(value_x, y, snap.matched_pairs, value);
        fb.put_str(end, y, &format!("/{SYMBOL_COUNT}"), muted);
        y += 2;

        fb.put_str(panel_x, y, "WALLET", label);
        match app.wallet() {
            WalletStatus::Connected(s) => {
                fb.put_str(value_x, y, &short_address(&s.account), value);
            }
            WalletStatus::Connecting => {
                fb.put_str(value_x, y, "connecting...", muted);
            }
            WalletStatus::Disconnected => {
                fb.put_str(value_x, y, "not connected", muted);
            }
        }
        y += 1;

        fb.put_str(panel_x, y, "BEST", label);
        match (app.session(), app.best_score()) {
            (None, _) => {
                fb.put_str(value_x, y, "-", muted);
            }
            (Some(_), BestScore::Known(best)) => {
                fb.put_str(value_x, y, &best.to_string(), value);
            }
            (Some(_), BestScore::Unknown) => {
                fb.put_str(value_x, y, "?", muted);
            }
        }
        y += 1;

        fb.put_str(panel_x, y, "CONTRACT", label);
        fb.put_str(value_x, y, &short_address(&app.contract()), muted);
        y += 1;

        match app.submission() {
            Submission::Idle => {}
            Submission::Sending { score } => {
                fb.put_str(panel_x, y, "TX", label);
                fb.put_str(value_x, y, &format!("sending {score}"), muted);
                y += 1;
            }
            Submission::Pending { tx_hash, .. } => {
                fb.put_str(panel_x, y, "TX", label);
                fb.put_str(value_x, y, &short_hash(&tx_hash), muted);
                y += 1;
            }
        }
        y += 1;

        let end = fb.put_str(panel_x, y, "LEADERBOARD", label);
        if let Some(n) = app.top_count() {
            fb.put_str(end + 1, y, &format!("(top {n})"), muted);
        }
        y += 1;

        let rows_left = (frame.y + frame.h).saturating_sub(y);
        match app.leaderboard() {
            LeaderboardView::NotLoaded => {
                fb.put_str_max(panel_x, y, "Press r to load", panel_w, muted);
            }
            LeaderboardView::Failed(_) => {
                let err = CellStyle::plain(palette::ERROR, palette::BACKGROUND);
                fb.put_str_max(panel_x, y, LEADERBOARD_ERROR, panel_w, err);
            }
            LeaderboardView::Loaded(rows) if rows.is_empty() => {
                fb.put_str_max(panel_x, y, NO_SCORES, panel_w, muted);
            }
            LeaderboardView::Loaded(rows) => {
                let me = app.session().map(|s| s.account);
                for entry in rows.iter().take(rows_left as usize) {
                    let style = if Some(entry.player) == me { label } else { value };
                    let line = format!(
                        "#{:<3}{} {:>6}",
                        entry.rank,
                        short_address(&entry.player),
                        entry.score
                    );
                    fb.put_str_max(panel_x, y, &line, panel_w, style);
                    y += 1;
                }
            }
        }
    }

    fn draw_result_overlay(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, app: &App, frame: GridFrame) {
        let score = snap.final_score.unwrap_or(snap.score);
        let lines = [
            "GAME COMPLETE!".to_string(),
            format!("Moves {}  Time {}s", snap.moves, snap.elapsed_seconds),
            format!("Score {score}"),
            if app.session().is_some() {
                "s submit  n new game".to_string()
            } else {
                "c connect  n new game".to_string()
            },
        ];
        let w = frame.w.saturating_sub(4);
        let h = lines.len() as u16 + 2;
        let x = frame.x + 2;
        let y = frame.y + frame.h.saturating_sub(h) / 2;

        let style = CellStyle::plain(Rgb::new(255, 255, 255), palette::BACKGROUND).bold();
        fb.fill_rect(x, y, w, h, ' ', style);
        fb.draw_box(x, y, w, h, style);
        for (i, line) in lines.iter().enumerate() {
            let len = line.chars().count() as u16;
            let lx = x + w.saturating_sub(len) / 2;
            fb.put_str_max(lx, y + 1 + i as u16, line, w.saturating_sub(2), style);
        }
    }

    fn draw_notices(&self, fb: &mut FrameBuffer, app: &App, viewport: Viewport) {
        let max_w = NOTICE_MAX_W.min(viewport.width);
        // Newest on top.
        for (row, notice) in app.notices().iter().rev().enumerate() {
            let row = row as u16;
            if row >= viewport.height {
                break;
            }
            let bg = match notice.level {
                NoticeLevel::Info => palette::INFO,
                NoticeLevel::Success => palette::SUCCESS,
                NoticeLevel::Error => palette::ERROR,
            };
            let style = CellStyle::plain(Rgb::new(255, 255, 255), bg);
            let len = (notice.message.chars().count() as u16 + 2).min(max_w);
            let x = viewport.width.saturating_sub(len);
            fb.fill_rect(x, row, len, 1, ' ', style);
            fb.put_str_max(x + 1, row, &notice.message, len.saturating_sub(2), style);
        }
    }
}

fn symbol_color(symbol: Symbol) -> Rgb {
    match symbol {
        Symbol::Gamepad => Rgb::new(40, 40, 40),
        Symbol::Target => Rgb::new(200, 30, 30),
        Symbol::Dice => Rgb::new(200, 30, 30),
        Symbol::Circus => Rgb::new(170, 60, 170),
        Symbol::Palette => Rgb::new(190, 110, 20),
        Symbol::Masks => Rgb::new(40, 90, 180),
        Symbol::Clapper => Rgb::new(40, 40, 40),
        Symbol::Guitar => Rgb::new(30, 130, 60),
    }
}
