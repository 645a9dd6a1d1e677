//! GameView: maps a [`GameSnapshot`] (plus lifetime stats) into a framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, GuessOutcome, PileSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::stats::UserStats;
use crate::types::{Color, GameMode, Lives, Phase};

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

/// Front-end state drawn around the table.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hud<'a> {
    /// Lifetime stats panel, when toggled on.
    pub stats: Option<&'a UserStats>,
    /// First-run key help.
    pub show_help: bool,
}

const HELP_LINE: &str =
    "1-9 pile  h/Up higher  l/Down lower  s/= same  Esc cancel  n new  c/t/b/z mode  e end zen  i stats  q quit";

const TITLE: CellStyle = CellStyle::fg(Rgb::new(240, 220, 80)).bold();
const TEXT: CellStyle = CellStyle::fg(Rgb::new(220, 220, 220));
const MUTED: CellStyle = CellStyle::fg(Rgb::new(140, 140, 150));
const RED: CellStyle = CellStyle::fg(Rgb::new(230, 80, 80));
const BLACK: CellStyle = CellStyle::fg(Rgb::new(235, 235, 235));
const SELECTED: CellStyle = CellStyle::fg(Rgb::new(240, 220, 80)).bold();
const GOOD: CellStyle = CellStyle::fg(Rgb::new(100, 220, 120));
const BAD: CellStyle = CellStyle::fg(Rgb::new(230, 80, 80));

/// Lays the round out as a row of piles with status lines underneath.
pub struct GameView {
    /// Columns per pile, border included.
    pile_stride: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self { pile_stride: 7 }
    }
}

impl GameView {
    pub fn new(pile_stride: u16) -> Self {
        Self {
            pile_stride: pile_stride.max(5),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, hud: &Hud<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear();

        let x = 1;
        let next = fb.put_str(x, 0, "BEAT THE BOX", TITLE);
        fb.put_str(next + 2, 0, &mode_label(snap.mode), MUTED);
        fb.put_str(x, 1, &score_line(snap), TEXT);

        for (i, pile) in snap.piles.iter().enumerate() {
            let px = x + i as u16 * self.pile_stride;
            self.draw_pile(fb, px, 3, i, pile, snap.selected_pile == Some(i));
        }

        let mut y = 9;
        if let Some(outcome) = &snap.last_outcome {
            let style = if outcome.correct { GOOD } else { BAD };
            fb.put_str(x, y, &outcome_line(outcome), style);
        }
        y += 1;
        fb.put_str(x, y, &status_line(snap), TEXT);
        y += 1;
        if hud.show_help {
            fb.put_str(x, y, HELP_LINE, MUTED);
        }

        if let Some(stats) = hud.stats {
            y += 2;
            fb.put_str(x, y, "STATS", TITLE);
            for line in stats_lines(stats) {
                y += 1;
                fb.put_str(x, y, &line, TEXT);
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, hud: &Hud<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    fn draw_pile(&self, fb: &mut FrameBuffer, x: u16, y: u16, index: usize, pile: &PileSnapshot, selected: bool) {
        let border = if selected {
            SELECTED
        } else if pile.is_flipped() {
            MUTED.dim()
        } else {
            TEXT
        };

        fb.put_str(x + 1, y, &format!("[{}]", index + 1), border);
        draw_border(fb, x, y + 1, 5, 3, border);

        match (pile.is_flipped(), pile.top) {
            (true, _) => {
                fb.put_str(x + 1, y + 2, "###", MUTED.dim());
            }
            (false, Some(card)) => {
                let style = match card.color() {
                    Color::Red => RED,
                    Color::Black => BLACK,
                };
                fb.put_str(x + 1, y + 2, &format!("{:>3}", card.label()), style.bold());
            }
            (false, None) => {}
        }

        fb.put_str(x + 1, y + 4, &format!("x{}", pile.depth), MUTED);
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
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

fn mode_label(mode: GameMode) -> String {
    mode.as_str().to_uppercase()
}

fn lives_label(lives: Lives) -> String {
    match lives {
        Lives::Finite(n) => n.to_string(),
        Lives::Infinite => "∞".to_string(),
    }
}

/// Score, streak, lives, deck size and best score.
pub fn score_line(snap: &GameSnapshot) -> String {
    let best = if snap.mode.is_zen() {
        snap.zen_high_score
    } else {
        snap.high_score
    };
    format!(
        "Score {}   Streak {}   Lives {}   Deck {}   Best {}",
        snap.score,
        snap.guess_streak,
        lives_label(snap.lives),
        snap.remaining_cards,
        best
    )
}

/// One-line description of the last accepted guess.
pub fn outcome_line(outcome: &GuessOutcome) -> String {
    let mut line = format!(
        "Pile {}: {} {} -> {}  ",
        outcome.pile + 1,
        outcome.previous,
        outcome.guess.as_str(),
        outcome.drawn
    );
    if outcome.correct {
        line.push_str(&format!("correct +{}", outcome.score_delta));
        if outcome.life_gained {
            line.push_str(", +1 life");
        }
    } else if outcome.pile_flipped {
        line.push_str("wrong, pile flipped");
    } else if outcome.life_spent {
        line.push_str("wrong, life lost");
    } else {
        line.push_str("wrong");
    }
    if outcome.reshuffled {
        line.push_str("  (new deck)");
    }
    line
}

/// What the player can do next.
pub fn status_line(snap: &GameSnapshot) -> String {
    match snap.phase {
        Phase::Idle => "Press n to deal a round (c/t/b/z picks a mode).".to_string(),
        Phase::Playing | Phase::Resolving => {
            let mut line = match snap.selected_pile {
                Some(i) => format!("Pile {} selected: h higher, l lower, s same, Esc cancel.", i + 1),
                None => "Pick a pile with 1-9.".to_string(),
            };
            if snap.mode.is_zen() {
                line.push_str(" e ends the zen round.");
            }
            line
        }
        Phase::Won if snap.mode.is_zen() => {
            format!("Zen round over. Score {}. n to play again.", snap.score)
        }
        Phase::Won => format!(
            "You beat the box with {} piles left! Final score {}. n to play again.",
            snap.piles_remaining(),
            snap.score
        ),
        Phase::Lost => format!("The box wins. Final score {}. n to play again.", snap.score),
    }
}

/// Lifetime stats panel.
pub fn stats_lines(stats: &UserStats) -> Vec<String> {
    let modes = [GameMode::Casual, GameMode::Standard, GameMode::Brutal]
        .iter()
        .map(|mode| {
            let (won, played) = stats
                .mode_record(*mode)
                .map_or((0, 0), |r| (r.games_won, r.games_played));
            format!("{} {}/{}", mode.as_str(), won, played)
        })
        .collect::<Vec<_>>()
        .join("   ");

    vec![
        format!(
            "Played {}   Won {}   Win rate {:.1}%",
            stats.games_played,
            stats.games_won,
            stats.win_rate()
        ),
        format!(
            "Win streak {} (best {})   Best guess streak {}",
            stats.current_win_streak, stats.longest_win_streak, stats.longest_guess_streak
        ),
        format!(
            "Best piles left {}   High score {}   Zen high score {}",
            stats.best_piles_remaining, stats.high_score, stats.zen_mode_high_score
        ),
        modes,
    ]
}
