use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::game::GameSession;

/// Rows reserved above the board.
pub const HUD_HEIGHT: u16 = 2;

/// Values the HUD shows that do not live in the session.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo {
    pub best_score: u32,
    pub best_at_session_start: u32,
    pub mouse_enabled: bool,
}

/// Renders the score row and the status row.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, session: &GameSession, info: &HudInfo) {
    if area.height == 0 {
        return;
    }

    let width = usize::from(area.width);
    let score = format!("Score {}", session.score);
    let best = format!("Best {}", info.best_score.max(session.score));
    let score_row = Line::from(vec![
        Span::styled(
            score.clone(),
            Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw(gap(&score, &best, width)),
        Span::styled(best, Style::new().fg(Color::Yellow)),
    ]);

    let speed = format!("{} ms  len {}", session.speed_ms, session.snake.len());
    let hint = if info.mouse_enabled {
        "arrows/wasd/drag  p pause"
    } else {
        "arrows/wasd  p pause"
    };
    let status_row = Line::from(vec![
        Span::raw(speed.clone()),
        Span::raw(gap(&speed, hint, width)),
        Span::raw(hint),
    ])
    .style(Style::new().fg(Color::DarkGray));

    frame.render_widget(Paragraph::new(vec![score_row, status_row]), area);
}

/// Spaces that push `right` against the end of a row `width` cells wide.
fn gap(left: &str, right: &str, width: usize) -> String {
    let used = left.width() + right.width();
    " ".repeat(width.saturating_sub(used).max(1))
}

#[cfg(test)]
mod tests {
    use super::gap;

    #[test]
    fn gap_fills_the_row() {
        assert_eq!(gap("Score 10", "Best 20", 20).len(), 5);
    }

    #[test]
    fn gap_keeps_one_space_when_crowded() {
        assert_eq!(gap("Score 10", "Best 20", 4), " ");
    }

    #[test]
    fn gap_measures_display_width() {
        assert_eq!(gap("◆", "x", 4), "  ");
    }
}
