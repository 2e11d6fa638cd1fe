use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;

use crate::config::GridSize;
use crate::game::{GameSession, GameStatus};
use crate::snake::Position;
use crate::ui::hud::{render_hud, HudInfo, HUD_HEIGHT};
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

/// Terminal columns per grid cell, so cells come out roughly square.
pub const COLUMNS_PER_CELL: u16 = 2;

const GLYPH_CELL: &str = "██";
const GLYPH_FOOD: &str = "◆ ";

const COLOR_SNAKE_HEAD: Color = Color::LightCyan;
const COLOR_SNAKE_BODY: Color = Color::Blue;
const COLOR_FOOD: Color = Color::Red;
const COLOR_BORDER: Color = Color::Gray;

/// Renders the full game frame from an immutable session snapshot.
pub fn render(frame: &mut Frame<'_>, session: &GameSession, hud_info: &HudInfo) {
    let bounds = session.bounds();
    let board = board_area(frame.area(), bounds);

    let hud_area = Rect {
        y: board.y.saturating_sub(HUD_HEIGHT),
        height: HUD_HEIGHT.min(board.y),
        ..board
    };
    render_hud(frame, hud_area, session, hud_info);

    let block = Block::bordered().border_style(Style::new().fg(COLOR_BORDER));
    let inner = block.inner(board);
    frame.render_widget(block, board);

    render_food(frame, inner, session);
    render_snake(frame, inner, session);

    if session.is_start_screen() {
        render_start_menu(frame, board, hud_info.best_score);
        return;
    }

    match session.status {
        GameStatus::Paused => render_pause_menu(frame, board),
        GameStatus::GameOver | GameStatus::Victory => render_game_over_menu(
            frame,
            board,
            session,
            hud_info.best_at_session_start,
        ),
        GameStatus::Running => {}
    }
}

/// Centres the bordered board, leaving room for the HUD above it.
fn board_area(area: Rect, bounds: GridSize) -> Rect {
    let width = bounds
        .width
        .saturating_mul(COLUMNS_PER_CELL)
        .saturating_add(2)
        .min(area.width);
    let height = bounds
        .height
        .saturating_add(2)
        .min(area.height.saturating_sub(HUD_HEIGHT));

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + HUD_HEIGHT + (area.height.saturating_sub(HUD_HEIGHT) - height) / 2,
        width,
        height,
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, session: &GameSession) {
    let Some(food) = session.food else {
        return;
    };
    let Some((x, y)) = logical_to_terminal(inner, session.bounds(), food) else {
        return;
    };

    frame
        .buffer_mut()
        .set_string(x, y, GLYPH_FOOD, Style::new().fg(COLOR_FOOD));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, session: &GameSession) {
    let buffer = frame.buffer_mut();
    let dead = session.status == GameStatus::GameOver;

    for (index, segment) in session.snake.segments().enumerate() {
        let Some((x, y)) = logical_to_terminal(inner, session.bounds(), *segment) else {
            continue;
        };

        let style = if index == 0 {
            Style::new()
                .fg(if dead { Color::Red } else { COLOR_SNAKE_HEAD })
                .add_modifier(Modifier::BOLD)
        } else {
            Style::new().fg(COLOR_SNAKE_BODY)
        };
        buffer.set_string(x, y, GLYPH_CELL, style);
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(COLUMNS_PER_CELL)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(COLUMNS_PER_CELL) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
