//! UI rendering using ratatui.

mod board;

use crate::app::App;
use crate::config::TerminalScale;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tictac_canvas::Player;

pub use board::SurfaceView;

/// Page title.
pub const TITLE: &str = "TicTacToe (aka Naughts & Crosses)";
/// Key help shown under the selector.
pub const HELP: &str = "Click a cell to mark it | x / o: pick team | Tab: switch | q: quit";

/// Terminal column and row of the board's top-left corner.
const BOARD_ORIGIN: (u16, u16) = (2, 2);

/// Fixed screen layout.
///
/// Everything is anchored to the top-left corner, so resizing the terminal
/// never moves the board after its geometry has been measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Screen {
    /// Title line.
    pub title: Rect,
    /// Board surface.
    pub board: Rect,
    /// Team selector, one line per team.
    pub selector: Rect,
    /// Help line.
    pub help: Rect,
}

impl Screen {
    /// Lays out the screen, or `None` when `area` cannot hold the board.
    pub fn layout(area: Rect, scale: TerminalScale) -> Option<Self> {
        let (cols, rows) = scale.surface_cells();
        let (bx, by) = BOARD_ORIGIN;
        let needed_width = bx.checked_add(cols)?;
        let needed_height = by.checked_add(rows)?.checked_add(4)?;
        if area.width < needed_width || area.height < needed_height {
            return None;
        }

        let selector_y = by + rows + 1;
        Some(Self {
            title: Rect::new(area.x, area.y, area.width, 1),
            board: Rect::new(area.x + bx, area.y + by, cols, rows),
            selector: Rect::new(area.x + bx, area.y + selector_y, area.width - bx, 2),
            help: Rect::new(area.x + bx, area.y + selector_y + 2, area.width - bx, 1),
        })
    }
}

/// Draws the main UI.
pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();
    let Some(screen) = Screen::layout(area, app.scale()) else {
        let (cols, rows) = app.scale().surface_cells();
        let notice = Paragraph::new(format!(
            "Terminal too small: the board needs {} x {} cells",
            cols + BOARD_ORIGIN.0,
            rows + BOARD_ORIGIN.1 + 4
        ))
        .style(Style::default().fg(Color::Yellow));
        f.render_widget(notice, area);
        return;
    };

    let title = Paragraph::new(TITLE)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    f.render_widget(title, screen.title);

    // The board stays where it was measured, even if the layout would differ.
    let board_area = app.board_area().unwrap_or(screen.board);
    if let Some(canvas) = app.surface().get() {
        let background = *app.renderer().theme().background();
        f.render_widget(SurfaceView::new(canvas, app.scale(), background), board_area);
    }

    render_selector(f, screen.selector, *app.session().active_player());

    let help = Paragraph::new(HELP).style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, screen.help);
}

fn render_selector(f: &mut Frame, area: Rect, active: Player) {
    let lines: Vec<Line> = [Player::X, Player::O]
        .into_iter()
        .map(|player| {
            let (mark, style) = if player == active {
                ("(•)", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            } else {
                ("( )", Style::default().fg(Color::Gray))
            };
            Line::from(vec![
                Span::styled(mark, style),
                Span::styled(format!(" Team {}", player), style),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), area);
}
