//! Stateless rendering: one bordered pane per client.

use super::app::{App, Pane, status_line, turn_hint};
use boardwire_tictactoe::{Board, Position};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const HELP: &str = "1-9/arrows+Enter move  Tab switch  r reset  q quit";

/// Draws every pane side by side with a help line underneath.
pub fn draw(frame: &mut Frame, app: &App) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(12), Constraint::Length(1)])
        .split(frame.area());

    let count = app.panes().len().max(1) as u32;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints((0..count).map(|_| Constraint::Ratio(1, count)))
        .split(outer[0]);

    for (i, pane) in app.panes().iter().enumerate() {
        draw_pane(frame, columns[i], pane, i == app.focused());
    }

    let help = Paragraph::new(HELP)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, outer[1]);
}

fn draw_pane(frame: &mut Frame, area: Rect, pane: &Pane, focused: bool) {
    let border = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let block = Block::default()
        .title(pane.title())
        .borders(Borders::ALL)
        .border_style(border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(7),    // Board
            Constraint::Length(1), // Status
            Constraint::Length(1), // Turn
            Constraint::Length(1), // Notice
        ])
        .split(inner);

    let Some(snapshot) = pane.snapshot() else {
        let waiting = Paragraph::new("Waiting for server...").alignment(Alignment::Center);
        frame.render_widget(waiting, chunks[0]);
        return;
    };

    let cursor = focused.then(|| pane.cursor());
    frame.render_widget(board_widget(&snapshot.state, cursor), chunks[0]);

    let status = Paragraph::new(status_line(snapshot))
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(status, chunks[1]);

    let turn = Paragraph::new(turn_hint(snapshot)).alignment(Alignment::Center);
    frame.render_widget(turn, chunks[2]);

    if let Some(notice) = pane.notice() {
        let notice = Paragraph::new(notice)
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        frame.render_widget(notice, chunks[3]);
    }
}

/// Renders the board as a 3x3 grid, highlighting the cursor cell.
fn board_widget(board: &Board, cursor: Option<Position>) -> Paragraph<'static> {
    let mut lines = Vec::with_capacity(5);
    for row in 0..3 {
        if row > 0 {
            lines.push(Line::styled(
                "───┼───┼───",
                Style::default().fg(Color::DarkGray),
            ));
        }
        let mut spans = Vec::with_capacity(5);
        for col in 0..3 {
            if col > 0 {
                spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
            }
            let pos = Position::ALL[row * 3 + col];
            spans.push(cell_span(board, pos, cursor == Some(pos)));
        }
        lines.push(Line::from(spans));
    }
    Paragraph::new(lines).alignment(Alignment::Center)
}

fn cell_span(board: &Board, pos: Position, selected: bool) -> Span<'static> {
    let (symbol, base_style) = match board.get(pos.to_index()) {
        None => (
            format!(" {} ", pos.to_index() + 1),
            Style::default().fg(Color::DarkGray),
        ),
        Some(player) => (
            format!(" {} ", player),
            Style::default()
                .fg(player_color(player.as_str()))
                .add_modifier(Modifier::BOLD),
        ),
    };

    let style = if selected {
        base_style.bg(Color::White).fg(Color::Black)
    } else {
        base_style
    };
    Span::styled(symbol, style)
}

fn player_color(player: &str) -> Color {
    match player {
        "0" => Color::Blue,
        "1" => Color::Red,
        _ => Color::Green,
    }
}
