//! Terminal client: one pane per connection to the same match.

mod app;
mod input;
mod ui;

pub use app::{App, Command, Pane, status_line, turn_hint};
pub use input::{Action, action_for};

use crate::client::{ClientEvent, MatchClient};
use anyhow::Result;
use boardwire_engine::PlayerId;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, instrument, warn};

/// File the client logs to while the terminal is in raw mode.
pub const LOG_FILE: &str = "boardwire_tui.log";

/// Runs the terminal client.
///
/// Opens one connection per entry in `players`, plus a spectator pane when
/// `spectate` is set, all following `match_id` on `server`.
#[instrument(skip(players), fields(seats = players.len()))]
pub async fn run_tui(
    server: &str,
    match_id: &str,
    players: Vec<PlayerId>,
    spectate: bool,
) -> Result<()> {
    info!("Starting boardwire TUI");

    let mut seats: Vec<Option<PlayerId>> = players.into_iter().map(Some).collect();
    if spectate {
        seats.push(None);
    }

    let mut clients = Vec::with_capacity(seats.len());
    let mut panes = Vec::with_capacity(seats.len());
    for seat in seats {
        let (client, events) = MatchClient::connect(server, match_id, seat.clone()).await?;
        clients.push((client, events));
        panes.push(Pane::new(seat));
    }
    let mut app = App::new(panes);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_loop(&mut terminal, &mut app, &mut clients).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "TUI loop error");
    }
    res
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    clients: &mut [(MatchClient, mpsc::UnboundedReceiver<ClientEvent>)],
) -> Result<()> {
    while !app.should_quit() {
        for (pane, (_, events)) in clients.iter_mut().enumerate() {
            while let Ok(event) = events.try_recv() {
                app.handle_event(pane, event);
            }
        }

        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(Duration::from_millis(50))? {
            tokio::task::yield_now().await;
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let Some(action) = action_for(key.code) else {
            continue;
        };

        let sent = match app.apply(action) {
            Some(Command::Click { pane, cell }) => clients[pane].0.click_cell(cell),
            Some(Command::Reset { pane }) => clients[pane].0.reset(),
            None => Ok(()),
        };
        if let Err(e) = sent {
            warn!(error = %e, "Failed to send command");
        }
    }
    info!("User quit");
    Ok(())
}
