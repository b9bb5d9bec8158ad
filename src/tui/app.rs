//! Application state and logic.

use super::input::Action;
use crate::client::ClientEvent;
use boardwire_engine::{MatchState, PlayerId};
use boardwire_tictactoe::{Board, Position};
use tracing::debug;

/// Outcome line shown under a board: `Winner: <id>`, `Draw!` or nothing.
pub fn status_line(state: &MatchState<Board>) -> String {
    state
        .ctx
        .gameover()
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default()
}

/// Whose turn it is, empty once the game is over.
pub fn turn_hint(state: &MatchState<Board>) -> String {
    if state.ctx.is_over() {
        String::new()
    } else {
        format!("Player {} to move", state.ctx.current_player())
    }
}

/// Request for the connection behind a pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Claim `cell` as the pane's player.
    Click {
        /// Pane index.
        pane: usize,
        /// Cell index (0-8).
        cell: usize,
    },
    /// Start over.
    Reset {
        /// Pane index.
        pane: usize,
    },
}

/// One client view: a seat (or spectator) and the last snapshot it received.
#[derive(Debug, Clone)]
pub struct Pane {
    player: Option<PlayerId>,
    snapshot: Option<MatchState<Board>>,
    cursor: Position,
    notice: Option<String>,
    connected: bool,
}

impl Pane {
    /// Creates a pane for `player`, or a spectator pane for `None`.
    pub fn new(player: Option<PlayerId>) -> Self {
        Self {
            player,
            snapshot: None,
            cursor: Position::Center,
            notice: None,
            connected: true,
        }
    }

    /// Pane title.
    pub fn title(&self) -> String {
        match &self.player {
            Some(player) => format!("Player {}", player),
            None => "Spectator".to_string(),
        }
    }

    /// Seat of this pane.
    pub fn player(&self) -> Option<&PlayerId> {
        self.player.as_ref()
    }

    /// Last snapshot received.
    pub fn snapshot(&self) -> Option<&MatchState<Board>> {
        self.snapshot.as_ref()
    }

    /// Cursor position.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Transient message, e.g. the reason of the last rejection.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// False once the server connection closed.
    pub fn connected(&self) -> bool {
        self.connected
    }

    fn handle_event(&mut self, event: ClientEvent) {
        match event {
            ClientEvent::Snapshot(state) => {
                self.snapshot = Some(*state);
                self.notice = None;
            }
            ClientEvent::Rejected(reason) => self.notice = Some(reason),
            ClientEvent::Error(reason) => self.notice = Some(format!("Error: {}", reason)),
            ClientEvent::Closed => {
                self.connected = false;
                self.notice = Some("Disconnected".to_string());
            }
        }
    }
}

/// Main application state.
#[derive(Debug, Clone)]
pub struct App {
    panes: Vec<Pane>,
    focused: usize,
    should_quit: bool,
}

impl App {
    /// Creates an app with one pane per seat.
    pub fn new(panes: Vec<Pane>) -> Self {
        Self {
            panes,
            focused: 0,
            should_quit: false,
        }
    }

    /// All panes, left to right.
    pub fn panes(&self) -> &[Pane] {
        &self.panes
    }

    /// Index of the pane receiving input.
    pub fn focused(&self) -> usize {
        self.focused
    }

    /// True after the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Routes a server event to its pane.
    pub fn handle_event(&mut self, pane: usize, event: ClientEvent) {
        debug!(pane, ?event, "Handling client event");
        if let Some(target) = self.panes.get_mut(pane) {
            target.handle_event(event);
        }
    }

    /// Applies a key action, returning what the focused connection must send.
    pub fn apply(&mut self, action: Action) -> Option<Command> {
        let pane = self.focused;
        match action {
            Action::Quit => {
                self.should_quit = true;
                None
            }
            Action::NextPane => {
                if !self.panes.is_empty() {
                    self.focused = (self.focused + 1) % self.panes.len();
                }
                None
            }
            Action::MoveCursor(d_row, d_col) => {
                if let Some(p) = self.panes.get_mut(pane) {
                    p.cursor = p.cursor.step(d_row, d_col);
                }
                None
            }
            Action::ClickCursor => {
                let cell = self.panes.get(pane)?.cursor.to_index();
                self.click(pane, cell)
            }
            Action::Click(cell) => {
                let pos = Position::from_index(cell);
                if let (Some(p), Some(pos)) = (self.panes.get_mut(pane), pos) {
                    p.cursor = pos;
                }
                self.click(pane, cell)
            }
            Action::Reset => {
                self.panes.get(pane)?;
                Some(Command::Reset { pane })
            }
        }
    }

    // The server judges every move, spectator clicks included.
    fn click(&self, pane: usize, cell: usize) -> Option<Command> {
        self.panes.get(pane)?;
        Some(Command::Click { pane, cell })
    }
}
