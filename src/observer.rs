use crate::board::TrackId;
use crate::card::{DestinationTicket, TrainColor};
use crate::player::Move;

use serde::Serialize;

/// Everything noteworthy that happens inside a game.
///
/// The engine emits these unconditionally through its [`Observer`];
/// visualization exporters, broadcast channels, and log sinks are all just
/// observers. Events only describe state, they never mutate it.
///
/// # JSON
/// Events are serialized with a snake_case `event` tag, so external sinks
/// can stream them as JSON lines.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum GameEvent {
    TurnStarted {
        player: usize,
    },
    MoveChosen {
        player: usize,
        chosen: Move,
    },
    /// A train card went to a player's hand. `color` is `None` when the
    /// draw was face-down, so observers learn no more than the table does.
    CardDealt {
        player: usize,
        color: Option<TrainColor>,
    },
    TicketDealt {
        player: usize,
        ticket: DestinationTicket,
    },
    TrackClaimed {
        player: usize,
        track: TrackId,
        color: TrainColor,
        colored_spent: u8,
        wilds_spent: u8,
    },
    ScoreComputed {
        player: usize,
        score: i32,
    },
    GameOver {
        winners: Vec<usize>,
    },
}

/// Capability for watching a game from the outside.
///
/// Injected into the engine at construction; the engine calls
/// [`Observer::on_event`] unconditionally, so implementations decide what
/// is worth keeping. [`NullObserver`] is the default.
pub trait Observer {
    fn on_event(&mut self, event: &GameEvent);
}

/// Observer that drops every event.
pub struct NullObserver;

impl Observer for NullObserver {
    fn on_event(&mut self, _event: &GameEvent) {}
}

/// Observer that forwards events to the [`log`] facade.
///
/// Per-turn chatter goes to `debug!`, game milestones to `info!`. The
/// embedding binary picks the logger implementation and verbosity.
pub struct LoggingObserver;

impl Observer for LoggingObserver {
    fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::TurnStarted { player } => {
                log::debug!("it is the turn of player {player}");
            }
            GameEvent::MoveChosen { player, chosen } => {
                log::debug!("player {player} chose to {chosen:?}");
            }
            GameEvent::CardDealt {
                player,
                color: Some(color),
            } => {
                log::debug!("giving a {color} card to player {player}");
            }
            GameEvent::CardDealt {
                player,
                color: None,
            } => {
                log::debug!("giving a face-down card to player {player}");
            }
            GameEvent::TicketDealt { player, ticket } => {
                let (start, end) = ticket.destination;
                log::debug!(
                    "giving a ticket from {start} to {end} worth {} to player {player}",
                    ticket.points
                );
            }
            GameEvent::TrackClaimed {
                player,
                track,
                color,
                colored_spent,
                wilds_spent,
            } => {
                log::info!(
                    "player {player} claimed track {track} with {colored_spent} {color} and {wilds_spent} wild cards"
                );
            }
            GameEvent::ScoreComputed { player, score } => {
                log::info!("the score of player {player} is {score}");
            }
            GameEvent::GameOver { winners } => {
                log::info!("game over, winners: {winners:?}");
            }
        }
    }
}
