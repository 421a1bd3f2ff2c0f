use crate::board::{Board, TrackId};
use crate::card::{CardCounts, DestinationTicket, TrainColor};
use crate::constants::GameConstants;

use serde::Serialize;
use smallvec::SmallVec;

/// The three kinds of move a player can take on their turn.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Move {
    /// Draw up to two train cards (face up or blind).
    DrawCards,
    /// Claim one unclaimed track, paying cards and trains.
    ClaimTrack,
    /// Draw destination tickets and keep at least the required minimum.
    DrawTickets,
}

/// The boundary the engine drives every strategy through.
///
/// Players are stateful: the engine pushes game events into them
/// (`inform_*`, `receive_*`) and pulls decisions out (`choose_*`,
/// `select_tickets`). Only the active player's decision methods run at any
/// time, and never concurrently with engine mutation.
///
/// Players are trusted simulation components. The engine still validates
/// every answer, but a violation ends the game with an error rather than
/// being retried: an illegal answer is a bug in the strategy.
pub trait Player {
    /// One-time setup before the game starts.
    fn initialize(&mut self, player_index: usize, board: &Board, constants: &GameConstants);

    /// Called once per turn, before any decision is requested: the current
    /// track ownership (`None` = unclaimed) and the face-up card row.
    fn inform_status(&mut self, ownership: &[Option<usize>], face_up: &CardCounts);

    /// Some player picked up a train card. `color` is `None` for
    /// face-down draws, where peers must not learn the color.
    fn inform_card_pickup(&mut self, _player_index: usize, _color: Option<TrainColor>) {}

    /// Some player claimed a track.
    fn inform_track_claim(&mut self, _player_index: usize, _track: TrackId) {}

    /// Some player picked up destination tickets.
    fn inform_ticket_pickup(&mut self, _player_index: usize) {}

    /// Which kind of move this player wants to make this turn.
    fn choose_move(&mut self) -> Move;

    /// Which card to pick up: `Some(color)` takes that face-up card,
    /// `None` draws blind from the pile. `picks_remaining` counts this
    /// pick, so it is 2 on the first ask and 1 on the second.
    fn choose_pickup(&mut self, picks_remaining: usize) -> Option<TrainColor>;

    /// Which track to claim, and the concrete color to pay with. Naming
    /// the wild color is illegal even when paying entirely in wild cards.
    fn choose_track_claim(&mut self) -> (TrackId, TrainColor);

    /// The engine hands this player a train card.
    fn receive_train_card(&mut self, color: TrainColor);

    /// The engine hands this player a destination ticket they accepted.
    fn receive_ticket(&mut self, ticket: DestinationTicket);

    /// Pick which of the offered tickets to keep, by index into `offered`.
    /// At least `min_to_accept` distinct, in-range indices are required.
    fn select_tickets(
        &mut self,
        offered: &[DestinationTicket],
        min_to_accept: usize,
    ) -> SmallVec<[usize; 3]>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_to_json() -> serde_json::Result<()> {
        assert_eq!(serde_json::to_string(&Move::DrawCards)?, r#""draw_cards""#);
        assert_eq!(serde_json::to_string(&Move::ClaimTrack)?, r#""claim_track""#);
        assert_eq!(
            serde_json::to_string(&Move::DrawTickets)?,
            r#""draw_tickets""#
        );
        Ok(())
    }
}
