use crate::board::TrackId;
use crate::card::TrainColor;

use thiserror::Error;

/// Ways a single move can break the rules.
///
/// Player implementations are trusted strategy components, so any of these
/// indicates a bug in a strategy rather than a recoverable game condition.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum RuleViolationKind {
    #[error("picked the face-up color {0} but no such card is face up")]
    PickedUnavailableColor(TrainColor),
    #[error("picked a wild card on the second pickup of the turn")]
    WildcardOnSecondPickup,
    #[error("track {0} does not exist on this board")]
    UnknownTrack(TrackId),
    #[error("tried to claim track {0}, which is already claimed")]
    TrackAlreadyClaimed(TrackId),
    #[error("named the wild color as payment; a concrete color is required")]
    NamedWildcardAsClaimColor,
    #[error("tried to claim track {track} with {color} cards")]
    WrongColorForTrack { track: TrackId, color: TrainColor },
    #[error("not enough trains left to claim track {0}")]
    NotEnoughTrains(TrackId),
    #[error("not enough {color} or wild cards in hand to claim track {track}")]
    NotEnoughCards { track: TrackId, color: TrainColor },
    #[error("kept {accepted} destination tickets, but at least {required} must be kept")]
    NotEnoughTicketsAccepted { accepted: usize, required: usize },
    #[error("destination ticket selection index {0} is out of range")]
    TicketIndexOutOfRange(usize),
    #[error("destination ticket selection index {0} appears more than once")]
    DuplicateTicketIndex(usize),
}

/// The fatal conditions that end a game abnormally.
///
/// Resource exhaustion means the constant set is too small for the player
/// count; a rule violation means a strategy is buggy. Neither is retried:
/// the error carries enough context for a harness to log before bailing.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum GameError {
    #[error("no train card left to draw: every card is face up or in a hand")]
    TrainCardPileExhausted,
    #[error("the destination ticket pile ran out during a mandatory deal")]
    TicketPileExhausted,
    #[error("rule violation by player {player}: {kind}")]
    RuleViolation {
        player: usize,
        kind: RuleViolationKind,
    },
}

impl GameError {
    /// Shorthand used by the engine's validation paths.
    #[inline]
    pub(crate) fn violation(player: usize, kind: RuleViolationKind) -> Self {
        Self::RuleViolation { player, kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn violation_message_names_the_player() {
        let err = GameError::violation(2, RuleViolationKind::WildcardOnSecondPickup);

        assert_eq!(
            err.to_string(),
            "rule violation by player 2: picked a wild card on the second pickup of the turn"
        );
    }

    #[test]
    fn exhaustion_messages() {
        assert!(GameError::TrainCardPileExhausted
            .to_string()
            .contains("every card is face up or in a hand"));
        assert!(GameError::TicketPileExhausted
            .to_string()
            .contains("mandatory deal"));
    }
}
