use serde::{Deserialize, Serialize};

/// Everything configurable about a game, injected into the
/// [`crate::engine::Engine`] at construction.
///
/// The defaults reproduce the classic game: a 110-card train deck,
/// 45-train player budgets, and the usual deal sizes. A parameter-search
/// harness can deserialize alternative sets from JSON.
///
/// # Example
/// ```
/// use railbots::constants::GameConstants;
///
/// let constants = GameConstants::default();
/// assert_eq!(constants.num_starting_trains, 45);
/// assert_eq!(constants.track_length_scores[3], 4);
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct GameConstants {
    /// How many cards of each concrete color the train deck holds.
    pub num_color_cards: u8,
    /// How many wild cards the train deck holds.
    pub num_wild_cards: u8,
    /// Per-player train budget at the start of the game.
    pub num_starting_trains: u8,
    /// Size of the public face-up card row.
    pub num_face_up_cards: usize,
    /// Train cards dealt to each player during setup.
    pub num_initial_train_cards: usize,
    /// Destination tickets offered to each player during setup.
    pub num_initial_tickets_offered: usize,
    /// Minimum tickets each player must keep from the initial offer.
    pub num_initial_tickets_accepted: usize,
    /// Destination tickets offered on a ticket-draw turn.
    pub num_tickets_offered: usize,
    /// Minimum tickets that must be kept on a ticket-draw turn.
    pub num_tickets_accepted: usize,
    /// End-game bonus for the longest continuous path.
    pub longest_path_bonus: i32,
    /// Points granted for a claimed track, indexed by track length.
    pub track_length_scores: [i32; 8],
    /// Seed for every random decision in the game. Two games with the same
    /// seed, constants, and players play out identically.
    pub seed: u64,
}

impl Default for GameConstants {
    fn default() -> Self {
        Self {
            num_color_cards: 12,
            num_wild_cards: 14,
            num_starting_trains: 45,
            num_face_up_cards: 5,
            num_initial_train_cards: 4,
            num_initial_tickets_offered: 3,
            num_initial_tickets_accepted: 2,
            num_tickets_offered: 3,
            num_tickets_accepted: 1,
            longest_path_bonus: 10,
            track_length_scores: [0, 1, 2, 4, 7, 10, 15, 21],
            seed: 0,
        }
    }
}

impl GameConstants {
    /// Points granted for claiming a track of the given length.
    #[inline]
    pub fn score_for_track_length(&self, length: u8) -> i32 {
        self.track_length_scores[length as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_deck_composition() {
        let constants = GameConstants::default();

        // 8 concrete colors plus the wild cards.
        let total = 8 * constants.num_color_cards as usize + constants.num_wild_cards as usize;
        assert_eq!(total, 110);
    }

    #[test]
    fn track_scores_grow_with_length() {
        let constants = GameConstants::default();

        for length in 1..=6 {
            assert!(
                constants.score_for_track_length(length)
                    > constants.score_for_track_length(length - 1)
            );
        }
    }

    #[test]
    fn constants_to_json_and_back() -> serde_json::Result<()> {
        let constants = GameConstants::default();
        let encoded = serde_json::to_string(&constants)?;

        assert_eq!(serde_json::from_str::<GameConstants>(&encoded)?, constants);
        Ok(())
    }
}
