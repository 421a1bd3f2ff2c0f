use crate::board::{Board, Track, TrackId};
use crate::card::{CardCounts, DestinationTicket, TrainColor};
use crate::constants::GameConstants;
use crate::distance::DistanceField;
use crate::player::{Move, Player};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;

/// Outcome of checking whether a hand can pay for a track right now.
enum ClaimPlan {
    /// The track is affordable, paying with this concrete color.
    Ready(TrainColor),
    /// Not affordable yet; this is the most promising color to collect.
    Missing(TrainColor),
}

/// Decides which concrete color could claim the given track with the given
/// hand. Wild cards in hand cover any shortfall; for an any-color track,
/// every concrete color is tried and the best-supplied one is kept as the
/// fallback.
fn plan_claim(track: &Track, hand: &CardCounts) -> ClaimPlan {
    let wilds = hand[TrainColor::Wild];

    if track.color.is_not_wild() {
        if hand[track.color] + wilds >= track.length {
            return ClaimPlan::Ready(track.color);
        }
        return ClaimPlan::Missing(track.color);
    }

    let mut best_color = TrainColor::Black;
    let mut best_supply = 0;
    for color in TrainColor::concrete_colors() {
        let supply = hand[color] + wilds;
        if supply >= track.length {
            return ClaimPlan::Ready(color);
        }
        if supply >= best_supply {
            best_supply = supply;
            best_color = color;
        }
    }

    ClaimPlan::Missing(best_color)
}

/// Deducts a claim's cost from a mirrored hand: concrete cards first, wild
/// cards only for the shortfall.
fn spend_from_hand(hand: &mut CardCounts, color: TrainColor, length: u8) {
    let colored = hand[color].min(length);
    hand[color] -= colored;
    hand[TrainColor::Wild] -= length - colored;
}

/// Strategy that plays the first legal claim it sees.
///
/// Claims the lowest-id track it can afford; otherwise draws two blind
/// cards. Keeps the first tickets offered and then ignores them. Useful as
/// an opponent baseline and as the degenerate point of the strategy space.
pub struct BaselinePlayer {
    board: Board,
    ownership: Vec<Option<usize>>,
    hand: CardCounts,
    trains: u8,
}

impl BaselinePlayer {
    pub fn new() -> Self {
        Self {
            board: Board::new(Vec::new()),
            ownership: Vec::new(),
            hand: CardCounts::default(),
            trains: 0,
        }
    }

    /// The lowest-id unclaimed track this player can pay for right now.
    fn first_claimable(&self) -> Option<(TrackId, TrainColor)> {
        for track in self.board.tracks() {
            if self.ownership[track.id].is_some() || self.trains < track.length {
                continue;
            }

            if let ClaimPlan::Ready(color) = plan_claim(track, &self.hand) {
                return Some((track.id, color));
            }
        }

        None
    }
}

impl Default for BaselinePlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for BaselinePlayer {
    fn initialize(&mut self, _player_index: usize, board: &Board, constants: &GameConstants) {
        self.board = board.clone();
        self.ownership = vec![None; board.num_tracks()];
        self.trains = constants.num_starting_trains;
    }

    fn inform_status(&mut self, ownership: &[Option<usize>], _face_up: &CardCounts) {
        self.ownership = ownership.to_vec();
    }

    fn choose_move(&mut self) -> Move {
        if self.first_claimable().is_some() {
            Move::ClaimTrack
        } else {
            Move::DrawCards
        }
    }

    fn choose_pickup(&mut self, _picks_remaining: usize) -> Option<TrainColor> {
        None
    }

    fn choose_track_claim(&mut self) -> (TrackId, TrainColor) {
        let (track_id, color) = match self.first_claimable() {
            Some(claim) => claim,
            None => unreachable!("claim requested with no affordable track"),
        };

        spend_from_hand(&mut self.hand, color, self.board.track(track_id).length);
        self.trains -= self.board.track(track_id).length;

        (track_id, color)
    }

    fn receive_train_card(&mut self, color: TrainColor) {
        self.hand[color] += 1;
    }

    fn receive_ticket(&mut self, _ticket: DestinationTicket) {
        // This strategy never plays toward tickets.
    }

    fn select_tickets(
        &mut self,
        _offered: &[DestinationTicket],
        min_to_accept: usize,
    ) -> SmallVec<[usize; 3]> {
        (0..min_to_accept).collect()
    }
}

/// The tunable parameters of [`HeuristicPlayer`].
///
/// The defaults are the hand-tuned set; [`ScoringWeights::from_unit_vector`]
/// maps a `[0, 1]` genome onto the documented ranges so a parameter-search
/// harness can explore the space without knowing them.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ScoringWeights {
    /// Geometric decay applied to each successively-farther tier of tracks
    /// when scoring ticket proximity. Range 0–1.
    pub tier_decay: f64,
    /// Exponent on `(distance sum + 1)` in the tier weight. Range 0–10.
    pub proximity_power: f64,
    /// How much a matching face-up card counts toward affording a track,
    /// relative to a card in hand. Range 0–5.
    pub face_up_card_value: f64,
    /// Base of the exponential discount on hard-to-afford tracks.
    /// Range 0–5; below 1 the discount shrinks with difficulty.
    pub difficulty_base: f64,
    /// Weight of the ticket-proximity score in the merge. Range 0–1.
    pub ticket_weight: f64,
    /// Weight of the track point value in the merge. Range 0–1.
    pub track_value_weight: f64,
    /// Weight of the acquisition-difficulty score in the merge. Range 0–1.
    pub difficulty_weight: f64,
    /// Multiplier on last turn's chosen track, to keep chasing it.
    /// Range 0–100.
    pub repeat_bonus: f64,
    /// How many times to sample the move distribution before playing the
    /// most frequent outcome. 1 plays a single sample. Range 1–101.
    pub samples: usize,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            tier_decay: 0.5,
            proximity_power: 5.0,
            face_up_card_value: 0.5,
            difficulty_base: 0.9,
            ticket_weight: 1.0,
            track_value_weight: 0.1,
            difficulty_weight: 0.0,
            repeat_bonus: 1.0,
            samples: 1,
        }
    }
}

fn scale(x: f64, min: f64, max: f64) -> f64 {
    min + (max - min) * x
}

impl ScoringWeights {
    /// Maps a genome of nine values in `[0, 1]` onto the weight ranges.
    pub fn from_unit_vector(genome: &[f64; 9]) -> Self {
        Self {
            tier_decay: scale(genome[0], 0.0, 1.0),
            proximity_power: scale(genome[1], 0.0, 10.0),
            face_up_card_value: scale(genome[2], 0.0, 5.0),
            difficulty_base: scale(genome[3], 0.0, 5.0),
            ticket_weight: scale(genome[4], 0.0, 1.0),
            track_value_weight: scale(genome[5], 0.0, 1.0),
            difficulty_weight: scale(genome[6], 0.0, 1.0),
            repeat_bonus: scale(genome[7], 0.0, 100.0),
            samples: scale(genome[8], 1.0, 101.0).floor() as usize,
        }
    }
}

/// A concrete move resolved from one sample of the track distribution.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
enum SampledMove {
    /// Claim this track now.
    Claim(TrackId),
    /// Cannot afford the sampled track yet; collect this color for it.
    Chase(TrainColor),
    /// The sample fell outside every track: just draw cards.
    Draw,
}

/// Strategy that scores every unclaimed track each turn and samples its
/// move from the resulting probability distribution.
///
/// Three signals are merged per track: proximity to this player's
/// unfulfilled tickets (via [`DistanceField`]s from both ticket endpoints),
/// the track's point value, and how hard the track is to pay for with the
/// current hand and face-up row. Each signal is normalized, merged with the
/// configured weights, and renormalized into a distribution; one designated
/// extra outcome means "draw cards instead". The distribution is sampled
/// [`ScoringWeights::samples`] times and the most frequent concrete move is
/// played, so a single configurable type covers both the greedy
/// single-sample strategy and the majority-vote variant.
pub struct HeuristicPlayer {
    weights: ScoringWeights,
    player_index: usize,
    board: Board,
    constants: GameConstants,
    ownership: Vec<Option<usize>>,
    face_up: CardCounts,
    hand: CardCounts,
    tickets: Vec<DestinationTicket>,
    trains: u8,
    track_scores: Vec<f64>,
    last_chosen_track: Option<TrackId>,
    pickup_preference: Option<TrainColor>,
    rng: StdRng,
}

impl HeuristicPlayer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self {
            weights,
            player_index: 0,
            board: Board::new(Vec::new()),
            constants: GameConstants::default(),
            ownership: Vec::new(),
            face_up: CardCounts::default(),
            hand: CardCounts::default(),
            tickets: Vec::new(),
            trains: 0,
            track_scores: Vec::new(),
            last_chosen_track: None,
            pickup_preference: None,
            rng: StdRng::seed_from_u64(0),
        }
    }

    /// Per-track proximity scores for one ticket. A ticket whose endpoints
    /// are already connected for free contributes nothing.
    fn ticket_track_scores(&self, ticket: &DestinationTicket) -> Vec<f64> {
        let mut scores = vec![0.0; self.board.num_tracks()];
        let (start, end) = ticket.destination;

        let from_start =
            DistanceField::compute(&self.board, &self.ownership, self.player_index, start);
        if from_start.cost(end) == Some(0) {
            return scores;
        }
        let from_end = DistanceField::compute(&self.board, &self.ownership, self.player_index, end);

        // Tier the tracks by their summed distance to both endpoints;
        // nearer tiers weigh more, decaying geometrically per tier.
        let mut tiers: BTreeMap<u32, SmallVec<[TrackId; 8]>> = BTreeMap::new();
        for track in self.board.tracks() {
            if let (Some(to_start), Some(to_end)) = (
                from_start.track_distance(track),
                from_end.track_distance(track),
            ) {
                tiers.entry(to_start + to_end).or_default().push(track.id);
            }
        }

        let mut tier_multiplier = 1.0;
        for (distance_sum, track_ids) in tiers {
            let weight = tier_multiplier
                / ((distance_sum + 1) as f64).powf(self.weights.proximity_power);
            for track_id in track_ids {
                scores[track_id] = weight;
            }
            tier_multiplier *= self.weights.tier_decay;
        }

        scores
    }

    /// How many cards this player is still missing for a track, counting a
    /// discounted value for matching face-up cards. Zero when the track is
    /// already affordable.
    fn acquisition_difficulty(&self, track: &Track) -> f64 {
        let supply = |color: TrainColor| {
            self.hand[color] as f64
                + self.hand[TrainColor::Wild] as f64
                + self.weights.face_up_card_value
                    * (self.face_up[color] as f64 + self.face_up[TrainColor::Wild] as f64)
        };

        let available = if track.color.is_wild() {
            TrainColor::concrete_colors()
                .map(supply)
                .fold(0.0, f64::max)
        } else {
            supply(track.color)
        };

        (track.length as f64 - available).max(0.0)
    }

    fn recompute_track_scores(&mut self) {
        let num_tracks = self.board.num_tracks();

        let mut ticket_scores = vec![0.0; num_tracks];
        for ticket in &self.tickets {
            let per_track = self.ticket_track_scores(ticket);
            for (score, contribution) in ticket_scores.iter_mut().zip(per_track) {
                *score += contribution * ticket.points as f64;
            }
        }

        let mut value_scores = vec![0.0; num_tracks];
        let mut difficulty_scores = vec![0.0; num_tracks];
        for track in self.board.tracks() {
            if self.ownership[track.id].is_none() {
                value_scores[track.id] =
                    self.constants.score_for_track_length(track.length) as f64;
                difficulty_scores[track.id] = self
                    .weights
                    .difficulty_base
                    .powf(self.acquisition_difficulty(track));
            }
        }

        normalize(&mut ticket_scores);
        normalize(&mut value_scores);
        normalize(&mut difficulty_scores);

        let mut scores: Vec<f64> = (0..num_tracks)
            .map(|i| {
                ticket_scores[i] * self.weights.ticket_weight
                    + value_scores[i] * self.weights.track_value_weight
                    + difficulty_scores[i] * self.weights.difficulty_weight
            })
            .collect();

        if let Some(last) = self.last_chosen_track {
            scores[last] *= self.weights.repeat_bonus;
        }

        for track in self.board.tracks() {
            if self.ownership[track.id].is_some() || self.trains < track.length {
                scores[track.id] = 0.0;
            }
        }
        normalize(&mut scores);

        self.track_scores = scores;
    }

    /// One draw from the track distribution; `None` is the designated
    /// "draw cards" outcome, reached when no track is eligible.
    fn sample_track(&mut self) -> Option<TrackId> {
        let roll: f64 = self.rng.gen();
        let mut cumulative = 0.0;

        for (track_id, score) in self.track_scores.iter().enumerate() {
            cumulative += score;
            if cumulative >= roll {
                return Some(track_id);
            }
        }

        None
    }

    fn best_move_for(&self, track_id: TrackId) -> SampledMove {
        match plan_claim(self.board.track(track_id), &self.hand) {
            ClaimPlan::Ready(_) => SampledMove::Claim(track_id),
            ClaimPlan::Missing(color) => SampledMove::Chase(color),
        }
    }
}

/// Scales a score vector into a distribution by dividing by its sum.
/// An all-zero vector is left unchanged.
fn normalize(scores: &mut [f64]) {
    let sum: f64 = scores.iter().sum();
    if sum == 0.0 {
        return;
    }
    for score in scores {
        *score /= sum;
    }
}

impl Player for HeuristicPlayer {
    fn initialize(&mut self, player_index: usize, board: &Board, constants: &GameConstants) {
        self.player_index = player_index;
        self.board = board.clone();
        self.constants = constants.clone();
        self.ownership = vec![None; board.num_tracks()];
        self.trains = constants.num_starting_trains;
        self.track_scores = vec![0.0; board.num_tracks()];
        self.rng = StdRng::seed_from_u64(constants.seed.wrapping_add(1 + player_index as u64));
    }

    fn inform_status(&mut self, ownership: &[Option<usize>], face_up: &CardCounts) {
        self.ownership = ownership.to_vec();
        self.face_up = *face_up;
        self.recompute_track_scores();
    }

    fn choose_move(&mut self) -> Move {
        let samples = self.weights.samples.max(1);
        // Keyed by a totally ordered move so tie-breaking below stays
        // deterministic for a fixed seed.
        let mut tallies: BTreeMap<SampledMove, usize> = BTreeMap::new();
        let mut best_tally = 0;

        for _ in 0..samples {
            let sampled = match self.sample_track() {
                Some(track_id) => self.best_move_for(track_id),
                None => SampledMove::Draw,
            };

            let tally = tallies.entry(sampled).or_insert(0);
            *tally += 1;
            best_tally = best_tally.max(*tally);
        }

        let tied: Vec<SampledMove> = tallies
            .into_iter()
            .filter(|&(_, tally)| tally == best_tally)
            .map(|(sampled, _)| sampled)
            .collect();
        let chosen = tied[self.rng.gen_range(0..tied.len())];

        match chosen {
            SampledMove::Claim(track_id) => {
                self.last_chosen_track = Some(track_id);
                Move::ClaimTrack
            }
            SampledMove::Chase(color) => {
                self.pickup_preference = Some(color);
                Move::DrawCards
            }
            SampledMove::Draw => {
                self.pickup_preference = None;
                Move::DrawCards
            }
        }
    }

    fn choose_pickup(&mut self, picks_remaining: usize) -> Option<TrainColor> {
        if let Some(color) = self.pickup_preference {
            if self.face_up[color] > 0 {
                return Some(color);
            }
            // A face-up wild is worth the forfeited second pick.
            if self.face_up[TrainColor::Wild] > 0 && picks_remaining > 1 {
                return Some(TrainColor::Wild);
            }
        }

        None
    }

    fn choose_track_claim(&mut self) -> (TrackId, TrainColor) {
        let track_id = match self.last_chosen_track {
            Some(track_id) => track_id,
            None => unreachable!("claim requested before a track was chosen"),
        };
        let color = match plan_claim(self.board.track(track_id), &self.hand) {
            ClaimPlan::Ready(color) => color,
            ClaimPlan::Missing(_) => {
                unreachable!("chosen track {track_id} is no longer affordable")
            }
        };

        spend_from_hand(&mut self.hand, color, self.board.track(track_id).length);
        self.trains -= self.board.track(track_id).length;

        (track_id, color)
    }

    fn receive_train_card(&mut self, color: TrainColor) {
        self.hand[color] += 1;
    }

    fn receive_ticket(&mut self, ticket: DestinationTicket) {
        self.tickets.push(ticket);
    }

    fn select_tickets(
        &mut self,
        _offered: &[DestinationTicket],
        min_to_accept: usize,
    ) -> SmallVec<[usize; 3]> {
        (0..min_to_accept).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::city::City;
    use crate::ticket;

    const EPSILON: f64 = 1e-9;

    fn chain_board() -> Board {
        // Atlanta - Boston - Calgary - Charleston, plus a spur to Helena.
        Board::new(vec![
            ((City::Atlanta, City::Boston), TrainColor::Wild, 2),
            ((City::Boston, City::Calgary), TrainColor::Wild, 2),
            ((City::Calgary, City::Charleston), TrainColor::Wild, 2),
            ((City::Atlanta, City::Helena), TrainColor::Wild, 1),
        ])
    }

    fn ready_player(board: &Board, tickets: Vec<DestinationTicket>) -> HeuristicPlayer {
        let mut player = HeuristicPlayer::new(ScoringWeights::default());
        player.initialize(0, board, &GameConstants::default());
        for ticket in tickets {
            player.receive_ticket(ticket);
        }
        player
    }

    // Tests for the shared claim planning.

    #[test]
    fn plan_claim_prefers_the_track_color() {
        let track = Track {
            id: 0,
            endpoints: (City::Atlanta, City::Boston),
            color: TrainColor::Red,
            length: 3,
        };

        let mut hand = CardCounts::default();
        hand[TrainColor::Red] = 2;
        hand[TrainColor::Wild] = 1;

        match plan_claim(&track, &hand) {
            ClaimPlan::Ready(color) => assert_eq!(color, TrainColor::Red),
            ClaimPlan::Missing(_) => panic!("track should be affordable"),
        }
    }

    #[test]
    fn plan_claim_reports_the_missing_color() {
        let track = Track {
            id: 0,
            endpoints: (City::Atlanta, City::Boston),
            color: TrainColor::Green,
            length: 4,
        };

        let hand = CardCounts::default();
        match plan_claim(&track, &hand) {
            ClaimPlan::Ready(_) => panic!("empty hand cannot afford length 4"),
            ClaimPlan::Missing(color) => assert_eq!(color, TrainColor::Green),
        }
    }

    #[test]
    fn plan_claim_any_color_tracks_use_the_best_supplied_color() {
        let track = Track {
            id: 0,
            endpoints: (City::Atlanta, City::Boston),
            color: TrainColor::Wild,
            length: 3,
        };

        let mut hand = CardCounts::default();
        hand[TrainColor::Orange] = 2;
        match plan_claim(&track, &hand) {
            ClaimPlan::Ready(_) => panic!("two cards cannot afford length 3"),
            ClaimPlan::Missing(color) => assert_eq!(color, TrainColor::Orange),
        }

        hand[TrainColor::Wild] = 1;
        match plan_claim(&track, &hand) {
            ClaimPlan::Ready(color) => assert_eq!(color, TrainColor::Orange),
            ClaimPlan::Missing(_) => panic!("orange plus a wild affords length 3"),
        }
    }

    #[test]
    fn spending_prefers_concrete_cards() {
        let mut hand = CardCounts::default();
        hand[TrainColor::Blue] = 2;
        hand[TrainColor::Wild] = 3;

        spend_from_hand(&mut hand, TrainColor::Blue, 4);

        assert_eq!(hand[TrainColor::Blue], 0);
        assert_eq!(hand[TrainColor::Wild], 1);
    }

    // Tests for `ScoringWeights`.

    #[test]
    fn unit_vector_maps_to_the_documented_ranges() {
        let low = ScoringWeights::from_unit_vector(&[0.0; 9]);
        assert_eq!(low.tier_decay, 0.0);
        assert_eq!(low.repeat_bonus, 0.0);
        assert_eq!(low.samples, 1);

        let high = ScoringWeights::from_unit_vector(&[1.0; 9]);
        assert_eq!(high.proximity_power, 10.0);
        assert_eq!(high.repeat_bonus, 100.0);
        assert_eq!(high.samples, 101);
    }

    #[test]
    fn weights_to_json_and_back() -> serde_json::Result<()> {
        let weights = ScoringWeights::default();
        let encoded = serde_json::to_string(&weights)?;

        assert_eq!(serde_json::from_str::<ScoringWeights>(&encoded)?, weights);
        Ok(())
    }

    // Tests for `HeuristicPlayer`'s scoring.

    #[test]
    fn track_scores_form_a_distribution() {
        let board = chain_board();
        let mut player = ready_player(&board, vec![ticket! {City::Atlanta, City::Charleston, 9}]);

        player.inform_status(&vec![None; board.num_tracks()], &CardCounts::default());

        let sum: f64 = player.track_scores.iter().sum();
        assert!((sum - 1.0).abs() < EPSILON, "sum was {sum}");
        assert!(player.track_scores.iter().all(|&score| score >= 0.0));
    }

    #[test]
    fn scores_are_all_zero_when_no_track_is_eligible() {
        let board = chain_board();
        let mut player = ready_player(&board, vec![ticket! {City::Atlanta, City::Charleston, 9}]);

        let ownership = vec![Some(1); board.num_tracks()];
        player.inform_status(&ownership, &CardCounts::default());

        assert!(player.track_scores.iter().all(|&score| score == 0.0));
    }

    #[test]
    fn over_budget_tracks_are_zeroed() {
        let board = chain_board();
        let mut player = ready_player(&board, Vec::new());
        player.trains = 1;

        player.inform_status(&vec![None; board.num_tracks()], &CardCounts::default());

        // Only the length-1 spur to Helena fits a single remaining train.
        assert_eq!(player.track_scores[0], 0.0);
        assert_eq!(player.track_scores[1], 0.0);
        assert_eq!(player.track_scores[2], 0.0);
        assert!((player.track_scores[3] - 1.0).abs() < EPSILON);
    }

    #[test]
    fn ticket_proximity_outranks_the_spur() {
        let board = chain_board();
        let mut player = ready_player(&board, vec![ticket! {City::Atlanta, City::Charleston, 9}]);

        player.inform_status(&vec![None; board.num_tracks()], &CardCounts::default());

        // Every chain track lies on the Atlanta-Charleston path (distance
        // sum 2); the Helena spur does not (sum 3) and must score lower.
        let spur = player.track_scores[3];
        for on_path in 0..3 {
            assert!(
                player.track_scores[on_path] > spur,
                "track {on_path} should outrank the spur"
            );
        }
    }

    #[test]
    fn fulfilled_tickets_stop_contributing() {
        let board = chain_board();
        let mut player = ready_player(&board, vec![ticket! {City::Atlanta, City::Boston, 9}]);

        let mut ownership = vec![None; board.num_tracks()];
        ownership[0] = Some(0);
        player.inform_status(&ownership, &CardCounts::default());

        let with_fulfilled = player.track_scores.clone();

        let mut indifferent = ready_player(&board, Vec::new());
        indifferent.inform_status(&ownership, &CardCounts::default());

        assert_eq!(with_fulfilled, indifferent.track_scores);
    }

    #[test]
    fn unaffordable_choice_falls_back_to_chasing_cards() {
        let board = Board::new(vec![(
            (City::Atlanta, City::Boston),
            TrainColor::Red,
            3,
        )]);
        let mut player = ready_player(&board, vec![ticket! {City::Atlanta, City::Boston, 5}]);

        let mut face_up = CardCounts::default();
        face_up[TrainColor::Red] = 2;
        player.inform_status(&vec![None; board.num_tracks()], &face_up);

        // The only track has probability one, but an empty hand cannot pay
        // for it: the move degrades to collecting red cards.
        assert_eq!(player.choose_move(), Move::DrawCards);
        assert_eq!(player.choose_pickup(2), Some(TrainColor::Red));
    }

    #[test]
    fn pickup_grabs_a_wild_only_while_both_picks_remain() {
        let board = chain_board();
        let mut player = ready_player(&board, Vec::new());
        player.pickup_preference = Some(TrainColor::Red);

        let mut face_up = CardCounts::default();
        face_up[TrainColor::Wild] = 1;
        player.face_up = face_up;

        assert_eq!(player.choose_pickup(2), Some(TrainColor::Wild));
        assert_eq!(player.choose_pickup(1), None);
    }

    #[test]
    fn affordable_choice_claims_and_mirrors_the_cost() {
        let board = Board::new(vec![(
            (City::Atlanta, City::Boston),
            TrainColor::Red,
            2,
        )]);
        let mut player = ready_player(&board, vec![ticket! {City::Atlanta, City::Boston, 5}]);
        player.receive_train_card(TrainColor::Red);
        player.receive_train_card(TrainColor::Wild);

        player.inform_status(&vec![None; board.num_tracks()], &CardCounts::default());

        assert_eq!(player.choose_move(), Move::ClaimTrack);
        assert_eq!(player.choose_track_claim(), (0, TrainColor::Red));
        assert_eq!(player.hand[TrainColor::Red], 0);
        assert_eq!(player.hand[TrainColor::Wild], 0);
        assert_eq!(player.trains, GameConstants::default().num_starting_trains - 2);
    }

    #[test]
    fn majority_vote_is_stable_when_one_outcome_dominates() {
        let board = Board::new(vec![(
            (City::Atlanta, City::Boston),
            TrainColor::Red,
            3,
        )]);
        let mut weights = ScoringWeights::default();
        weights.samples = 25;

        let mut player = HeuristicPlayer::new(weights);
        player.initialize(0, &board, &GameConstants::default());
        player.receive_ticket(ticket! {City::Atlanta, City::Boston, 5});
        player.inform_status(&vec![None; board.num_tracks()], &CardCounts::default());

        // All 25 samples land on the single track, all degrade to chasing
        // red; the vote cannot flip.
        assert_eq!(player.choose_move(), Move::DrawCards);
        assert_eq!(player.pickup_preference, Some(TrainColor::Red));
    }

    // Tests for `BaselinePlayer`.

    #[test]
    fn baseline_claims_the_first_affordable_track() {
        let board = chain_board();
        let mut player = BaselinePlayer::new();
        player.initialize(0, &board, &GameConstants::default());
        player.inform_status(&vec![None; board.num_tracks()], &CardCounts::default());

        assert_eq!(player.choose_move(), Move::DrawCards);

        player.receive_train_card(TrainColor::Green);
        player.receive_train_card(TrainColor::Green);

        assert_eq!(player.choose_move(), Move::ClaimTrack);
        // Track 0 is the first length-2 track, payable in green.
        assert_eq!(player.choose_track_claim(), (0, TrainColor::Green));
        assert_eq!(player.hand[TrainColor::Green], 0);
    }

    #[test]
    fn baseline_skips_claimed_tracks() {
        let board = chain_board();
        let mut player = BaselinePlayer::new();
        player.initialize(0, &board, &GameConstants::default());
        player.receive_train_card(TrainColor::Green);
        player.receive_train_card(TrainColor::Green);

        let mut ownership = vec![None; board.num_tracks()];
        ownership[0] = Some(1);
        player.inform_status(&ownership, &CardCounts::default());

        assert_eq!(player.choose_track_claim(), (1, TrainColor::Green));
    }

    #[test]
    fn baseline_accepts_the_first_tickets() {
        let mut player = BaselinePlayer::new();
        let offered = vec![
            ticket! {City::Atlanta, City::Boston, 5},
            ticket! {City::Calgary, City::Charleston, 7},
            ticket! {City::Helena, City::Houston, 9},
        ];

        let accepted = player.select_tickets(&offered, 2);
        assert_eq!(accepted.as_slice(), &[0, 1]);
    }
}
