use crate::board::{Board, Track};
use crate::city::City;

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use strum::EnumCount;

const NUM_CITIES: usize = City::COUNT;

/// Single-source shortest-path field over a board, with ownership-dependent
/// track costs from one player's point of view:
///
/// * a track the player owns costs 0 to traverse;
/// * an unclaimed track costs 1;
/// * a track owned by anyone else is impassable.
///
/// The field answers two different questions about a target city: whether it
/// is reachable at all, and whether it is already reachable for free
/// (`cost == Some(0)`), meaning a ticket between source and target is
/// already fulfilled.
#[derive(Debug)]
pub struct DistanceField {
    costs: [Option<u32>; NUM_CITIES],
}

impl DistanceField {
    /// Computes the field from `source`, for the given player, over the
    /// given track ownership.
    pub fn compute(
        board: &Board,
        ownership: &[Option<usize>],
        player: usize,
        source: City,
    ) -> Self {
        let mut costs: [Option<u32>; NUM_CITIES] = [None; NUM_CITIES];
        let mut frontier = BinaryHeap::new();

        costs[source as usize] = Some(0);
        frontier.push(Reverse((0u32, source)));

        while let Some(Reverse((cost, city))) = frontier.pop() {
            if costs[city as usize] != Some(cost) {
                // Stale heap entry; the city was settled more cheaply.
                continue;
            }

            for &track_id in board.adjacent_tracks(city) {
                let step = match ownership[track_id] {
                    None => 1,
                    Some(owner) if owner == player => 0,
                    Some(_) => continue,
                };

                let neighbor = board.track(track_id).other_endpoint(city);
                let neighbor_cost = cost + step;

                if costs[neighbor as usize].map_or(true, |known| neighbor_cost < known) {
                    costs[neighbor as usize] = Some(neighbor_cost);
                    frontier.push(Reverse((neighbor_cost, neighbor)));
                }
            }
        }

        Self { costs }
    }

    /// Cost to reach the given city, or `None` if unreachable.
    #[inline]
    pub fn cost(&self, city: City) -> Option<u32> {
        self.costs[city as usize]
    }

    /// How close a track is to the source: the cheaper of its two endpoint
    /// costs. `None` when neither endpoint is reachable.
    pub fn track_distance(&self, track: &Track) -> Option<u32> {
        let (start, end) = track.endpoints;

        match (self.cost(start), self.cost(end)) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::card::TrainColor;

    /// The fixture from the design discussion: a 4-city chain where the
    /// querying player owns the first link, nobody owns the second, and an
    /// opponent owns the third.
    fn chain_fixture() -> (Board, Vec<Option<usize>>) {
        let board = Board::new(vec![
            ((City::Atlanta, City::Boston), TrainColor::Wild, 2),
            ((City::Boston, City::Calgary), TrainColor::Wild, 3),
            ((City::Calgary, City::Charleston), TrainColor::Wild, 1),
        ]);
        let ownership = vec![Some(0), None, Some(1)];

        (board, ownership)
    }

    #[test]
    fn owned_unclaimed_and_blocked_costs() {
        let (board, ownership) = chain_fixture();
        let field = DistanceField::compute(&board, &ownership, 0, City::Atlanta);

        assert_eq!(field.cost(City::Atlanta), Some(0));
        // Crossing an owned track is free.
        assert_eq!(field.cost(City::Boston), Some(0));
        // Crossing an unclaimed track costs one.
        assert_eq!(field.cost(City::Calgary), Some(1));
        // The opponent's track is impassable.
        assert_eq!(field.cost(City::Charleston), None);
    }

    #[test]
    fn zero_cost_means_already_fulfilled() {
        let (board, ownership) = chain_fixture();
        let field = DistanceField::compute(&board, &ownership, 0, City::Atlanta);

        assert_eq!(field.cost(City::Boston), Some(0));
        assert_ne!(field.cost(City::Calgary), Some(0));
    }

    #[test]
    fn opponent_view_is_blocked_both_ways() {
        let (board, ownership) = chain_fixture();
        let field = DistanceField::compute(&board, &ownership, 1, City::Charleston);

        assert_eq!(field.cost(City::Calgary), Some(0));
        // Player 0's track blocks player 1 entirely.
        assert_eq!(field.cost(City::Boston), Some(1));
        assert_eq!(field.cost(City::Atlanta), None);
    }

    #[test]
    fn track_distance_is_the_cheaper_endpoint() {
        let (board, ownership) = chain_fixture();
        let field = DistanceField::compute(&board, &ownership, 0, City::Atlanta);

        assert_eq!(field.track_distance(board.track(0)), Some(0));
        assert_eq!(field.track_distance(board.track(1)), Some(0));
        // The blocked track is still "one step away" via Calgary.
        assert_eq!(field.track_distance(board.track(2)), Some(1));
    }

    #[test]
    fn unreachable_component() {
        let board = Board::new(vec![
            ((City::Atlanta, City::Boston), TrainColor::Wild, 2),
            ((City::Calgary, City::Charleston), TrainColor::Wild, 2),
        ]);
        let ownership = vec![None, None];
        let field = DistanceField::compute(&board, &ownership, 0, City::Atlanta);

        assert_eq!(field.cost(City::Calgary), None);
        assert_eq!(field.track_distance(board.track(1)), None);
    }

    #[test]
    fn dijkstra_prefers_free_detours() {
        // Two ways from Atlanta to Calgary: a direct unclaimed track, or a
        // pair of owned tracks through Boston. The owned detour is free.
        let board = Board::new(vec![
            ((City::Atlanta, City::Calgary), TrainColor::Wild, 4),
            ((City::Atlanta, City::Boston), TrainColor::Wild, 2),
            ((City::Boston, City::Calgary), TrainColor::Wild, 2),
        ]);
        let ownership = vec![None, Some(0), Some(0)];
        let field = DistanceField::compute(&board, &ownership, 0, City::Atlanta);

        assert_eq!(field.cost(City::Calgary), Some(0));
    }
}
