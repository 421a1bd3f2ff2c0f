use crate::card::TrainColor;
use crate::city::{City, CityToCity};

use array_init::array_init;
use lazy_static::lazy_static;
use serde::Serialize;
use smallvec::SmallVec;
use std::cmp::max;
use std::collections::HashSet;
use std::sync::{mpsc, Arc, Mutex};
use strum::EnumCount;
use threadpool::ThreadPool;

lazy_static! {
    static ref THREAD_POOL: Mutex<ThreadPool> = Mutex::new(ThreadPool::default());
}

const NUM_CITIES: usize = City::COUNT;

// Denver has the most incident tracks on the classic board, with 9.
const MAX_TRACKS_PER_CITY: usize = 10;

/// Index of a track in its board's track list.
pub type TrackId = usize;

/// A single claimable edge between two adjacent cities.
///
/// A color of [`TrainColor::Wild`] means any single concrete color claims
/// the track. Tracks are static for a game; who owns one is tracked
/// separately by the engine.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Track {
    /// Position in the board's track list.
    pub id: TrackId,
    /// The two cities this track connects.
    pub endpoints: CityToCity,
    /// The color of cards required to claim this track.
    pub color: TrainColor,
    /// The number of cards needed, and of trains consumed, to claim it.
    pub length: u8,
}

impl Track {
    /// Given one endpoint, returns the other.
    pub fn other_endpoint(&self, city: City) -> City {
        let (start, end) = self.endpoints;
        if city == start {
            end
        } else if city == end {
            start
        } else {
            unreachable!("{} is not an endpoint of track {}", city, self.id)
        }
    }

    /// Whether `city` is one of this track's endpoints.
    #[inline]
    pub fn touches(&self, city: City) -> bool {
        self.endpoints.0 == city || self.endpoints.1 == city
    }
}

/// Convenience macro to describe one track of a board.
macro_rules! track {
    ($start:expr, $end:expr, $color:expr, $length:literal) => {
        (($start, $end), $color, $length)
    };
}

/// The static description of a game board: its track list, and an index
/// from each city to the tracks touching it.
///
/// Built once at setup and read-only thereafter. Players keep their own
/// clone so their scoring passes never borrow engine state.
///
/// # Example
/// ```
/// use railbots::board::Board;
///
/// let board = Board::classic();
/// assert_eq!(board.tracks().len(), 100);
/// ```
#[derive(Clone, Debug)]
pub struct Board {
    tracks: Vec<Track>,
    adjacency: [SmallVec<[TrackId; MAX_TRACKS_PER_CITY]>; NUM_CITIES],
}

impl Board {
    /// Builds a board from `(endpoints, color, length)` descriptions,
    /// assigning track ids in order and deriving the adjacency index.
    pub fn new(track_specs: Vec<(CityToCity, TrainColor, u8)>) -> Self {
        let mut adjacency: [SmallVec<[TrackId; MAX_TRACKS_PER_CITY]>; NUM_CITIES] =
            array_init(|_| SmallVec::new());

        let tracks: Vec<Track> = track_specs
            .into_iter()
            .enumerate()
            .map(|(id, (endpoints, color, length))| {
                adjacency[endpoints.0 as usize].push(id);
                adjacency[endpoints.1 as usize].push(id);
                Track {
                    id,
                    endpoints,
                    color,
                    length,
                }
            })
            .collect();

        Self { tracks, adjacency }
    }

    /// The classic US board: 36 cities and 100 tracks. Parallel routes
    /// between the same two cities are separate tracks with their own ids.
    pub fn classic() -> Self {
        use TrainColor::*;

        Self::new(vec![
            // Atlanta.
            track! {City::Atlanta, City::Charleston, Wild, 2},
            track! {City::Atlanta, City::Miami, Blue, 5},
            track! {City::Atlanta, City::Nashville, Wild, 1},
            track! {City::Atlanta, City::NewOrleans, Orange, 5},
            track! {City::Atlanta, City::NewOrleans, Yellow, 5},
            track! {City::Atlanta, City::Raleigh, Wild, 2},
            track! {City::Atlanta, City::Raleigh, Wild, 2},
            // Boston.
            track! {City::Boston, City::Montreal, Wild, 2},
            track! {City::Boston, City::Montreal, Wild, 2},
            track! {City::Boston, City::NewYork, Yellow, 2},
            track! {City::Boston, City::NewYork, Red, 2},
            // Calgary.
            track! {City::Calgary, City::Helena, Wild, 4},
            track! {City::Calgary, City::Seattle, Wild, 4},
            track! {City::Calgary, City::Vancouver, Wild, 3},
            track! {City::Calgary, City::Winnipeg, White, 6},
            // Charleston.
            track! {City::Charleston, City::Miami, Pink, 4},
            track! {City::Charleston, City::Raleigh, Wild, 2},
            // Chicago.
            track! {City::Chicago, City::Duluth, Red, 3},
            track! {City::Chicago, City::Omaha, Blue, 4},
            track! {City::Chicago, City::Pittsburgh, Black, 3},
            track! {City::Chicago, City::Pittsburgh, Orange, 3},
            track! {City::Chicago, City::SaintLouis, Green, 2},
            track! {City::Chicago, City::SaintLouis, White, 2},
            track! {City::Chicago, City::Toronto, White, 4},
            // Dallas.
            track! {City::Dallas, City::ElPaso, Red, 4},
            track! {City::Dallas, City::Houston, Wild, 1},
            track! {City::Dallas, City::Houston, Wild, 1},
            track! {City::Dallas, City::LittleRock, Wild, 2},
            track! {City::Dallas, City::OklahomaCity, Wild, 2},
            track! {City::Dallas, City::OklahomaCity, Wild, 2},
            // Denver.
            track! {City::Denver, City::Helena, Green, 4},
            track! {City::Denver, City::KansasCity, Black, 4},
            track! {City::Denver, City::KansasCity, Orange, 4},
            track! {City::Denver, City::OklahomaCity, Red, 4},
            track! {City::Denver, City::Omaha, Pink, 4},
            track! {City::Denver, City::Phoenix, White, 5},
            track! {City::Denver, City::SaltLakeCity, Red, 3},
            track! {City::Denver, City::SaltLakeCity, Yellow, 3},
            track! {City::Denver, City::SantaFe, Wild, 2},
            // Duluth.
            track! {City::Duluth, City::Helena, Orange, 6},
            track! {City::Duluth, City::Omaha, Wild, 2},
            track! {City::Duluth, City::Omaha, Wild, 2},
            track! {City::Duluth, City::SaultStMarie, Wild, 3},
            track! {City::Duluth, City::Toronto, Pink, 6},
            track! {City::Duluth, City::Winnipeg, Black, 4},
            // El Paso.
            track! {City::ElPaso, City::Houston, Green, 6},
            track! {City::ElPaso, City::LosAngeles, Black, 6},
            track! {City::ElPaso, City::OklahomaCity, Yellow, 5},
            track! {City::ElPaso, City::Phoenix, Wild, 3},
            track! {City::ElPaso, City::SantaFe, Wild, 2},
            // Helena.
            track! {City::Helena, City::Omaha, Red, 5},
            track! {City::Helena, City::SaltLakeCity, Pink, 3},
            track! {City::Helena, City::Seattle, Yellow, 6},
            track! {City::Helena, City::Winnipeg, Blue, 4},
            // Houston.
            track! {City::Houston, City::NewOrleans, Wild, 2},
            // Kansas City.
            track! {City::KansasCity, City::SaintLouis, Blue, 2},
            track! {City::KansasCity, City::SaintLouis, Pink, 2},
            track! {City::KansasCity, City::OklahomaCity, Wild, 2},
            track! {City::KansasCity, City::OklahomaCity, Wild, 2},
            track! {City::KansasCity, City::Omaha, Wild, 1},
            track! {City::KansasCity, City::Omaha, Wild, 1},
            // Las Vegas.
            track! {City::LasVegas, City::LosAngeles, Wild, 2},
            track! {City::LasVegas, City::SaltLakeCity, Orange, 3},
            // Little Rock.
            track! {City::LittleRock, City::Nashville, White, 3},
            track! {City::LittleRock, City::NewOrleans, Wild, 3},
            track! {City::LittleRock, City::OklahomaCity, Wild, 2},
            track! {City::LittleRock, City::SaintLouis, Wild, 2},
            // Los Angeles.
            track! {City::LosAngeles, City::Phoenix, Wild, 3},
            track! {City::LosAngeles, City::SanFrancisco, Pink, 3},
            track! {City::LosAngeles, City::SanFrancisco, Yellow, 3},
            // Miami.
            track! {City::Miami, City::NewOrleans, Red, 6},
            // Montreal.
            track! {City::Montreal, City::NewYork, Blue, 3},
            track! {City::Montreal, City::SaultStMarie, Black, 5},
            track! {City::Montreal, City::Toronto, Wild, 3},
            // Nashville.
            track! {City::Nashville, City::Pittsburgh, Yellow, 4},
            track! {City::Nashville, City::Raleigh, Black, 3},
            track! {City::Nashville, City::SaintLouis, Wild, 2},
            // New York.
            track! {City::NewYork, City::Pittsburgh, Green, 2},
            track! {City::NewYork, City::Pittsburgh, White, 2},
            track! {City::NewYork, City::Washington, Black, 2},
            track! {City::NewYork, City::Washington, Orange, 2},
            // Oklahoma City.
            track! {City::OklahomaCity, City::SantaFe, Blue, 3},
            // Phoenix.
            track! {City::Phoenix, City::SantaFe, Wild, 3},
            // Pittsburgh.
            track! {City::Pittsburgh, City::Raleigh, Wild, 2},
            track! {City::Pittsburgh, City::SaintLouis, Green, 5},
            track! {City::Pittsburgh, City::Toronto, Wild, 2},
            track! {City::Pittsburgh, City::Washington, Wild, 2},
            // Portland.
            track! {City::Portland, City::SaltLakeCity, Blue, 6},
            track! {City::Portland, City::SanFrancisco, Green, 5},
            track! {City::Portland, City::SanFrancisco, Pink, 5},
            // Raleigh.
            track! {City::Raleigh, City::Washington, Wild, 2},
            track! {City::Raleigh, City::Washington, Wild, 2},
            // Salt Lake City.
            track! {City::SaltLakeCity, City::SanFrancisco, Orange, 5},
            track! {City::SaltLakeCity, City::SanFrancisco, White, 5},
            // Sault St. Marie.
            track! {City::SaultStMarie, City::Toronto, Wild, 2},
            track! {City::SaultStMarie, City::Winnipeg, Wild, 6},
            // Seattle.
            track! {City::Seattle, City::Portland, Wild, 1},
            track! {City::Seattle, City::Portland, Wild, 1},
            track! {City::Seattle, City::Vancouver, Wild, 1},
            track! {City::Seattle, City::Vancouver, Wild, 1},
        ])
    }

    /// All the tracks of this board, indexed by [`TrackId`].
    #[inline]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// The number of tracks on this board.
    #[inline]
    pub fn num_tracks(&self) -> usize {
        self.tracks.len()
    }

    /// A single track by id.
    #[inline]
    pub fn track(&self, id: TrackId) -> &Track {
        &self.tracks[id]
    }

    /// Ids of every track touching the given city.
    #[inline]
    pub fn adjacent_tracks(&self, city: City) -> &[TrackId] {
        &self.adjacency[city as usize]
    }

    /// Whether the given player's claimed tracks connect `from` to `to`.
    ///
    /// Depth-first reachability over tracks owned by `player` only; tracks
    /// that are unclaimed or owned by someone else do not count.
    pub fn is_connected(
        &self,
        ownership: &[Option<usize>],
        player: usize,
        from: City,
        to: City,
    ) -> bool {
        let mut visited = [false; NUM_CITIES];
        let mut to_visit = vec![from];
        visited[from as usize] = true;

        while let Some(city) = to_visit.pop() {
            if city == to {
                return true;
            }

            for &track_id in self.adjacent_tracks(city) {
                if ownership[track_id] != Some(player) {
                    continue;
                }

                let neighbor = self.tracks[track_id].other_endpoint(city);
                if !visited[neighbor as usize] {
                    visited[neighbor as usize] = true;
                    to_visit.push(neighbor);
                }
            }
        }

        false
    }

    /// Length of the longest continuous path over the given player's
    /// claimed tracks.
    ///
    /// A path may visit a city multiple times, but may not reuse a track.
    /// Exhaustive search from every city the player touches; exponential in
    /// the worst case, which is fine because a player's track count is
    /// bounded by their train budget.
    pub fn longest_path(&self, ownership: &[Option<usize>], player: usize) -> u32 {
        let mut adjacency: [SmallVec<[TrackId; MAX_TRACKS_PER_CITY]>; NUM_CITIES] =
            array_init(|_| SmallVec::new());
        let mut cities_to_visit = HashSet::new();

        for track in &self.tracks {
            if ownership[track.id] != Some(player) {
                continue;
            }

            let (start, end) = track.endpoints;
            adjacency[start as usize].push(track.id);
            adjacency[end as usize].push(track.id);
            cities_to_visit.insert(start);
            cities_to_visit.insert(end);
        }

        let num_tracks = self.tracks.len();
        let edges: Arc<Vec<(CityToCity, u8)>> = Arc::new(
            self.tracks
                .iter()
                .map(|track| (track.endpoints, track.length))
                .collect(),
        );
        let adjacency = Arc::new(adjacency);

        // Each start city gets its own job from the shared pool, with its
        // own seen-edge buffer.
        let (tx, rx) = mpsc::sync_channel(0);
        let num_start_cities = cities_to_visit.len();
        let thread_pool = THREAD_POOL.lock().unwrap();

        for city in cities_to_visit {
            let adjacency = adjacency.clone();
            let edges = edges.clone();
            let tx = tx.clone();

            thread_pool.execute(move || {
                let mut seen_edges = vec![false; num_tracks];
                tx.send(Self::longest_path_from(
                    city,
                    &adjacency,
                    &edges,
                    &mut seen_edges,
                    0,
                ))
                .unwrap();
            });
        }

        let mut longest = 0;
        for _ in 0..num_start_cities {
            longest = max(longest, rx.recv().unwrap());
        }

        longest
    }

    fn longest_path_from(
        city: City,
        adjacency: &[SmallVec<[TrackId; MAX_TRACKS_PER_CITY]>; NUM_CITIES],
        edges: &[(CityToCity, u8)],
        seen_edges: &mut [bool],
        length_so_far: u32,
    ) -> u32 {
        let mut longest = length_so_far;

        for &track_id in &adjacency[city as usize] {
            if seen_edges[track_id] {
                continue;
            }

            // Mark the track for this walk only; the same track may be
            // reused from another start city or branch.
            seen_edges[track_id] = true;

            let ((start, end), length) = edges[track_id];
            let neighbor = if city == start { end } else { start };

            longest = max(
                longest,
                Self::longest_path_from(
                    neighbor,
                    adjacency,
                    edges,
                    seen_edges,
                    length_so_far + length as u32,
                ),
            );

            seen_edges[track_id] = false;
        }

        longest
    }
}
