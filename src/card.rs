use crate::city::{City, CityToCity};
use crate::constants::GameConstants;
use crate::error::GameError;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::iter::repeat;
use std::ops::{Index, IndexMut};
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter};

/// Represents the different variants of train cards.
///
/// Eight concrete colors, plus the wild card. On a track, `Wild` means any
/// single concrete color claims it; in a hand, a wild card substitutes for
/// any concrete color.
#[derive(
    Clone, Copy, Debug, Deserialize, Display, EnumCountMacro, EnumIter, Eq, Hash, Ord, PartialEq,
    PartialOrd, Serialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TrainColor {
    Black,
    Blue,
    Green,
    Orange,
    Pink,
    Red,
    White,
    Wild,
    Yellow,
}

impl TrainColor {
    /// Whether the current color is wild, i.e. matches with any color.
    ///
    /// # Example
    /// ```
    /// use railbots::card::TrainColor;
    ///
    /// assert!(TrainColor::Wild.is_wild());
    /// assert!(!TrainColor::Black.is_wild());
    /// ```
    #[inline]
    pub fn is_wild(&self) -> bool {
        *self == TrainColor::Wild
    }

    /// The opposite of `is_wild`.
    #[inline]
    pub fn is_not_wild(&self) -> bool {
        !self.is_wild()
    }

    /// Iterator over the eight concrete (non-wild) colors.
    pub fn concrete_colors() -> impl Iterator<Item = TrainColor> {
        Self::iter().filter(Self::is_not_wild)
    }
}

/// How many cards of each color a pile, row, or hand holds.
///
/// Indexable by [`TrainColor`]:
///
/// ```
/// use railbots::card::{CardCounts, TrainColor};
///
/// let mut counts = CardCounts::default();
/// counts[TrainColor::Red] += 2;
/// assert_eq!(counts[TrainColor::Red], 2);
/// assert_eq!(counts.total(), 2);
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct CardCounts([u8; TrainColor::COUNT]);

impl CardCounts {
    /// Total number of cards across all colors.
    pub fn total(&self) -> usize {
        self.0.iter().map(|&count| count as usize).sum()
    }

    /// Iterator over `(color, count)` pairs, in color-enum order.
    pub fn iter(&self) -> impl Iterator<Item = (TrainColor, u8)> + '_ {
        TrainColor::iter().map(move |color| (color, self[color]))
    }

    /// Element-wise sum of two counts. Saturates rather than wraps, though
    /// real decks never approach the limit.
    pub fn plus(&self, other: &CardCounts) -> CardCounts {
        let mut merged = *self;
        for (color, count) in other.iter() {
            merged[color] = merged[color].saturating_add(count);
        }
        merged
    }
}

impl Index<TrainColor> for CardCounts {
    type Output = u8;

    #[inline]
    fn index(&self, color: TrainColor) -> &u8 {
        &self.0[color as usize]
    }
}

impl IndexMut<TrainColor> for CardCounts {
    #[inline]
    fn index_mut(&mut self, color: TrainColor) -> &mut u8 {
        &mut self.0[color as usize]
    }
}

/// Encapsulates information about a destination ticket.
///
/// A ticket is worth `points` if its holder's claimed tracks connect the two
/// cities by the end of the game, and costs the same amount if they do not.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct DestinationTicket {
    /// The two cities that must be connected to fulfill the ticket.
    pub destination: CityToCity,
    /// How many points are granted once this ticket is fulfilled.
    /// If not fulfilled, the same amount is subtracted instead.
    pub points: u8,
}

/// Convenience macro to generate a destination ticket.
#[macro_export]
macro_rules! ticket {
    ($start:expr, $end:expr, $points:literal) => {
        $crate::card::DestinationTicket {
            destination: ($start, $end),
            points: $points,
        }
    };
}

/// The destination tickets of the classic US game.
pub fn classic_tickets() -> Vec<DestinationTicket> {
    vec![
        ticket! {City::Boston, City::Miami, 12},
        ticket! {City::Calgary, City::Phoenix, 13},
        ticket! {City::Calgary, City::SaltLakeCity, 7},
        ticket! {City::Chicago, City::NewOrleans, 7},
        ticket! {City::Chicago, City::SantaFe, 9},
        ticket! {City::Dallas, City::NewYork, 11},
        ticket! {City::Denver, City::ElPaso, 4},
        ticket! {City::Denver, City::Pittsburgh, 11},
        ticket! {City::Duluth, City::ElPaso, 10},
        ticket! {City::Duluth, City::Houston, 8},
        ticket! {City::Helena, City::LosAngeles, 8},
        ticket! {City::KansasCity, City::Houston, 5},
        ticket! {City::LosAngeles, City::Chicago, 16},
        ticket! {City::LosAngeles, City::Miami, 20},
        ticket! {City::LosAngeles, City::NewYork, 21},
        ticket! {City::Montreal, City::Atlanta, 9},
        ticket! {City::Montreal, City::NewOrleans, 13},
        ticket! {City::NewYork, City::Atlanta, 6},
        ticket! {City::Portland, City::Nashville, 17},
        ticket! {City::Portland, City::Phoenix, 11},
        ticket! {City::SanFrancisco, City::Atlanta, 17},
        ticket! {City::SaultStMarie, City::Nashville, 8},
        ticket! {City::SaultStMarie, City::OklahomaCity, 9},
        ticket! {City::Seattle, City::LosAngeles, 9},
        ticket! {City::Seattle, City::NewYork, 22},
        ticket! {City::Toronto, City::Miami, 10},
        ticket! {City::Vancouver, City::Montreal, 20},
        ticket! {City::Vancouver, City::SantaFe, 13},
        ticket! {City::Winnipeg, City::Houston, 12},
        ticket! {City::Winnipeg, City::LittleRock, 11},
    ]
}

/// Entity in charge of dealing as well as shuffling destination tickets and
/// train cards.
///
/// The train card pile is rebuilt lazily: whenever it runs dry, every card
/// that is not face up or in a hand is collected and reshuffled. Cards in
/// hands are never recycled while held, so a draw can genuinely fail only
/// when the whole composition is held somewhere visible.
#[derive(Debug)]
pub struct CardDealer {
    train_card_pile: Vec<TrainColor>,
    ticket_pile: Vec<DestinationTicket>,
    num_color_cards: u8,
    num_wild_cards: u8,
}

impl CardDealer {
    /// Creates a dealer with a full, shuffled train card pile and the given
    /// destination tickets, also shuffled.
    pub fn new(
        constants: &GameConstants,
        tickets: Vec<DestinationTicket>,
        rng: &mut impl Rng,
    ) -> Self {
        let mut dealer = Self {
            train_card_pile: Vec::new(),
            ticket_pile: tickets,
            num_color_cards: constants.num_color_cards,
            num_wild_cards: constants.num_wild_cards,
        };

        dealer.rebuild_train_card_pile(&CardCounts::default(), rng);
        dealer.ticket_pile.shuffle(rng);

        dealer
    }

    #[inline]
    fn full_count(&self, color: TrainColor) -> u8 {
        if color.is_wild() {
            self.num_wild_cards
        } else {
            self.num_color_cards
        }
    }

    /// Rebuilds the pile with every card of the composition that is not in
    /// `held`, then shuffles it.
    fn rebuild_train_card_pile(&mut self, held: &CardCounts, rng: &mut impl Rng) {
        self.train_card_pile.clear();

        for color in TrainColor::iter() {
            let available = self.full_count(color).saturating_sub(held[color]);
            self.train_card_pile
                .extend(repeat(color).take(available as usize));
        }

        self.train_card_pile.shuffle(rng);
    }

    /// Removes and returns the top train card.
    ///
    /// `held` must count every card currently face up or in a hand; it is
    /// used to rebuild the pile when it runs dry. If the rebuilt pile is
    /// still empty, every card in the game is held and no legal draw exists.
    pub fn draw_train_card(
        &mut self,
        held: &CardCounts,
        rng: &mut impl Rng,
    ) -> Result<TrainColor, GameError> {
        if self.train_card_pile.is_empty() {
            self.rebuild_train_card_pile(held, rng);
        }

        self.train_card_pile
            .pop()
            .ok_or(GameError::TrainCardPileExhausted)
    }

    /// Removes and returns the top destination ticket, or `None` when the
    /// pile is exhausted.
    pub fn draw_ticket(&mut self) -> Option<DestinationTicket> {
        self.ticket_pile.pop()
    }

    /// Puts a declined ticket back on top of the pile. No reshuffle.
    pub fn return_ticket(&mut self, ticket: DestinationTicket) {
        self.ticket_pile.push(ticket);
    }

    /// How many destination tickets remain in the pile.
    pub fn tickets_left(&self) -> usize {
        self.ticket_pile.len()
    }

    /// Per-color census of the train card pile, for state exports and
    /// conservation checks.
    pub fn train_card_counts(&self) -> CardCounts {
        let mut counts = CardCounts::default();
        for &card in &self.train_card_pile {
            counts[card] += 1;
        }
        counts
    }

    /// How many train cards remain in the pile.
    pub fn train_cards_left(&self) -> usize {
        self.train_card_pile.len()
    }
}
