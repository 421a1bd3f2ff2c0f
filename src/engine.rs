use crate::board::Board;
use crate::card::{CardCounts, CardDealer, DestinationTicket, TrainColor};
use crate::constants::GameConstants;
use crate::error::{GameError, RuleViolationKind};
use crate::observer::{GameEvent, NullObserver, Observer};
use crate::player::{Move, Player};

use rand::rngs::StdRng;
use rand::SeedableRng;
use smallvec::SmallVec;

/// Runs one complete game: deals resources, drives players through the turn
/// protocol, validates every answer, and scores the result.
///
/// The engine is the single authority over shared state: piles, hands,
/// track ownership, train budgets. Players mirror whatever state they care
/// about from the `inform_*`/`receive_*` calls, but never mutate the
/// engine's copy. One engine instance runs one game.
///
/// Given the same board, constants (including the seed), and player
/// implementations, a game plays out identically every time.
///
/// # Example
/// ```
/// use railbots::board::Board;
/// use railbots::card::classic_tickets;
/// use railbots::constants::GameConstants;
/// use railbots::engine::Engine;
/// use railbots::player::Player;
/// use railbots::strategy::BaselinePlayer;
///
/// let mut engine = Engine::new(Board::classic(), classic_tickets(), GameConstants::default());
/// let mut players: Vec<Box<dyn Player>> = vec![
///     Box::new(BaselinePlayer::new()),
///     Box::new(BaselinePlayer::new()),
/// ];
///
/// let winners = engine.run_game(&mut players).unwrap();
/// assert!(!winners.is_empty());
/// assert!(engine.ownership().iter().any(|owner| owner.is_some()));
/// ```
pub struct Engine {
    board: Board,
    constants: GameConstants,
    dealer: CardDealer,
    /// Who owns each track, by [`crate::board::TrackId`]. `None` means
    /// unclaimed; once set, never changes for the rest of the game.
    ownership: Vec<Option<usize>>,
    face_up: CardCounts,
    hands: Vec<CardCounts>,
    ticket_hands: Vec<Vec<DestinationTicket>>,
    trains: Vec<u8>,
    active_player: usize,
    rng: StdRng,
    observer: Box<dyn Observer>,
}

impl Engine {
    /// Creates an engine with no observer attached.
    pub fn new(board: Board, tickets: Vec<DestinationTicket>, constants: GameConstants) -> Self {
        Self::with_observer(board, tickets, constants, Box::new(NullObserver))
    }

    /// Creates an engine that reports every [`GameEvent`] to `observer`.
    pub fn with_observer(
        board: Board,
        tickets: Vec<DestinationTicket>,
        constants: GameConstants,
        observer: Box<dyn Observer>,
    ) -> Self {
        let mut rng = StdRng::seed_from_u64(constants.seed);
        let dealer = CardDealer::new(&constants, tickets, &mut rng);
        let num_tracks = board.num_tracks();

        Self {
            board,
            constants,
            dealer,
            ownership: vec![None; num_tracks],
            face_up: CardCounts::default(),
            hands: Vec::new(),
            ticket_hands: Vec::new(),
            trains: Vec::new(),
            active_player: 0,
            rng,
            observer,
        }
    }

    /// Runs the game from setup through scoring and returns the indices of
    /// the winning players (ties all win).
    ///
    /// An `Err` means the game ended abnormally: either the constants are
    /// too small for the player count, or a strategy proposed an illegal
    /// move. Neither is recoverable; see [`GameError`].
    pub fn run_game(
        &mut self,
        players: &mut [Box<dyn Player>],
    ) -> Result<Vec<usize>, GameError> {
        self.setup(players)?;

        loop {
            if self.run_single_turn(players)? {
                break;
            }
        }

        Ok(self.determine_winners(players.len()))
    }

    /// Current track ownership, for observers and export sinks.
    pub fn ownership(&self) -> &[Option<usize>] {
        &self.ownership
    }

    /// The current face-up card row, for observers and export sinks.
    pub fn face_up_cards(&self) -> &CardCounts {
        &self.face_up
    }

    fn setup(&mut self, players: &mut [Box<dyn Player>]) -> Result<(), GameError> {
        let num_players = players.len();

        self.ownership = vec![None; self.board.num_tracks()];
        self.hands = vec![CardCounts::default(); num_players];
        self.ticket_hands = vec![Vec::new(); num_players];
        self.trains = vec![self.constants.num_starting_trains; num_players];
        self.active_player = 0;

        for (index, player) in players.iter_mut().enumerate() {
            player.initialize(index, &self.board, &self.constants);
        }

        for _ in 0..self.constants.num_face_up_cards {
            let card = self.draw_train_card()?;
            self.face_up[card] += 1;
        }

        for player_index in 0..num_players {
            for _ in 0..self.constants.num_initial_train_cards {
                let card = self.draw_train_card()?;
                self.give_card_to_player(players, player_index, card, true);
            }
        }

        for player_index in 0..num_players {
            self.offer_tickets(
                players,
                player_index,
                self.constants.num_initial_tickets_offered,
                self.constants.num_initial_tickets_accepted,
                true,
            )?;
        }

        Ok(())
    }

    /// Plays one turn of the active player.
    ///
    /// Returns `Ok(true)` when the game is over: a turn that starts with
    /// the active player at two trains or fewer is never played, since the
    /// claim that dropped them below the threshold was already their final
    /// move.
    fn run_single_turn(&mut self, players: &mut [Box<dyn Player>]) -> Result<bool, GameError> {
        let active = self.active_player;
        self.observer.on_event(&GameEvent::TurnStarted { player: active });

        if self.trains[active] <= 2 {
            return Ok(true);
        }

        players[active].inform_status(&self.ownership, &self.face_up);

        let chosen = players[active].choose_move();
        self.observer.on_event(&GameEvent::MoveChosen {
            player: active,
            chosen,
        });

        match chosen {
            Move::DrawCards => self.collection_phase(players)?,
            Move::ClaimTrack => self.track_claim_phase(players)?,
            Move::DrawTickets => self.offer_tickets(
                players,
                active,
                self.constants.num_tickets_offered,
                self.constants.num_tickets_accepted,
                false,
            )?,
        }

        self.active_player = (active + 1) % players.len();
        Ok(false)
    }

    /// Every card currently outside the draw pile: the face-up row plus
    /// all hands. This is what a pile rebuild must exclude.
    fn held_counts(&self) -> CardCounts {
        self.hands
            .iter()
            .fold(self.face_up, |held, hand| held.plus(hand))
    }

    fn draw_train_card(&mut self) -> Result<TrainColor, GameError> {
        let held = self.held_counts();
        self.dealer.draw_train_card(&held, &mut self.rng)
    }

    fn give_card_to_player(
        &mut self,
        players: &mut [Box<dyn Player>],
        player_index: usize,
        color: TrainColor,
        hide_color: bool,
    ) {
        self.hands[player_index][color] += 1;
        players[player_index].receive_train_card(color);

        let announced = if hide_color { None } else { Some(color) };
        self.observer.on_event(&GameEvent::CardDealt {
            player: player_index,
            color: announced,
        });
        for player in players.iter_mut() {
            player.inform_card_pickup(player_index, announced);
        }
    }

    fn give_ticket_to_player(
        &mut self,
        players: &mut [Box<dyn Player>],
        player_index: usize,
        ticket: DestinationTicket,
    ) {
        self.ticket_hands[player_index].push(ticket.clone());
        self.observer.on_event(&GameEvent::TicketDealt {
            player: player_index,
            ticket: ticket.clone(),
        });
        players[player_index].receive_ticket(ticket);

        for player in players.iter_mut() {
            player.inform_ticket_pickup(player_index);
        }
    }

    /// Takes the requested face-up card for the active player and
    /// immediately backfills the slot from the draw pile.
    fn take_face_up_card(
        &mut self,
        players: &mut [Box<dyn Player>],
        color: TrainColor,
    ) -> Result<(), GameError> {
        let active = self.active_player;

        if self.face_up[color] == 0 {
            return Err(GameError::violation(
                active,
                RuleViolationKind::PickedUnavailableColor(color),
            ));
        }

        self.face_up[color] -= 1;
        self.give_card_to_player(players, active, color, false);

        let replacement = self.draw_train_card()?;
        self.face_up[replacement] += 1;

        Ok(())
    }

    /// The card-pickup move: two picks, each either a face-up card or a
    /// blind draw. A face-up wild card consumes both picks, and is illegal
    /// on the second pick.
    fn collection_phase(&mut self, players: &mut [Box<dyn Player>]) -> Result<(), GameError> {
        let active = self.active_player;

        match players[active].choose_pickup(2) {
            Some(color) => {
                self.take_face_up_card(players, color)?;
                if color.is_wild() {
                    return Ok(());
                }
            }
            None => {
                let card = self.draw_train_card()?;
                self.give_card_to_player(players, active, card, true);
            }
        }

        match players[active].choose_pickup(1) {
            Some(color) if color.is_wild() => Err(GameError::violation(
                active,
                RuleViolationKind::WildcardOnSecondPickup,
            )),
            Some(color) => self.take_face_up_card(players, color),
            None => {
                let card = self.draw_train_card()?;
                self.give_card_to_player(players, active, card, true);
                Ok(())
            }
        }
    }

    /// The track-claim move: validate the proposal, then transfer
    /// ownership, cards, and trains.
    fn track_claim_phase(&mut self, players: &mut [Box<dyn Player>]) -> Result<(), GameError> {
        let active = self.active_player;
        let (track_id, color) = players[active].choose_track_claim();

        if track_id >= self.board.num_tracks() {
            return Err(GameError::violation(
                active,
                RuleViolationKind::UnknownTrack(track_id),
            ));
        }
        if self.ownership[track_id].is_some() {
            return Err(GameError::violation(
                active,
                RuleViolationKind::TrackAlreadyClaimed(track_id),
            ));
        }
        if color.is_wild() {
            return Err(GameError::violation(
                active,
                RuleViolationKind::NamedWildcardAsClaimColor,
            ));
        }

        let track = self.board.track(track_id);
        let (required_color, length) = (track.color, track.length);

        if required_color.is_not_wild() && required_color != color {
            return Err(GameError::violation(
                active,
                RuleViolationKind::WrongColorForTrack {
                    track: track_id,
                    color,
                },
            ));
        }
        if length > self.trains[active] {
            return Err(GameError::violation(
                active,
                RuleViolationKind::NotEnoughTrains(track_id),
            ));
        }
        if length > self.hands[active][color] + self.hands[active][TrainColor::Wild] {
            return Err(GameError::violation(
                active,
                RuleViolationKind::NotEnoughCards {
                    track: track_id,
                    color,
                },
            ));
        }

        self.ownership[track_id] = Some(active);

        // Concrete cards first, wild cards only for the shortfall.
        let colored_spent = self.hands[active][color].min(length);
        let wilds_spent = length - colored_spent;
        self.hands[active][color] -= colored_spent;
        self.hands[active][TrainColor::Wild] -= wilds_spent;
        self.trains[active] -= length;

        self.observer.on_event(&GameEvent::TrackClaimed {
            player: active,
            track: track_id,
            color,
            colored_spent,
            wilds_spent,
        });
        for player in players.iter_mut() {
            player.inform_track_claim(active, track_id);
        }

        Ok(())
    }

    /// Offers freshly drawn tickets to a player and routes each one to the
    /// player's hand or back onto the pile.
    ///
    /// A `mandatory` offer that cannot be filled from the pile is fatal;
    /// a voluntary one is capped at what the pile still holds, and is a
    /// no-op when the pile is empty.
    fn offer_tickets(
        &mut self,
        players: &mut [Box<dyn Player>],
        player_index: usize,
        num_to_offer: usize,
        min_to_accept: usize,
        mandatory: bool,
    ) -> Result<(), GameError> {
        let mut offered: SmallVec<[DestinationTicket; 3]> = smallvec![];
        for _ in 0..num_to_offer {
            match self.dealer.draw_ticket() {
                Some(ticket) => offered.push(ticket),
                None if mandatory => return Err(GameError::TicketPileExhausted),
                None => break,
            }
        }
        if offered.is_empty() {
            return Ok(());
        }

        let min_to_accept = min_to_accept.min(offered.len());
        let accepted = players[player_index].select_tickets(&offered, min_to_accept);

        if accepted.len() < min_to_accept {
            return Err(GameError::violation(
                player_index,
                RuleViolationKind::NotEnoughTicketsAccepted {
                    accepted: accepted.len(),
                    required: min_to_accept,
                },
            ));
        }

        let mut seen: SmallVec<[usize; 3]> = smallvec![];
        for &index in &accepted {
            if index >= offered.len() {
                return Err(GameError::violation(
                    player_index,
                    RuleViolationKind::TicketIndexOutOfRange(index),
                ));
            }
            if seen.contains(&index) {
                return Err(GameError::violation(
                    player_index,
                    RuleViolationKind::DuplicateTicketIndex(index),
                ));
            }
            seen.push(index);
        }

        for (index, ticket) in offered.into_iter().enumerate() {
            if seen.contains(&index) {
                self.give_ticket_to_player(players, player_index, ticket);
            } else {
                self.dealer.return_ticket(ticket);
            }
        }

        Ok(())
    }

    /// A player's final score, excluding the longest-path bonus: points for
    /// claimed tracks, plus or minus each held ticket by connectivity.
    fn player_score(&self, player: usize) -> i32 {
        let mut score = 0;

        for track in self.board.tracks() {
            if self.ownership[track.id] == Some(player) {
                score += self.constants.score_for_track_length(track.length);
            }
        }

        for ticket in &self.ticket_hands[player] {
            let (start, end) = ticket.destination;
            if self.board.is_connected(&self.ownership, player, start, end) {
                score += ticket.points as i32;
            } else {
                score -= ticket.points as i32;
            }
        }

        score
    }

    /// Every player tied at the longest continuous path; ties share the
    /// bonus.
    fn longest_path_holders(&self, num_players: usize) -> Vec<usize> {
        let mut holders = Vec::new();
        let mut longest = 0;

        for player in 0..num_players {
            let length = self.board.longest_path(&self.ownership, player);
            if length > longest {
                longest = length;
                holders.clear();
                holders.push(player);
            } else if length == longest {
                holders.push(player);
            }
        }

        holders
    }

    fn determine_winners(&mut self, num_players: usize) -> Vec<usize> {
        let holders = self.longest_path_holders(num_players);

        let mut winners = Vec::new();
        let mut best_score = None;

        for player in 0..num_players {
            let mut score = self.player_score(player);
            if holders.contains(&player) {
                score += self.constants.longest_path_bonus;
            }

            self.observer
                .on_event(&GameEvent::ScoreComputed { player, score });

            match best_score {
                Some(best) if score < best => {}
                Some(best) if score == best => winners.push(player),
                _ => {
                    best_score = Some(score);
                    winners.clear();
                    winners.push(player);
                }
            }
        }

        self.observer.on_event(&GameEvent::GameOver {
            winners: winners.clone(),
        });

        winners
    }
}
