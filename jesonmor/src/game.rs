use std::cmp::Ordering;

use serde::Serialize;
use tracing::{debug, trace};

use crate::rules::check_rules;
use crate::{
    visualize_board, Board, Color, Configuration, GameError, Move, Piece, PieceKind, Place,
    Player, Rule, RuleViolation, WinCondition,
};

/// Why a game was won.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WinReason {
    /// The loser had no legal move on their turn.
    NoLegalMoves,
    CapturedAllPieces,
    ReachedCentre,
    LeftCentre,
    /// The move cap was reached and the winner had more points.
    Score,
    /// The move cap was reached with equal points, and the winner had made
    /// fewer moves.
    FewerMoves,
}

impl std::fmt::Display for WinReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WinReason::NoLegalMoves => write!(f, "the opponent had no legal moves"),
            WinReason::CapturedAllPieces => write!(f, "captured all pieces"),
            WinReason::ReachedCentre => write!(f, "reached the centre"),
            WinReason::LeftCentre => write!(f, "moved a knight out of the centre"),
            WinReason::Score => write!(f, "higher score"),
            WinReason::FewerMoves => write!(f, "equal score, fewer moves"),
        }
    }
}

/// Serializes as e.g. `"ongoing"` or
/// `{"won":{"winner":"white","reason":"reached_centre"}}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Ongoing,
    Won { winner: Color, reason: WinReason },
    Draw,
}

impl Status {
    pub fn is_over(&self) -> bool {
        !matches!(self, Status::Ongoing)
    }

    pub fn winner(&self) -> Option<Color> {
        match self {
            Status::Won { winner, .. } => Some(*winner),
            _ => None,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Ongoing => write!(f, "ongoing"),
            Status::Won { winner, reason } => write!(f, "{} won ({})", winner, reason),
            Status::Draw => write!(f, "draw"),
        }
    }
}

/// Points and number of moves made, per player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Scores {
    points: [u32; 2],
    moves: [u32; 2],
}

impl Scores {
    /// The sum of the distances travelled by this player's capturing moves.
    pub fn points(&self, color: Color) -> u32 {
        self.points[color.index()]
    }

    pub fn moves(&self, color: Color) -> u32 {
        self.moves[color.index()]
    }

    fn record(&mut self, color: Color, points: u32) {
        self.points[color.index()] += points;
        self.moves[color.index()] += 1;
    }

    /// Decides a game that ran out of moves.
    ///
    /// More points wins. With equal points, the player who made fewer moves
    /// wins, and if that is equal too, it's a draw.
    pub fn tie_break(&self) -> Status {
        let [white, black] = Color::BOTH;
        match self.points(white).cmp(&self.points(black)) {
            Ordering::Greater => Status::Won {
                winner: white,
                reason: WinReason::Score,
            },
            Ordering::Less => Status::Won {
                winner: black,
                reason: WinReason::Score,
            },
            Ordering::Equal => match self.moves(white).cmp(&self.moves(black)) {
                Ordering::Less => Status::Won {
                    winner: white,
                    reason: WinReason::FewerMoves,
                },
                Ordering::Greater => Status::Won {
                    winner: black,
                    reason: WinReason::FewerMoves,
                },
                Ordering::Equal => Status::Draw,
            },
        }
    }
}

/// Summarizes the effects of applying a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub piece: Piece,
    pub captured: Option<Piece>,
    /// Points scored by this move.
    pub points: u32,
}

/// A game in progress: the board, whose turn it is, and the score.
///
/// This is the only owner of the board. Pieces and rules only get shared
/// references to it, and the board is only changed by playing a turn.
#[derive(Clone, Debug)]
pub struct Game {
    config: Configuration,
    board: Board,
    current: Color,
    num_moves: u32,
    scores: Scores,
    status: Status,
}

impl Game {
    pub fn new(config: Configuration) -> Self {
        let mut board = Board::empty(config.size());
        for &(piece, place) in config.placements() {
            board.put(place, piece);
        }
        Self {
            config,
            board,
            current: Color::White,
            num_moves: 0,
            scores: Scores::default(),
            status: Status::Ongoing,
        }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The piece at the given place, if any.
    pub fn piece_at(&self, place: Place) -> Option<Piece> {
        self.board.get(place)
    }

    /// The number of moves made so far, by both players.
    pub fn num_moves(&self) -> u32 {
        self.num_moves
    }

    /// Whose turn it is.
    pub fn current_color(&self) -> Color {
        self.current
    }

    pub fn scores(&self) -> &Scores {
        &self.scores
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Checks the move against the rules of the piece at its source, and
    /// reports the first rule it breaks.
    ///
    /// This does not check whose turn it is.
    pub fn validate_move(&self, mv: Move) -> Result<(), RuleViolation> {
        let rules = match self.piece_at(mv.source()) {
            Some(piece) => piece.rules(),
            None => &Rule::COMMON,
        };
        check_rules(rules, self, mv)
    }

    /// All legal moves of the piece at `source`, or none if it is empty.
    pub fn legal_moves_from(&self, source: Place) -> Vec<Move> {
        let Some(piece) = self.piece_at(source) else {
            return Vec::new();
        };
        piece
            .candidate_moves(source, self.config.size())
            .into_iter()
            .filter(|&mv| check_rules(piece.rules(), self, mv).is_ok())
            .collect()
    }

    /// All legal moves of the player whose turn it is.
    pub fn available_moves(&self) -> Vec<Move> {
        self.board
            .pieces_of(self.current)
            .flat_map(|(place, _)| self.legal_moves_from(place))
            .collect()
    }

    /// Plays one turn: offers the available moves to the player, applies
    /// the chosen one and checks whether the game is over.
    ///
    /// Returns an error only when the player fails or breaks its contract,
    /// not for any game state.
    pub fn play_turn(&mut self, player: &mut dyn Player) -> Result<Status, GameError> {
        if self.status.is_over() {
            return Err(GameError::GameOver);
        }
        if self.move_cap_reached() {
            self.finish(self.scores.tie_break());
            return Ok(self.status);
        }

        let available = self.available_moves();
        if available.is_empty() {
            self.finish(Status::Won {
                winner: self.current.opponent(),
                reason: WinReason::NoLegalMoves,
            });
            return Ok(self.status);
        }
        trace!(player = player.name(), num_available = available.len(), "Requesting move");

        let mv = player
            .next_move(self, &available)
            .map_err(|err| GameError::Player {
                player: String::from(player.name()),
                err,
            })?;
        if !available.contains(&mv) {
            return Err(GameError::MoveNotOffered {
                player: String::from(player.name()),
                mv,
            });
        }

        let outcome = self.apply_move(mv);
        let status = self.evaluate(mv, outcome);
        if status.is_over() {
            self.finish(status);
        } else {
            self.current = self.current.opponent();
        }
        Ok(self.status)
    }

    /// Plays turns until the game is over. The players are given in the
    /// order white, black.
    pub fn run(&mut self, mut players: [&mut dyn Player; 2]) -> Result<Status, GameError> {
        while !self.status.is_over() {
            let idx = self.current.index();
            self.play_turn(&mut *players[idx])?;
        }
        Ok(self.status)
    }

    // The only place where the board is mutated. The move must have been
    // validated already.
    fn apply_move(&mut self, mv: Move) -> MoveOutcome {
        let piece = self
            .board
            .take(mv.source())
            .expect("a validated move has a piece at its source");
        let captured = self.board.put(mv.destination(), piece);
        let points = if captured.is_some() { mv.distance() } else { 0 };
        self.scores.record(piece.owner, points);
        self.num_moves += 1;
        debug!(
            player = %piece.owner,
            %mv,
            captured = ?captured,
            points,
            "Applied move"
        );
        MoveOutcome {
            piece,
            captured,
            points,
        }
    }

    // Checks the end conditions after `mv` was applied.
    fn evaluate(&self, mv: Move, outcome: MoveOutcome) -> Status {
        let mover = outcome.piece.owner;
        if outcome.captured.is_some() && self.board.pieces_of(mover.opponent()).next().is_none() {
            return Status::Won {
                winner: mover,
                reason: WinReason::CapturedAllPieces,
            };
        }

        let centre = self.config.centre();
        let centre_win = match self.config.win_condition() {
            WinCondition::ReachCentre => {
                (mv.destination() == centre).then_some(WinReason::ReachedCentre)
            }
            WinCondition::LeaveCentre => {
                // num_moves already counts this move
                let protected = self.num_moves <= self.config.protection_moves();
                (mv.source() == centre && outcome.piece.kind == PieceKind::Knight && !protected)
                    .then_some(WinReason::LeftCentre)
            }
            WinCondition::LastMover => None,
        };
        if let Some(reason) = centre_win {
            return Status::Won {
                winner: mover,
                reason,
            };
        }

        if self.move_cap_reached() {
            return self.scores.tie_break();
        }
        Status::Ongoing
    }

    fn move_cap_reached(&self) -> bool {
        self.config
            .max_moves()
            .is_some_and(|max_moves| self.num_moves >= max_moves)
    }

    fn finish(&mut self, status: Status) {
        debug!(%status, num_moves = self.num_moves, "Game over");
        self.status = status;
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [white, black] = Color::BOTH;
        writeln!(f, "{}\n", visualize_board(&self.board))?;
        writeln!(f, "move: {}", self.num_moves + 1)?;
        writeln!(
            f,
            "score: {} {} - {} {}",
            self.config.player_name(white),
            self.scores.points(white),
            self.scores.points(black),
            self.config.player_name(black)
        )?;
        writeln!(
            f,
            "turn: {} ({})",
            self.config.player_name(self.current),
            self.current
        )?;
        write!(f, "status: {}", self.status)
    }
}
