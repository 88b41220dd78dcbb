use crate::{Move, Place};

/// The error type for [`Configuration::new()`](crate::Configuration::new).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    BoardTooSmall { size: usize },
    BoardTooLarge { size: usize },
    EvenBoardSize { size: usize },
    PlacementOutOfBounds { place: Place, size: usize },
    OverlappingPlacements { place: Place },
    UnknownWinCondition(String),
}

impl std::error::Error for ConfigError {}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::BoardTooSmall { size } =>
                write!(f, "The board size must be at least {}, but was {}", crate::MIN_BOARD_SIZE, size),
            ConfigError::BoardTooLarge { size } =>
                write!(f, "The board size must be at most {}, but was {}", crate::MAX_BOARD_SIZE, size),
            ConfigError::EvenBoardSize { size } =>
                write!(f, "The board size must be odd so that there is a centre cell, but was {}", size),
            ConfigError::PlacementOutOfBounds { place, size } =>
                write!(f, "A piece was placed at {}, which is outside of the {}x{} board", place, size, size),
            ConfigError::OverlappingPlacements { place } =>
                write!(f, "More than one piece was placed at {}", place),
            ConfigError::UnknownWinCondition(name) =>
                write!(f, "Unknown win condition '{}', expected one of reach-centre, leave-centre, last-mover", name),
        }
    }
}

/// The error type for [`Player::next_move()`](crate::Player::next_move).
#[derive(Debug)]
pub enum PlayerError {
    /// The player was asked to choose from an empty list of moves.
    NoAvailableMoves,
    /// The input the player reads from was closed before a move was chosen.
    InputClosed,
    Io(std::io::Error),
}

impl std::error::Error for PlayerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlayerError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for PlayerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerError::NoAvailableMoves => {
                write!(f, "A player was asked for a move, but no moves were available")
            }
            PlayerError::InputClosed => write!(f, "The input closed before a move was chosen"),
            PlayerError::Io(_) => write!(f, "Failed to communicate with the player"),
        }
    }
}

impl From<std::io::Error> for PlayerError {
    fn from(err: std::io::Error) -> Self {
        PlayerError::Io(err)
    }
}

/// The error type for one turn.
///
/// None of these are caused by the game state: they signal that a player
/// broke its contract, or that the engine was driven after the game ended.
#[derive(Debug)]
pub enum GameError {
    /// The player replied with a move that was not offered to it.
    MoveNotOffered { player: String, mv: Move },
    Player { player: String, err: PlayerError },
    GameOver,
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Player { err, .. } => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::MoveNotOffered { player, mv } => write!(
                f,
                "{} chose the move {}, which is not one of the available moves",
                player, mv
            ),
            GameError::Player { player, .. } => write!(f, "{} failed to choose a move", player),
            GameError::GameOver => write!(f, "Tried to play a turn after the game ended"),
        }
    }
}
