pub use board::*;
pub use config::*;
pub use errors::*;
pub use game::*;
pub use piece::*;
pub use place::*;
pub use player::*;
pub use rules::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod config;
mod errors;
mod game;
mod piece;
mod place;
mod player;
mod rules;
mod visualization;
