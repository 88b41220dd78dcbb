mod game;
mod player;
mod setup;
pub use game::*;
pub use player::*;
pub use setup::*;
