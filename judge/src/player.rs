use clap::ValueEnum;
use jesonmor::{ConsolePlayer, Player, RandomPlayer};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Who makes the moves for one side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlayerKind {
    /// A person entering moves at the terminal
    Human,
    /// Picks uniformly among the legal moves
    Random,
}

impl PlayerKind {
    /// Random players get their own generator, seeded from `rng`, so that a
    /// whole run is reproducible from a single seed.
    pub fn create(self, name: &str, rng: &mut StdRng) -> Box<dyn Player> {
        match self {
            PlayerKind::Human => Box::new(ConsolePlayer::stdio(name)),
            PlayerKind::Random => {
                Box::new(RandomPlayer::new(name, StdRng::seed_from_u64(rng.gen())))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_players_are_named() {
        let mut rng = StdRng::seed_from_u64(0);
        let player = PlayerKind::Random.create("Bob", &mut rng);
        assert_eq!(player.name(), "Bob");
    }

    #[test]
    fn two_human_players_can_be_created() {
        let mut rng = StdRng::seed_from_u64(0);
        let white = PlayerKind::Human.create("Alice", &mut rng);
        let black = PlayerKind::Human.create("Bob", &mut rng);
        assert_eq!(white.name(), "Alice");
        assert_eq!(black.name(), "Bob");
    }
}
