use std::io::{BufRead, BufReader, Cursor, Read, Stdin, Write};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::{Game, Move, PlayerError};

/// Something that chooses moves, e.g. a person at a terminal or a bot.
pub trait Player {
    fn name(&self) -> &str;

    /// Picks one of `available_moves`, which are all legal in `game`.
    ///
    /// Must fail with [`PlayerError::NoAvailableMoves`] if there are none,
    /// and must otherwise return one of the given moves.
    fn next_move(&mut self, game: &Game, available_moves: &[Move]) -> Result<Move, PlayerError>;
}

/// Picks uniformly at random among the available moves.
pub struct RandomPlayer {
    name: String,
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new(name: &str, rng: StdRng) -> Self {
        Self {
            name: String::from(name),
            rng,
        }
    }

    pub fn seeded(name: &str, seed: u64) -> Self {
        Self::new(name, StdRng::seed_from_u64(seed))
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn next_move(&mut self, _game: &Game, available_moves: &[Move]) -> Result<Move, PlayerError> {
        available_moves
            .choose(&mut self.rng)
            .copied()
            .ok_or(PlayerError::NoAvailableMoves)
    }
}

/// Where a [`ConsolePlayer`] reads its lines from.
pub trait LineInput {
    /// Appends the next line to `buf`, and returns the number of bytes
    /// read, or 0 at the end of the input.
    fn read_line(&mut self, buf: &mut String) -> std::io::Result<usize>;
}

// Locks stdin only for one line at a time, so that two players at the same
// terminal can take turns reading from it.
impl LineInput for Stdin {
    fn read_line(&mut self, buf: &mut String) -> std::io::Result<usize> {
        Stdin::read_line(self, buf)
    }
}

impl<R: Read> LineInput for BufReader<R> {
    fn read_line(&mut self, buf: &mut String) -> std::io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

impl<T: AsRef<[u8]>> LineInput for Cursor<T> {
    fn read_line(&mut self, buf: &mut String) -> std::io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

/// Asks a person for moves, in the form `a1->b3`, over a line-based text
/// interface.
pub struct ConsolePlayer<R, W> {
    name: String,
    input: R,
    output: W,
    // A re-usable buffer for reading lines.
    buf: String,
}

impl<R: LineInput, W: Write> ConsolePlayer<R, W> {
    pub fn new(name: &str, input: R, output: W) -> Self {
        Self {
            name: String::from(name),
            input,
            output,
            buf: String::new(),
        }
    }
}

impl ConsolePlayer<Stdin, std::io::Stdout> {
    /// A player at the terminal running this program.
    pub fn stdio(name: &str) -> Self {
        Self::new(name, std::io::stdin(), std::io::stdout())
    }
}

impl<R: LineInput, W: Write> Player for ConsolePlayer<R, W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn next_move(&mut self, game: &Game, available_moves: &[Move]) -> Result<Move, PlayerError> {
        if available_moves.is_empty() {
            return Err(PlayerError::NoAvailableMoves);
        }
        writeln!(self.output, "{}\n", game)?;
        let listing: Vec<String> = available_moves.iter().map(Move::to_string).collect();
        writeln!(self.output, "Available moves: {}", listing.join(", "))?;

        loop {
            write!(self.output, "{} ({}), enter your move: ", self.name, game.current_color())?;
            self.output.flush()?;
            self.buf.clear();
            if self.input.read_line(&mut self.buf)? == 0 {
                return Err(PlayerError::InputClosed);
            }
            match self.buf.trim().parse::<Move>() {
                Ok(mv) if available_moves.contains(&mv) => return Ok(mv),
                Ok(mv) => match game.validate_move(mv) {
                    Err(violation) => writeln!(self.output, "{}", violation)?,
                    Ok(()) => writeln!(self.output, "{} does not move one of your pieces", mv)?,
                },
                Err(err) => writeln!(self.output, "{}", err)?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Cursor;

    use super::*;
    use crate::{mv, Color, Configuration, Piece};

    fn knights_in_corners() -> Game {
        let config = Configuration::new(
            3,
            0,
            vec![
                (Piece::knight(Color::White), "a1".parse().unwrap()),
                (Piece::knight(Color::Black), "c3".parse().unwrap()),
            ],
        )
        .unwrap();
        Game::new(config)
    }

    #[test]
    fn random_player_needs_moves() {
        let game = knights_in_corners();
        let mut player = RandomPlayer::seeded("random", 0);
        assert!(matches!(
            player.next_move(&game, &[]),
            Err(PlayerError::NoAvailableMoves)
        ));
    }

    #[test]
    fn random_player_is_uniform() {
        let game = knights_in_corners();
        let moves = [mv!("a1->b3"), mv!("a1->c2"), mv!("c3->b1"), mv!("c3->a2")];
        let mut player = RandomPlayer::seeded("random", 42);
        let mut counts: HashMap<Move, usize> = HashMap::new();
        for _ in 0..4000 {
            let mv = player.next_move(&game, &moves).unwrap();
            *counts.entry(mv).or_default() += 1;
        }
        assert_eq!(counts.len(), 4);
        for count in counts.values() {
            assert!((800..1200).contains(count), "count was {}", count);
        }
    }

    #[test]
    fn random_player_is_reproducible() {
        let game = knights_in_corners();
        let moves = game.available_moves();
        let picks = |seed| {
            let mut player = RandomPlayer::seeded("random", seed);
            (0..20)
                .map(|_| player.next_move(&game, &moves).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(picks(7), picks(7));
    }

    #[test]
    fn console_player_reprompts_until_an_available_move() {
        let game = knights_in_corners();
        let available = game.available_moves();
        let input = Cursor::new("hello\na1->a2\nc3->b1\na1->c2\n");
        let mut output = Vec::new();
        let mut player = ConsolePlayer::new("Alice", input, &mut output);
        let mv = player.next_move(&game, &available).unwrap();
        assert_eq!(mv, mv!("a1->c2"));

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Available moves: a1->b3, a1->c2"));
        assert!(output.contains("Expected a move of the form 'a1->b3'"));
        assert!(output.contains("a1->a2 is illegal: A knight must move in an L-shape"));
        assert!(output.contains("c3->b1 does not move one of your pieces"));
        assert_eq!(output.matches("Alice (white), enter your move: ").count(), 4);
    }

    #[test]
    fn terminal_players_share_stdin() {
        let white = ConsolePlayer::stdio("Alice");
        let black = ConsolePlayer::stdio("Bob");
        assert_eq!(white.name(), "Alice");
        assert_eq!(black.name(), "Bob");
    }

    #[test]
    fn console_player_reads_from_a_buffered_reader() {
        let game = knights_in_corners();
        let available = game.available_moves();
        let input = BufReader::new("a1->b3\n".as_bytes());
        let mut player = ConsolePlayer::new("Alice", input, std::io::sink());
        assert_eq!(player.next_move(&game, &available).unwrap(), mv!("a1->b3"));
    }

    #[test]
    fn console_player_fails_on_closed_input() {
        let game = knights_in_corners();
        let available = game.available_moves();
        let mut player = ConsolePlayer::new("Alice", Cursor::new("a1->a2\n"), Vec::new());
        assert!(matches!(
            player.next_move(&game, &available),
            Err(PlayerError::InputClosed)
        ));
    }
}
