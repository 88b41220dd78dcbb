use anyhow::Context;
use jesonmor::{Color, Configuration, Game, Player, Status};
use serde::Serialize;
use tracing::{debug, info};

/// Results of a series of games between the same two players.
#[derive(Debug, Default, Serialize)]
pub struct MatchScore {
    /// Indexed by white, black.
    pub wins: [usize; 2],
    pub draws: usize,
    /// Points scored over all games, indexed by white, black.
    pub points: [u64; 2],
    pub num_moves: u64,
    /// How each game ended, in the order they were played.
    pub results: Vec<Status>,
}

impl MatchScore {
    pub fn record(&mut self, game: &Game) {
        match game.status().winner() {
            Some(winner) => self.wins[winner.index()] += 1,
            None => self.draws += 1,
        }
        for color in Color::BOTH {
            self.points[color.index()] += u64::from(game.scores().points(color));
        }
        self.num_moves += u64::from(game.num_moves());
        self.results.push(game.status());
    }

    pub fn num_games(&self) -> usize {
        self.wins[0] + self.wins[1] + self.draws
    }

    pub fn report(&self, config: &Configuration) -> String {
        let [white, black] = Color::BOTH;
        format!(
            "End result:\n- {} wins by {} ({} points)\n- {} wins by {} ({} points)\n- {} draws",
            self.wins[0],
            config.player_name(white),
            self.points[0],
            self.wins[1],
            config.player_name(black),
            self.points[1],
            self.draws
        )
    }
}

/// Plays a single game to the end and returns it.
///
/// Returns an error only if a player fails, never for the outcome of the
/// game.
pub fn play_game(
    config: &Configuration,
    white: &mut dyn Player,
    black: &mut dyn Player,
) -> anyhow::Result<Game> {
    let mut game = Game::new(config.clone());
    let status = game.run([white, black])?;
    info!(%status, num_moves = game.num_moves(), "Game finished");
    Ok(game)
}

/// Plays `num_games` games, calling `on_game_end` after each one.
pub fn play_matchup(
    config: &Configuration,
    white: &mut dyn Player,
    black: &mut dyn Player,
    num_games: usize,
    mut on_game_end: impl FnMut(usize, &Game),
) -> anyhow::Result<MatchScore> {
    let mut match_score = MatchScore::default();
    for game_idx in 0..num_games {
        let game = play_game(config, &mut *white, &mut *black)
            .with_context(|| format!("Game {} was aborted", game_idx + 1))?;
        match game.status().winner() {
            Some(winner) => debug!(winner = config.player_name(winner), game_idx),
            None => debug!(game_idx, "Draw"),
        }
        match_score.record(&game);
        on_game_end(game_idx, &game);
    }
    Ok(match_score)
}
