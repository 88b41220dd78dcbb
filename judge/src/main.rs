use std::path::PathBuf;

use clap::Parser;
use jesonmor::{Color, WinCondition};
use judge::{play_matchup, PlayerKind, SetupFile};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, Parser)]
#[command(version, about = "Plays JesonMor between two players")]
struct Args {
    /// Width and height of the board, an odd number of at least 3
    size: usize,

    /// Number of opening moves during which captures are not allowed
    protection_moves: u32,

    /// Who plays white, which moves first
    #[arg(long, value_enum, default_value_t = PlayerKind::Human)]
    white: PlayerKind,

    /// Who plays black
    #[arg(long, value_enum, default_value_t = PlayerKind::Random)]
    black: PlayerKind,

    /// How many games to play
    #[arg(short, long, default_value_t = 1)]
    num_games: usize,

    /// End each game after this many moves and decide it by score
    #[arg(long)]
    max_moves: Option<u32>,

    /// One of "reach-centre", "leave-centre", "last-mover"
    #[arg(long, default_value_t = WinCondition::ReachCentre)]
    win_condition: WinCondition,

    /// JSON file with player names and initial placements
    #[arg(long)]
    setup: Option<PathBuf>,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print the final tally as JSON to stdout
    #[arg(long, default_value_t = false)]
    json: bool,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let setup = match &args.setup {
        Some(path) => SetupFile::load(path)?,
        None => SetupFile::default(),
    };
    let config = setup
        .into_configuration(args.size, args.protection_moves)?
        .with_max_moves(args.max_moves)
        .with_win_condition(args.win_condition);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut white = args.white.create(config.player_name(Color::White), &mut rng);
    let mut black = args.black.create(config.player_name(Color::Black), &mut rng);

    let show_games = shows_final_board(&args);
    let match_score = play_matchup(
        &config,
        white.as_mut(),
        black.as_mut(),
        args.num_games,
        |_, game| {
            if show_games {
                println!("{}", game);
            }
        },
    )?;

    eprintln!("{}", match_score.report(&config));
    if args.json {
        println!("{}", serde_json::to_string_pretty(&match_score)?);
    }

    Ok(())
}

// With --json, stdout carries nothing but the tally
fn shows_final_board(args: &Args) -> bool {
    args.num_games == 1 && !args.json
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    // Stdout belongs to the human players
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn positional_arguments() {
        let args = Args::try_parse_from(["judge", "5", "2"]).unwrap();
        assert_eq!(args.size, 5);
        assert_eq!(args.protection_moves, 2);
        assert_eq!(args.white, PlayerKind::Human);
        assert_eq!(args.black, PlayerKind::Random);
        assert_eq!(args.win_condition, WinCondition::ReachCentre);
    }

    #[test]
    fn options() {
        let args = Args::try_parse_from([
            "judge",
            "7",
            "0",
            "--white",
            "random",
            "--win-condition",
            "leave-centre",
            "--max-moves",
            "100",
            "-n",
            "20",
        ])
        .unwrap();
        assert_eq!(args.white, PlayerKind::Random);
        assert_eq!(args.win_condition, WinCondition::LeaveCentre);
        assert_eq!(args.max_moves, Some(100));
        assert_eq!(args.num_games, 20);
    }

    #[test]
    fn final_board_is_not_mixed_into_json_output() {
        let single = Args::try_parse_from(["judge", "5", "2"]).unwrap();
        assert!(shows_final_board(&single));
        let json = Args::try_parse_from(["judge", "5", "2", "--json"]).unwrap();
        assert!(!shows_final_board(&json));
        let many = Args::try_parse_from(["judge", "5", "2", "-n", "3"]).unwrap();
        assert!(!shows_final_board(&many));
    }

    #[test]
    fn malformed_arguments_are_rejected() {
        assert!(Args::try_parse_from(["judge", "5"]).is_err());
        assert!(Args::try_parse_from(["judge", "five", "2"]).is_err());
        assert!(Args::try_parse_from(["judge", "5", "-1"]).is_err());
        assert!(Args::try_parse_from(["judge", "5", "2", "--win-condition", "centre"]).is_err());
    }
}
