use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use jesonmor::{Configuration, Piece, Place};
use serde::Deserialize;

/// An optional JSON file to customize the initial position.
///
/// ```json
/// {
///   "names": ["Alice", "Bob"],
///   "placements": [
///     { "piece": "K", "place": "a1" },
///     { "piece": "a", "place": "c3" }
///   ]
/// }
/// ```
///
/// Both fields may be left out, in which case the standard position and
/// player names are used.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetupFile {
    #[serde(default)]
    pub names: Option<[String; 2]>,
    #[serde(default)]
    pub placements: Option<Vec<PlacementEntry>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlacementEntry {
    /// A piece label: `K`/`A` for white, `k`/`a` for black.
    pub piece: Piece,
    pub place: Place,
}

impl SetupFile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Could not open setup file '{}'", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Could not parse setup file '{}'", path.display()))
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Combines the setup with the board size and protection window from
    /// the command line, and validates the result.
    pub fn into_configuration(
        self,
        size: usize,
        protection_moves: u32,
    ) -> anyhow::Result<Configuration> {
        let config = match self.placements {
            Some(entries) => {
                let placements = entries
                    .into_iter()
                    .map(|entry| (entry.piece, entry.place))
                    .collect();
                Configuration::new(size, protection_moves, placements)?
            }
            None => Configuration::standard(size, protection_moves)?,
        };
        Ok(match self.names {
            Some([white, black]) => config.with_player_names(white, black),
            None => config,
        })
    }
}

#[cfg(test)]
mod tests {
    use jesonmor::{Color, ConfigError};

    use super::*;

    #[test]
    fn empty_setup_is_the_standard_position() {
        let config = SetupFile::from_json("{}")
            .unwrap()
            .into_configuration(5, 3)
            .unwrap();
        assert_eq!(config, Configuration::standard(5, 3).unwrap());
    }

    #[test]
    fn custom_setup() {
        let json = r#"{
            "names": ["Alice", "Bob"],
            "placements": [
                { "piece": "K", "place": "a1" },
                { "piece": "a", "place": "c3" }
            ]
        }"#;
        let config = SetupFile::from_json(json)
            .unwrap()
            .into_configuration(3, 0)
            .unwrap();
        assert_eq!(config.player_name(Color::White), "Alice");
        assert_eq!(config.player_name(Color::Black), "Bob");
        assert_eq!(
            config.placements(),
            &[
                (Piece::knight(Color::White), Place::new(0, 0)),
                (Piece::archer(Color::Black), Place::new(2, 2)),
            ]
        );
    }

    #[test]
    fn invalid_setups_are_rejected() {
        let unknown_piece = r#"{ "placements": [{ "piece": "Q", "place": "a1" }] }"#;
        let err = SetupFile::from_json(unknown_piece).unwrap_err();
        assert!(err.to_string().contains("Unknown piece label 'Q'"));

        let bad_place = r#"{ "placements": [{ "piece": "K", "place": "11" }] }"#;
        assert!(SetupFile::from_json(bad_place).is_err());

        let overlapping = r#"{ "placements": [
            { "piece": "K", "place": "b2" },
            { "piece": "k", "place": "b2" }
        ] }"#;
        let err = SetupFile::from_json(overlapping)
            .unwrap()
            .into_configuration(3, 0)
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::OverlappingPlacements {
                place: Place::new(1, 1)
            })
        );

        assert!(SetupFile::from_json(r#"{ "board": 3 }"#).is_err());
    }
}
