//! Display configuration, loaded from an optional TOML file.

use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Draw figurine glyphs instead of letters.
    pub unicode_pieces: bool,
    /// Label files and ranks around the grid.
    pub show_coordinates: bool,
    /// Marker drawn on candidate destination squares.
    pub candidate_marker: char,
    /// Render the board from Black's side when Black is on turn.
    pub flip_for_black: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            unicode_pieces: true,
            show_coordinates: true,
            candidate_marker: '*',
            flip_for_black: false,
        }
    }
}

impl DisplayConfig {
    /// Load from `path`, falling back to defaults when the file is
    /// missing. A present-but-broken file is reported and skipped.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: ignoring malformed {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}
