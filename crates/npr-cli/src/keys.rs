//! Key bindings
//!
//! | key        | command                      |
//! |------------|------------------------------|
//! | `0`..`5`   | select output mode           |
//! | `e`        | toggle processing location   |
//! | `6`        | run segmentation             |
//! | `g`        | run grayscale                |
//! | `ctrl+s`   | save the displayed image     |
//! | `o:<path>` | load another image           |

use npr::{Command, OutputMode};
use std::path::PathBuf;
use std::str::FromStr;

/// A single key press, already resolved to the command it triggers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub Command);

impl FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(path) = s.strip_prefix("o:") {
            if path.is_empty() {
                return Err("'o:' needs a path, e.g. o:input.png".to_string());
            }
            return Ok(Key(Command::Load(PathBuf::from(path))));
        }

        let command = match s.to_ascii_lowercase().as_str() {
            "e" => Command::ToggleLocation,
            "6" => Command::Segment,
            "g" => Command::Grayscale,
            "ctrl+s" | "^s" => Command::Save,
            other => {
                let mode = other
                    .parse::<u8>()
                    .ok()
                    .and_then(|id| OutputMode::try_from(id).ok())
                    .ok_or_else(|| format!("unknown key '{}'", s))?;
                Command::SelectMode(mode)
            }
        };
        Ok(Key(command))
    }
}
