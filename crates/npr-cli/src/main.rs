//! npr - replay key presses against an image session
//!
//! Loads an image, feeds it the given keys in order, and writes every
//! saved image into the output directory.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use npr::region::{ColorArithmetic, DEFAULT_THRESHOLD, RegionGrowOptions};
use npr::{FsHost, ImageFormat, NprError, Outcome, Session, SessionConfig};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod keys;

use keys::Key;

#[derive(Parser)]
#[command(name = "npr")]
#[command(author, version, about = "Grayscale and region-growing image filters")]
#[command(long_about = "
Loads an image and replays key presses against it.

Keys: 0-5 select output mode, e toggles precomputed/on-demand processing,
g runs grayscale, 6 runs segmentation, ctrl+s saves, o:<path> loads.

Examples:
  npr giraffe.jpg --keys g,1,ctrl+s          # precomputed_1.png
  npr giraffe.jpg --keys 6,ctrl+s,e,1,ctrl+s # precomputed_0.png, on_demand_1.png
  npr giraffe.jpg --keys 6,ctrl+s --threshold 60 --format jpg
")]
struct Cli {
    /// Input image
    input: PathBuf,

    /// Comma-separated key presses
    #[arg(short, long, value_delimiter = ',', required = true)]
    keys: Vec<Key>,

    /// Directory for saved images
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Format of saved images
    #[arg(short, long, value_enum, default_value_t = SaveFormat::Png)]
    format: SaveFormat,

    /// Segmentation merge threshold (L1 color distance)
    #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
    threshold: u32,

    /// Compare colors as signed bytes when segmenting
    #[arg(long)]
    signed_byte: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum SaveFormat {
    Png,
    Jpg,
}

impl From<SaveFormat> for ImageFormat {
    fn from(f: SaveFormat) -> Self {
        match f {
            SaveFormat::Png => ImageFormat::Png,
            SaveFormat::Jpg => ImageFormat::Jpeg,
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let arithmetic = if cli.signed_byte {
        ColorArithmetic::SignedByte
    } else {
        ColorArithmetic::Unsigned
    };
    let config = SessionConfig {
        region: RegionGrowOptions::default()
            .with_threshold(cli.threshold)
            .with_arithmetic(arithmetic),
        ..SessionConfig::default()
    };

    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("Failed to create {}", cli.out_dir.display()))?;
    let host = FsHost::new(&cli.out_dir, cli.format.into());

    let mut session = Session::open(&cli.input, config, host)
        .with_context(|| format!("Failed to open {}", cli.input.display()))?;

    for Key(command) in cli.keys {
        match session.dispatch(command.clone()) {
            Ok(Outcome::Saved(path)) => println!("Saved {}", path.display()),
            Ok(_) => {}
            Err(e @ NprError::LoadFailure { .. }) => {
                // Keep going with the current image
                eprintln!("Warning: {}", e);
            }
            Err(e) => return Err(e).with_context(|| format!("Command {:?} failed", command)),
        }
    }

    let state = session.state();
    info!(mode = %state.mode, location = ?state.location, "done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use npr::Command;

    #[test]
    fn test_cli_parses_keys_and_options() {
        let cli = Cli::try_parse_from([
            "npr",
            "in.png",
            "--keys",
            "g,1,ctrl+s",
            "--format",
            "jpg",
            "--threshold",
            "50",
        ])
        .unwrap();
        assert_eq!(cli.keys.len(), 3);
        assert_eq!(cli.keys[0], Key(Command::Grayscale));
        assert_eq!(cli.threshold, 50);
        assert_eq!(ImageFormat::from(cli.format), ImageFormat::Jpeg);
        assert!(!cli.signed_byte);
    }

    #[test]
    fn test_cli_rejects_unknown_key() {
        assert!(Cli::try_parse_from(["npr", "in.png", "--keys", "g,z"]).is_err());
        assert!(Cli::try_parse_from(["npr", "in.png"]).is_err());
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["npr", "in.png", "-k", "6"]).unwrap();
        assert_eq!(cli.threshold, DEFAULT_THRESHOLD);
        assert_eq!(cli.out_dir, PathBuf::from("."));
    }
}
