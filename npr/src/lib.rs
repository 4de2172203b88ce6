//! npr - Grayscale and region-growing filters for Rust
//!
//! Non-photorealistic rendering building blocks: a luma grayscale filter,
//! a greedy region-growing segmenter, and the policy that decides which
//! raster is shown or saved for a selected output mode.
//!
//! # Overview
//!
//! - Raster type and I/O (PNG, JPEG)
//! - Grayscale conversion ([`color`])
//! - Region growing segmentation ([`region`])
//! - Output mode selection and command dispatch ([`mode`])
//! - A [`Session`] tying rasters, view state and a load/save [`ImageHost`]
//!   together
//!
//! # Example
//!
//! ```
//! use npr::{Command, FsHost, OutputMode, Raster, Rgb, Session, SessionConfig};
//!
//! let raster = Raster::filled(4, 4, 3, Rgb::new(200, 40, 40)).unwrap();
//! let mut session = Session::new(raster, SessionConfig::default(), FsHost::default());
//!
//! session.dispatch(Command::Grayscale).unwrap();
//! session.dispatch(Command::SelectMode(OutputMode::Grayscale)).unwrap();
//! let shown = session.display().unwrap();
//! assert_eq!(shown.get_rgb(0, 0), Some(Rgb::gray(71)));
//! ```

pub mod error;
pub mod host;
pub mod mode;
pub mod session;

// Re-export core types (primary data structures used everywhere)
pub use npr_core::{Error, ImageFormat, Raster, RasterMut, Result, Rgb};

// Re-export domain crates as modules to avoid name conflicts
pub use npr_color as color;
pub use npr_io as io;
pub use npr_region as region;

pub use error::{NprError, NprResult};
pub use host::{FsHost, ImageHost};
pub use mode::{
    Action, Command, Filter, OutputMode, ProcessingLocation, Selection, ViewState, dispatch,
    select_output,
};
pub use session::{Outcome, Session, SessionConfig};
