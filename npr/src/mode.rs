//! Output mode selection and command dispatch
//!
//! The view is described by an immutable [`ViewState`]: which
//! [`OutputMode`] the user picked and where processing happens
//! ([`ProcessingLocation`]). [`dispatch`] maps a state and a [`Command`] to
//! the next state and the [`Action`] the host has to carry out, without
//! touching any raster. [`select_output`] decides which raster a state
//! shows.

use crate::{NprError, NprResult};
use std::fmt;
use std::path::PathBuf;
use tracing::trace;

/// User-selected output mode with a stable numeric ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputMode {
    /// Unprocessed input
    #[default]
    Original = 0,
    /// Luma grayscale
    Grayscale = 1,
    /// Region-growing segmentation
    Segmentation = 2,
    /// Reserved, passes the input through
    Reserved3 = 3,
    /// Reserved, passes the input through
    Reserved4 = 4,
    /// Reserved, passes the input through
    Reserved5 = 5,
}

impl OutputMode {
    /// Every mode, ordered by ID.
    pub const ALL: [OutputMode; 6] = [
        OutputMode::Original,
        OutputMode::Grayscale,
        OutputMode::Segmentation,
        OutputMode::Reserved3,
        OutputMode::Reserved4,
        OutputMode::Reserved5,
    ];

    /// Numeric ID (0..=5).
    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    /// The filter this mode applies, if any.
    pub fn filter(self) -> Option<Filter> {
        match self {
            OutputMode::Grayscale => Some(Filter::Grayscale),
            OutputMode::Segmentation => Some(Filter::Segmentation),
            _ => None,
        }
    }
}

impl TryFrom<u8> for OutputMode {
    type Error = NprError;

    fn try_from(value: u8) -> NprResult<Self> {
        OutputMode::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(NprError::InvalidMode(value))
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputMode::Original => "original",
            OutputMode::Grayscale => "grayscale",
            OutputMode::Segmentation => "segmentation",
            OutputMode::Reserved3 => "reserved-3",
            OutputMode::Reserved4 => "reserved-4",
            OutputMode::Reserved5 => "reserved-5",
        };
        f.write_str(name)
    }
}

/// Where the selected filter is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProcessingLocation {
    /// Show the processed buffer produced by explicit filter commands
    #[default]
    Precomputed,
    /// Apply the selected mode's filter to the original when displayed
    OnDemand,
}

impl ProcessingLocation {
    /// The other location.
    pub fn toggled(self) -> Self {
        match self {
            ProcessingLocation::Precomputed => ProcessingLocation::OnDemand,
            ProcessingLocation::OnDemand => ProcessingLocation::Precomputed,
        }
    }

    /// Prefix of saved file names.
    pub fn save_prefix(self) -> &'static str {
        match self {
            ProcessingLocation::Precomputed => "precomputed",
            ProcessingLocation::OnDemand => "on_demand",
        }
    }
}

/// A raster filter the session can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    Grayscale,
    Segmentation,
}

/// Which raster a view state displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection {
    /// The original raster unchanged
    Original,
    /// The precomputed processed raster
    Processed,
    /// The original with a filter applied at display time
    Filter(Filter),
}

/// Pick the raster shown for a mode and location.
///
/// | location    | 0, 3, 4, 5 | 1                 | 2                    |
/// |-------------|------------|-------------------|----------------------|
/// | Precomputed | Processed  | Processed         | Processed            |
/// | OnDemand    | Original   | Filter(Grayscale) | Filter(Segmentation) |
pub fn select_output(mode: OutputMode, location: ProcessingLocation) -> Selection {
    match location {
        ProcessingLocation::Precomputed => Selection::Processed,
        ProcessingLocation::OnDemand => match mode.filter() {
            Some(filter) => Selection::Filter(filter),
            None => Selection::Original,
        },
    }
}

/// Current view configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ViewState {
    pub mode: OutputMode,
    pub location: ProcessingLocation,
}

impl ViewState {
    /// Raster this state displays.
    pub fn selection(&self) -> Selection {
        select_output(self.mode, self.location)
    }

    /// Base name (without extension) under which this state saves.
    pub fn save_name(&self) -> String {
        format!("{}_{}", self.location.save_prefix(), self.mode.index())
    }
}

/// A user command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Select an output mode
    SelectMode(OutputMode),
    /// Switch between precomputed and on-demand processing
    ToggleLocation,
    /// Run the grayscale filter into the processed buffer
    Grayscale,
    /// Run the segmenter into the processed buffer
    Segment,
    /// Save the displayed raster
    Save,
    /// Load a new input raster
    Load(PathBuf),
}

/// Side effect requested by [`dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Run(Filter),
    Save { name: String },
    Load(PathBuf),
}

/// Compute the next view state and the action a command requests.
///
/// Switching back to [`ProcessingLocation::Precomputed`] resets the mode to
/// [`OutputMode::Original`].
pub fn dispatch(state: &ViewState, command: &Command) -> (ViewState, Action) {
    let (next, action) = match command {
        Command::SelectMode(mode) => (
            ViewState {
                mode: *mode,
                ..*state
            },
            Action::None,
        ),
        Command::ToggleLocation => {
            let location = state.location.toggled();
            let mode = match location {
                ProcessingLocation::Precomputed => OutputMode::Original,
                ProcessingLocation::OnDemand => state.mode,
            };
            (ViewState { mode, location }, Action::None)
        }
        Command::Grayscale => (*state, Action::Run(Filter::Grayscale)),
        Command::Segment => (*state, Action::Run(Filter::Segmentation)),
        Command::Save => (
            *state,
            Action::Save {
                name: state.save_name(),
            },
        ),
        Command::Load(path) => (*state, Action::Load(path.clone())),
    };

    trace!(?command, from = ?state, to = ?next, ?action, "dispatch");
    (next, action)
}
