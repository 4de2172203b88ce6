//! Interactive session state
//!
//! A [`Session`] holds the original raster, the processed raster produced
//! by explicit filter commands, and the current [`ViewState`]. Commands go
//! through the pure [`dispatch`](crate::dispatch) first; the session then
//! carries out the returned [`Action`] against its rasters and host.

use crate::mode::{self, Action, Command, Filter, Selection, ViewState};
use crate::{ImageHost, NprResult};
use npr_color::LumaWeights;
use npr_core::Raster;
use npr_region::{LabelMatrix, RegionGrowOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Filter parameters used by a session.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SessionConfig {
    pub region: RegionGrowOptions,
    pub weights: LumaWeights,
}

/// What a dispatched command changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// View state or processed raster changed
    Updated,
    /// The displayed raster was written here
    Saved(PathBuf),
    /// A new input raster replaced the old one
    Loaded,
    /// Nothing changed
    Unchanged,
}

/// Session over one input raster.
#[derive(Debug)]
pub struct Session<H: ImageHost> {
    original: Raster,
    processed: Raster,
    labels: Option<LabelMatrix>,
    state: ViewState,
    config: SessionConfig,
    host: H,
}

impl<H: ImageHost> Session<H> {
    /// Start a session on an already decoded raster.
    ///
    /// The processed raster starts out as a copy of the original.
    pub fn new(original: Raster, config: SessionConfig, host: H) -> Self {
        Self {
            processed: original.clone(),
            original,
            labels: None,
            state: ViewState::default(),
            config,
            host,
        }
    }

    /// Start a session by loading `path` through `host`.
    pub fn open(path: impl AsRef<Path>, config: SessionConfig, mut host: H) -> NprResult<Self> {
        let original = host.load_raster(path.as_ref())?;
        Ok(Self::new(original, config, host))
    }

    /// Current view state.
    pub fn state(&self) -> ViewState {
        self.state
    }

    /// Input raster.
    pub fn original(&self) -> &Raster {
        &self.original
    }

    /// Raster produced by the last filter command.
    pub fn processed(&self) -> &Raster {
        &self.processed
    }

    /// Region IDs from the last segmentation command, if the processed
    /// raster is a segmentation.
    pub fn labels(&self) -> Option<&LabelMatrix> {
        self.labels.as_ref()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consume the session and return its host.
    pub fn into_host(self) -> H {
        self.host
    }

    /// Handle one command.
    ///
    /// # Errors
    ///
    /// * [`NprError::LoadFailure`](crate::NprError::LoadFailure) if a load fails; the previous rasters
    ///   are kept and the session stays usable
    /// * [`NprError::SaveFailure`](crate::NprError::SaveFailure) if a save fails
    ///
    /// Filters rejecting a raster with fewer than 3 channels are logged and
    /// treated as no-ops.
    pub fn dispatch(&mut self, command: Command) -> NprResult<Outcome> {
        let (next, action) = mode::dispatch(&self.state, &command);
        let state_changed = next != self.state;
        self.state = next;

        match action {
            Action::None => Ok(if state_changed {
                Outcome::Updated
            } else {
                Outcome::Unchanged
            }),
            Action::Run(filter) => self.run(filter),
            Action::Save { name } => {
                let raster = self.display()?;
                let path = self.host.save_raster(&raster, &name)?;
                Ok(Outcome::Saved(path))
            }
            Action::Load(path) => self.load(&path),
        }
    }

    /// Raster shown for the current view state.
    ///
    /// An on-demand filter that cannot handle the input shows the original
    /// instead.
    pub fn display(&self) -> NprResult<Raster> {
        match self.state.selection() {
            Selection::Original => Ok(self.original.clone()),
            Selection::Processed => Ok(self.processed.clone()),
            Selection::Filter(filter) => match self.apply(filter) {
                Ok((raster, _)) => Ok(raster),
                Err(e) if e.is_unsupported_format() => {
                    warn!(?filter, error = %e, "filter skipped, showing original");
                    Ok(self.original.clone())
                }
                Err(e) => Err(e),
            },
        }
    }

    fn run(&mut self, filter: Filter) -> NprResult<Outcome> {
        match self.apply(filter) {
            Ok((raster, labels)) => {
                self.processed = raster;
                self.labels = labels;
                Ok(Outcome::Updated)
            }
            Err(e) if e.is_unsupported_format() => {
                warn!(?filter, error = %e, "filter skipped");
                Ok(Outcome::Unchanged)
            }
            Err(e) => Err(e),
        }
    }

    fn apply(&self, filter: Filter) -> NprResult<(Raster, Option<LabelMatrix>)> {
        debug!(?filter, "applying filter to original");
        match filter {
            Filter::Grayscale => {
                let gray = npr_color::grayscale_with_weights(&self.original, self.config.weights)?;
                Ok((gray, None))
            }
            Filter::Segmentation => {
                let seg = npr_region::region_grow(&self.original, &self.config.region)?;
                Ok((seg.raster, Some(seg.labels)))
            }
        }
    }

    fn load(&mut self, path: &Path) -> NprResult<Outcome> {
        match self.host.load_raster(path) {
            Ok(raster) => {
                self.processed = raster.clone();
                self.original = raster;
                self.labels = None;
                Ok(Outcome::Loaded)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "load failed, keeping current image");
                Err(e)
            }
        }
    }
}
