//! countplot-core - Live threshold-histogram applets for photon-count scans
//!
//! An applet subscribes to named datasets of a running experiment, turns the
//! raw per-point photon counts into thresholded probabilities with binomial
//! error bars, and drives a two-level view: an aggregate scatter of all scan
//! points plus a histogram and raw-sample view of one selected point.
//!
//! # Key Components
//!
//! - **AppletConfig**: dataset names, threshold sources and bin specification
//! - **DatasetSource**: per-tick table of `(valid, value)` datasets
//! - **ScanSnapshot**: validated, fully computed statistics of one tick
//! - **PlotSink**: the rendering collaborator receiving pane payloads
//! - **CountplotApplet**: the event controller tying it all together
//!
//! # Presets
//!
//! - [`AppletConfig::single_ion`]: one threshold, two bands
//! - [`AppletConfig::two_ion`]: low/high thresholds, three bands, trial counts

pub mod applet;
pub mod config;
pub mod dataset;
pub mod error;
pub mod input;
pub mod sink;
pub mod snapshot;

pub use applet::*;
pub use config::*;
pub use dataset::{DatasetEntry, DatasetSource, DatasetTable, DatasetValue};
pub use error::*;
pub use input::*;
pub use sink::*;
pub use snapshot::*;

pub use countplot_selection::{Direction, SelectionError, Transition};
pub use countplot_stats::{Band, ProbabilityEstimate, Thresholds};
