//! countplot-selection - Point selection linking aggregate and detail views
//!
//! The aggregate view shows one marker per scan point; the detail view shows
//! the histogram and raw samples of a single selected point. This crate holds
//! that selection as an explicit state machine:
//!
//! - **Empty**: no snapshot has been loaded yet
//! - **Ready**: a snapshot plus the index of the selected point
//!
//! Loading a snapshot always selects its last point. Clicks select by index,
//! arrow keys move one point at a time and stop at either end.
//!
//! ```ignore
//! use countplot_selection::{Direction, SelectionModel};
//!
//! let mut model = SelectionModel::new();
//! model.load(snapshot)?;
//! model.select(2)?;
//! model.select_adjacent(Direction::Next)?;
//! let detail = model.detail();
//! ```

pub mod error;
pub mod model;

pub use error::*;
pub use model::*;
