//! Selection state machine
//!
//! ```text
//!            load(s)                    select(i) / select_adjacent(d)
//!   Empty ───────────► Ready(s, len-1) ◄──────────────────────────────┐
//!                          │ ▲                                        │
//!                          │ └─────────── load(s') ───────────────────┤
//!                          └──────────────────────────────────────────┘
//! ```
//!
//! Every call reports a [`Transition`] so the caller knows which panes to
//! redraw: all of them after a load, only the detail panes after a
//! selection, nothing when the call was a no-op.

use crate::error::{SelectionError, SelectionResult};
use serde::{Deserialize, Serialize};

/// Indexed collection of scan points with per-point detail data
pub trait PointSet {
    /// Number of scan points
    fn num_points(&self) -> usize;

    /// Raw samples of a point
    fn samples(&self, index: usize) -> Option<&[u32]>;

    /// Histogram counts of a point
    fn histogram(&self, index: usize) -> Option<&[u64]>;
}

/// Navigation direction for keyboard stepping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Previous,
    Next,
}

/// What a state change requires the view to redraw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A new snapshot was loaded: redraw every pane
    Loaded { selected: usize },
    /// The selected point was (re)chosen: redraw the detail panes
    Selected { from: usize, to: usize },
    /// Nothing changed
    Unchanged,
}

impl Transition {
    /// Whether the aggregate pane must be redrawn
    pub fn redraws_aggregate(&self) -> bool {
        matches!(self, Transition::Loaded { .. })
    }

    /// Whether the detail panes must be redrawn
    pub fn redraws_detail(&self) -> bool {
        !matches!(self, Transition::Unchanged)
    }
}

/// Selection state
#[derive(Debug, Clone)]
pub enum SelectionState<S> {
    Empty,
    Ready { snapshot: S, selected: usize },
}

/// Detail data of the selected point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointDetail<'a> {
    pub index: usize,
    pub samples: &'a [u32],
    pub histogram: &'a [u64],
}

/// Owner of the current snapshot and selected index
#[derive(Debug, Clone)]
pub struct SelectionModel<S> {
    state: SelectionState<S>,
}

impl<S> Default for SelectionModel<S> {
    fn default() -> Self {
        Self {
            state: SelectionState::Empty,
        }
    }
}

impl<S: PointSet> SelectionModel<S> {
    /// Create a model with no snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot and select its last point
    ///
    /// A snapshot without points is rejected and the previous state kept.
    pub fn load(&mut self, snapshot: S) -> SelectionResult<Transition> {
        let len = snapshot.num_points();
        if len == 0 {
            return Err(SelectionError::EmptySnapshot);
        }
        let selected = len - 1;
        self.state = SelectionState::Ready { snapshot, selected };
        Ok(Transition::Loaded { selected })
    }

    /// Select a point by index
    pub fn select(&mut self, index: usize) -> SelectionResult<Transition> {
        match &mut self.state {
            SelectionState::Empty => Err(SelectionError::NoSnapshot),
            SelectionState::Ready { snapshot, selected } => {
                let len = snapshot.num_points();
                if index >= len {
                    return Err(SelectionError::OutOfRange { index, len });
                }
                let from = std::mem::replace(selected, index);
                Ok(Transition::Selected { from, to: index })
            }
        }
    }

    /// Step one point in `direction`, stopping at either end
    pub fn select_adjacent(&mut self, direction: Direction) -> SelectionResult<Transition> {
        let (current, len) = match &self.state {
            SelectionState::Empty => return Err(SelectionError::NoSnapshot),
            SelectionState::Ready { snapshot, selected } => (*selected, snapshot.num_points()),
        };

        let target = match direction {
            Direction::Previous => current.checked_sub(1),
            Direction::Next => Some(current + 1).filter(|&i| i < len),
        };

        match target {
            Some(index) => self.select(index),
            None => Ok(Transition::Unchanged),
        }
    }

    /// Index of the selected point
    pub fn selected(&self) -> Option<usize> {
        match &self.state {
            SelectionState::Empty => None,
            SelectionState::Ready { selected, .. } => Some(*selected),
        }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Option<&S> {
        match &self.state {
            SelectionState::Empty => None,
            SelectionState::Ready { snapshot, .. } => Some(snapshot),
        }
    }

    pub fn state(&self) -> &SelectionState<S> {
        &self.state
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.state, SelectionState::Empty)
    }

    /// Samples and histogram of the selected point
    pub fn detail(&self) -> Option<PointDetail<'_>> {
        match &self.state {
            SelectionState::Empty => None,
            SelectionState::Ready { snapshot, selected } => Some(PointDetail {
                index: *selected,
                samples: snapshot.samples(*selected)?,
                histogram: snapshot.histogram(*selected)?,
            }),
        }
    }
}
