//! Threshold-histogram applet
//!
//! Wires the pipeline together on a single event thread:
//!
//! ```text
//! dataset tick ─► UpdateInputs::gather ─► ScanSnapshot::build ─► SelectionModel::load ─► render all
//! click / key  ─────────────────────────────────────────────────► SelectionModel::select* ─► render detail
//! ```
//!
//! A rejected tick or input leaves the snapshot, the selection and the
//! rendered panes exactly as they were; the reason is only logged.

use crate::config::AppletConfig;
use crate::dataset::DatasetSource;
use crate::error::{ConfigResult, UpdateError, UpdateResult};
use crate::input::{default_shortcuts, find_direction, KeyEvent, PlotEvent, Shortcut};
use crate::sink::{AggregateView, DetailView, PlotSink};
use crate::snapshot::ScanSnapshot;
use countplot_selection::{Direction, SelectionModel, SelectionResult, Transition};

/// Live applet: aggregate view plus detail panes for one selected point
pub struct CountplotApplet<P: PlotSink> {
    config: AppletConfig,
    selection: SelectionModel<ScanSnapshot>,
    shortcuts: Vec<Shortcut>,
    sink: P,
}

impl<P: PlotSink> CountplotApplet<P> {
    /// Create an applet after validating its configuration
    pub fn new(config: AppletConfig, sink: P) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            selection: SelectionModel::new(),
            shortcuts: default_shortcuts(),
            sink,
        })
    }

    /// Replace the navigation key bindings
    pub fn with_shortcuts(mut self, shortcuts: Vec<Shortcut>) -> Self {
        self.shortcuts = shortcuts;
        self
    }

    /// Handle a dataset tick
    ///
    /// On success the snapshot is replaced, the last point selected and every
    /// pane redrawn. On failure nothing changes.
    pub fn data_changed<S: DatasetSource + ?Sized>(
        &mut self,
        source: &S,
    ) -> UpdateResult<Transition> {
        let snapshot = match ScanSnapshot::from_source(&self.config, source) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::debug!("Skipping update: {}", e);
                return Err(e);
            }
        };
        let points = snapshot.len();

        let transition = self
            .selection
            .load(snapshot)
            .map_err(|_| UpdateError::EmptyScan)?;
        tracing::info!("Loaded snapshot with {} points", points);

        self.render(transition);
        Ok(transition)
    }

    /// Select the point with `index`, as after a click on it
    pub fn point_clicked(&mut self, index: usize) -> SelectionResult<Transition> {
        let transition = self.selection.select(index).map_err(|e| {
            tracing::warn!("Ignoring click: {}", e);
            e
        })?;
        self.render(transition);
        Ok(transition)
    }

    /// Step the selection, stopping at either end
    pub fn navigate(&mut self, direction: Direction) -> SelectionResult<Transition> {
        let transition = self.selection.select_adjacent(direction)?;
        self.render(transition);
        Ok(transition)
    }

    /// Act on a key event; unbound keys and keys before the first snapshot do nothing
    pub fn key_pressed(&mut self, event: &KeyEvent) -> Transition {
        if self.selection.is_empty() {
            return Transition::Unchanged;
        }
        match find_direction(event, &self.shortcuts) {
            Some(direction) => self.navigate(direction).unwrap_or(Transition::Unchanged),
            None => Transition::Unchanged,
        }
    }

    /// Dispatch an event reported by the plot sink
    pub fn handle_event(&mut self, event: &PlotEvent) -> Transition {
        match event {
            PlotEvent::PointClicked { index } => {
                self.point_clicked(*index).unwrap_or(Transition::Unchanged)
            }
            PlotEvent::Key(key) => self.key_pressed(key),
        }
    }

    fn render(&mut self, transition: Transition) {
        let Some(snapshot) = self.selection.snapshot() else {
            return;
        };
        let Some(index) = self.selection.selected() else {
            return;
        };

        if transition.redraws_aggregate() {
            self.sink
                .replace_aggregate(&AggregateView::from_snapshot(snapshot));
        }
        if transition.redraws_detail() {
            if let Some(detail) = DetailView::from_snapshot(snapshot, index) {
                tracing::trace!("Selected point {}", index);
                self.sink.render_detail(&detail);
            }
        }
    }

    pub fn config(&self) -> &AppletConfig {
        &self.config
    }

    pub fn selection(&self) -> &SelectionModel<ScanSnapshot> {
        &self.selection
    }

    /// Current snapshot, if any update has been accepted
    pub fn snapshot(&self) -> Option<&ScanSnapshot> {
        self.selection.snapshot()
    }

    /// Index of the selected point
    pub fn selected(&self) -> Option<usize> {
        self.selection.selected()
    }

    pub fn sink(&self) -> &P {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut P {
        &mut self.sink
    }

    pub fn into_sink(self) -> P {
        self.sink
    }
}
