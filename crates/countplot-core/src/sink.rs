//! Plot sink: the rendering side of an applet
//!
//! The applet never draws. It hands a [`PlotSink`] complete replacement
//! payloads for each pane:
//!
//! - the aggregate view (x, per-band probabilities, asymmetric error bars)
//! - the detail histogram of the selected point
//! - the raw samples of the selected point
//! - the selection indicator on the aggregate view
//!
//! `Vec<PlotCommand>` implements the trait by recording every call, which is
//! what headless runs and tests use.

use crate::snapshot::ScanSnapshot;
use countplot_stats::{Band, Thresholds};
use serde::{Deserialize, Serialize};

/// How a series is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesStyle {
    /// Symbols only, clickable
    Scatter,
    /// Connected line
    Line,
}

/// Asymmetric error bars
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBars {
    pub top: Vec<f64>,
    pub bottom: Vec<f64>,
}

/// One probability series of the aggregate view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesData {
    pub band: Band,
    pub style: SeriesStyle,
    pub y: Vec<f64>,
    pub errors: ErrorBars,
}

impl SeriesData {
    fn from_snapshot(snapshot: &ScanSnapshot, band: Band, style: SeriesStyle) -> Option<Self> {
        let estimates = snapshot.series(band)?;
        Some(Self {
            band,
            style,
            y: estimates.iter().map(|e| e.p).collect(),
            errors: ErrorBars {
                top: estimates.iter().map(|e| e.upper_err).collect(),
                bottom: estimates.iter().map(|e| e.lower_err).collect(),
            },
        })
    }
}

/// Replacement payload for the aggregate view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateView {
    pub x: Vec<f64>,
    pub series: Vec<SeriesData>,
    pub y_range: (f64, f64),
}

impl AggregateView {
    /// Series plotted for a snapshot
    ///
    /// The at-or-above band is always the clickable scatter. Dual thresholds
    /// add the between band as a line; the at-or-below band is not drawn.
    pub fn from_snapshot(snapshot: &ScanSnapshot) -> Self {
        let mut series = Vec::new();
        series.extend(SeriesData::from_snapshot(
            snapshot,
            snapshot.primary_band(),
            SeriesStyle::Scatter,
        ));
        if let Thresholds::Dual { .. } = snapshot.thresholds() {
            series.extend(SeriesData::from_snapshot(
                snapshot,
                Band::Between,
                SeriesStyle::Line,
            ));
        }

        Self {
            x: snapshot.x().to_vec(),
            series,
            y_range: (0.0, 1.0),
        }
    }

    /// The clickable series
    pub fn primary(&self) -> Option<&SeriesData> {
        self.series.iter().find(|s| s.style == SeriesStyle::Scatter)
    }
}

/// Replacement payload for the detail histogram pane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramPane {
    pub edges: Vec<f64>,
    pub counts: Vec<u64>,
    /// Vertical lines at each threshold
    pub threshold_markers: Vec<f64>,
}

/// Replacement payload for the raw samples pane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplesPane {
    /// Trial index of each sample
    pub index: Vec<usize>,
    pub values: Vec<u32>,
    /// Horizontal lines at each threshold
    pub threshold_markers: Vec<f64>,
}

/// Marker of the selected point on the aggregate view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    pub index: usize,
    pub x: f64,
    pub y: f64,
}

/// Everything the detail panes show for one selected point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailView {
    pub histogram: HistogramPane,
    pub samples: SamplesPane,
    pub indicator: Indicator,
}

impl DetailView {
    /// Detail payloads of point `index`, `None` when out of range
    pub fn from_snapshot(snapshot: &ScanSnapshot, index: usize) -> Option<Self> {
        let samples = snapshot.points().get(index)?;
        let counts = snapshot.histograms().get(index)?;
        let (x, y) = snapshot.position(index)?;
        let markers = snapshot.thresholds().values();

        Some(Self {
            histogram: HistogramPane {
                edges: snapshot.edges().as_slice().to_vec(),
                counts: counts.clone(),
                threshold_markers: markers.clone(),
            },
            samples: SamplesPane {
                index: (0..samples.len()).collect(),
                values: samples.clone(),
                threshold_markers: markers,
            },
            indicator: Indicator { index, x, y },
        })
    }
}

/// Receiver of render commands
pub trait PlotSink {
    /// Replace every series of the aggregate view
    fn replace_aggregate(&mut self, view: &AggregateView);

    /// Replace the detail histogram
    fn replace_histogram(&mut self, pane: &HistogramPane);

    /// Replace the raw sample view
    fn replace_samples(&mut self, pane: &SamplesPane);

    /// Move the selection indicator
    fn move_indicator(&mut self, indicator: &Indicator);

    /// Redraw all three detail elements
    fn render_detail(&mut self, detail: &DetailView) {
        self.move_indicator(&detail.indicator);
        self.replace_histogram(&detail.histogram);
        self.replace_samples(&detail.samples);
    }
}

/// Recorded render command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlotCommand {
    Aggregate(AggregateView),
    Histogram(HistogramPane),
    Samples(SamplesPane),
    Indicator(Indicator),
}

impl PlotSink for Vec<PlotCommand> {
    fn replace_aggregate(&mut self, view: &AggregateView) {
        self.push(PlotCommand::Aggregate(view.clone()));
    }

    fn replace_histogram(&mut self, pane: &HistogramPane) {
        self.push(PlotCommand::Histogram(pane.clone()));
    }

    fn replace_samples(&mut self, pane: &SamplesPane) {
        self.push(PlotCommand::Samples(pane.clone()));
    }

    fn move_indicator(&mut self, indicator: &Indicator) {
        self.push(PlotCommand::Indicator(*indicator));
    }
}
