//! End-to-end applet tests
//!
//! Drives `CountplotApplet` with recorded dataset ticks and checks the render
//! commands it emits.

mod common;

use common::fixtures::{counts, fixture_path, load_tick};
use countplot_core::{
    AppletConfig, Band, BinConfig, CountplotApplet, DatasetTable, Direction, Key, KeyEvent,
    PlotCommand, PlotEvent, SeriesStyle, ThresholdSource, Transition, UpdateError,
};
use rstest::rstest;

fn single_ion_applet() -> CountplotApplet<Vec<PlotCommand>> {
    let config = AppletConfig::single_ion("counts").with_bins(BinConfig::Range { count: 8 });
    CountplotApplet::new(config, Vec::new()).unwrap()
}

fn single_ion_tick(rows: &[&[u32]]) -> DatasetTable {
    DatasetTable::new()
        .with("counts", counts(rows))
        .with("singleIon.threshold", 3.0)
}

fn five_point_tick() -> DatasetTable {
    single_ion_tick(&[&[0, 4], &[4, 4], &[0, 0], &[4, 0], &[5, 5]])
}

fn aggregate(commands: &[PlotCommand]) -> Vec<&countplot_core::AggregateView> {
    commands
        .iter()
        .filter_map(|c| match c {
            PlotCommand::Aggregate(view) => Some(view),
            _ => None,
        })
        .collect()
}

// === Single ion ===

#[test]
fn test_single_ion_probabilities() {
    let mut applet = single_ion_applet();
    let tick = single_ion_tick(&[&[0, 0, 5, 5], &[5, 5, 5, 0]]);
    applet.data_changed(&tick).unwrap();

    let views = aggregate(applet.sink());
    assert_eq!(views.len(), 1);
    let primary = views[0].primary().unwrap();
    assert_eq!(primary.band, Band::Above);
    assert_eq!(primary.y, vec![0.5, 0.75]);
    assert_eq!(views[0].series.len(), 1);
}

#[test]
fn test_update_selects_last_point() {
    let mut applet = single_ion_applet();
    applet.data_changed(&five_point_tick()).unwrap();
    applet.point_clicked(1).unwrap();

    let transition = applet.data_changed(&five_point_tick()).unwrap();
    assert_eq!(transition, Transition::Loaded { selected: 4 });
    assert_eq!(applet.selected(), Some(4));
}

#[test]
fn test_click_then_navigate_to_end() {
    let mut applet = single_ion_applet();
    applet.data_changed(&five_point_tick()).unwrap();

    applet.point_clicked(2).unwrap();
    applet.navigate(Direction::Next).unwrap();
    applet.navigate(Direction::Next).unwrap();
    assert_eq!(applet.selected(), Some(4));

    applet.sink_mut().clear();
    let transition = applet.navigate(Direction::Next).unwrap();
    assert_eq!(transition, Transition::Unchanged);
    assert_eq!(applet.selected(), Some(4));
    assert!(applet.sink().is_empty());
}

#[test]
fn test_left_key_stops_at_first_point() {
    let mut applet = single_ion_applet();
    applet.data_changed(&five_point_tick()).unwrap();

    let left = PlotEvent::Key(KeyEvent::pressed(Key::Left));
    for _ in 0..10 {
        applet.handle_event(&left);
    }
    assert_eq!(applet.selected(), Some(0));
}

#[rstest]
#[case(0)]
#[case(3)]
fn test_selection_redraws_detail_panes(#[case] index: usize) {
    let mut applet = single_ion_applet();
    applet.data_changed(&five_point_tick()).unwrap();
    applet.sink_mut().clear();

    applet.handle_event(&PlotEvent::PointClicked { index });
    let sink = applet.sink();
    assert_eq!(sink.len(), 3);
    match &sink[0] {
        PlotCommand::Indicator(indicator) => assert_eq!(indicator.index, index),
        other => panic!("expected indicator, got {:?}", other),
    }
    match &sink[2] {
        PlotCommand::Samples(pane) => {
            assert_eq!(pane.values, applet.snapshot().unwrap().points()[index]);
            assert_eq!(pane.threshold_markers, vec![3.0]);
        }
        other => panic!("expected samples, got {:?}", other),
    }
}

#[test]
fn test_invalid_threshold_keeps_previous_view() {
    let mut applet = single_ion_applet();
    applet.data_changed(&five_point_tick()).unwrap();
    applet.point_clicked(2).unwrap();
    applet.sink_mut().clear();

    let mut tick = five_point_tick();
    tick.insert_entry(
        "singleIon.threshold",
        countplot_core::DatasetEntry::invalid(3.0),
    );
    assert!(matches!(
        applet.data_changed(&tick),
        Err(UpdateError::InvalidDataset { .. })
    ));
    assert_eq!(applet.selected(), Some(2));
    assert!(applet.sink().is_empty());
}

// === Two ions ===

fn two_ion_applet() -> CountplotApplet<Vec<PlotCommand>> {
    let config = AppletConfig::from_path(fixture_path("config/two_ion.toml")).unwrap();
    CountplotApplet::new(config, Vec::new()).unwrap()
}

#[test]
fn test_two_ion_tick_from_fixture() {
    let mut applet = two_ion_applet();
    let transition = applet.data_changed(&load_tick("two_ion.json")).unwrap();
    assert_eq!(transition, Transition::Loaded { selected: 2 });

    let sink = applet.sink();
    assert_eq!(sink.len(), 4);
    let view = aggregate(sink)[0];
    assert_eq!(view.x, vec![0.5, 1.0, 1.5]);

    let above = &view.series[0];
    assert_eq!(above.style, SeriesStyle::Scatter);
    assert_eq!(above.y, vec![0.0, 0.5, 0.25]);

    let between = &view.series[1];
    assert_eq!(between.band, Band::Between);
    assert_eq!(between.style, SeriesStyle::Line);
    assert_eq!(between.y, vec![0.5, 0.25, 0.0]);
}

#[test]
fn test_two_ion_histogram_uses_all_samples() {
    let mut applet = two_ion_applet();
    applet.data_changed(&load_tick("two_ion.json")).unwrap();
    applet.sink_mut().clear();
    applet.point_clicked(0).unwrap();

    let histogram = applet
        .sink()
        .iter()
        .find_map(|c| match c {
            PlotCommand::Histogram(pane) => Some(pane.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(histogram.edges.len(), 250);
    assert_eq!(histogram.counts[12], 2);
    assert_eq!(histogram.threshold_markers, vec![1.0, 10.0]);
}

#[test]
fn test_two_ion_zero_shots_dropped() {
    let mut applet = two_ion_applet();
    let mut tick = load_tick("two_ion.json");
    tick.insert("scan.shots", vec![2.0, 0.0, 4.0]);
    assert!(matches!(
        applet.data_changed(&tick),
        Err(UpdateError::Statistics(_))
    ));
    assert!(applet.snapshot().is_none());
    assert!(applet.sink().is_empty());
}

#[test]
fn test_two_ion_fixed_thresholds() {
    let config = AppletConfig::two_ion(
        "counts",
        "shots",
        ThresholdSource::Fixed(1.0),
        ThresholdSource::Fixed(10.0),
    );
    let mut applet = CountplotApplet::new(config, Vec::new()).unwrap();
    let tick = DatasetTable::new()
        .with("counts", counts(&[&[12, 12, 0, 5]]))
        .with("shots", vec![4.0]);
    applet.data_changed(&tick).unwrap();

    let estimate = &applet.snapshot().unwrap().estimates()[0];
    assert_eq!(estimate.above.p, 0.5);
    assert_eq!(estimate.between.as_ref().unwrap().p, 0.25);
    assert_eq!(estimate.below.p, 0.25);
}
