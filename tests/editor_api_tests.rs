use std::path::Path;

use chart_props::api::{ChartPropertiesEditor, EditorConfig, SeriesSelection};
use chart_props::core::{
    AxisSlot, ChartControl, DataPoint, PropertyValue, Series, SeriesView, XyDiagram,
};
use chart_props::render::{ChartService, NullChartService};
use chart_props::{ChartError, ChartResult};

fn sample_chart(series_count: usize) -> ChartControl {
    let mut diagram = XyDiagram::new();
    for index in 0..series_count {
        let points = (0..6)
            .map(|i| DataPoint::new(i as f64 + index as f64, 1.0))
            .collect();
        let series = Series::new(format!("s{index}"), SeriesView::Bar).with_points(points);
        diagram = diagram.with_series(series);
    }
    ChartControl::new().with_diagram(diagram)
}

fn editor(series_count: usize) -> ChartPropertiesEditor<NullChartService> {
    ChartPropertiesEditor::new(
        NullChartService::new(),
        sample_chart(series_count),
        EditorConfig::default(),
    )
    .expect("editor init")
}

#[derive(Debug, Default)]
struct FailingService {
    refreshes: usize,
}

impl ChartService for FailingService {
    fn refresh(&mut self, _chart: &ChartControl) -> ChartResult<()> {
        self.refreshes += 1;
        Err(ChartError::InvalidData("widget is gone".to_owned()))
    }

    fn load_layout(&mut self, path: &Path) -> ChartResult<ChartControl> {
        Err(ChartError::Layout(format!("cannot read {}", path.display())))
    }

    fn save_layout(&mut self, _chart: &ChartControl, path: &Path) -> ChartResult<()> {
        Err(ChartError::Layout(format!("cannot write {}", path.display())))
    }
}

#[test]
fn invalid_config_is_rejected() {
    let config = EditorConfig::default().with_max_bin_count(0);
    let result = ChartPropertiesEditor::new(NullChartService::new(), sample_chart(1), config);
    assert!(matches!(result, Err(ChartError::InvalidConfig(_))));
}

#[test]
fn apply_commits_and_refreshes() {
    let mut editor = editor(2);
    editor
        .stage_by_name("Chart Control - Title", "Latency")
        .expect("stage title");
    editor
        .stage_by_name("Series 2 Histogram - Bin Count", "3")
        .expect("stage bins");

    let report = editor.apply();

    assert_eq!(report.applied, 2);
    assert!(report.is_clean());
    assert_eq!(report.summary(), "Applied 2 property changes successfully.");
    assert_eq!(editor.chart().title, "Latency");

    let service = editor.service();
    assert_eq!(service.refresh_count, 1);
    assert_eq!(service.last_bins.len(), 2);
    let second = service
        .last_bins
        .iter()
        .find(|bins| bins.series_index == 1)
        .expect("second series bins");
    assert_eq!(second.axis, AxisSlot::SecondaryX("HistAxisX_Series1".to_owned()));
    assert_eq!(second.bins.len(), 3);
}

#[test]
fn apply_refreshes_twin_entries() {
    let mut editor = editor(1);
    editor
        .stage_by_name("Series 1 Histogram - Bin Count", "8")
        .expect("stage");

    editor.apply();

    let session = editor.session();
    let plain = session
        .find("Series 1 X Axis Scale - Count")
        .and_then(|id| session.entry(id))
        .expect("plain count");
    assert_eq!(plain.value, Some(PropertyValue::Integer(8)));
    assert_eq!(session.changed_count(), 0);
}

#[test]
fn single_threshold_beyond_data_still_refreshes_every_series() {
    let mut editor = editor(2);
    editor
        .stage_by_name("Series 1 Histogram - Underflow Value", "10")
        .expect("stage underflow");

    let report = editor.apply();

    assert_eq!(report.applied, 1);
    assert!(report.is_clean(), "{:?}", report.refresh_error);
    let bins = &editor.service().last_bins;
    assert_eq!(bins.len(), 2);
    let first = bins
        .iter()
        .find(|bins| bins.series_index == 0)
        .expect("first series bins");
    assert_eq!(first.bins[0].points, 6);
}

#[test]
fn inverted_thresholds_only_fail_their_own_series() {
    let mut editor = editor(2);
    editor
        .stage_by_name("Series 1 Histogram - Underflow Value", "10")
        .expect("stage underflow");
    editor
        .stage_by_name("Series 1 Histogram - Overflow Value", "2")
        .expect("stage overflow");

    let report = editor.apply();

    assert_eq!(report.applied, 2);
    let err = report.refresh_error.expect("refresh error");
    assert!(format!("{err}").contains("series 1"));
    let bins = &editor.service().last_bins;
    assert_eq!(bins.len(), 1);
    assert_eq!(bins[0].series_index, 1);
}

#[test]
fn refresh_failure_is_reported_after_commit() {
    let mut editor = ChartPropertiesEditor::new(
        FailingService::default(),
        sample_chart(1),
        EditorConfig::default(),
    )
    .expect("editor init");
    editor
        .stage_by_name("XY Diagram - Rotated", "true")
        .expect("stage");

    let report = editor.apply();

    assert_eq!(report.applied, 1);
    assert!(!report.is_clean());
    assert!(matches!(report.refresh_error, Some(ChartError::InvalidData(_))));
    assert!(editor.chart().diagram.as_ref().expect("diagram").rotated);
    assert_eq!(editor.service().refreshes, 1);
}

#[test]
fn invalid_edits_are_reported_not_applied() {
    let mut editor = editor(1);
    editor
        .stage_by_name("Series 1 Histogram - Bin Count", "0")
        .expect("stage");

    let report = editor.apply();

    assert_eq!(report.applied, 0);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].name, "Series 1 Histogram - Bin Count");
    assert_eq!(editor.session().changed_count(), 1);
}

#[test]
fn series_focus_filters_visible_entries() {
    let mut editor = editor(3);
    let all = editor.visible_entries().count();
    assert_eq!(all, editor.session().len());

    editor
        .select_series(SeriesSelection::Series(1))
        .expect("select");
    assert!(
        editor
            .visible_entries()
            .all(|(_, staged)| matches!(staged.entry().series, None | Some(1)))
    );
    assert!(editor.visible_entries().count() < all);

    assert!(editor.select_series(SeriesSelection::Series(3)).is_err());
    assert_eq!(editor.selection(), SeriesSelection::Series(1));

    editor.select_series(SeriesSelection::All).expect("select all");
    assert_eq!(editor.visible_entries().count(), all);
}

#[test]
fn adding_series_rebuilds_catalog_and_keeps_focus() {
    let mut editor = editor(2);
    editor
        .select_series(SeriesSelection::Series(1))
        .expect("select");

    let index = editor.add_series(Series::new("extra", SeriesView::Area));

    assert_eq!(index, 2);
    assert!(
        editor
            .find("Series 3 (AreaSeries2D) - Display Name")
            .is_some()
    );
    assert_eq!(editor.selection(), SeriesSelection::Series(1));
    let diagram = editor.chart().diagram.as_ref().expect("diagram");
    assert_eq!(diagram.secondary_axes_x.len(), 2);
    let hidden = editor
        .index()
        .category("Histogram - Series 3")
        .expect("new histogram category");
    assert!(!hidden.visible);
}

#[test]
fn removing_series_shifts_focus() {
    let mut editor = editor(3);
    editor
        .select_series(SeriesSelection::Series(2))
        .expect("select");

    editor.remove_series(1).expect("remove");
    assert_eq!(editor.selection(), SeriesSelection::Series(1));
    assert_eq!(editor.chart().series_count(), 2);
    assert!(editor.find("Series 3 Histogram - Bin Count").is_none());

    editor.remove_series(1).expect("remove focused");
    assert_eq!(editor.selection(), SeriesSelection::All);
    assert!(editor.remove_series(5).is_err());
}

#[test]
fn layout_round_trip_restores_committed_graph() {
    let mut editor = editor(2);
    let path = Path::new("layouts/latency.json");
    editor
        .stage_by_name("Chart Control - Title", "Saved")
        .expect("stage");
    editor.apply();
    editor.save_layout(path).expect("save");
    let saved = editor.chart().clone();

    let json = editor.service().layout_json(path).expect("stored layout");
    assert!(json.contains("\"schema_version\": 1"));

    editor
        .stage_by_name("Chart Control - Title", "Changed")
        .expect("stage");
    editor.apply();
    editor.add_series(Series::new("extra", SeriesView::Point));
    assert_ne!(editor.chart(), &saved);

    editor.load_layout(path).expect("load");
    assert_eq!(editor.chart(), &saved);
    assert!(editor.find("Series 3 (PointSeries2D) - Display Name").is_none());
    assert_eq!(editor.session().changed_count(), 0);
}

#[test]
fn missing_layout_is_an_error() {
    let mut editor = editor(1);
    let err = editor
        .load_layout(Path::new("nowhere.json"))
        .expect_err("missing layout");
    assert!(matches!(err, ChartError::Layout(_)));
}

#[test]
fn bare_chart_json_is_accepted_as_layout() {
    let chart = sample_chart(1);
    let json = serde_json::to_string(&chart).expect("serialize");
    let mut service = NullChartService::new();
    service.insert_layout_json("bare.json", json);

    let loaded = service.load_layout(Path::new("bare.json")).expect("load");
    assert_eq!(loaded, chart);

    service.insert_layout_json(
        "future.json",
        r#"{"schema_version": 9, "chart": {"title": "x"}}"#,
    );
    assert!(service.load_layout(Path::new("future.json")).is_err());
}

#[test]
fn discard_drops_pending_edits() {
    let mut editor = editor(1);
    editor
        .stage_by_name("Chart Control - Title", "draft")
        .expect("stage");
    editor.discard_changes();

    let report = editor.apply();
    assert_eq!(report.applied, 0);
    assert_eq!(editor.chart().title, "");
    assert!(editor.stage_by_name("No Such Entry", "x").is_err());
}
