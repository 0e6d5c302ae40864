use chart_props::api::{
    EditorConfig, build_catalog, default_bin_count, get_or_create_axis_for_series,
    remove_series_with_axis,
};
use chart_props::core::{
    AggregateFunction, Axis, AxisBinding, AxisSlot, ChartControl, DataPoint, PRIMARY_AXIS_X_NAME,
    Series, SeriesView, XyDiagram,
};
use proptest::prelude::*;

fn series_with_points(name: &str, count: usize) -> Series {
    let points = (0..count)
        .map(|i| DataPoint::new(i as f64, (i * 2) as f64))
        .collect();
    Series::new(name, SeriesView::Bar).with_points(points)
}

fn diagram_with(series_count: usize) -> XyDiagram {
    let mut diagram = XyDiagram::new();
    for i in 0..series_count {
        diagram = diagram.with_series(series_with_points(&format!("s{i}"), 4));
    }
    diagram
}

#[test]
fn first_series_uses_primary_axis() {
    let config = EditorConfig::default();
    let mut diagram = diagram_with(3);

    let slot = get_or_create_axis_for_series(&mut diagram, 0, &config).expect("allocate");

    assert_eq!(slot, AxisSlot::PrimaryX);
    assert_eq!(
        diagram.axis_x.as_ref().map(|axis| axis.name.as_str()),
        Some(PRIMARY_AXIS_X_NAME)
    );
    assert_eq!(diagram.series[0].axis_x, Some(AxisBinding::Primary));
    assert!(diagram.secondary_axes_x.is_empty());
}

#[test]
fn repeated_lookup_returns_same_secondary_axis() {
    let config = EditorConfig::default();
    let mut diagram = diagram_with(2);

    let first = get_or_create_axis_for_series(&mut diagram, 1, &config).expect("allocate");
    let first_ptr: *const Axis = diagram.axis(&first).expect("axis exists");
    let second = get_or_create_axis_for_series(&mut diagram, 1, &config).expect("allocate again");
    let second_ptr: *const Axis = diagram.axis(&second).expect("axis exists");

    assert_eq!(first, second);
    assert!(std::ptr::eq(first_ptr, second_ptr));
    assert_eq!(diagram.secondary_axes_x.len(), 1);

    let axis = &diagram.secondary_axes_x[0];
    assert_eq!(axis.name, "HistAxisX_Series1");
    assert!(!axis.visible);
    assert_eq!(
        diagram.series[1].axis_x,
        Some(AxisBinding::Secondary("HistAxisX_Series1".to_owned()))
    );
}

#[test]
fn out_of_range_series_index_is_rejected() {
    let config = EditorConfig::default();
    let mut diagram = diagram_with(1);

    let err = get_or_create_axis_for_series(&mut diagram, 3, &config).expect_err("out of range");
    assert!(format!("{err}").contains("out of range"));
    assert!(diagram.secondary_axes_x.is_empty());
}

#[test]
fn existing_binding_to_custom_axis_is_kept() {
    let config = EditorConfig::default();
    let mut diagram = diagram_with(2);
    diagram.secondary_axes_x.push(Axis::new("Custom"));
    diagram.series[1].axis_x = Some(AxisBinding::Secondary("Custom".to_owned()));

    let slot = get_or_create_axis_for_series(&mut diagram, 1, &config).expect("allocate");

    assert_eq!(slot, AxisSlot::SecondaryX("Custom".to_owned()));
    assert_eq!(diagram.secondary_axes_x.len(), 1);
}

#[test]
fn binding_to_another_series_axis_is_replaced() {
    let config = EditorConfig::default();
    let mut diagram = diagram_with(3);
    diagram.secondary_axes_x.push(Axis::new("HistAxisX_Series1"));
    diagram.series[2].axis_x = Some(AxisBinding::Secondary("HistAxisX_Series1".to_owned()));

    let slot = get_or_create_axis_for_series(&mut diagram, 2, &config).expect("allocate");

    assert_eq!(slot, AxisSlot::SecondaryX("HistAxisX_Series2".to_owned()));
    assert_eq!(diagram.secondary_axes_x.len(), 2);
}

#[test]
fn custom_prefix_names_secondary_axes() {
    let config = EditorConfig::default().with_secondary_axis_prefix("BinAxis");
    let mut diagram = diagram_with(2);

    let slot = get_or_create_axis_for_series(&mut diagram, 1, &config).expect("allocate");
    assert_eq!(slot, AxisSlot::SecondaryX("BinAxis1".to_owned()));
}

#[test]
fn two_series_without_axes_get_independent_bin_axes() {
    let config = EditorConfig::default();
    let mut chart = ChartControl::new().with_diagram(
        XyDiagram::new()
            .with_series(series_with_points("first", 5))
            .with_series(series_with_points("second", 3)),
    );

    build_catalog(&mut chart, &config);

    let diagram = chart.diagram.as_mut().expect("diagram");
    let primary = diagram
        .axis_x
        .as_ref()
        .and_then(Axis::count_interval)
        .expect("primary count interval");
    assert_eq!(primary.count, Some(5));
    assert_eq!(primary.aggregate_function, AggregateFunction::Histogram);
    assert_eq!(diagram.series[0].axis_x, Some(AxisBinding::Primary));

    assert_eq!(diagram.secondary_axes_x.len(), 1);
    let secondary = &diagram.secondary_axes_x[0];
    assert_eq!(secondary.name, "HistAxisX_Series1");
    assert!(!secondary.visible);
    assert_eq!(
        secondary.count_interval().and_then(|options| options.count),
        Some(5)
    );
    assert_eq!(
        diagram.series[1].axis_x,
        Some(AxisBinding::Secondary("HistAxisX_Series1".to_owned()))
    );

    let slot = AxisSlot::SecondaryX("HistAxisX_Series1".to_owned());
    if let Some(chart_props::core::ScaleOptions::CountInterval(options)) = diagram
        .axis_mut(&slot)
        .and_then(|axis| axis.scale_options.as_mut())
    {
        options.count = Some(42);
    }
    assert_eq!(
        diagram
            .axis_x
            .as_ref()
            .and_then(Axis::count_interval)
            .and_then(|options| options.count),
        Some(5)
    );
}

#[test]
fn empty_first_series_uses_fallback_bin_count() {
    let config = EditorConfig::default();
    let mut chart = ChartControl::new().with_diagram(
        XyDiagram::new()
            .with_series(Series::new("empty", SeriesView::Line))
            .with_series(series_with_points("second", 8)),
    );

    build_catalog(&mut chart, &config);

    let diagram = chart.diagram.as_ref().expect("diagram");
    assert_eq!(default_bin_count(diagram, &config), 10);
    for slot in [
        AxisSlot::PrimaryX,
        AxisSlot::SecondaryX("HistAxisX_Series1".to_owned()),
    ] {
        let count = diagram
            .axis(&slot)
            .and_then(Axis::count_interval)
            .and_then(|options| options.count);
        assert_eq!(count, Some(10), "slot {slot:?}");
    }
}

#[test]
fn rebuilding_catalog_does_not_duplicate_axes() {
    let config = EditorConfig::default();
    let mut chart = ChartControl::new().with_diagram(diagram_with(4));

    build_catalog(&mut chart, &config);
    build_catalog(&mut chart, &config);

    let diagram = chart.diagram.as_ref().expect("diagram");
    let names: Vec<&str> = diagram
        .secondary_axes_x
        .iter()
        .map(|axis| axis.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["HistAxisX_Series1", "HistAxisX_Series2", "HistAxisX_Series3"]
    );
}

#[test]
fn removing_middle_series_moves_later_axes_down() {
    let config = EditorConfig::default();
    let mut chart = ChartControl::new().with_diagram(diagram_with(3));
    build_catalog(&mut chart, &config);
    let diagram = chart.diagram.as_mut().expect("diagram");
    diagram
        .axis_mut(&AxisSlot::SecondaryX("HistAxisX_Series2".to_owned()))
        .expect("third series axis")
        .title = "third".to_owned();

    let removed = remove_series_with_axis(diagram, 1, &config).expect("remove");

    assert_eq!(removed.display_name, "s1");
    assert_eq!(diagram.series.len(), 2);
    assert_eq!(diagram.secondary_axes_x.len(), 1);
    let moved = diagram
        .secondary_axis("HistAxisX_Series1")
        .expect("renamed axis");
    assert_eq!(moved.title, "third");
    assert_eq!(
        diagram.series[1].axis_x,
        Some(AxisBinding::Secondary("HistAxisX_Series1".to_owned()))
    );
}

#[test]
fn removing_first_series_promotes_next_to_primary() {
    let config = EditorConfig::default();
    let mut chart = ChartControl::new().with_diagram(diagram_with(2));
    build_catalog(&mut chart, &config);
    let diagram = chart.diagram.as_mut().expect("diagram");

    remove_series_with_axis(diagram, 0, &config).expect("remove");

    assert_eq!(diagram.series.len(), 1);
    assert_eq!(diagram.series[0].axis_x, Some(AxisBinding::Primary));
    assert!(diagram.secondary_axes_x.is_empty());
}

proptest! {
    #[test]
    fn allocation_is_idempotent_for_any_series_count(series_count in 1usize..12) {
        let config = EditorConfig::default();
        let mut diagram = diagram_with(series_count);

        for index in 0..series_count {
            let first = get_or_create_axis_for_series(&mut diagram, index, &config)
                .expect("allocate");
            let second = get_or_create_axis_for_series(&mut diagram, index, &config)
                .expect("allocate again");
            prop_assert_eq!(&first, &second);
            if index == 0 {
                prop_assert_eq!(first, AxisSlot::PrimaryX);
            }
        }

        prop_assert_eq!(diagram.secondary_axes_x.len(), series_count - 1);
    }
}
