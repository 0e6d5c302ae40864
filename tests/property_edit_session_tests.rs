use chart_props::api::{EditSession, EditorConfig, RawInput, ValidationError, build_catalog};
use chart_props::core::{ChartControl, DataPoint, Series, SeriesView, XyDiagram};
use proptest::prelude::*;

fn session_for(point_counts: &[usize]) -> (ChartControl, EditSession) {
    let mut diagram = XyDiagram::new();
    for (index, count) in point_counts.iter().enumerate() {
        let view = if index % 2 == 0 {
            SeriesView::Bar
        } else {
            SeriesView::Area
        };
        let points = (0..*count)
            .map(|i| DataPoint::new(i as f64 * 0.5, 1.0))
            .collect();
        diagram = diagram.with_series(Series::new(format!("s{index}"), view).with_points(points));
    }
    let mut chart = ChartControl::new().with_diagram(diagram);
    let config = EditorConfig::default();
    let catalog = build_catalog(&mut chart, &config);
    let session = EditSession::new(catalog, config.max_bin_count);
    (chart, session)
}

proptest! {
    #[test]
    fn restaging_current_values_is_never_a_change(
        point_counts in proptest::collection::vec(0usize..40, 0..5)
    ) {
        let (_, mut session) = session_for(&point_counts);
        let ids: Vec<_> = session.iter().map(|(id, _)| id).collect();
        prop_assert_eq!(session.changed_count(), 0);

        for id in &ids {
            let current = session.entry(*id).expect("entry").value.clone();
            session.set_staged(*id, RawInput::Value(current)).expect("stage value");
            prop_assert!(!session.has_changed(*id));
        }
        for id in &ids {
            let text = session.get(*id).expect("entry").staged().display_text();
            session.set_staged(*id, RawInput::Text(text)).expect("stage text");
            prop_assert!(!session.has_changed(*id));
        }
    }

    #[test]
    fn committing_unchanged_session_writes_nothing(
        point_counts in proptest::collection::vec(0usize..40, 1..5)
    ) {
        let (mut chart, mut session) = session_for(&point_counts);
        let before = chart.clone();

        let outcome = session.commit_all(&mut chart);

        prop_assert_eq!(outcome.applied, 0);
        prop_assert!(outcome.skipped.is_empty());
        prop_assert_eq!(chart, before);
    }

    #[test]
    fn bin_counts_within_limit_are_valid(count in 1i64..=1000) {
        let (_, mut session) = session_for(&[3]);
        let id = session.find("Series 1 Histogram - Bin Count").expect("bin count");
        session.set_staged(id, count.to_string()).expect("stage");
        prop_assert_eq!(session.validate(id), Some(Ok(())));
    }

    #[test]
    fn bin_counts_outside_limit_are_invalid(
        count in prop_oneof![-10_000i64..=0, 1001i64..100_000]
    ) {
        let (_, mut session) = session_for(&[3]);
        let id = session.find("Series 1 Histogram - Bin Count").expect("bin count");
        session.set_staged(id, count.to_string()).expect("stage");
        let outcome = session.validate(id).expect("known entry");
        let rejected = matches!(
            outcome,
            Err(
                ValidationError::BinCountNotPositive { .. }
                    | ValidationError::BinCountTooLarge { .. }
            )
        );
        prop_assert!(rejected);
    }

    #[test]
    fn finite_thresholds_are_valid(value in -1.0e9f64..1.0e9) {
        let (_, mut session) = session_for(&[3, 2]);
        let id = session.find("Series 2 Histogram - Overflow Value").expect("overflow");
        session.set_staged(id, RawInput::value(value)).expect("stage");
        prop_assert_eq!(session.validate(id), Some(Ok(())));
    }
}
