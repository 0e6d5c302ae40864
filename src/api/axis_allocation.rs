use tracing::debug;

use crate::core::{
    Axis, AxisBinding, AxisSlot, CountIntervalScaleOptions, ScaleOptions, Series, XyDiagram,
};
use crate::error::{ChartError, ChartResult};

use super::EditorConfig;

/// Returns the axis that supplies the X scale of `series_index`.
///
/// Series 0 always uses the primary X axis. Every other series gets a
/// secondary axis named deterministically from its index; repeated calls
/// return the same axis and never append a duplicate. The series binding is
/// updated before returning.
pub fn get_or_create_axis_for_series(
    diagram: &mut XyDiagram,
    series_index: usize,
    config: &EditorConfig,
) -> ChartResult<AxisSlot> {
    if series_index >= diagram.series.len() {
        return Err(ChartError::InvalidData(format!(
            "series index {series_index} is out of range for {} series",
            diagram.series.len()
        )));
    }

    if series_index == 0 {
        diagram.ensure_axis_x();
        diagram.series[0].axis_x = Some(AxisBinding::Primary);
        return Ok(AxisSlot::PrimaryX);
    }

    let name = config.secondary_axis_name(series_index);

    // A series may already point at a live secondary axis under another name
    // (layouts loaded from elsewhere); keep that association.
    if let Some(AxisBinding::Secondary(bound)) = &diagram.series[series_index].axis_x {
        if diagram.secondary_axis(bound).is_some()
            && !is_reserved_name(diagram, bound, series_index, config)
        {
            return Ok(AxisSlot::SecondaryX(bound.clone()));
        }
    }

    if diagram.secondary_axis(&name).is_none() {
        let mut axis = Axis::new(name.clone());
        axis.visible = false;
        diagram.secondary_axes_x.push(axis);
        debug!(
            series_index,
            axis = %name,
            secondary_axes = diagram.secondary_axes_x.len(),
            "created secondary axis for series"
        );
    }
    diagram.series[series_index].axis_x = Some(AxisBinding::Secondary(name.clone()));
    Ok(AxisSlot::SecondaryX(name))
}

/// A bound name that is the deterministic name of a different series is
/// not honoured; that axis belongs to the other series.
fn is_reserved_name(
    diagram: &XyDiagram,
    bound: &str,
    series_index: usize,
    config: &EditorConfig,
) -> bool {
    (1..diagram.series.len())
        .filter(|index| *index != series_index)
        .any(|index| config.secondary_axis_name(index) == bound)
}

/// Attaches histogram scale options to the axis when it has none.
///
/// The default bin count is the point count of the first series, or the
/// configured fallback when there is no data yet.
pub fn ensure_bin_scale_options(
    diagram: &mut XyDiagram,
    slot: &AxisSlot,
    config: &EditorConfig,
) -> ChartResult<()> {
    let default_count = default_bin_count(diagram, config);
    let axis = diagram
        .axis_mut(slot)
        .ok_or_else(|| ChartError::UnknownNode(format!("axis {slot:?}")))?;
    if axis.scale_options.is_none() {
        axis.scale_options = Some(ScaleOptions::CountInterval(
            CountIntervalScaleOptions::histogram(default_count),
        ));
    }
    Ok(())
}

#[must_use]
pub fn default_bin_count(diagram: &XyDiagram, config: &EditorConfig) -> i32 {
    diagram
        .series
        .first()
        .map(|series| series.points.len())
        .filter(|count| *count > 0)
        .and_then(|count| i32::try_from(count).ok())
        .unwrap_or_else(|| config.fallback_bin_count_i32())
}

/// Removes a series and keeps the remaining axis bindings consistent.
///
/// The removed series' dedicated axis is dropped. Series shifting down an
/// index carry their secondary axis along by renaming it to the
/// deterministic name of their new index; the series that becomes index 0
/// moves onto the primary axis and its old secondary axis is dropped.
pub fn remove_series_with_axis(
    diagram: &mut XyDiagram,
    series_index: usize,
    config: &EditorConfig,
) -> ChartResult<Series> {
    if series_index >= diagram.series.len() {
        return Err(ChartError::InvalidData(format!(
            "series index {series_index} is out of range for {} series",
            diagram.series.len()
        )));
    }
    let removed = diagram.series.remove(series_index);
    if let Some(AxisBinding::Secondary(name)) = &removed.axis_x {
        drop_secondary_axis(diagram, name);
    }

    for index in series_index..diagram.series.len() {
        let Some(AxisBinding::Secondary(bound)) = diagram.series[index].axis_x.clone() else {
            continue;
        };
        if index == 0 {
            drop_secondary_axis(diagram, &bound);
            diagram.series[0].axis_x = Some(AxisBinding::Primary);
            continue;
        }
        let target = config.secondary_axis_name(index);
        if bound != target && diagram.secondary_axis(&target).is_none() {
            if let Some(axis) = diagram.axis_mut(&AxisSlot::SecondaryX(bound.clone())) {
                axis.name = target.clone();
            }
            diagram.series[index].axis_x = Some(AxisBinding::Secondary(target));
        }
    }
    debug!(
        series_index,
        remaining = diagram.series.len(),
        secondary_axes = diagram.secondary_axes_x.len(),
        "removed series"
    );
    Ok(removed)
}

fn drop_secondary_axis(diagram: &mut XyDiagram, name: &str) {
    diagram.secondary_axes_x.retain(|axis| axis.name != name);
}
