use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-binning")]
use rayon::prelude::*;

use crate::core::chart::{AxisSlot, CountIntervalScaleOptions, XyDiagram};
use crate::core::choices::AggregateFunction;
use crate::core::types::DataPoint;
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinKind {
    Underflow,
    Regular,
    Overflow,
}

/// One histogram interval with its aggregated value.
///
/// `value` is `None` for empty bins under aggregations that have no
/// neutral element (average, minimum, maximum).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub kind: BinKind,
    pub lower: f64,
    pub upper: f64,
    pub points: usize,
    pub value: Option<f64>,
}

/// Bins computed for one series from the axis bound to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesBins {
    pub series_index: usize,
    pub axis: AxisSlot,
    pub bins: Vec<HistogramBin>,
}

/// Splits point arguments into `count` equal intervals.
///
/// The regular range spans `[underflow, overflow]` when both thresholds are
/// set. A missing end is taken from the min/max of the finite arguments,
/// never crossing the threshold that is set. Arguments below the
/// underflow threshold land in a leading underflow bin, arguments above
/// the overflow threshold in a trailing overflow bin. Non-finite arguments
/// are ignored.
pub fn compute_histogram_bins(
    points: &[DataPoint],
    options: &CountIntervalScaleOptions,
) -> ChartResult<Vec<HistogramBin>> {
    let count = match options.count {
        Some(count) if count > 0 => count as usize,
        Some(_) => {
            return Err(ChartError::InvalidData(
                "histogram bin count must be > 0".to_owned(),
            ));
        }
        None => {
            return Err(ChartError::InvalidData(
                "histogram bin count is not set".to_owned(),
            ));
        }
    };
    for (name, threshold) in [
        ("underflow", options.underflow_value),
        ("overflow", options.overflow_value),
    ] {
        if threshold.is_some_and(|value| !value.is_finite()) {
            return Err(ChartError::InvalidData(format!(
                "histogram {name} threshold must be finite"
            )));
        }
    }

    let finite: Vec<DataPoint> = points
        .iter()
        .copied()
        .filter(|point| point.x.is_finite())
        .collect();

    let data_min = finite.iter().map(|point| point.x).fold(f64::INFINITY, f64::min);
    let data_max = finite
        .iter()
        .map(|point| point.x)
        .fold(f64::NEG_INFINITY, f64::max);

    let (lower, upper) = regular_range(options, &finite, data_min, data_max)?;
    let width = (upper - lower) / count as f64;

    let mut buckets: Vec<Vec<f64>> = vec![Vec::new(); count];
    let mut underflow = Vec::new();
    let mut overflow = Vec::new();
    for point in &finite {
        if point.x < lower {
            underflow.push(point.y);
        } else if point.x > upper {
            overflow.push(point.y);
        } else {
            let index = (((point.x - lower) / width).floor() as usize).min(count - 1);
            buckets[index].push(point.y);
        }
    }

    let function = options.aggregate_function;
    let mut bins = Vec::with_capacity(count + 2);
    if options.underflow_value.is_some() {
        bins.push(make_bin(BinKind::Underflow, data_min.min(lower), lower, &underflow, function));
    }
    for (index, values) in buckets.iter().enumerate() {
        let bin_lower = lower + width * index as f64;
        let bin_upper = if index + 1 == count {
            upper
        } else {
            lower + width * (index + 1) as f64
        };
        bins.push(make_bin(BinKind::Regular, bin_lower, bin_upper, values, function));
    }
    if options.overflow_value.is_some() {
        bins.push(make_bin(BinKind::Overflow, upper, data_max.max(upper), &overflow, function));
    }
    Ok(bins)
}

fn regular_range(
    options: &CountIntervalScaleOptions,
    finite: &[DataPoint],
    data_min: f64,
    data_max: f64,
) -> ChartResult<(f64, f64)> {
    let (lower, upper) = match (options.underflow_value, options.overflow_value) {
        (Some(underflow), Some(overflow)) => {
            if underflow > overflow {
                return Err(ChartError::InvalidData(
                    "histogram underflow threshold must be <= overflow threshold".to_owned(),
                ));
            }
            (underflow, overflow)
        }
        (Some(underflow), None) if finite.is_empty() => (underflow, underflow),
        (Some(underflow), None) => (underflow, data_max.max(underflow)),
        (None, Some(overflow)) if finite.is_empty() => (overflow, overflow),
        (None, Some(overflow)) => (data_min.min(overflow), overflow),
        (None, None) if finite.is_empty() => (0.0, 1.0),
        (None, None) => (data_min, data_max),
    };
    if lower < upper {
        return Ok((lower, upper));
    }
    // Degenerate range: widen away from the only threshold that pins it.
    if options.underflow_value.is_none() && options.overflow_value.is_some() {
        Ok((upper - 1.0, upper))
    } else {
        Ok((lower, lower + 1.0))
    }
}

fn make_bin(
    kind: BinKind,
    lower: f64,
    upper: f64,
    values: &[f64],
    function: AggregateFunction,
) -> HistogramBin {
    HistogramBin {
        kind,
        lower,
        upper,
        points: values.len(),
        value: aggregate(values, function),
    }
}

fn aggregate(values: &[f64], function: AggregateFunction) -> Option<f64> {
    match function {
        AggregateFunction::Histogram | AggregateFunction::Count | AggregateFunction::None => {
            Some(values.len() as f64)
        }
        AggregateFunction::Sum => Some(values.iter().sum()),
        AggregateFunction::Average => {
            if values.is_empty() {
                None
            } else {
                Some(values.iter().sum::<f64>() / values.len() as f64)
            }
        }
        AggregateFunction::Minimum => values.iter().copied().reduce(f64::min),
        AggregateFunction::Maximum => values.iter().copied().reduce(f64::max),
    }
}

/// Computes bins for every series bound to a count-interval axis.
///
/// Series without an axis binding, or bound to an axis with continuous
/// scale options, produce no entry. Each series is binned on its own, so a
/// misconfigured axis only fails the series bound to it.
pub fn compute_diagram_bins(diagram: &XyDiagram) -> Vec<ChartResult<SeriesBins>> {
    let bound: Vec<(usize, AxisSlot, &CountIntervalScaleOptions)> = diagram
        .series
        .iter()
        .enumerate()
        .filter_map(|(index, series)| {
            let slot = series.axis_x.as_ref()?.slot();
            let options = diagram.axis(&slot)?.count_interval()?;
            Some((index, slot, options))
        })
        .collect();

    #[cfg(feature = "parallel-binning")]
    {
        bound
            .into_par_iter()
            .map(|(index, slot, options)| bin_series(diagram, index, slot, options))
            .collect()
    }

    #[cfg(not(feature = "parallel-binning"))]
    {
        bound
            .into_iter()
            .map(|(index, slot, options)| bin_series(diagram, index, slot, options))
            .collect()
    }
}

fn bin_series(
    diagram: &XyDiagram,
    series_index: usize,
    axis: AxisSlot,
    options: &CountIntervalScaleOptions,
) -> ChartResult<SeriesBins> {
    let bins = compute_histogram_bins(&diagram.series[series_index].points, options)
        .map_err(|err| match err {
            ChartError::InvalidData(reason) => {
                ChartError::InvalidData(format!("series {}: {reason}", series_index + 1))
            }
            other => other,
        })?;
    Ok(SeriesBins {
        series_index,
        axis,
        bins,
    })
}
