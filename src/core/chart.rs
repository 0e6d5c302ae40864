use serde::{Deserialize, Serialize};

use super::choices::{AggregateFunction, AnimationMode, AxisAlignment, PaneOrientation, SeriesView};
use super::types::DataPoint;

pub const PRIMARY_AXIS_X_NAME: &str = "Primary AxisX";
pub const PRIMARY_AXIS_Y_NAME: &str = "Primary AxisY";

/// Root of the chart configuration graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartControl {
    pub title: String,
    pub animation_mode: AnimationMode,
    pub crosshair_enabled: Option<bool>,
    pub tooltip_enabled: Option<bool>,
    pub padding: f64,
    pub background_opacity: f32,
    #[serde(default)]
    pub diagram: Option<XyDiagram>,
}

impl Default for ChartControl {
    fn default() -> Self {
        Self {
            title: String::new(),
            animation_mode: AnimationMode::OnLoad,
            crosshair_enabled: None,
            tooltip_enabled: None,
            padding: 0.0,
            background_opacity: 1.0,
            diagram: None,
        }
    }
}

impl ChartControl {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_diagram(mut self, diagram: XyDiagram) -> Self {
        self.diagram = Some(diagram);
        self
    }

    /// Returns the diagram, creating a default one when absent.
    pub fn ensure_diagram(&mut self) -> &mut XyDiagram {
        self.diagram.get_or_insert_with(XyDiagram::default)
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.diagram.as_ref().map_or(0, |diagram| diagram.series.len())
    }
}

/// Addresses one axis owned by a diagram.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisSlot {
    PrimaryX,
    PrimaryY,
    SecondaryX(String),
}

/// Non-owning link from a series to the axis that supplies its X scale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisBinding {
    Primary,
    Secondary(String),
}

impl AxisBinding {
    #[must_use]
    pub fn slot(&self) -> AxisSlot {
        match self {
            Self::Primary => AxisSlot::PrimaryX,
            Self::Secondary(name) => AxisSlot::SecondaryX(name.clone()),
        }
    }
}

/// XY diagram: exclusively owns its axes and series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XyDiagram {
    pub rotated: bool,
    pub pane_orientation: PaneOrientation,
    pub enable_axis_x_navigation: bool,
    pub pane_distance: i32,
    #[serde(default)]
    pub axis_x: Option<Axis>,
    #[serde(default)]
    pub axis_y: Option<Axis>,
    #[serde(default)]
    pub secondary_axes_x: Vec<Axis>,
    #[serde(default)]
    pub series: Vec<Series>,
}

impl Default for XyDiagram {
    fn default() -> Self {
        Self {
            rotated: false,
            pane_orientation: PaneOrientation::Horizontal,
            enable_axis_x_navigation: false,
            pane_distance: 10,
            axis_x: None,
            axis_y: None,
            secondary_axes_x: Vec::new(),
            series: Vec::new(),
        }
    }
}

impl XyDiagram {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn ensure_axis_x(&mut self) -> &mut Axis {
        self.axis_x.get_or_insert_with(|| Axis::new(PRIMARY_AXIS_X_NAME))
    }

    pub fn ensure_axis_y(&mut self) -> &mut Axis {
        self.axis_y.get_or_insert_with(|| Axis::new(PRIMARY_AXIS_Y_NAME))
    }

    #[must_use]
    pub fn secondary_axis(&self, name: &str) -> Option<&Axis> {
        self.secondary_axes_x.iter().find(|axis| axis.name == name)
    }

    #[must_use]
    pub fn axis(&self, slot: &AxisSlot) -> Option<&Axis> {
        match slot {
            AxisSlot::PrimaryX => self.axis_x.as_ref(),
            AxisSlot::PrimaryY => self.axis_y.as_ref(),
            AxisSlot::SecondaryX(name) => self.secondary_axis(name),
        }
    }

    pub fn axis_mut(&mut self, slot: &AxisSlot) -> Option<&mut Axis> {
        match slot {
            AxisSlot::PrimaryX => self.axis_x.as_mut(),
            AxisSlot::PrimaryY => self.axis_y.as_mut(),
            AxisSlot::SecondaryX(name) => self
                .secondary_axes_x
                .iter_mut()
                .find(|axis| axis.name == *name),
        }
    }

    /// Axis currently backing the X scale of `series_index`, if bound.
    #[must_use]
    pub fn series_axis_x(&self, series_index: usize) -> Option<&Axis> {
        let binding = self.series.get(series_index)?.axis_x.as_ref()?;
        self.axis(&binding.slot())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub name: String,
    pub title: String,
    pub visible: bool,
    pub interlaced: bool,
    pub grid_lines_visible: bool,
    pub alignment: AxisAlignment,
    pub label_angle: i32,
    pub whole_range_min: Option<f64>,
    pub whole_range_max: Option<f64>,
    #[serde(default)]
    pub scale_options: Option<ScaleOptions>,
}

impl Axis {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: String::new(),
            visible: true,
            interlaced: false,
            grid_lines_visible: false,
            alignment: AxisAlignment::Near,
            label_angle: 0,
            whole_range_min: None,
            whole_range_max: None,
            scale_options: None,
        }
    }

    #[must_use]
    pub fn with_scale_options(mut self, options: ScaleOptions) -> Self {
        self.scale_options = Some(options);
        self
    }

    #[must_use]
    pub fn count_interval(&self) -> Option<&CountIntervalScaleOptions> {
        match self.scale_options.as_ref()? {
            ScaleOptions::CountInterval(options) => Some(options),
            ScaleOptions::Continuous(_) => None,
        }
    }
}

/// Numeric scale options attached to an axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ScaleOptions {
    CountInterval(CountIntervalScaleOptions),
    Continuous(ContinuousScaleOptions),
}

/// Splits the argument range into a fixed number of intervals (bins).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountIntervalScaleOptions {
    pub count: Option<i32>,
    pub underflow_value: Option<f64>,
    pub overflow_value: Option<f64>,
    pub aggregate_function: AggregateFunction,
    pub label_pattern: String,
}

impl CountIntervalScaleOptions {
    /// Histogram defaults: frequency aggregation over `count` bins.
    #[must_use]
    pub fn histogram(count: i32) -> Self {
        Self {
            count: Some(count),
            underflow_value: None,
            overflow_value: None,
            aggregate_function: AggregateFunction::Histogram,
            label_pattern: "{A1} - {A2}".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinuousScaleOptions {
    pub auto_grid: bool,
    pub grid_spacing: f64,
    pub aggregate_function: AggregateFunction,
}

impl Default for ContinuousScaleOptions {
    fn default() -> Self {
        Self {
            auto_grid: true,
            grid_spacing: 1.0,
            aggregate_function: AggregateFunction::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub display_name: String,
    pub view: SeriesView,
    pub visible: bool,
    pub show_in_legend: bool,
    pub labels_visible: bool,
    /// Only meaningful for bar views; other views reject reads and writes.
    pub bar_width: f64,
    #[serde(default)]
    pub points: Vec<DataPoint>,
    #[serde(default)]
    pub axis_x: Option<AxisBinding>,
}

impl Series {
    #[must_use]
    pub fn new(display_name: impl Into<String>, view: SeriesView) -> Self {
        Self {
            display_name: display_name.into(),
            view,
            visible: true,
            show_in_legend: true,
            labels_visible: false,
            bar_width: 0.6,
            points: Vec::new(),
            axis_x: None,
        }
    }

    #[must_use]
    pub fn with_points(mut self, points: Vec<DataPoint>) -> Self {
        self.points = points;
        self
    }
}
