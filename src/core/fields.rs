//! Statically declared field tables for every configuration node.
//!
//! Each node type lists its fields once (name, declared type, access,
//! optional description) and routes reads and writes through a `match` on
//! the field name. Writes convert the incoming value completely before
//! touching the node, so a rejected write leaves the node unchanged.

use crate::error::{ChartError, ChartResult};

use super::chart::{
    Axis, ChartControl, ContinuousScaleOptions, CountIntervalScaleOptions, ScaleOptions, Series,
    XyDiagram,
};
use super::choices::{AggregateFunction, AnimationMode, AxisAlignment, PaneOrientation, SeriesView};
use super::value::{ChoiceEnum, DeclaredType, PropertyValue, ValueKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldAccess {
    ReadWrite,
    ReadOnly,
}

/// Field-specific validation rule applied to staged edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldRole {
    #[default]
    Plain,
    BinCount,
    BinThreshold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldSpec {
    pub name: &'static str,
    pub declared: DeclaredType,
    pub access: FieldAccess,
    pub description: Option<&'static str>,
    pub role: FieldRole,
}

impl FieldSpec {
    #[must_use]
    pub const fn new(name: &'static str, declared: DeclaredType) -> Self {
        Self {
            name,
            declared,
            access: FieldAccess::ReadWrite,
            description: None,
            role: FieldRole::Plain,
        }
    }

    #[must_use]
    pub const fn read_only(mut self) -> Self {
        self.access = FieldAccess::ReadOnly;
        self
    }

    #[must_use]
    pub const fn described(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    #[must_use]
    pub const fn with_role(mut self, role: FieldRole) -> Self {
        self.role = role;
        self
    }

    /// Every declared field is readable; a failing read at runtime is what
    /// excludes a field from the catalog.
    #[must_use]
    pub fn is_writable(&self) -> bool {
        self.access == FieldAccess::ReadWrite
    }

    /// Explicit description, or `"<name> property"`.
    #[must_use]
    pub fn description_text(&self) -> String {
        self.description
            .map_or_else(|| format!("{} property", self.name), str::to_owned)
    }
}

/// A configuration node whose fields can be listed, read and written by name.
pub trait PropertySource {
    fn type_name(&self) -> &'static str;
    fn field_specs(&self) -> &'static [FieldSpec];
    fn read_field(&self, field: &str) -> ChartResult<Option<PropertyValue>>;
    fn write_field(&mut self, field: &str, value: Option<PropertyValue>) -> ChartResult<()>;
}

fn unknown_field(node: &str, field: &str) -> ChartError {
    ChartError::UnknownField {
        node: node.to_owned(),
        field: field.to_owned(),
    }
}

fn mismatch(field: &str, expected: DeclaredType, value: Option<&PropertyValue>) -> ChartError {
    let found = value.map_or_else(|| "nothing".to_owned(), |value| format!("{value:?}"));
    ChartError::InvalidData(format!("field `{field}` expects {expected}, got {found}"))
}

fn some(value: impl Into<PropertyValue>) -> ChartResult<Option<PropertyValue>> {
    Ok(Some(value.into()))
}

fn maybe<T: Into<PropertyValue>>(value: Option<T>) -> ChartResult<Option<PropertyValue>> {
    Ok(value.map(Into::into))
}

fn choice<E: ChoiceEnum>(value: E) -> ChartResult<Option<PropertyValue>> {
    Ok(Some(PropertyValue::choice(value)))
}

fn take_text(field: &str, value: Option<PropertyValue>) -> ChartResult<String> {
    match value {
        Some(PropertyValue::Text(text)) => Ok(text),
        other => Err(mismatch(field, DeclaredType::text(), other.as_ref())),
    }
}

fn take_i32(field: &str, value: Option<PropertyValue>) -> ChartResult<i32> {
    match value {
        Some(PropertyValue::Integer(number)) => Ok(number),
        other => Err(mismatch(field, DeclaredType::integer(), other.as_ref())),
    }
}

fn take_opt_i32(field: &str, value: Option<PropertyValue>) -> ChartResult<Option<i32>> {
    match value {
        None => Ok(None),
        Some(PropertyValue::Integer(number)) => Ok(Some(number)),
        other => Err(mismatch(
            field,
            DeclaredType::nullable(ValueKind::Integer),
            other.as_ref(),
        )),
    }
}

fn take_f32(field: &str, value: Option<PropertyValue>) -> ChartResult<f32> {
    match value {
        Some(PropertyValue::Single(number)) => Ok(number.0),
        other => Err(mismatch(
            field,
            DeclaredType::required(ValueKind::Single),
            other.as_ref(),
        )),
    }
}

fn take_f64(field: &str, value: Option<PropertyValue>) -> ChartResult<f64> {
    match value {
        Some(PropertyValue::Double(number)) => Ok(number.0),
        other => Err(mismatch(field, DeclaredType::double(), other.as_ref())),
    }
}

fn take_opt_f64(field: &str, value: Option<PropertyValue>) -> ChartResult<Option<f64>> {
    match value {
        None => Ok(None),
        Some(PropertyValue::Double(number)) => Ok(Some(number.0)),
        other => Err(mismatch(
            field,
            DeclaredType::nullable(ValueKind::Double),
            other.as_ref(),
        )),
    }
}

fn take_bool(field: &str, value: Option<PropertyValue>) -> ChartResult<bool> {
    match value {
        Some(PropertyValue::Boolean(flag)) => Ok(flag),
        other => Err(mismatch(field, DeclaredType::boolean(), other.as_ref())),
    }
}

fn take_opt_bool(field: &str, value: Option<PropertyValue>) -> ChartResult<Option<bool>> {
    match value {
        None => Ok(None),
        Some(PropertyValue::Boolean(flag)) => Ok(Some(flag)),
        other => Err(mismatch(
            field,
            DeclaredType::nullable(ValueKind::Boolean),
            other.as_ref(),
        )),
    }
}

fn take_choice<E: ChoiceEnum>(field: &str, value: Option<PropertyValue>) -> ChartResult<E> {
    if let Some(PropertyValue::Enumeration(name)) = &value {
        if let Some(parsed) = E::from_variant_name(name) {
            return Ok(parsed);
        }
    }
    Err(mismatch(field, DeclaredType::choice(E::SPEC), value.as_ref()))
}

static CHART_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("Title", DeclaredType::text()).described("Caption shown above the chart"),
    FieldSpec::new("Animation Mode", DeclaredType::choice(AnimationMode::SPEC)),
    FieldSpec::new(
        "Crosshair Enabled",
        DeclaredType::nullable(ValueKind::Boolean),
    ),
    FieldSpec::new("Tooltip Enabled", DeclaredType::nullable(ValueKind::Boolean)),
    FieldSpec::new("Padding", DeclaredType::double()),
    FieldSpec::new(
        "Background Opacity",
        DeclaredType::required(ValueKind::Single),
    )
    .described("Background opacity between 0 and 1"),
    FieldSpec::new("Diagram", DeclaredType::required(ValueKind::Other("XYDiagram2D"))),
];

impl PropertySource for ChartControl {
    fn type_name(&self) -> &'static str {
        "ChartControl"
    }

    fn field_specs(&self) -> &'static [FieldSpec] {
        CHART_FIELDS
    }

    fn read_field(&self, field: &str) -> ChartResult<Option<PropertyValue>> {
        match field {
            "Title" => some(self.title.as_str()),
            "Animation Mode" => choice(self.animation_mode),
            "Crosshair Enabled" => maybe(self.crosshair_enabled),
            "Tooltip Enabled" => maybe(self.tooltip_enabled),
            "Padding" => some(self.padding),
            "Background Opacity" => some(self.background_opacity),
            _ => Err(unknown_field(self.type_name(), field)),
        }
    }

    fn write_field(&mut self, field: &str, value: Option<PropertyValue>) -> ChartResult<()> {
        match field {
            "Title" => self.title = take_text(field, value)?,
            "Animation Mode" => self.animation_mode = take_choice(field, value)?,
            "Crosshair Enabled" => self.crosshair_enabled = take_opt_bool(field, value)?,
            "Tooltip Enabled" => self.tooltip_enabled = take_opt_bool(field, value)?,
            "Padding" => {
                let padding = take_f64(field, value)?;
                if !padding.is_finite() || padding < 0.0 {
                    return Err(ChartError::InvalidData(
                        "chart padding must be finite and >= 0".to_owned(),
                    ));
                }
                self.padding = padding;
            }
            "Background Opacity" => {
                let opacity = take_f32(field, value)?;
                if !(0.0..=1.0).contains(&opacity) {
                    return Err(ChartError::InvalidData(
                        "background opacity must be within [0, 1]".to_owned(),
                    ));
                }
                self.background_opacity = opacity;
            }
            _ => return Err(unknown_field(self.type_name(), field)),
        }
        Ok(())
    }
}

static DIAGRAM_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("Rotated", DeclaredType::boolean())
        .described("Swaps the argument and value axes"),
    FieldSpec::new("Pane Orientation", DeclaredType::choice(PaneOrientation::SPEC)),
    FieldSpec::new("Enable Axis X Navigation", DeclaredType::boolean()),
    FieldSpec::new("Pane Distance", DeclaredType::integer()),
    FieldSpec::new(
        "Secondary Axes X",
        DeclaredType::required(ValueKind::Other("SecondaryAxisXCollection")),
    ),
    FieldSpec::new(
        "Series",
        DeclaredType::required(ValueKind::Other("SeriesCollection")),
    ),
];

impl PropertySource for XyDiagram {
    fn type_name(&self) -> &'static str {
        "XYDiagram2D"
    }

    fn field_specs(&self) -> &'static [FieldSpec] {
        DIAGRAM_FIELDS
    }

    fn read_field(&self, field: &str) -> ChartResult<Option<PropertyValue>> {
        match field {
            "Rotated" => some(self.rotated),
            "Pane Orientation" => choice(self.pane_orientation),
            "Enable Axis X Navigation" => some(self.enable_axis_x_navigation),
            "Pane Distance" => some(self.pane_distance),
            _ => Err(unknown_field(self.type_name(), field)),
        }
    }

    fn write_field(&mut self, field: &str, value: Option<PropertyValue>) -> ChartResult<()> {
        match field {
            "Rotated" => self.rotated = take_bool(field, value)?,
            "Pane Orientation" => self.pane_orientation = take_choice(field, value)?,
            "Enable Axis X Navigation" => self.enable_axis_x_navigation = take_bool(field, value)?,
            "Pane Distance" => {
                let distance = take_i32(field, value)?;
                if distance < 0 {
                    return Err(ChartError::InvalidData(
                        "pane distance must be >= 0".to_owned(),
                    ));
                }
                self.pane_distance = distance;
            }
            _ => return Err(unknown_field(self.type_name(), field)),
        }
        Ok(())
    }
}

static AXIS_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("Name", DeclaredType::text()).read_only(),
    FieldSpec::new("Title", DeclaredType::text()),
    FieldSpec::new("Visible", DeclaredType::boolean()),
    FieldSpec::new("Interlaced", DeclaredType::boolean()),
    FieldSpec::new("Grid Lines Visible", DeclaredType::boolean()),
    FieldSpec::new("Alignment", DeclaredType::choice(AxisAlignment::SPEC)),
    FieldSpec::new("Label Angle", DeclaredType::integer())
        .described("Rotation of axis labels in degrees (-360..360)"),
    FieldSpec::new("Whole Range Min", DeclaredType::nullable(ValueKind::Double)),
    FieldSpec::new("Whole Range Max", DeclaredType::nullable(ValueKind::Double)),
    FieldSpec::new(
        "Numeric Scale Options",
        DeclaredType::nullable(ValueKind::Other("NumericScaleOptionsBase")),
    ),
];

impl PropertySource for Axis {
    fn type_name(&self) -> &'static str {
        "Axis2D"
    }

    fn field_specs(&self) -> &'static [FieldSpec] {
        AXIS_FIELDS
    }

    fn read_field(&self, field: &str) -> ChartResult<Option<PropertyValue>> {
        match field {
            "Name" => some(self.name.as_str()),
            "Title" => some(self.title.as_str()),
            "Visible" => some(self.visible),
            "Interlaced" => some(self.interlaced),
            "Grid Lines Visible" => some(self.grid_lines_visible),
            "Alignment" => choice(self.alignment),
            "Label Angle" => some(self.label_angle),
            "Whole Range Min" => maybe(self.whole_range_min),
            "Whole Range Max" => maybe(self.whole_range_max),
            _ => Err(unknown_field(self.type_name(), field)),
        }
    }

    fn write_field(&mut self, field: &str, value: Option<PropertyValue>) -> ChartResult<()> {
        match field {
            "Title" => self.title = take_text(field, value)?,
            "Visible" => self.visible = take_bool(field, value)?,
            "Interlaced" => self.interlaced = take_bool(field, value)?,
            "Grid Lines Visible" => self.grid_lines_visible = take_bool(field, value)?,
            "Alignment" => self.alignment = take_choice(field, value)?,
            "Label Angle" => {
                let angle = take_i32(field, value)?;
                if !(-360..=360).contains(&angle) {
                    return Err(ChartError::InvalidData(
                        "axis label angle must be within [-360, 360]".to_owned(),
                    ));
                }
                self.label_angle = angle;
            }
            "Whole Range Min" => self.whole_range_min = take_opt_f64(field, value)?,
            "Whole Range Max" => self.whole_range_max = take_opt_f64(field, value)?,
            _ => return Err(unknown_field(self.type_name(), field)),
        }
        Ok(())
    }
}

static COUNT_INTERVAL_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("Count", DeclaredType::nullable(ValueKind::Integer))
        .with_role(FieldRole::BinCount),
    FieldSpec::new("Underflow Value", DeclaredType::nullable(ValueKind::Double))
        .with_role(FieldRole::BinThreshold),
    FieldSpec::new("Overflow Value", DeclaredType::nullable(ValueKind::Double))
        .with_role(FieldRole::BinThreshold),
    FieldSpec::new(
        "Aggregate Function",
        DeclaredType::choice(AggregateFunction::SPEC),
    ),
    FieldSpec::new("Label Pattern", DeclaredType::text())
        .described("Interval label pattern; {A1} and {A2} are the bin bounds"),
];

impl PropertySource for CountIntervalScaleOptions {
    fn type_name(&self) -> &'static str {
        "CountIntervalNumericScaleOptions"
    }

    fn field_specs(&self) -> &'static [FieldSpec] {
        COUNT_INTERVAL_FIELDS
    }

    fn read_field(&self, field: &str) -> ChartResult<Option<PropertyValue>> {
        match field {
            "Count" => maybe(self.count),
            "Underflow Value" => maybe(self.underflow_value),
            "Overflow Value" => maybe(self.overflow_value),
            "Aggregate Function" => choice(self.aggregate_function),
            "Label Pattern" => some(self.label_pattern.as_str()),
            _ => Err(unknown_field(self.type_name(), field)),
        }
    }

    fn write_field(&mut self, field: &str, value: Option<PropertyValue>) -> ChartResult<()> {
        match field {
            "Count" => {
                let count = take_opt_i32(field, value)?;
                if count.is_some_and(|count| count <= 0) {
                    return Err(ChartError::InvalidData(
                        "interval count must be > 0".to_owned(),
                    ));
                }
                self.count = count;
            }
            "Underflow Value" => self.underflow_value = take_opt_f64(field, value)?,
            "Overflow Value" => self.overflow_value = take_opt_f64(field, value)?,
            "Aggregate Function" => self.aggregate_function = take_choice(field, value)?,
            "Label Pattern" => self.label_pattern = take_text(field, value)?,
            _ => return Err(unknown_field(self.type_name(), field)),
        }
        Ok(())
    }
}

static CONTINUOUS_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("Auto Grid", DeclaredType::boolean()),
    FieldSpec::new("Grid Spacing", DeclaredType::double())
        .described("Distance between grid lines when auto grid is off"),
    FieldSpec::new(
        "Aggregate Function",
        DeclaredType::choice(AggregateFunction::SPEC),
    ),
];

impl PropertySource for ContinuousScaleOptions {
    fn type_name(&self) -> &'static str {
        "ContinuousNumericScaleOptions"
    }

    fn field_specs(&self) -> &'static [FieldSpec] {
        CONTINUOUS_FIELDS
    }

    fn read_field(&self, field: &str) -> ChartResult<Option<PropertyValue>> {
        match field {
            "Auto Grid" => some(self.auto_grid),
            "Grid Spacing" => some(self.grid_spacing),
            "Aggregate Function" => choice(self.aggregate_function),
            _ => Err(unknown_field(self.type_name(), field)),
        }
    }

    fn write_field(&mut self, field: &str, value: Option<PropertyValue>) -> ChartResult<()> {
        match field {
            "Auto Grid" => self.auto_grid = take_bool(field, value)?,
            "Grid Spacing" => {
                let spacing = take_f64(field, value)?;
                if !spacing.is_finite() || spacing <= 0.0 {
                    return Err(ChartError::InvalidData(
                        "grid spacing must be finite and > 0".to_owned(),
                    ));
                }
                self.grid_spacing = spacing;
            }
            "Aggregate Function" => self.aggregate_function = take_choice(field, value)?,
            _ => return Err(unknown_field(self.type_name(), field)),
        }
        Ok(())
    }
}

impl PropertySource for ScaleOptions {
    fn type_name(&self) -> &'static str {
        match self {
            Self::CountInterval(options) => options.type_name(),
            Self::Continuous(options) => options.type_name(),
        }
    }

    fn field_specs(&self) -> &'static [FieldSpec] {
        match self {
            Self::CountInterval(options) => options.field_specs(),
            Self::Continuous(options) => options.field_specs(),
        }
    }

    fn read_field(&self, field: &str) -> ChartResult<Option<PropertyValue>> {
        match self {
            Self::CountInterval(options) => options.read_field(field),
            Self::Continuous(options) => options.read_field(field),
        }
    }

    fn write_field(&mut self, field: &str, value: Option<PropertyValue>) -> ChartResult<()> {
        match self {
            Self::CountInterval(options) => options.write_field(field, value),
            Self::Continuous(options) => options.write_field(field, value),
        }
    }
}

static SERIES_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("Display Name", DeclaredType::text()),
    FieldSpec::new("View", DeclaredType::choice(SeriesView::SPEC)).read_only(),
    FieldSpec::new("Visible", DeclaredType::boolean()),
    FieldSpec::new("Show In Legend", DeclaredType::boolean()),
    FieldSpec::new("Labels Visible", DeclaredType::boolean()),
    FieldSpec::new("Bar Width", DeclaredType::double())
        .described("Bar width as a fraction of the interval (0..1]"),
    FieldSpec::new("Point Count", DeclaredType::integer()).read_only(),
    FieldSpec::new(
        "Points",
        DeclaredType::required(ValueKind::Other("SeriesPointCollection")),
    ),
];

impl Series {
    fn require_bar_view(&self, field: &'static str) -> ChartResult<()> {
        if self.view == SeriesView::Bar {
            return Ok(());
        }
        Err(ChartError::FieldUnavailable {
            field,
            reason: format!("not supported by {}", self.view.series_type_name()),
        })
    }
}

impl PropertySource for Series {
    fn type_name(&self) -> &'static str {
        self.view.series_type_name()
    }

    fn field_specs(&self) -> &'static [FieldSpec] {
        SERIES_FIELDS
    }

    fn read_field(&self, field: &str) -> ChartResult<Option<PropertyValue>> {
        match field {
            "Display Name" => some(self.display_name.as_str()),
            "View" => choice(self.view),
            "Visible" => some(self.visible),
            "Show In Legend" => some(self.show_in_legend),
            "Labels Visible" => some(self.labels_visible),
            "Bar Width" => {
                self.require_bar_view("Bar Width")?;
                some(self.bar_width)
            }
            "Point Count" => {
                let count = i32::try_from(self.points.len()).map_err(|_| {
                    ChartError::FieldUnavailable {
                        field: "Point Count",
                        reason: "point count exceeds i32".to_owned(),
                    }
                })?;
                some(count)
            }
            _ => Err(unknown_field(self.type_name(), field)),
        }
    }

    fn write_field(&mut self, field: &str, value: Option<PropertyValue>) -> ChartResult<()> {
        match field {
            "Display Name" => self.display_name = take_text(field, value)?,
            "Visible" => self.visible = take_bool(field, value)?,
            "Show In Legend" => self.show_in_legend = take_bool(field, value)?,
            "Labels Visible" => self.labels_visible = take_bool(field, value)?,
            "Bar Width" => {
                self.require_bar_view("Bar Width")?;
                let width = take_f64(field, value)?;
                if !width.is_finite() || width <= 0.0 || width > 1.0 {
                    return Err(ChartError::InvalidData(
                        "bar width must be within (0, 1]".to_owned(),
                    ));
                }
                self.bar_width = width;
            }
            _ => return Err(unknown_field(self.type_name(), field)),
        }
        Ok(())
    }
}
