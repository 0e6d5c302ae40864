use crate::core::{
    AxisSlot, ChartControl, DeclaredType, FieldSpec, PropertySource, PropertyValue, XyDiagram,
};
use crate::error::{ChartError, ChartResult};

/// Addresses one configuration node inside a `ChartControl` graph.
///
/// Nodes are resolved on every access, so an accessor never keeps the
/// graph borrowed between operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeRef {
    Chart,
    Diagram,
    Axis(AxisSlot),
    ScaleOptions(AxisSlot),
    Series(usize),
}

impl NodeRef {
    pub fn resolve<'a>(&self, chart: &'a ChartControl) -> ChartResult<&'a dyn PropertySource> {
        if let Self::Chart = self {
            return Ok(chart);
        }
        let diagram = chart
            .diagram
            .as_ref()
            .ok_or_else(|| ChartError::UnknownNode("diagram".to_owned()))?;
        self.resolve_in_diagram(diagram)
    }

    fn resolve_in_diagram<'a>(
        &self,
        diagram: &'a XyDiagram,
    ) -> ChartResult<&'a dyn PropertySource> {
        match self {
            Self::Chart => Err(ChartError::UnknownNode("chart".to_owned())),
            Self::Diagram => Ok(diagram),
            Self::Axis(slot) => diagram
                .axis(slot)
                .map(|axis| axis as &dyn PropertySource)
                .ok_or_else(|| missing(self)),
            Self::ScaleOptions(slot) => diagram
                .axis(slot)
                .and_then(|axis| axis.scale_options.as_ref())
                .map(|options| options as &dyn PropertySource)
                .ok_or_else(|| missing(self)),
            Self::Series(index) => diagram
                .series
                .get(*index)
                .map(|series| series as &dyn PropertySource)
                .ok_or_else(|| missing(self)),
        }
    }

    pub fn resolve_mut<'a>(
        &self,
        chart: &'a mut ChartControl,
    ) -> ChartResult<&'a mut dyn PropertySource> {
        if let Self::Chart = self {
            return Ok(chart);
        }
        let diagram = chart
            .diagram
            .as_mut()
            .ok_or_else(|| ChartError::UnknownNode("diagram".to_owned()))?;
        match self {
            Self::Chart => Err(ChartError::UnknownNode("chart".to_owned())),
            Self::Diagram => Ok(diagram),
            Self::Axis(slot) => diagram
                .axis_mut(slot)
                .map(|axis| axis as &mut dyn PropertySource)
                .ok_or_else(|| missing(self)),
            Self::ScaleOptions(slot) => diagram
                .axis_mut(slot)
                .and_then(|axis| axis.scale_options.as_mut())
                .map(|options| options as &mut dyn PropertySource)
                .ok_or_else(|| missing(self)),
            Self::Series(index) => diagram
                .series
                .get_mut(*index)
                .map(|series| series as &mut dyn PropertySource)
                .ok_or_else(|| missing(self)),
        }
    }
}

fn missing(node: &NodeRef) -> ChartError {
    ChartError::UnknownNode(format!("{node:?}"))
}

/// A readable and writable field on one configuration node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Accessor {
    node: NodeRef,
    field: &'static str,
    declared: DeclaredType,
}

impl Accessor {
    /// Builds an accessor only for writable fields of an editable type.
    #[must_use]
    pub fn for_field(node: NodeRef, spec: &FieldSpec) -> Option<Self> {
        if !spec.is_writable() || !spec.declared.is_catalog_eligible() {
            return None;
        }
        Some(Self {
            node,
            field: spec.name,
            declared: spec.declared,
        })
    }

    #[must_use]
    pub fn node(&self) -> &NodeRef {
        &self.node
    }

    #[must_use]
    pub fn field(&self) -> &'static str {
        self.field
    }

    #[must_use]
    pub fn declared(&self) -> DeclaredType {
        self.declared
    }

    /// Reads the current value. An `Err` means the field is unavailable on
    /// this instance; callers building catalogs skip such fields.
    pub fn read(&self, chart: &ChartControl) -> ChartResult<Option<PropertyValue>> {
        self.node.resolve(chart)?.read_field(self.field)
    }

    /// Writes an already-typed value. Values that do not match the declared
    /// type are rejected before the node is touched.
    pub fn write(&self, chart: &mut ChartControl, value: Option<PropertyValue>) -> ChartResult<()> {
        if !self.declared.accepts(value.as_ref()) {
            return Err(ChartError::Coercion {
                expected: self.declared.to_string(),
                input: value.map_or_else(String::new, |value| value.to_string()),
            });
        }
        self.node.resolve_mut(chart)?.write_field(self.field, value)
    }
}
