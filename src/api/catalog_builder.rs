use tracing::{debug, trace, warn};

use crate::core::{
    AxisSlot, ChartControl, ContinuousScaleOptions, DeclaredType, PropertyValue, ScaleOptions,
};

use super::axis_allocation::{ensure_bin_scale_options, get_or_create_axis_for_series};
use super::{
    Accessor, BinSetting, Catalog, CatalogEntry, CategoryKey, CategoryKind, EditorConfig,
    EntryTarget, NodeRef,
};

/// Builds the property catalog for `chart`.
///
/// Missing structural nodes (diagram, primary axes, scale options, per-series
/// binning axes) are created first, so only leaf values can ever be absent.
/// Traversal order: chart, diagram, then per series its own settings, its X
/// axis, that axis' scale options and the synthesized bin entries, and
/// finally the shared Y axis. Fields that fail to read are left out.
pub fn build_catalog(chart: &mut ChartControl, config: &EditorConfig) -> Catalog {
    let series_axes = prepare_graph(chart, config);
    let chart: &ChartControl = chart;

    let mut collector = EntryCollector {
        chart,
        config,
        entries: Vec::new(),
        skipped: 0,
    };
    collector.add_node(
        NodeRef::Chart,
        CategoryKey::shared(CategoryKind::Chart),
        "Chart Control",
        None,
    );
    collector.add_node(
        NodeRef::Diagram,
        CategoryKey::shared(CategoryKind::Diagram),
        "XY Diagram",
        None,
    );

    for (index, slot) in &series_axes {
        let index = *index;
        let ordinal = index + 1;
        let type_name = NodeRef::Series(index)
            .resolve(chart)
            .map_or("Series", |source| source.type_name());
        collector.add_node(
            NodeRef::Series(index),
            CategoryKey::shared(CategoryKind::Series),
            &format!("Series {ordinal} ({type_name})"),
            Some(index),
        );
        collector.add_node(
            NodeRef::Axis(slot.clone()),
            CategoryKey::for_series(CategoryKind::Axes, index),
            &format!("Series {ordinal} X Axis"),
            Some(index),
        );
        collector.add_node(
            NodeRef::ScaleOptions(slot.clone()),
            CategoryKey::for_series(CategoryKind::ScaleOptions, index),
            &format!("Series {ordinal} X Axis Scale"),
            Some(index),
        );
        collector.add_bin_entries(slot, index);
    }

    collector.add_node(
        NodeRef::Axis(AxisSlot::PrimaryY),
        CategoryKey::shared(CategoryKind::Axes),
        "Y Axis",
        None,
    );
    collector.add_node(
        NodeRef::ScaleOptions(AxisSlot::PrimaryY),
        CategoryKey::shared(CategoryKind::ScaleOptions),
        "Y Axis Scale",
        None,
    );

    debug!(
        entries = collector.entries.len(),
        skipped = collector.skipped,
        series = series_axes.len(),
        "built property catalog"
    );
    Catalog::new(collector.entries)
}

/// Lazily creates every structural node the traversal reads from and
/// returns the binning axis of each series in series order.
fn prepare_graph(chart: &mut ChartControl, config: &EditorConfig) -> Vec<(usize, AxisSlot)> {
    let diagram = chart.ensure_diagram();
    diagram.ensure_axis_x();
    if let Err(err) = ensure_bin_scale_options(diagram, &AxisSlot::PrimaryX, config) {
        warn!(error = %err, "skipping primary axis scale defaults");
    }

    let mut series_axes = Vec::with_capacity(diagram.series.len());
    for index in 0..diagram.series.len() {
        let slot = match get_or_create_axis_for_series(diagram, index, config) {
            Ok(slot) => slot,
            Err(err) => {
                warn!(series_index = index, error = %err, "skipping series axis allocation");
                continue;
            }
        };
        if let Err(err) = ensure_bin_scale_options(diagram, &slot, config) {
            warn!(series_index = index, error = %err, "skipping series scale defaults");
        }
        series_axes.push((index, slot));
    }

    let axis_y = diagram.ensure_axis_y();
    if axis_y.scale_options.is_none() {
        axis_y.scale_options = Some(ScaleOptions::Continuous(ContinuousScaleOptions::default()));
    }
    series_axes
}

struct EntryCollector<'a> {
    chart: &'a ChartControl,
    config: &'a EditorConfig,
    entries: Vec<CatalogEntry>,
    skipped: usize,
}

impl EntryCollector<'_> {
    fn add_node(
        &mut self,
        node: NodeRef,
        category: CategoryKey,
        prefix: &str,
        series: Option<usize>,
    ) {
        let source = match node.resolve(self.chart) {
            Ok(source) => source,
            Err(err) => {
                trace!(node = ?node, error = %err, "skipping unresolved node");
                return;
            }
        };
        for spec in source.field_specs() {
            let Some(accessor) = Accessor::for_field(node.clone(), spec) else {
                continue;
            };
            match accessor.read(self.chart) {
                Ok(value) => self.entries.push(CatalogEntry {
                    name: format!("{prefix} - {}", spec.name),
                    category,
                    value,
                    declared: spec.declared,
                    description: spec.description_text(),
                    role: spec.role,
                    series,
                    target: EntryTarget::Field(accessor),
                }),
                Err(err) => {
                    self.skipped += 1;
                    trace!(
                        field = spec.name,
                        node = ?node,
                        error = %err,
                        "skipping unreadable field"
                    );
                }
            }
        }
    }

    fn add_bin_entries(&mut self, slot: &AxisSlot, series_index: usize) {
        let node = NodeRef::ScaleOptions(slot.clone());
        let is_count_interval = self
            .chart
            .diagram
            .as_ref()
            .and_then(|diagram| diagram.axis(slot))
            .and_then(|axis| axis.count_interval())
            .is_some();
        if !is_count_interval {
            trace!(series_index, "axis has no count-interval scale; no bin entries");
            return;
        }
        let Ok(source) = node.resolve(self.chart) else {
            return;
        };

        let ordinal = series_index + 1;
        for setting in BinSetting::ALL {
            let Some(backing) = source
                .field_specs()
                .iter()
                .find(|spec| spec.name == setting.backing_field())
                .and_then(|spec| Accessor::for_field(node.clone(), spec))
            else {
                continue;
            };
            let value = match backing.read(self.chart) {
                Ok(value) => value,
                Err(err) => {
                    self.skipped += 1;
                    trace!(
                        setting = setting.label(),
                        error = %err,
                        "skipping unreadable bin setting"
                    );
                    continue;
                }
            };
            let (declared, value) = match setting {
                BinSetting::Count => (
                    DeclaredType::integer(),
                    Some(value.unwrap_or(PropertyValue::Integer(
                        self.config.displayed_bin_count_fallback_i32(),
                    ))),
                ),
                _ => (backing.declared(), value),
            };
            self.entries.push(CatalogEntry {
                name: format!("Series {ordinal} Histogram - {}", setting.label()),
                category: CategoryKey::for_series(CategoryKind::Histogram, series_index),
                value,
                declared,
                description: setting.description().to_owned(),
                role: setting.role(),
                series: Some(series_index),
                target: EntryTarget::Synthetic { setting, backing },
            });
        }
    }
}
