use serde::{Deserialize, Serialize};

use super::value::{ChoiceEnum, EnumSpec};

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident as $type_name:literal {
            $($(#[$variant_meta:meta])* $variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$variant_meta])* $variant),+
        }

        impl ChoiceEnum for $name {
            const SPEC: &'static EnumSpec = &EnumSpec {
                type_name: $type_name,
                variants: &[$($label),+],
            };

            fn variant_name(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }

            fn from_variant_name(name: &str) -> Option<Self> {
                match name {
                    $($label => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

choice_enum! {
    /// When the chart plays its entry animation.
    AnimationMode as "AnimationMode" {
        OnLoad => "OnLoad",
        OnDataChanged => "OnDataChanged",
        Disabled => "Disabled",
    }
}

choice_enum! {
    /// How values falling into the same bin/interval are combined.
    AggregateFunction as "AggregateFunction" {
        None => "None",
        Average => "Average",
        Sum => "Sum",
        Minimum => "Minimum",
        Maximum => "Maximum",
        Count => "Count",
        /// Counts arguments per bin (histogram frequency).
        Histogram => "Histogram",
    }
}

choice_enum! {
    AxisAlignment as "AxisAlignment" {
        Near => "Near",
        Far => "Far",
        Zero => "Zero",
    }
}

choice_enum! {
    PaneOrientation as "Orientation" {
        Horizontal => "Horizontal",
        Vertical => "Vertical",
    }
}

choice_enum! {
    /// Series view; its type name is shown in per-series catalog prefixes.
    SeriesView as "SeriesView" {
        Bar => "Bar",
        Line => "Line",
        Area => "Area",
        Point => "Point",
    }
}

impl SeriesView {
    /// Concrete series type name as the charting widget reports it.
    #[must_use]
    pub fn series_type_name(self) -> &'static str {
        match self {
            Self::Bar => "BarSideBySideSeries2D",
            Self::Line => "LineSeries2D",
            Self::Area => "AreaSeries2D",
            Self::Point => "PointSeries2D",
        }
    }
}
