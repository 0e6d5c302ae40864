use std::fmt;

use ordered_float::OrderedFloat;

/// Static description of an enumeration-typed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumSpec {
    pub type_name: &'static str,
    pub variants: &'static [&'static str],
}

impl EnumSpec {
    /// Resolves a variant by name, ignoring ASCII case and surrounding whitespace.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&'static str> {
        let name = name.trim();
        self.variants
            .iter()
            .copied()
            .find(|variant| variant.eq_ignore_ascii_case(name))
    }
}

/// Implemented by configuration enums that can be edited as a choice list.
pub trait ChoiceEnum: Copy + Sized + 'static {
    const SPEC: &'static EnumSpec;

    fn variant_name(self) -> &'static str;
    fn from_variant_name(name: &str) -> Option<Self>;
}

/// Underlying storage kind of an editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Text,
    Integer,
    Single,
    Double,
    Boolean,
    Enumeration(&'static EnumSpec),
    /// Any type the property sheet cannot edit (collections, brushes, nested nodes).
    Other(&'static str),
}

impl ValueKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Single => "single",
            Self::Double => "double",
            Self::Boolean => "boolean",
            Self::Enumeration(spec) => spec.type_name,
            Self::Other(name) => name,
        }
    }
}

/// Declared type of a field: a kind plus whether the value may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeclaredType {
    pub kind: ValueKind,
    pub nullable: bool,
}

impl DeclaredType {
    #[must_use]
    pub const fn required(kind: ValueKind) -> Self {
        Self {
            kind,
            nullable: false,
        }
    }

    #[must_use]
    pub const fn nullable(kind: ValueKind) -> Self {
        Self {
            kind,
            nullable: true,
        }
    }

    #[must_use]
    pub const fn text() -> Self {
        Self::required(ValueKind::Text)
    }

    #[must_use]
    pub const fn integer() -> Self {
        Self::required(ValueKind::Integer)
    }

    #[must_use]
    pub const fn double() -> Self {
        Self::required(ValueKind::Double)
    }

    #[must_use]
    pub const fn boolean() -> Self {
        Self::required(ValueKind::Boolean)
    }

    #[must_use]
    pub const fn choice(spec: &'static EnumSpec) -> Self {
        Self::required(ValueKind::Enumeration(spec))
    }

    /// Text, integer, single/double, boolean and enumerations (plus their
    /// nullable forms) are editable; everything else is skipped.
    #[must_use]
    pub fn is_catalog_eligible(self) -> bool {
        !matches!(self.kind, ValueKind::Other(_))
    }

    /// Returns `true` when `value` can be stored without conversion.
    #[must_use]
    pub fn accepts(self, value: Option<&PropertyValue>) -> bool {
        match value {
            None => self.nullable,
            Some(value) => value.matches_kind(self.kind),
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "{}?", self.kind.name())
        } else {
            f.write_str(self.kind.name())
        }
    }
}

/// Typed value of an editable field.
///
/// Floats are wrapped in `OrderedFloat` so values compare and hash
/// structurally, which keeps change detection and catalog snapshots total.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PropertyValue {
    Text(String),
    Integer(i32),
    Single(OrderedFloat<f32>),
    Double(OrderedFloat<f64>),
    Boolean(bool),
    Enumeration(&'static str),
}

impl PropertyValue {
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    #[must_use]
    pub fn double(value: f64) -> Self {
        Self::Double(OrderedFloat(value))
    }

    #[must_use]
    pub fn single(value: f32) -> Self {
        Self::Single(OrderedFloat(value))
    }

    #[must_use]
    pub fn choice<E: ChoiceEnum>(value: E) -> Self {
        Self::Enumeration(value.variant_name())
    }

    #[must_use]
    pub fn matches_kind(&self, kind: ValueKind) -> bool {
        match (self, kind) {
            (Self::Text(_), ValueKind::Text)
            | (Self::Integer(_), ValueKind::Integer)
            | (Self::Single(_), ValueKind::Single)
            | (Self::Double(_), ValueKind::Double)
            | (Self::Boolean(_), ValueKind::Boolean) => true,
            (Self::Enumeration(name), ValueKind::Enumeration(spec)) => {
                spec.variants.contains(name)
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Numeric view of integer and floating-point values.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(value) => Some(f64::from(*value)),
            Self::Single(value) => Some(f64::from(value.0)),
            Self::Double(value) => Some(value.0),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Enumeration(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => f.write_str(value),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Single(value) => write!(f, "{}", value.0),
            Self::Double(value) => write!(f, "{}", value.0),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Enumeration(name) => f.write_str(name),
        }
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::double(value)
    }
}

impl From<f32> for PropertyValue {
    fn from(value: f32) -> Self {
        Self::single(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
