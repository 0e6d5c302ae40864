use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid editor config: {0}")]
    InvalidConfig(String),

    #[error("field `{field}` is unavailable: {reason}")]
    FieldUnavailable { field: &'static str, reason: String },

    #[error("cannot convert `{input}` to {expected}")]
    Coercion { expected: String, input: String },

    #[error("unknown field `{field}` on {node}")]
    UnknownField { node: String, field: String },

    #[error("configuration node is missing: {0}")]
    UnknownNode(String),

    #[error("layout error: {0}")]
    Layout(String),
}
