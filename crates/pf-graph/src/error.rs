//! Graph-specific error types.

use pf_core::{PfError, PoreId, ThroatId};

pub type GraphResult<T> = Result<T, GraphError>;

/// Network construction, validation and query errors.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphError {
    /// A throat refers to a pore that doesn't exist.
    InvalidPoreRef { throat: ThroatId, pore: PoreId },

    /// A throat connects a pore to itself.
    SelfLoop { throat: ThroatId, pore: PoreId },

    /// Two throats connect the same unordered pore pair.
    DuplicateThroat { throat: ThroatId, first: ThroatId },

    /// A per-pore or per-throat attribute array has the wrong length.
    AttributeLength {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A geometric attribute is negative or non-finite.
    InvalidAttribute {
        what: &'static str,
        index: usize,
        value: f64,
    },

    /// Label lookup failed.
    UnknownLabel { label: String },

    /// A label lists a pore that doesn't exist.
    LabelPoreRef { label: String, pore: PoreId },

    /// A pore id passed to a query is out of range.
    PoreOutOfRange { pore: PoreId, len: usize },

    /// A query needs at least one pore.
    EmptyPoreSet { what: &'static str },

    /// Face coordinates don't span a measurable extent.
    DegenerateDomain { what: &'static str },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::InvalidPoreRef { throat, pore } => {
                write!(f, "Throat {} refers to non-existent pore {}", throat, pore)
            }
            GraphError::SelfLoop { throat, pore } => {
                write!(f, "Throat {} connects pore {} to itself", throat, pore)
            }
            GraphError::DuplicateThroat { throat, first } => {
                write!(
                    f,
                    "Throat {} duplicates the pore pair of throat {}",
                    throat, first
                )
            }
            GraphError::AttributeLength {
                what,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Attribute {} has {} entries (expected {})",
                    what, actual, expected
                )
            }
            GraphError::InvalidAttribute { what, index, value } => {
                write!(f, "Attribute {}[{}] is invalid: {}", what, index, value)
            }
            GraphError::UnknownLabel { label } => write!(f, "Unknown label '{}'", label),
            GraphError::LabelPoreRef { label, pore } => {
                write!(f, "Label '{}' refers to non-existent pore {}", label, pore)
            }
            GraphError::PoreOutOfRange { pore, len } => {
                write!(f, "Pore {} out of range ({} pores)", pore, len)
            }
            GraphError::EmptyPoreSet { what } => write!(f, "Empty pore set for {}", what),
            GraphError::DegenerateDomain { what } => write!(f, "Degenerate domain: {}", what),
        }
    }
}

impl std::error::Error for GraphError {}

impl From<GraphError> for PfError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::PoreOutOfRange { pore, len } => PfError::IndexOob {
                what: "pore",
                index: pore.as_usize(),
                len,
            },
            other => PfError::Invariant {
                what: other.to_string(),
            },
        }
    }
}
