//! Error types for gazetteer navigation and loading.

use thiserror::Error;

use crate::models::WoeId;

/// Errors surfaced by the gazetteer core and its storage layer.
///
/// Navigation never retries or recovers; every failure is returned to the
/// immediate caller, which decides on a fallback.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GazetteerError {
    /// An enumeration token from the data source matches no known tag.
    #[error("unknown {kind} token: {token:?}")]
    Parse { kind: &'static str, token: String },

    /// No qualified (Q) alias exists for the requested language.
    #[error("no preferred alias for locale {locale:?} on place {name:?} ({woe_id})")]
    NotFound {
        locale: String,
        woe_id: WoeId,
        name: String,
    },

    /// The parent chain loops back on itself. Indicates corrupt input data.
    #[error("cycle in parent chain of place {start}: place {repeated} reached twice")]
    Structural { start: WoeId, repeated: WoeId },

    /// A write was attempted against the loaded, read-only dataset.
    #[error("{entity} is read-only: {operation} rejected")]
    ReadOnlyViolation {
        entity: &'static str,
        operation: &'static str,
    },

    /// Lookup of a place id that is not part of the loaded dataset.
    #[error("unknown place {0}")]
    UnknownPlace(WoeId),

    /// A record references a place that was never loaded.
    #[error("{relation} of place {from} references unknown place {to}")]
    DanglingReference {
        from: WoeId,
        to: WoeId,
        relation: &'static str,
    },

    /// Two place records share the same id.
    #[error("duplicate place {0}")]
    DuplicatePlace(WoeId),

    /// A record is malformed (e.g. an alias without a name).
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

pub type Result<T> = std::result::Result<T, GazetteerError>;
