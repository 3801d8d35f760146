//! Error types for the SOL006 translation engine
//!
//! Every failure the engine can report is a translation failure: the
//! variants below only distinguish *why* the document could not be
//! translated. Translation is all-or-nothing, so no variant ever carries a
//! partially built output.

use crate::dispatch::DescriptorKind;
use std::fmt;
use thiserror::Error;

/// Roots accepted by the dispatcher, used in error messages
pub const EXPECTED_ROOTS: &str = "vnfd:vnfd-catalog, vnfd-catalog, nsd:nsd-catalog, nsd-catalog";

/// Main error type for translation operations
#[derive(Error, Debug)]
pub enum Error {
    /// The IM validator rejected the input document
    #[error("Error on input model validation: {message}")]
    Validation {
        kind: DescriptorKind,
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// The top-level key names neither a VNFD nor an NSD catalog
    #[error(
        "Error in translation: cannot determine the type of OSM-IM descriptor. Found {found}, expected one of: {}.",
        EXPECTED_ROOTS
    )]
    UnknownDescriptorKind { found: String },

    /// The document does not have the expected envelope or field shapes
    #[error("Malformed descriptor: {message}")]
    MalformedDescriptor {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// A name-based cross reference did not resolve
    #[error("Unresolved {kind} '{reference}' in {target}")]
    UnresolvedReference {
        kind: ReferenceKind,
        reference: String,
        target: String,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// The kind of cross reference that failed to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// `internal-vld.internal-connection-point[].id-ref`
    InternalConnectionPoint,
    /// `ip-profiles[].name` with no internal-vld pointing at it
    IpProfile,
    /// `monitoring-param[].vdu-monitoring-param.vdu-ref`
    Vdu,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceKind::InternalConnectionPoint => write!(f, "internal-connection-point-ref"),
            ReferenceKind::IpProfile => write!(f, "ip-profile-ref"),
            ReferenceKind::Vdu => write!(f, "vdu-ref"),
        }
    }
}

impl Error {
    /// Create a malformed-descriptor error without a source
    pub fn malformed(message: impl Into<String>) -> Self {
        Error::MalformedDescriptor {
            message: message.into(),
            source: None,
        }
    }

    /// Create an unresolved-reference error
    pub fn unresolved(
        kind: ReferenceKind,
        reference: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Error::UnresolvedReference {
            kind,
            reference: reference.into(),
            target: target.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedDescriptor {
            message: err.to_string(),
            source: Some(err),
        }
    }
}
