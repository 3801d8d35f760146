//! Descriptor kind detection and envelope handling
//!
//! IM documents arrive wrapped as `{"<kind>-catalog": {"<kind>": [descriptor]}}`
//! (the root may carry a YANG module prefix, e.g. `vnfd:vnfd-catalog`). The
//! dispatcher only looks at the single top-level key to decide which
//! translator runs.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Kind of descriptor carried by an IM document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptorKind {
    /// Virtual Network Function Descriptor
    Vnfd,
    /// Network Service Descriptor
    Nsd,
}

impl DescriptorKind {
    /// Key of the descriptor list inside the catalog envelope
    pub fn as_str(&self) -> &'static str {
        match self {
            DescriptorKind::Vnfd => "vnfd",
            DescriptorKind::Nsd => "nsd",
        }
    }
}

impl fmt::Display for DescriptorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Determine the descriptor kind of a raw IM document
///
/// The document must be a mapping with exactly one top-level key. The kind
/// is decided by substring match on that key, `vnfd` taking precedence.
pub fn descriptor_kind(document: &Value) -> Result<DescriptorKind> {
    let root = root_key(document)?;
    if root.contains("vnfd") {
        return Ok(DescriptorKind::Vnfd);
    }
    if root.contains("nsd") {
        return Ok(DescriptorKind::Nsd);
    }
    Err(Error::UnknownDescriptorKind {
        found: root.to_string(),
    })
}

fn root_key(document: &Value) -> Result<&str> {
    let map = document
        .as_object()
        .ok_or_else(|| Error::malformed("document root must be a mapping"))?;
    let mut keys = map.keys();
    match (keys.next(), keys.next()) {
        (Some(root), None) => Ok(root.as_str()),
        (None, _) => Err(Error::malformed("document root is empty")),
        (Some(_), Some(_)) => Err(Error::malformed(format!(
            "document root must have exactly one key, found {}",
            map.len()
        ))),
    }
}

/// Borrow the sole descriptor out of its catalog envelope
///
/// Only the first element of the inner list is read.
pub fn unwrap_envelope(document: &Value, kind: DescriptorKind) -> Result<&Value> {
    let root = root_key(document)?;
    let catalog = &document[root];
    let descriptors = catalog
        .get(kind.as_str())
        .and_then(Value::as_array)
        .ok_or_else(|| {
            Error::malformed(format!("'{}' must contain a '{}' list", root, kind.as_str()))
        })?;
    descriptors
        .first()
        .ok_or_else(|| Error::malformed(format!("'{}.{}' list is empty", root, kind.as_str())))
}
