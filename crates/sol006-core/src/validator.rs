//! Validator collaborator seam
//!
//! The engine never checks IM schema conformance itself. It calls a
//! [`DescriptorValidator`] unconditionally before any translation logic runs
//! and turns a rejection into [`Error::Validation`].

use crate::dispatch::DescriptorKind;
use crate::error::{Error, Result};
use serde_json::Value;

/// Checks a raw IM document against the IM schema for a descriptor kind
pub trait DescriptorValidator {
    /// Validate `document` as an IM descriptor of `kind`
    fn validate(&self, kind: DescriptorKind, document: &Value) -> anyhow::Result<()>;
}

impl<F> DescriptorValidator for F
where
    F: Fn(DescriptorKind, &Value) -> anyhow::Result<()>,
{
    fn validate(&self, kind: DescriptorKind, document: &Value) -> anyhow::Result<()> {
        self(kind, document)
    }
}

/// Run the validator and wrap a rejection as a translation failure
pub(crate) fn run_validator<V>(validator: &V, kind: DescriptorKind, document: &Value) -> Result<()>
where
    V: DescriptorValidator + ?Sized,
{
    validator.validate(kind, document).map_err(|err| {
        tracing::debug!(kind = %kind, error = %err, "IM validation rejected document");
        Error::Validation {
            kind,
            message: err.to_string(),
            source: Some(err),
        }
    })
}
