//! Translation engine for converting IM descriptors to SOL006
//!
//! Every entry point runs the same sequence: detect the descriptor kind,
//! hand the untouched document to the validator, unwrap the catalog
//! envelope, decode the typed IM view, and run the matching pipeline.
//!
//! Copyright (c) 2025 SOL006 Translator Team
//! Licensed under the Apache-2.0 license

mod nsd;
mod vnfd;

use crate::dispatch::{descriptor_kind, unwrap_envelope, DescriptorKind};
use crate::error::{Error, Result};
use crate::im::{ImNsd, ImVnfd};
use crate::sol006::{NsdDocument, VnfdDocument};
use crate::validator::{run_validator, DescriptorValidator};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use nsd::translate_im_nsd;
use vnfd::translate_im_vnfd;

/// A finished SOL006 document in its output envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sol006Document {
    Vnfd(VnfdDocument),
    Nsd(NsdDocument),
}

impl Sol006Document {
    pub fn kind(&self) -> DescriptorKind {
        match self {
            Sol006Document::Vnfd(_) => DescriptorKind::Vnfd,
            Sol006Document::Nsd(_) => DescriptorKind::Nsd,
        }
    }

    /// Id of the translated descriptor
    pub fn id(&self) -> &str {
        match self {
            Sol006Document::Vnfd(doc) => &doc.vnfd.id,
            Sol006Document::Nsd(doc) => doc.nsd.nsd.first().map_or("", |nsd| nsd.id.as_str()),
        }
    }

    /// Render as a decoded nested mapping
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// IM to SOL006 translator bound to a validator
///
/// Holds no state between calls; one translator can serve any number of
/// documents, from any number of threads if the validator allows it.
#[derive(Debug, Clone)]
pub struct Translator<V> {
    validator: V,
}

impl<V: DescriptorValidator> Translator<V> {
    pub fn new(validator: V) -> Self {
        Self { validator }
    }

    pub fn validator(&self) -> &V {
        &self.validator
    }

    /// Translate a document of either kind
    pub fn translate(&self, document: &Value) -> Result<Sol006Document> {
        let kind = self.prepare(document)?;
        translate_kind(document, kind)
    }

    /// Translate a document that must be a VNFD
    pub fn translate_vnfd(&self, document: &Value) -> Result<VnfdDocument> {
        self.expect_kind(document, DescriptorKind::Vnfd)?;
        vnfd_document(document)
    }

    /// Translate a document that must be an NSD
    pub fn translate_nsd(&self, document: &Value) -> Result<NsdDocument> {
        self.expect_kind(document, DescriptorKind::Nsd)?;
        nsd_document(document)
    }

    fn prepare(&self, document: &Value) -> Result<DescriptorKind> {
        let kind = descriptor_kind(document)?;
        run_validator(&self.validator, kind, document)?;
        Ok(kind)
    }

    fn expect_kind(&self, document: &Value, expected: DescriptorKind) -> Result<()> {
        let kind = self.prepare(document)?;
        if kind != expected {
            return Err(Error::malformed(format!(
                "expected a {} document, found a {} document",
                expected, kind
            )));
        }
        Ok(())
    }
}

fn translate_kind(document: &Value, kind: DescriptorKind) -> Result<Sol006Document> {
    match kind {
        DescriptorKind::Vnfd => vnfd_document(document).map(Sol006Document::Vnfd),
        DescriptorKind::Nsd => nsd_document(document).map(Sol006Document::Nsd),
    }
}

fn vnfd_document(document: &Value) -> Result<VnfdDocument> {
    let im = ImVnfd::deserialize(unwrap_envelope(document, DescriptorKind::Vnfd)?)?;
    let vnfd = translate_im_vnfd(&im)?;
    tracing::info!(kind = "vnfd", id = %vnfd.id, vdus = vnfd.vdu.len(), "translated descriptor");
    Ok(VnfdDocument { vnfd })
}

fn nsd_document(document: &Value) -> Result<NsdDocument> {
    let im = ImNsd::deserialize(unwrap_envelope(document, DescriptorKind::Nsd)?)?;
    let nsd = translate_im_nsd(&im)?;
    tracing::info!(kind = "nsd", id = %nsd.id, vlds = im.vld.len(), "translated descriptor");
    Ok(NsdDocument::new(nsd))
}

/// Translate an IM document into its SOL006 form as a decoded mapping
///
/// The validator is consulted before anything else; a rejection becomes
/// [`Error::Validation`]. The input is only borrowed.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use sol006_core::{translate, DescriptorKind};
///
/// let accept_all = |_: DescriptorKind, _: &serde_json::Value| -> anyhow::Result<()> { Ok(()) };
/// let im = json!({"nsd-catalog": {"nsd": [{"id": "ns"}]}});
/// let sol006 = translate(&im, &accept_all)?;
/// assert_eq!(sol006["nsd"]["nsd"][0]["id"], "ns");
/// # Ok::<(), sol006_core::Error>(())
/// ```
pub fn translate<V>(document: &Value, validator: &V) -> Result<Value>
where
    V: DescriptorValidator + ?Sized,
{
    let kind = descriptor_kind(document)?;
    run_validator(validator, kind, document)?;
    translate_kind(document, kind)?.to_value()
}
