//! SOL006 Core - Translation engine from OSM IM descriptors to ETSI NFV SOL006
//!
//! This crate rebuilds IM VNF and network service descriptors as SOL006
//! descriptors. It works on already-decoded documents ([`serde_json::Value`]);
//! reading YAML or JSON text is up to the caller.
//!
//! # Main Components
//!
//! - **Dispatcher**: decides from the single top-level key whether a document
//!   is a VNFD or an NSD
//! - **Validator seam**: the [`DescriptorValidator`] collaborator is called on
//!   the raw document before anything is translated
//! - **VNFD / NSD pipelines**: ordered stages filling a typed SOL006 builder
//! - **Error Handling**: a single [`Error`] type built on `thiserror`
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use sol006_core::{DescriptorKind, Sol006Document, Translator};
//!
//! let translator = Translator::new(|_: DescriptorKind, _: &serde_json::Value| -> anyhow::Result<()> {
//!     Ok(())
//! });
//! let im = json!({
//!     "vnfd:vnfd-catalog": {
//!         "vnfd": [{
//!             "id": "cirros_vnfd",
//!             "mgmt-interface": {"cp": "eth0"},
//!             "vdu": [{"id": "cirros_vnfd-VM", "image": "cirros034"}]
//!         }]
//!     }
//! });
//!
//! match translator.translate(&im)? {
//!     Sol006Document::Vnfd(doc) => assert_eq!(doc.vnfd.mgmt_cp.as_deref(), Some("eth0-ext")),
//!     Sol006Document::Nsd(_) => unreachable!(),
//! }
//! # Ok::<(), sol006_core::Error>(())
//! ```

pub mod dispatch;
pub mod error;
pub mod im;
pub mod index;
pub mod sol006;
pub mod translation;
pub mod validator;

pub use dispatch::{descriptor_kind, unwrap_envelope, DescriptorKind};
pub use error::{Error, ReferenceKind, Result};
pub use translation::{translate, Sol006Document, Translator};
pub use validator::DescriptorValidator;

