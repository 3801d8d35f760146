//! SOL006 Schemas - structural validators for OSM IM descriptors
//!
//! This crate checks IM VNF and network service descriptor documents before
//! they are translated, and plugs into the translator through
//! [`sol006_core::DescriptorValidator`].
//!
//! ## Quick Start
//!
//! ```rust
//! use sol006_schemas::{ImDescriptorValidator, SchemaValidator};
//! use serde_json::json;
//!
//! let validator = ImDescriptorValidator::new();
//! let document = json!({
//!     "vnfd-catalog": {
//!         "vnfd": [{
//!             "id": "cirros_vnfd",
//!             "connection-point": [{"name": "eth0"}],
//!             "mgmt-interface": {"cp": "eth1"}
//!         }]
//!     }
//! });
//!
//! let error = SchemaValidator::validate(&validator, &document).unwrap_err();
//! assert_eq!(error.path, "$.vnfd-catalog.vnfd[0].mgmt-interface.cp");
//! ```
//!
//! ## Validation Modes
//!
//! - **Basic**: envelope shape and required keys
//! - **Partial**: Basic + leaf types and list-key uniqueness
//! - **Strict**: Partial + enumerations and cross references (default)
//!
//! Copyright (c) 2025 SOL006 Translator Team
//! Licensed under the Apache-2.0 license

pub mod validation;

pub use validation::{
    ImDescriptorValidator, SchemaValidator, ValidationContext, ValidationError, ValidationErrors,
    ValidationHelpers, ValidationMode, ValidationResult, Violation,
};
