//! Validation of OSM IM descriptor documents
//!
//! [`base`] holds the mode and path plumbing, [`error`] the reported errors and
//! [`im_descriptor`] the rule set for VNFD and NSD catalogs.
//!
//! Copyright (c) 2025 SOL006 Translator Team
//! Licensed under the Apache-2.0 license

pub mod base;
pub mod error;
pub mod im_descriptor;

pub use base::{SchemaValidator, ValidationContext, ValidationHelpers, ValidationMode};
pub use error::{ValidationError, ValidationErrors, ValidationResult, Violation};
pub use im_descriptor::ImDescriptorValidator;
