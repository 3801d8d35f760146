//! Validation modes, path tracking and the leaf-level checks shared by rules
//!
//! Copyright (c) 2025 SOL006 Translator Team
//! Licensed under the Apache-2.0 license

use crate::validation::error::{ValidationError, ValidationErrors, ValidationResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// How much of the rule set is applied
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Envelope shape and required keys only
    Basic,
    /// Basic plus leaf types and list-key uniqueness
    Partial,
    /// Partial plus enumerations and cross references
    #[default]
    Strict,
}

impl ValidationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationMode::Basic => "basic",
            ValidationMode::Partial => "partial",
            ValidationMode::Strict => "strict",
        }
    }

    /// Whether rules of `level` run in this mode
    pub fn includes(&self, level: ValidationMode) -> bool {
        *self >= level
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "basic" => Ok(ValidationMode::Basic),
            "partial" => Ok(ValidationMode::Partial),
            "strict" => Ok(ValidationMode::Strict),
            other => Err(format!(
                "unknown validation mode '{}', expected one of: basic, partial, strict",
                other
            )),
        }
    }
}

/// Where a check is looking and which rules are switched on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationContext {
    /// `$`-rooted location, `.key` per mapping and `[i]` per list item
    pub path: String,
    pub mode: ValidationMode,
}

impl ValidationContext {
    /// Context at the document root
    pub fn new(mode: ValidationMode) -> Self {
        Self {
            path: String::from("$"),
            mode,
        }
    }

    /// Step into mapping key `key`
    pub fn child<K: AsRef<str>>(&self, key: K) -> Self {
        self.descend(format_args!(".{}", key.as_ref()))
    }

    /// Step into list item `index`
    pub fn child_index(&self, index: usize) -> Self {
        self.descend(format_args!("[{}]", index))
    }

    fn descend(&self, step: fmt::Arguments<'_>) -> Self {
        Self {
            path: format!("{}{}", self.path, step),
            mode: self.mode,
        }
    }

    /// Whether rules of `level` run under this context
    pub fn runs(&self, level: ValidationMode) -> bool {
        self.mode.includes(level)
    }
}

/// A rule set over some document type
///
/// Implementors only walk the document; the mode-specific entry points and
/// first-error reporting come for free.
pub trait SchemaValidator {
    type Input: ?Sized;

    /// Every error found under `context`, in document order
    fn collect_with_context(&self, input: &Self::Input, context: &ValidationContext) -> ValidationErrors;

    /// The first error found under `context`
    fn validate_with_context(
        &self,
        input: &Self::Input,
        context: &ValidationContext,
    ) -> ValidationResult<()> {
        self.collect_with_context(input, context)
            .into_iter()
            .next()
            .map_or(Ok(()), Err)
    }

    /// First error with every rule applied
    fn validate(&self, input: &Self::Input) -> ValidationResult<()> {
        self.validate_in(input, ValidationMode::Strict)
    }

    fn validate_partial(&self, input: &Self::Input) -> ValidationResult<()> {
        self.validate_in(input, ValidationMode::Partial)
    }

    fn validate_basic(&self, input: &Self::Input) -> ValidationResult<()> {
        self.validate_in(input, ValidationMode::Basic)
    }

    /// First error under `mode`, starting from the root
    fn validate_in(&self, input: &Self::Input, mode: ValidationMode) -> ValidationResult<()> {
        self.validate_with_context(input, &ValidationContext::new(mode))
    }

    /// Every error with every rule applied
    fn collect_errors(&self, input: &Self::Input) -> ValidationErrors {
        self.collect_with_context(input, &ValidationContext::new(ValidationMode::Strict))
    }
}

/// Checks on single leaves and lists, each reporting at the context path
pub struct ValidationHelpers;

impl ValidationHelpers {
    /// Fail if `field` is missing or null in `parent`
    pub fn validate_required(
        parent: &Value,
        field: &str,
        context: &ValidationContext,
    ) -> ValidationResult<()> {
        match parent.get(field) {
            Some(value) if !value.is_null() => Ok(()),
            _ => Err(ValidationError::with_violation(
                context.child(field).path,
                format!("'{}' is mandatory", field),
                ValidationError::create_violation("required_field", format!("a value for {}", field), "nothing"),
            )),
        }
    }

    /// String leaves also accept numbers, as YAML authors often write `id: 1`
    pub fn validate_string(value: &Value, context: &ValidationContext) -> ValidationResult<()> {
        match value {
            Value::String(_) | Value::Number(_) | Value::Null => Ok(()),
            other => Err(Self::type_error("type_string", "a string", other, context)),
        }
    }

    /// Non-negative integer or a string holding one
    pub fn validate_integer(value: &Value, context: &ValidationContext) -> ValidationResult<()> {
        let ok = match value {
            Value::Number(n) => n.is_u64(),
            Value::String(s) => s.trim().parse::<u64>().is_ok(),
            Value::Null => true,
            _ => false,
        };
        if ok {
            Ok(())
        } else {
            Err(Self::type_error("type_integer", "a non-negative integer", value, context))
        }
    }

    /// Any number or numeric string
    pub fn validate_number(value: &Value, context: &ValidationContext) -> ValidationResult<()> {
        let ok = match value {
            Value::Number(_) | Value::Null => true,
            Value::String(s) => s.trim().parse::<f64>().is_ok(),
            _ => false,
        };
        if ok {
            Ok(())
        } else {
            Err(Self::type_error("type_number", "a number", value, context))
        }
    }

    pub fn validate_list(value: &Value, context: &ValidationContext) -> ValidationResult<()> {
        match value {
            Value::Array(_) | Value::Null => Ok(()),
            other => Err(Self::type_error("type_list", "a list", other, context)),
        }
    }

    pub fn validate_mapping(value: &Value, context: &ValidationContext) -> ValidationResult<()> {
        match value {
            Value::Object(_) | Value::Null => Ok(()),
            other => Err(Self::type_error("type_mapping", "a mapping", other, context)),
        }
    }

    /// Enumerations are case sensitive, as in the IM YANG models
    pub fn validate_enum_value(
        value: &str,
        allowed: &[&str],
        leaf: &str,
        context: &ValidationContext,
    ) -> ValidationResult<()> {
        if allowed.iter().any(|candidate| *candidate == value) {
            return Ok(());
        }
        Err(ValidationError::with_violation(
            &context.path,
            format!("'{}' is not a valid {}", value, leaf),
            ValidationError::create_violation("enum_value", format!("one of: {}", allowed.join(", ")), value),
        ))
    }

    /// One error per repeated `key` value, located at the repeating item
    pub fn validate_unique_keys(
        items: &[Value],
        key: &str,
        context: &ValidationContext,
    ) -> Vec<ValidationError> {
        let mut seen = HashSet::new();
        items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| {
                let value = Self::key_of(item.get(key)?)?;
                if seen.insert(value.clone()) {
                    return None;
                }
                Some(ValidationError::with_violation(
                    context.child_index(i).child(key).path,
                    format!("Duplicate {} '{}'", key, value),
                    ValidationError::create_violation("unique_key", format!("unique {}", key), value),
                ))
            })
            .collect()
    }

    /// Fail if `reference` names nothing in `known`
    pub fn validate_reference(
        reference: &str,
        known: &HashSet<String>,
        target: &str,
        context: &ValidationContext,
    ) -> ValidationResult<()> {
        if known.contains(reference) {
            Ok(())
        } else {
            Err(ValidationError::with_violation(
                &context.path,
                format!("'{}' does not name any {}", reference, target),
                ValidationError::create_violation("leafref", format!("an existing {}", target), reference),
            ))
        }
    }

    /// String form of a key leaf, numbers included
    pub fn key_of(value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    fn type_error(rule: &str, expected: &str, found: &Value, context: &ValidationContext) -> ValidationError {
        ValidationError::with_violation(
            &context.path,
            format!("Expected {}", expected),
            ValidationError::create_violation(rule, expected, type_name(found)),
        )
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}
