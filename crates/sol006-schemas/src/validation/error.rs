//! Validation error types for IM descriptors
//!
//! Copyright (c) 2025 SOL006 Translator Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A single broken rule with what was expected and what was found
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Short rule name such as `leafref` or `unique_key`
    pub rule: String,
    pub expected: String,
    /// The offending value, or a description of what is missing
    pub actual: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] expected {}, found {}", self.rule, self.expected, self.actual)
    }
}

/// Descriptor validation error located by a `$.`-rooted path
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub struct ValidationError {
    /// Location in the IM document, e.g. `$.vnfd-catalog.vnfd[0].vdu[1].id`
    pub path: String,
    pub message: String,
    /// Rules broken at this location
    pub schema_violations: Vec<Violation>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)?;
        self.schema_violations
            .iter()
            .try_for_each(|violation| write!(f, "\n    {}", violation))
    }
}

impl ValidationError {
    /// Error at `path` with no rule details
    pub fn new<P, M>(path: P, message: M) -> Self
    where
        P: Into<String>,
        M: Into<String>,
    {
        Self {
            path: path.into(),
            message: message.into(),
            schema_violations: Vec::new(),
        }
    }

    /// Error at `path` that broke exactly one rule
    pub fn with_violation<P, M>(path: P, message: M, violation: Violation) -> Self
    where
        P: Into<String>,
        M: Into<String>,
    {
        Self {
            path: path.into(),
            message: message.into(),
            schema_violations: vec![violation],
        }
    }

    /// Build the [`Violation`] record for `rule`
    pub fn create_violation<R, E, A>(rule: R, expected: E, actual: A) -> Violation
    where
        R: Into<String>,
        E: Into<String>,
        A: Into<String>,
    {
        Violation {
            rule: rule.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Name of the first violated rule, if any
    pub fn rule(&self) -> Option<&str> {
        self.schema_violations.first().map(|v| v.rule.as_str())
    }
}

/// Outcome of a single check
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Every error found in one or more documents
#[derive(Debug, Clone, Default, PartialEq, Error, Serialize, Deserialize)]
pub struct ValidationErrors {
    /// In document order
    pub errors: Vec<ValidationError>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} IM validation error(s)", self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n  {}", error)?;
        }
        Ok(())
    }
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record another error after the ones already found
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The first error found, in document order
    pub fn first(&self) -> Option<&ValidationError> {
        self.errors.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// `Err(self)` unless nothing was found
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self::from(vec![error])
    }
}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}
