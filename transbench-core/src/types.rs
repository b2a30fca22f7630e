// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Newtype wrappers for validated inputs.
//!
//! Following the "Newtype" pattern in Rust to ensure valid state by construction.
//! All types validate their invariants at creation time.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::HardValidationError;

/// Maximum length of a backend or suite name.
const MAX_NAME_LEN: usize = 64;

fn validate_name(field: &'static str, name: &str) -> Result<(), HardValidationError> {
    if name.is_empty() {
        return Err(HardValidationError::InvalidFieldValue {
            field,
            value: name.to_string(),
            reason: "Name cannot be empty".to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(HardValidationError::InvalidFieldValue {
            field,
            value: name.to_string(),
            reason: format!("Name too long: {} chars (max {})", name.len(), MAX_NAME_LEN),
        });
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        return Err(HardValidationError::InvalidFieldValue {
            field,
            value: name.to_string(),
            reason: "Name must contain only ASCII alphanumerics, '-', '_' and '.'".to_string(),
        });
    }

    Ok(())
}

/// Validated backend display name.
/// Used verbatim as the benchmark identity inside its suite.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BackendName(pub(crate) String);

impl BackendName {
    /// Create a new BackendName with validation.
    pub fn new(name: impl Into<String>) -> Result<Self, HardValidationError> {
        let name = name.into();
        validate_name("backend_name", &name)?;
        Ok(Self(name))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BackendName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for BackendName {
    type Error = HardValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BackendName> for String {
    fn from(name: BackendName) -> Self {
        name.0
    }
}

/// Validated suite name (benchmark group).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SuiteName(pub(crate) String);

impl SuiteName {
    pub fn new(name: impl Into<String>) -> Result<Self, HardValidationError> {
        let name = name.into();
        validate_name("suite_name", &name)?;
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SuiteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for SuiteName {
    type Error = HardValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SuiteName> for String {
    fn from(name: SuiteName) -> Self {
        name.0
    }
}

/// Opaque dependency locator.
/// Only resolvers interpret it; it is never parsed here beyond sanity checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locator(pub(crate) String);

impl Locator {
    /// Create a new Locator. Must be non-blank and free of NUL bytes.
    pub fn new(locator: impl Into<String>) -> Result<Self, HardValidationError> {
        let locator = locator.into();

        if locator.trim().is_empty() {
            return Err(HardValidationError::InvalidFieldValue {
                field: "locator",
                value: locator,
                reason: "Locator cannot be blank".to_string(),
            });
        }

        if locator.contains('\0') {
            return Err(HardValidationError::InvalidFieldValue {
                field: "locator",
                value: locator.replace('\0', "\\0"),
                reason: "Locator cannot contain NUL bytes".to_string(),
            });
        }

        Ok(Self(locator))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Locator {
    type Error = HardValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Locator> for String {
    fn from(locator: Locator) -> Self {
        locator.0
    }
}
