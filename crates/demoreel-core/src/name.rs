//! Demo names.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DemoError, DemoResult};

/// Leading character that conventionally marks an exported demo name.
///
/// It is stripped when the name is shown as a label.
pub const NAME_MARKER: char = '_';

/// Opaque, stable key of a demo in the registry.
///
/// Names are compared as plain strings. Any chapter/section numbering inside
/// a name only matters for ordering, never for identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DemoName(String);

impl<'de> Deserialize<'de> for DemoName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

impl DemoName {
    /// Create a validated demo name.
    ///
    /// # Errors
    ///
    /// Returns [`DemoError::InvalidName`] if the name is empty or contains
    /// whitespace or control characters.
    pub fn new(name: impl Into<String>) -> DemoResult<Self> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    /// The raw name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display label: the name without its leading [`NAME_MARKER`].
    #[must_use]
    pub fn label(&self) -> &str {
        match self.0.strip_prefix(NAME_MARKER) {
            Some(rest) if !rest.is_empty() => rest,
            _ => &self.0,
        }
    }

    fn validate(name: &str) -> DemoResult<()> {
        if name.is_empty() {
            return Err(DemoError::InvalidName {
                name: name.to_owned(),
                reason: "must not be empty",
            });
        }
        if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(DemoError::InvalidName {
                name: name.to_owned(),
                reason: "must not contain whitespace or control characters",
            });
        }
        Ok(())
    }
}

impl fmt::Display for DemoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DemoName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for DemoName {
    type Error = DemoError;

    fn try_from(value: &str) -> DemoResult<Self> {
        Self::new(value)
    }
}
