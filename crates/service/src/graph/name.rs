use std::{fmt, str::FromStr};

use crate::errors::ServiceError;

pub const MAX_NAME_LEN: usize = 128;

/// A graph name that is safe to use as a file stem.
///
/// Only ASCII letters, digits, `-` and `_` are accepted, so a name can never
/// contain a path separator, `..`, or anything else that would resolve outside
/// the storage directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphName(String);

impl GraphName {
    pub fn parse(raw: &str) -> Result<Self, ServiceError> {
        if raw.is_empty() {
            return Err(ServiceError::Validation("Graph name is required".into()));
        }
        if raw.len() > MAX_NAME_LEN {
            return Err(ServiceError::Validation(format!(
                "Invalid graph name: must be at most {MAX_NAME_LEN} characters"
            )));
        }
        if !raw.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_') {
            return Err(ServiceError::Validation(
                "Invalid graph name: only letters, digits, '-' and '_' are allowed".into(),
            ));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str { &self.0 }

    pub fn into_inner(self) -> String { self.0 }
}

impl FromStr for GraphName {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Self::parse(s) }
}

impl AsRef<str> for GraphName {
    fn as_ref(&self) -> &str { &self.0 }
}

impl fmt::Display for GraphName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}
