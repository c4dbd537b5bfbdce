use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Permission required to run catalog maintenance actions.
pub const CATALOG_MAINTAIN: &str = "catalog.maintain";

/// Permission identifier.
///
/// Permissions are modeled as opaque strings (e.g. "catalog.maintain").
/// The wildcard permission `"*"` grants everything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn wildcard() -> Self {
        Self::new("*")
    }

    pub fn catalog_maintain() -> Self {
        Self::new(CATALOG_MAINTAIN)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.as_str() == "*"
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
