//! Working organization resolution.
//!
//! The organization id salts key derivation, so the same key file produces
//! a different project key in every organization.

use std::path::PathBuf;

use crate::config::LeanConfig;
use crate::errors::{LeanCryptError, Result};

/// Supplies the organization id used as the PBKDF2 salt.
pub trait OrganizationResolver {
    /// Return the working organization id or fail if it is unknown.
    fn try_get_working_organization_id(&self) -> Result<String>;
}

/// A resolver that always returns the same organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedOrganization(pub String);

impl OrganizationResolver for FixedOrganization {
    fn try_get_working_organization_id(&self) -> Result<String> {
        if self.0.is_empty() {
            return Err(LeanCryptError::OrganizationNotFound);
        }
        Ok(self.0.clone())
    }
}

/// Resolves the organization from, in order: an explicit id (flag or
/// environment), the settings override, then the nearest `lean.json`.
#[derive(Debug, Clone, Default)]
pub struct OrganizationManager {
    explicit: Option<String>,
    configured: Option<String>,
    lean_config: Option<PathBuf>,
}

impl OrganizationManager {
    pub fn new(
        explicit: Option<String>,
        configured: Option<String>,
        lean_config: Option<PathBuf>,
    ) -> Self {
        Self {
            explicit,
            configured,
            lean_config,
        }
    }
}

impl OrganizationResolver for OrganizationManager {
    fn try_get_working_organization_id(&self) -> Result<String> {
        let direct = [&self.explicit, &self.configured]
            .into_iter()
            .flatten()
            .find(|id| !id.trim().is_empty());
        if let Some(id) = direct {
            return Ok(id.trim().to_string());
        }

        if let Some(path) = &self.lean_config {
            if let Some(id) = LeanConfig::load(path)?.organization_id() {
                return Ok(id);
            }
        }

        Err(LeanCryptError::OrganizationNotFound)
    }
}
