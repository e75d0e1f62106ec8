//! # Permission Predicate
//!
//! The status projection only asks two questions of a caller: does it hold a given
//! path, and which paths does it hold. How grants are stored is up to the caller.
//!
//! Paths are hierarchical in spelling only. Holding `Status/Players` says nothing
//! about `Status/Players/IPv4`; each leaf is checked on its own.

use crate::config::Settings;

/// Permission grants held by one status request
pub trait Permissions {
    /// Whether `path` is granted exactly
    fn has_permission(&self, path: &str) -> bool;

    /// Every granted path, in the order it was granted
    fn permissions(&self) -> Box<dyn Iterator<Item = &str> + '_>;
}

/// Granted paths in grant order, without duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet {
    paths: Vec<String>,
}

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grants configured for `token` under `JsonApi.Tokens`; `None` for unknown tokens
    /// or while the API is disabled
    pub fn for_token(settings: &Settings, token: &str) -> Option<Self> {
        if !settings.json_api.enabled {
            return None;
        }
        settings
            .json_api
            .tokens
            .get(token)
            .map(|paths| paths.iter().cloned().collect())
    }

    /// Add `path`; a repeated grant keeps its first position
    pub fn grant(&mut self, path: impl Into<String>) -> &mut Self {
        let path = path.into();
        if !self.has_permission(&path) {
            self.paths.push(path);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for path in iter {
            set.grant(path);
        }
        set
    }
}

impl Permissions for PermissionSet {
    fn has_permission(&self, path: &str) -> bool {
        self.paths.iter().any(|granted| granted == path)
    }

    fn permissions(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.paths.iter().map(String::as_str))
    }
}
