//! # Status Projection
//!
//! Builds the permission-filtered view of the server served by the status API: a
//! pruned copy of the settings tree and one record per live client.
//!
//! ## Output
//! ```json
//! { "Settings": { "Server": { "MaxPlayers": 8 } }, "Players": [ { "Name": "Mario" } ] }
//! ```
//! Either member is omitted when nothing was granted. Player fields that are
//! granted but unknown are written as `null`.
//!
//! ## Consistency
//! The client list is copied under a short read lock and each client is read
//! afterwards. A client joining or leaving mid-projection may or may not appear,
//! but every record is built from one client's own slots.

pub mod players;
pub mod settings;
pub mod stages;

pub use players::{
    project_player, project_players, Costume, PlayerField, PlayerRecord, Position, Rotation,
    PLAYERS_PERMISSION, PLAYER_FIELDS,
};
pub use settings::{project_settings, SETTINGS_PREFIX};
pub use stages::kingdom_for_stage;

use crate::config::SettingsTree;
use crate::error::Result;
use crate::permissions::Permissions;
use crate::registry::Registry;
use crate::utils::metrics::Timer;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

/// Status response body
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusSnapshot {
    #[serde(rename = "Settings", skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,

    #[serde(rename = "Players", skip_serializing_if = "Option::is_none")]
    pub players: Option<Vec<PlayerRecord>>,
}

impl StatusSnapshot {
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Project `registry` and `tree` through `permissions`
#[instrument(level = "debug", skip_all)]
pub fn project<P>(registry: &Registry, tree: &SettingsTree, permissions: &P) -> StatusSnapshot
where
    P: Permissions + ?Sized,
{
    let _timer = Timer::start("status_snapshot");

    let settings = project_settings(tree, permissions);
    let players = project_players(&registry.clients(), permissions);

    registry.metrics().status_snapshot();
    debug!(
        settings = settings.is_some(),
        players = players.as_ref().map(Vec::len),
        "Status snapshot built"
    );

    StatusSnapshot { settings, players }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::permissions::PermissionSet;
    use serde_json::json;

    #[test]
    fn test_nothing_granted_is_empty_object() {
        let registry = Registry::new(8);
        let tree = SettingsTree::from_settings(&Settings::default()).unwrap();
        let snapshot = project(&registry, &tree, &PermissionSet::new());
        assert_eq!(snapshot.to_json().unwrap(), "{}");
    }

    #[test]
    fn test_settings_and_empty_player_list() {
        let registry = Registry::new(8);
        let tree = SettingsTree::from_settings(&Settings::default()).unwrap();
        let perms: PermissionSet = ["Status/Players", "Status/Settings/Server/MaxPlayers"]
            .into_iter()
            .collect();

        let snapshot = project(&registry, &tree, &perms);
        assert_eq!(
            snapshot.to_value().unwrap(),
            json!({ "Settings": { "Server": { "MaxPlayers": 8 } }, "Players": [] })
        );
        assert_eq!(registry.metrics().snapshot().status_snapshots, 1);
    }
}
