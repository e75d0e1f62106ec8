//! Settings projection.
//!
//! Each granted `Status/Settings/<path>` is walked one segment at a time through the
//! output and the settings tree together. The output gets a node for a segment before
//! the tree is asked for it, so a path that stops resolving leaves an empty object at
//! the depth where it failed. A path that resolves copies the tree value over its last
//! node. Overlapping grants merge into one object, and later grants overwrite earlier
//! ones in the order the caller holds them.

use crate::config::SettingsTree;
use crate::permissions::Permissions;
use serde_json::{Map, Value};
use tracing::warn;

/// Permission prefix selecting settings paths
pub const SETTINGS_PREFIX: &str = "Status/Settings/";

/// Granted subset of `tree`; `None` when no grant resolved
pub fn project_settings<P>(tree: &SettingsTree, permissions: &P) -> Option<Value>
where
    P: Permissions + ?Sized,
{
    let mut output = Map::new();
    let mut has_results = false;

    for permission in permissions.permissions() {
        let Some(path) = permission.strip_prefix(SETTINGS_PREFIX) else {
            continue;
        };
        let segments: Vec<&str> = path.split('/').collect();

        if copy_path(&mut output, tree.root(), &segments) {
            has_results = true;
        } else {
            warn!(
                "Property \"{path}\" doesn't exist on the Settings object. This is probably a misconfiguration in the settings"
            );
        }
    }

    has_results.then_some(Value::Object(output))
}

/// Walk `segments` through `output` and `input` in lock-step.
///
/// Returns `false` at the first segment `input` does not hold, leaving the nodes
/// created so far in place.
fn copy_path(output: &mut Map<String, Value>, input: &Value, segments: &[&str]) -> bool {
    let mut node = output;
    let mut input = input;

    for (depth, key) in segments.iter().enumerate() {
        let entry = node
            .entry((*key).to_string())
            .or_insert_with(|| Value::Object(Map::new()));

        let Some(found) = SettingsTree::child(input, key) else {
            return false;
        };

        if depth + 1 == segments.len() {
            *entry = found.clone();
            return true;
        }

        // a scalar already copied here cannot hold deeper settings
        node = match entry {
            Value::Object(map) => map,
            _ => return false,
        };
        input = found;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::PermissionSet;
    use serde_json::json;

    fn tree() -> SettingsTree {
        SettingsTree::from_value(json!({
            "A": { "B": 5, "C": 7, "D": { "E": true } },
            "Top": "level"
        }))
        .unwrap()
    }

    #[test]
    fn test_sibling_paths_merge() {
        let perms: PermissionSet = ["Status/Settings/A/B", "Status/Settings/A/C"]
            .into_iter()
            .collect();
        assert_eq!(
            project_settings(&tree(), &perms),
            Some(json!({ "A": { "B": 5, "C": 7 } }))
        );
    }

    #[test]
    fn test_no_grants_is_absent() {
        let perms: PermissionSet = ["Status/Players"].into_iter().collect();
        assert_eq!(project_settings(&tree(), &perms), None);
    }

    #[test]
    fn test_unknown_path_leaves_empty_node() {
        let perms: PermissionSet = ["Status/Settings/Nonexistent", "Status/Settings/Top"]
            .into_iter()
            .collect();
        assert_eq!(
            project_settings(&tree(), &perms),
            Some(json!({ "Nonexistent": {}, "Top": "level" }))
        );
    }

    #[test]
    fn test_miss_stops_at_failing_depth() {
        let tree = SettingsTree::from_value(json!({ "Server": { "MaxPlayers": 8 } })).unwrap();
        let perms: PermissionSet = [
            "Status/Settings/Server/MaxPlayers",
            "Status/Settings/Server/Nope",
            "Status/Settings/Foo/Bar",
        ]
        .into_iter()
        .collect();
        assert_eq!(
            project_settings(&tree, &perms),
            Some(json!({ "Server": { "MaxPlayers": 8, "Nope": {} }, "Foo": {} }))
        );
    }

    #[test]
    fn test_only_unknown_paths_is_absent() {
        let perms: PermissionSet = ["Status/Settings/A/Missing"].into_iter().collect();
        assert_eq!(project_settings(&tree(), &perms), None);
    }

    #[test]
    fn test_whole_subtree_and_leaf_overlap() {
        let perms: PermissionSet = ["Status/Settings/A", "Status/Settings/A/D/E"]
            .into_iter()
            .collect();
        assert_eq!(
            project_settings(&tree(), &perms),
            Some(json!({ "A": { "B": 5, "C": 7, "D": { "E": true } } }))
        );
    }

    #[test]
    fn test_copied_scalar_is_kept() {
        let perms: PermissionSet = ["Status/Settings/Top", "Status/Settings/Top/Deeper"]
            .into_iter()
            .collect();
        assert_eq!(
            project_settings(&tree(), &perms),
            Some(json!({ "Top": "level" }))
        );
    }

    #[test]
    fn test_leaf_overwrites_placeholder() {
        let perms: PermissionSet = ["Status/Settings/A/Missing", "Status/Settings/A"]
            .into_iter()
            .collect();
        assert_eq!(
            project_settings(&tree(), &perms),
            Some(json!({ "A": { "B": 5, "C": 7, "D": { "E": true } } }))
        );
    }
}
