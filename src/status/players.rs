//! Player projection.
//!
//! A fixed, ordered table pairs each `Status/Players/<Field>` permission with the
//! extractor that reads that field from a [`Client`]. Only granted extractors run,
//! so an ungranted field never appears in the record, while a granted field with no
//! known value is written as `null`.

use super::stages::kingdom_for_stage;
use crate::core::math::{Quat, Vec3};
use crate::permissions::Permissions;
use crate::registry::Client;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// Permission gating the whole player list
pub const PLAYERS_PERMISSION: &str = "Status/Players";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    #[serde(rename = "X")]
    pub x: f32,
    #[serde(rename = "Y")]
    pub y: f32,
    #[serde(rename = "Z")]
    pub z: f32,
}

impl From<Vec3> for Position {
    fn from(v: Vec3) -> Self {
        Self { x: v.x, y: v.y, z: v.z }
    }
}

/// Quaternion emitted in `W, X, Y, Z` order
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rotation {
    #[serde(rename = "W")]
    pub w: f32,
    #[serde(rename = "X")]
    pub x: f32,
    #[serde(rename = "Y")]
    pub y: f32,
    #[serde(rename = "Z")]
    pub z: f32,
}

impl From<Quat> for Rotation {
    fn from(q: Quat) -> Self {
        Self {
            w: q.w,
            x: q.x,
            y: q.y,
            z: q.z,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Costume {
    pub cap: String,
    pub body: String,
}

/// One extracted value, tagged by the record field it fills
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerField {
    Id(Uuid),
    Name(String),
    Kingdom(Option<&'static str>),
    Stage(Option<String>),
    Scenario(Option<u8>),
    Position(Option<Position>),
    Rotation(Option<Rotation>),
    Tagged(Option<bool>),
    Costume(Option<Costume>),
    Capture(Option<String>),
    Is2D(Option<bool>),
    IPv4(Option<String>),
}

/// Per-player output record.
///
/// The outer `Option` is presence (granted or not); the inner one is the value,
/// serialized as `null` when unknown.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerRecord {
    #[serde(rename = "ID", skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(rename = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "Kingdom", skip_serializing_if = "Option::is_none")]
    pub kingdom: Option<Option<&'static str>>,
    #[serde(rename = "Stage", skip_serializing_if = "Option::is_none")]
    pub stage: Option<Option<String>>,
    #[serde(rename = "Scenario", skip_serializing_if = "Option::is_none")]
    pub scenario: Option<Option<u8>>,
    #[serde(rename = "Position", skip_serializing_if = "Option::is_none")]
    pub position: Option<Option<Position>>,
    #[serde(rename = "Rotation", skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Option<Rotation>>,
    #[serde(rename = "Tagged", skip_serializing_if = "Option::is_none")]
    pub tagged: Option<Option<bool>>,
    #[serde(rename = "Costume", skip_serializing_if = "Option::is_none")]
    pub costume: Option<Option<Costume>>,
    #[serde(rename = "Capture", skip_serializing_if = "Option::is_none")]
    pub capture: Option<Option<String>>,
    #[serde(rename = "Is2D", skip_serializing_if = "Option::is_none")]
    pub is_2d: Option<Option<bool>>,
    #[serde(rename = "IPv4", skip_serializing_if = "Option::is_none")]
    pub ipv4: Option<Option<String>>,
}

impl PlayerRecord {
    /// Mark `field` present with its value
    pub fn apply(&mut self, field: PlayerField) {
        match field {
            PlayerField::Id(v) => self.id = Some(v),
            PlayerField::Name(v) => self.name = Some(v),
            PlayerField::Kingdom(v) => self.kingdom = Some(v),
            PlayerField::Stage(v) => self.stage = Some(v),
            PlayerField::Scenario(v) => self.scenario = Some(v),
            PlayerField::Position(v) => self.position = Some(v),
            PlayerField::Rotation(v) => self.rotation = Some(v),
            PlayerField::Tagged(v) => self.tagged = Some(v),
            PlayerField::Costume(v) => self.costume = Some(v),
            PlayerField::Capture(v) => self.capture = Some(v),
            PlayerField::Is2D(v) => self.is_2d = Some(v),
            PlayerField::IPv4(v) => self.ipv4 = Some(v),
        }
    }
}

pub type Extractor = fn(&Client) -> PlayerField;

/// Permission path → extractor, in output order
pub const PLAYER_FIELDS: [(&str, Extractor); 12] = [
    ("Status/Players/ID", extract_id),
    ("Status/Players/Name", extract_name),
    ("Status/Players/Kingdom", extract_kingdom),
    ("Status/Players/Stage", extract_stage),
    ("Status/Players/Scenario", extract_scenario),
    ("Status/Players/Position", extract_position),
    ("Status/Players/Rotation", extract_rotation),
    ("Status/Players/Tagged", extract_tagged),
    ("Status/Players/Costume", extract_costume),
    ("Status/Players/Capture", extract_capture),
    ("Status/Players/Is2D", extract_is_2d),
    ("Status/Players/IPv4", extract_ipv4),
];

fn extract_id(c: &Client) -> PlayerField {
    PlayerField::Id(c.id())
}

fn extract_name(c: &Client) -> PlayerField {
    PlayerField::Name(c.name())
}

fn extract_kingdom(c: &Client) -> PlayerField {
    PlayerField::Kingdom(c.last_game().and_then(|g| kingdom_for_stage(&g.stage)))
}

fn extract_stage(c: &Client) -> PlayerField {
    PlayerField::Stage(c.last_game().map(|g| g.stage.clone()))
}

fn extract_scenario(c: &Client) -> PlayerField {
    PlayerField::Scenario(c.last_game().map(|g| g.scenario_num))
}

fn extract_position(c: &Client) -> PlayerField {
    PlayerField::Position(c.last_player().map(|p| p.position.into()))
}

fn extract_rotation(c: &Client) -> PlayerField {
    PlayerField::Rotation(c.last_player().map(|p| p.rotation.into()))
}

fn extract_tagged(c: &Client) -> PlayerField {
    PlayerField::Tagged(c.seeking())
}

fn extract_costume(c: &Client) -> PlayerField {
    PlayerField::Costume(c.costume().map(|p| Costume {
        cap: p.cap_name.clone(),
        body: p.body_name.clone(),
    }))
}

fn extract_capture(c: &Client) -> PlayerField {
    PlayerField::Capture(
        c.last_capture()
            .map(|p| p.model_name.clone())
            .filter(|model| !model.is_empty()),
    )
}

fn extract_is_2d(c: &Client) -> PlayerField {
    PlayerField::Is2D(c.last_game().map(|g| g.is_2d))
}

fn extract_ipv4(c: &Client) -> PlayerField {
    PlayerField::IPv4(c.address().map(|addr| addr.ip().to_string()))
}

/// Record for one client with only the granted fields
pub fn project_player<P>(client: &Client, permissions: &P) -> PlayerRecord
where
    P: Permissions + ?Sized,
{
    let mut record = PlayerRecord::default();
    for (path, extract) in PLAYER_FIELDS {
        if permissions.has_permission(path) {
            record.apply(extract(client));
        }
    }
    record
}

/// Records for `clients`; `None` unless `Status/Players` is granted
pub fn project_players<P>(clients: &[Arc<Client>], permissions: &P) -> Option<Vec<PlayerRecord>>
where
    P: Permissions + ?Sized,
{
    if !permissions.has_permission(PLAYERS_PERMISSION) {
        return None;
    }
    Some(
        clients
            .iter()
            .map(|client| project_player(client, permissions))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::Vec3;
    use crate::core::packets::{CapturePacket, CostumePacket, GamePacket, PlayerPacket};
    use crate::permissions::PermissionSet;
    use serde_json::json;

    fn perms(paths: &[&str]) -> PermissionSet {
        paths.iter().copied().collect()
    }

    #[test]
    fn test_name_only() {
        let client = Client::new(Uuid::new_v4(), "Mario", None);
        let record = project_player(&client, &perms(&["Status/Players/Name"]));
        assert_eq!(serde_json::to_value(&record).unwrap(), json!({ "Name": "Mario" }));
    }

    #[test]
    fn test_unknown_values_are_null() {
        let client = Client::new(Uuid::new_v4(), "Luigi", None);
        let record = project_player(
            &client,
            &perms(&[
                "Status/Players/Stage",
                "Status/Players/Position",
                "Status/Players/Tagged",
                "Status/Players/IPv4",
            ]),
        );
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({ "Stage": null, "Position": null, "Tagged": null, "IPv4": null })
        );
    }

    #[test]
    fn test_empty_capture_is_null() {
        let client = Client::new(Uuid::new_v4(), "Peach", None);
        client.observe(&CapturePacket::new("").into());
        let record = project_player(&client, &perms(&["Status/Players/Capture"]));
        assert_eq!(record.capture, Some(None));

        client.observe(&CapturePacket::new("Kuribo").into());
        let record = project_player(&client, &perms(&["Status/Players/Capture"]));
        assert_eq!(record.capture, Some(Some("Kuribo".to_string())));
    }

    #[test]
    fn test_full_record() {
        let client = Client::new(
            Uuid::nil(),
            "Toad",
            Some("192.168.1.20:50000".parse().unwrap()),
        );
        client.observe(&GamePacket::new(true, 4, "LakeWorldHomeStage").into());
        client.observe(
            &PlayerPacket {
                position: Vec3::new(1.0, 2.0, 3.0),
                ..Default::default()
            }
            .into(),
        );
        client.observe(&CostumePacket::new("MarioTuxedo", "MarioTuxedoCap").into());

        let all: Vec<&str> = PLAYER_FIELDS.iter().map(|(path, _)| *path).collect();
        let record = project_player(&client, &perms(&all));
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "ID": "00000000-0000-0000-0000-000000000000",
                "Name": "Toad",
                "Kingdom": "Lake Kingdom",
                "Stage": "LakeWorldHomeStage",
                "Scenario": 4,
                "Position": { "X": 1.0, "Y": 2.0, "Z": 3.0 },
                "Rotation": { "W": 1.0, "X": 0.0, "Y": 0.0, "Z": 0.0 },
                "Tagged": null,
                "Costume": { "Cap": "MarioTuxedoCap", "Body": "MarioTuxedo" },
                "Capture": null,
                "Is2D": true,
                "IPv4": "192.168.1.20"
            })
        );
    }

    #[test]
    fn test_list_gate() {
        let clients = vec![Arc::new(Client::new(Uuid::new_v4(), "Mario", None))];
        assert!(project_players(&clients, &perms(&["Status/Players/Name"])).is_none());
        assert_eq!(
            project_players(&[], &perms(&["Status/Players"])),
            Some(Vec::new())
        );
    }
}
