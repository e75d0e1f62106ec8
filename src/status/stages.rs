//! Stage name → kingdom lookup.
//!
//! Stage names map to a short alias (`"SandWorldHomeStage"` → `"sand"`), and aliases
//! map to the kingdom's display name. Stages missing from the table resolve to
//! nothing rather than an error.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Alias → home stage, in story order
pub const HOME_STAGES: [(&str, &str); 18] = [
    ("cap", "CapWorldHomeStage"),
    ("cascade", "WaterfallWorldHomeStage"),
    ("sand", "SandWorldHomeStage"),
    ("lake", "LakeWorldHomeStage"),
    ("wooded", "ForestWorldHomeStage"),
    ("cloud", "CloudWorldHomeStage"),
    ("lost", "ClashWorldHomeStage"),
    ("metro", "CityWorldHomeStage"),
    ("sea", "SeaWorldHomeStage"),
    ("snow", "SnowWorldHomeStage"),
    ("lunch", "LavaWorldHomeStage"),
    ("ruined", "BossRaidWorldHomeStage"),
    ("bowser", "SkyWorldHomeStage"),
    ("moon", "MoonWorldHomeStage"),
    ("mush", "PeachWorldHomeStage"),
    ("dark", "Special1WorldHomeStage"),
    ("darker", "Special2WorldHomeStage"),
    ("odyssey", "HomeShipInsideStage"),
];

const KINGDOMS: [(&str, &str); 18] = [
    ("cap", "Cap Kingdom"),
    ("cascade", "Cascade Kingdom"),
    ("sand", "Sand Kingdom"),
    ("lake", "Lake Kingdom"),
    ("wooded", "Wooded Kingdom"),
    ("cloud", "Cloud Kingdom"),
    ("lost", "Lost Kingdom"),
    ("metro", "Metro Kingdom"),
    ("sea", "Seaside Kingdom"),
    ("snow", "Snow Kingdom"),
    ("lunch", "Luncheon Kingdom"),
    ("ruined", "Ruined Kingdom"),
    ("bowser", "Bowser's Kingdom"),
    ("moon", "Moon Kingdom"),
    ("mush", "Mushroom Kingdom"),
    ("dark", "Dark Side"),
    ("darker", "Darker Side"),
    ("odyssey", "Odyssey"),
];

/// Sub-stages (shops, towers, bonus rooms) grouped by the alias of their kingdom
const SUB_STAGES: &[(&str, &[&str])] = &[
    (
        "cap",
        &[
            "CapWorldTowerStage",
            "FrogSearchExStage",
            "PoisonWaveExStage",
            "PushBlockExStage",
            "RollingExStage",
        ],
    ),
    (
        "cascade",
        &[
            "TrexPoppunExStage",
            "Lift2DExStage",
            "WanwanClashExStage",
            "CapAppearExStage",
            "WindBlowExStage",
        ],
    ),
    (
        "sand",
        &[
            "SandWorldShopStage",
            "SandWorldSlotStage",
            "SandWorldVibrationStage",
            "SandWorldSecretStage",
            "SandWorldMeganeExStage",
            "SandWorldKillerExStage",
            "SandWorldPressExStage",
            "SandWorldSphinxExStage",
            "SandWorldCostumeStage",
            "SandWorldPyramid000Stage",
            "SandWorldPyramid001Stage",
            "SandWorldUnderground000Stage",
            "SandWorldUnderground001Stage",
            "SandWorldRotateExStage",
            "MeganeLiftExStage",
            "RocketFlowerExStage",
            "WaterTubeExStage",
        ],
    ),
    (
        "lake",
        &[
            "LakeWorldShopStage",
            "FastenerExStage",
            "TrampolineWallCatchExStage",
            "GotogotonExStage",
            "FrogPoisonExStage",
        ],
    ),
    (
        "wooded",
        &[
            "ForestWorldWaterExStage",
            "ForestWorldTowerStage",
            "ForestWorldBossStage",
            "ForestWorldBonusStage",
            "ForestWorldCloudBonusExStage",
            "FogMountainExStage",
            "RailCollisionExStage",
            "ShootingElevatorExStage",
            "PackunPoisonExStage",
            "AnimalChaseExStage",
            "KillerRoadExStage",
        ],
    ),
    ("cloud", &["FukuwaraiKuriboStage", "Cube2DExStage"]),
    (
        "lost",
        &["ClashWorldShopStage", "ImomuPoisonExStage", "JangoExStage"],
    ),
    (
        "metro",
        &[
            "CityWorldMainTowerStage",
            "CityWorldFactoryStage",
            "CityWorldShop01Stage",
            "CityWorldSandSlotStage",
            "CityPeopleRoadStage",
            "PoleGrabCeilExStage",
            "TrexBikeExStage",
            "PoleKillerExStage",
            "Note2D3DRoomExStage",
            "ShootingCityExStage",
            "CapRotatePackunExStage",
            "RadioControlExStage",
            "ElectricWireExStage",
            "Theater2DExStage",
            "DonsukeExStage",
            "SwingSteelExStage",
            "BikeSteelExStage",
        ],
    ),
    (
        "sea",
        &[
            "SeaWorldUtsuboCaveStage",
            "SeaWorldVibrationStage",
            "SeaWorldSecretStage",
            "SeaWorldCostumeStage",
            "SeaWorldSneakingManStage",
            "SenobiTowerExStage",
            "CloudExStage",
            "WaterValleyExStage",
            "ReflectBombExStage",
            "TogezoRotateExStage",
        ],
    ),
    (
        "snow",
        &[
            "SnowWorldTownStage",
            "SnowWorldShopStage",
            "SnowWorldLobby000Stage",
            "SnowWorldLobby001Stage",
            "SnowWorldRaceTutorialStage",
            "SnowWorldRace000Stage",
            "SnowWorldRace001Stage",
            "SnowWorldCostumeStage",
            "SnowWorldCloudBonusExStage",
            "IceWalkerExStage",
            "IceWaterBlockExStage",
            "ByugoPuzzleExStage",
            "IceWaterDashExStage",
            "SnowWorldLobbyExStage",
            "SnowWorldRaceExStage",
            "SnowWorldRaceHardExStage",
            "KillerRailCollisionExStage",
        ],
    ),
    (
        "lunch",
        &[
            "LavaWorldShopStage",
            "LavaWorldCostumeStage",
            "ForkExStage",
            "LavaWorldExcavationExStage",
            "LavaWorldClockExStage",
            "LavaWorldBubbleLaneExStage",
            "LavaWorldTreasureStage",
            "GabuzouClockExStage",
            "CapAppearLavaLiftExStage",
            "LavaWorldFenceLiftExStage",
            "LavaWorldUpDownExStage",
            "YoshiCloudExStage",
        ],
    ),
    ("ruined", &["DotTowerExStage", "BullRunExStage"]),
    (
        "bowser",
        &[
            "SkyWorldShopStage",
            "SkyWorldCostumeStage",
            "SkyWorldCloudBonusExStage",
            "SkyWorldTreasureStage",
            "JizoSwitchExStage",
            "TsukkunRotateExStage",
            "KaronWingTowerStage",
            "TsukkunClimbExStage",
        ],
    ),
    (
        "moon",
        &[
            "MoonWorldShopRoom",
            "MoonWorldCaptureParadeStage",
            "MoonWorldWeddingRoomStage",
            "MoonWorldWeddingRoom2Stage",
            "MoonWorldSphinxRoom",
            "MoonWorldBasementStage",
            "MoonWorldKoopa1Stage",
            "MoonWorldKoopa2Stage",
            "MoonAthleticExStage",
            "Galaxy2DExStage",
        ],
    ),
    (
        "mush",
        &[
            "PeachWorldShopStage",
            "PeachWorldCastleStage",
            "PeachWorldCostumeStage",
            "PeachWorldPictureBossMagmaStage",
            "PeachWorldPictureBossRaidStage",
            "PeachWorldPictureBossForestStage",
            "PeachWorldPictureBossKnuckleStage",
            "PeachWorldPictureGiantWanderBossStage",
            "PeachWorldPictureMofumofuStage",
            "FukuwaraiMarioStage",
            "DotHardExStage",
            "YoshiFruitShoppingStage",
        ],
    ),
    (
        "dark",
        &[
            "Special1WorldTowerStackerStage",
            "Special1WorldTowerBombTailStage",
            "Special1WorldTowerCapThrowerStage",
            "Special1WorldTowerFireBlowerStage",
        ],
    ),
    (
        "darker",
        &[
            "Special2WorldCloudStage",
            "Special2WorldKoopaStage",
            "Special2WorldLavaStage",
        ],
    ),
];

static STAGE_TO_ALIAS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let homes = HOME_STAGES.iter().map(|&(alias, stage)| (stage, alias));
    let subs = SUB_STAGES
        .iter()
        .flat_map(|&(alias, stages)| stages.iter().map(move |&stage| (stage, alias)));
    homes.chain(subs).collect()
});

static ALIAS_TO_KINGDOM: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| KINGDOMS.iter().copied().collect());

/// Short alias of the kingdom `stage` belongs to
pub fn alias_for_stage(stage: &str) -> Option<&'static str> {
    STAGE_TO_ALIAS.get(stage).copied()
}

/// Display name for a kingdom alias
pub fn kingdom_for_alias(alias: &str) -> Option<&'static str> {
    ALIAS_TO_KINGDOM.get(alias).copied()
}

/// Home stage for a kingdom alias
pub fn home_stage_for_alias(alias: &str) -> Option<&'static str> {
    HOME_STAGES
        .iter()
        .find(|(candidate, _)| *candidate == alias)
        .map(|&(_, stage)| stage)
}

/// Kingdom display name for a stage, via its alias
pub fn kingdom_for_stage(stage: &str) -> Option<&'static str> {
    alias_for_stage(stage).and_then(kingdom_for_alias)
}
