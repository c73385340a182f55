//! Identifiers shared with the generator: dimensions, ruleset versions and
//! structure kinds, with the integer ids the native enums use and the
//! `minecraft:`-namespaced resource ids players know them by.

use std::fmt;

use serde::{Serialize, Serializer};

/// A world dimension. The integer ids match the generator's convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dimension {
    Nether,
    Overworld,
    End,
}

impl Dimension {
    pub fn id(self) -> i32 {
        match self {
            Dimension::Nether => -1,
            Dimension::Overworld => 0,
            Dimension::End => 1,
        }
    }

    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            -1 => Some(Dimension::Nether),
            0 => Some(Dimension::Overworld),
            1 => Some(Dimension::End),
            _ => None,
        }
    }

    /// Map a dimension resource id. Anything unrecognized is treated as the
    /// overworld, matching how world tooling conventionally defaults.
    pub fn from_resource_id(id: &str) -> Self {
        match id {
            "minecraft:the_nether" | "the_nether" | "nether" => Dimension::Nether,
            "minecraft:the_end" | "the_end" | "end" => Dimension::End,
            _ => Dimension::Overworld,
        }
    }

    pub fn resource_id(self) -> &'static str {
        match self {
            Dimension::Nether => "minecraft:the_nether",
            Dimension::Overworld => "minecraft:overworld",
            Dimension::End => "minecraft:the_end",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resource_id())
    }
}

/// Generator ruleset version. The ids are the generator's MCVersion enum
/// values for the releases this tool supports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum McVersion {
    V1_16_5,
    V1_17_1,
    V1_18_2,
    V1_19_4,
    V1_20_6,
    V1_21,
}

impl McVersion {
    pub const NEWEST: McVersion = McVersion::V1_21;

    pub fn id(self) -> i32 {
        match self {
            McVersion::V1_16_5 => 19,
            McVersion::V1_17_1 => 20,
            McVersion::V1_18_2 => 21,
            McVersion::V1_19_4 => 23,
            McVersion::V1_20_6 => 24,
            McVersion::V1_21 => 27,
        }
    }

    /// Parse loose version text ("1.20.4", "v1.18", ...) to the nearest
    /// supported ruleset. Blank or unrecognized input falls back to the
    /// newest supported version.
    pub fn from_version_text(raw: &str) -> Self {
        let lowered = raw.trim().to_ascii_lowercase();
        let s = lowered.strip_prefix('v').unwrap_or(&lowered);
        if s.starts_with("1.21") {
            McVersion::V1_21
        } else if s.starts_with("1.20") {
            McVersion::V1_20_6
        } else if s.starts_with("1.19") {
            McVersion::V1_19_4
        } else if s.starts_with("1.18") {
            McVersion::V1_18_2
        } else if s.starts_with("1.17") {
            McVersion::V1_17_1
        } else if s.starts_with("1.16") {
            McVersion::V1_16_5
        } else {
            McVersion::NEWEST
        }
    }
}

/// A structure kind known to the generator.
///
/// The ruined portal generates in both the overworld and the nether under
/// the same resource id but distinct generator ids, hence the two variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StructureKind {
    DesertPyramid,
    JungleTemple,
    SwampHut,
    Igloo,
    Village,
    OceanRuin,
    Shipwreck,
    Monument,
    Mansion,
    PillagerOutpost,
    RuinedPortal,
    RuinedPortalNether,
    AncientCity,
    BuriedTreasure,
    Mineshaft,
    TrailRuins,
    TrialChambers,
    Fortress,
    BastionRemnant,
    EndCity,
}

const OVERWORLD_KINDS: &[StructureKind] = &[
    StructureKind::DesertPyramid,
    StructureKind::JungleTemple,
    StructureKind::SwampHut,
    StructureKind::Igloo,
    StructureKind::Village,
    StructureKind::OceanRuin,
    StructureKind::Shipwreck,
    StructureKind::Monument,
    StructureKind::Mansion,
    StructureKind::PillagerOutpost,
    StructureKind::RuinedPortal,
    StructureKind::AncientCity,
    StructureKind::BuriedTreasure,
    StructureKind::Mineshaft,
    StructureKind::TrailRuins,
    StructureKind::TrialChambers,
];

const NETHER_KINDS: &[StructureKind] = &[
    StructureKind::Fortress,
    StructureKind::BastionRemnant,
    StructureKind::RuinedPortalNether,
];

const END_KINDS: &[StructureKind] = &[StructureKind::EndCity];

impl StructureKind {
    /// The generator's StructureType enum value.
    pub fn id(self) -> i32 {
        match self {
            StructureKind::DesertPyramid => 1,
            StructureKind::JungleTemple => 2,
            StructureKind::SwampHut => 3,
            StructureKind::Igloo => 4,
            StructureKind::Village => 5,
            StructureKind::OceanRuin => 6,
            StructureKind::Shipwreck => 7,
            StructureKind::Monument => 8,
            StructureKind::Mansion => 9,
            StructureKind::PillagerOutpost => 10,
            StructureKind::RuinedPortal => 11,
            StructureKind::RuinedPortalNether => 12,
            StructureKind::AncientCity => 13,
            StructureKind::BuriedTreasure => 14,
            StructureKind::Mineshaft => 15,
            StructureKind::Fortress => 18,
            StructureKind::BastionRemnant => 19,
            StructureKind::EndCity => 20,
            StructureKind::TrailRuins => 23,
            StructureKind::TrialChambers => 24,
        }
    }

    /// The dimension this kind generates in.
    pub fn dimension(self) -> Dimension {
        match self {
            StructureKind::Fortress
            | StructureKind::BastionRemnant
            | StructureKind::RuinedPortalNether => Dimension::Nether,
            StructureKind::EndCity => Dimension::End,
            _ => Dimension::Overworld,
        }
    }

    pub fn resource_id(self) -> &'static str {
        match self {
            StructureKind::DesertPyramid => "minecraft:desert_pyramid",
            StructureKind::JungleTemple => "minecraft:jungle_temple",
            StructureKind::SwampHut => "minecraft:swamp_hut",
            StructureKind::Igloo => "minecraft:igloo",
            StructureKind::Village => "minecraft:village",
            StructureKind::OceanRuin => "minecraft:ocean_ruin",
            StructureKind::Shipwreck => "minecraft:shipwreck",
            StructureKind::Monument => "minecraft:monument",
            StructureKind::Mansion => "minecraft:mansion",
            StructureKind::PillagerOutpost => "minecraft:pillager_outpost",
            StructureKind::RuinedPortal | StructureKind::RuinedPortalNether => {
                "minecraft:ruined_portal"
            }
            StructureKind::AncientCity => "minecraft:ancient_city",
            StructureKind::BuriedTreasure => "minecraft:buried_treasure",
            StructureKind::Mineshaft => "minecraft:mineshaft",
            StructureKind::TrailRuins => "minecraft:trail_ruins",
            StructureKind::TrialChambers => "minecraft:trial_chambers",
            StructureKind::Fortress => "minecraft:fortress",
            StructureKind::BastionRemnant => "minecraft:bastion_remnant",
            StructureKind::EndCity => "minecraft:end_city",
        }
    }

    /// Every kind that generates in `dimension`.
    pub fn for_dimension(dimension: Dimension) -> &'static [StructureKind] {
        match dimension {
            Dimension::Overworld => OVERWORLD_KINDS,
            Dimension::Nether => NETHER_KINDS,
            Dimension::End => END_KINDS,
        }
    }

    /// Resolve a resource id within a dimension. The dimension matters
    /// because `minecraft:ruined_portal` names a different generator kind in
    /// the overworld and the nether.
    pub fn parse(resource_id: &str, dimension: Dimension) -> Option<StructureKind> {
        StructureKind::for_dimension(dimension)
            .iter()
            .copied()
            .find(|kind| kind.resource_id() == resource_id)
    }
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resource_id())
    }
}

impl Serialize for StructureKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.resource_id())
    }
}
