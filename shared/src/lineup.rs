use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A grenade throw recipe for one map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lineup {
    pub id: u32,
    pub map: MapName,
    #[serde(rename = "type")]
    pub grenade: GrenadeType,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub setup_image_url: String,
    pub throw_image_url: String,
    pub difficulty: Difficulty,
    pub position: Position,
    pub site: Site,
    pub video_url: String,
    pub tickrate: Tickrate,
    pub technique: Technique,
    #[serde(default)]
    pub steps: Vec<String>,
}

/// Returned when a `<select>` value or serialized slug names no known variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSlug {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {:?}", self.kind, self.value)
    }
}

impl std::error::Error for UnknownSlug {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapName {
    Mirage,
    Dust2,
    Inferno,
    Overpass,
    Ancient,
    Vertigo,
    Anubis,
    Nuke,
}

impl MapName {
    pub const ALL: [MapName; 8] = [
        Self::Mirage,
        Self::Dust2,
        Self::Inferno,
        Self::Overpass,
        Self::Ancient,
        Self::Vertigo,
        Self::Anubis,
        Self::Nuke,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Self::Mirage => "mirage",
            Self::Dust2 => "dust2",
            Self::Inferno => "inferno",
            Self::Overpass => "overpass",
            Self::Ancient => "ancient",
            Self::Vertigo => "vertigo",
            Self::Anubis => "anubis",
            Self::Nuke => "nuke",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Mirage => "Mirage",
            Self::Dust2 => "Dust 2",
            Self::Inferno => "Inferno",
            Self::Overpass => "Overpass",
            Self::Ancient => "Ancient",
            Self::Vertigo => "Vertigo",
            Self::Anubis => "Anubis",
            Self::Nuke => "Nuke",
        }
    }
}

impl FromStr for MapName {
    type Err = UnknownSlug;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|map| map.slug() == s)
            .ok_or_else(|| UnknownSlug {
                kind: "map",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrenadeType {
    Smoke,
    Flash,
    Molotov,
    He,
}

impl GrenadeType {
    pub const ALL: [GrenadeType; 4] = [Self::Smoke, Self::Flash, Self::Molotov, Self::He];

    pub fn slug(self) -> &'static str {
        match self {
            Self::Smoke => "smoke",
            Self::Flash => "flash",
            Self::Molotov => "molotov",
            Self::He => "he",
        }
    }

    /// Label used in the type selector.
    pub fn label(self) -> &'static str {
        match self {
            Self::Smoke => "Smoke",
            Self::Flash => "Flash",
            Self::Molotov => "Molotov",
            Self::He => "HE Grenade",
        }
    }
}

impl FromStr for GrenadeType {
    type Err = UnknownSlug;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|grenade| grenade.slug() == s)
            .ok_or_else(|| UnknownSlug {
                kind: "grenade type",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Badge (text, background) colors as RGB bytes.
    pub fn badge_rgb(self) -> ((u8, u8, u8), (u8, u8, u8)) {
        match self {
            Self::Easy => ((74, 222, 128), (34, 197, 94)),
            Self::Medium => ((250, 204, 21), (234, 179, 8)),
            Self::Hard => ((248, 113, 113), (239, 68, 68)),
        }
    }
}

/// One of the three broad map areas lineups are grouped under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Site {
    #[serde(rename = "A Site")]
    A,
    #[serde(rename = "B Site")]
    B,
    #[serde(rename = "Mid")]
    Mid,
}

impl Site {
    /// Render order for site sections within a map.
    pub const ALL: [Site; 3] = [Self::A, Self::B, Self::Mid];

    pub fn label(self) -> &'static str {
        match self {
            Self::A => "A Site",
            Self::B => "B Site",
            Self::Mid => "Mid",
        }
    }
}

/// Named callout the thrower stands at or throws toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "A Site")]
    ASite,
    #[serde(rename = "B Site")]
    BSite,
    Mid,
    #[serde(rename = "CT Spawn")]
    CtSpawn,
    #[serde(rename = "T Spawn")]
    TSpawn,
    Ramp,
    Outside,
    Secret,
    Heaven,
    Hell,
}

impl Position {
    pub fn label(self) -> &'static str {
        match self {
            Self::ASite => "A Site",
            Self::BSite => "B Site",
            Self::Mid => "Mid",
            Self::CtSpawn => "CT Spawn",
            Self::TSpawn => "T Spawn",
            Self::Ramp => "Ramp",
            Self::Outside => "Outside",
            Self::Secret => "Secret",
            Self::Heaven => "Heaven",
            Self::Hell => "Hell",
        }
    }

    /// The site this callout names outright, if any. Other callouts can sit under any site.
    pub fn implied_site(self) -> Option<Site> {
        match self {
            Self::ASite => Some(Site::A),
            Self::BSite => Some(Site::B),
            Self::Mid => Some(Site::Mid),
            Self::CtSpawn
            | Self::TSpawn
            | Self::Ramp
            | Self::Outside
            | Self::Secret
            | Self::Heaven
            | Self::Hell => None,
        }
    }

    pub fn is_consistent_with(self, site: Site) -> bool {
        self.implied_site().is_none_or(|implied| implied == site)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tickrate {
    #[serde(rename = "64")]
    Tick64,
    #[serde(rename = "128")]
    Tick128,
    #[serde(rename = "both")]
    Both,
}

impl Tickrate {
    pub fn label(self) -> &'static str {
        match self {
            Self::Tick64 => "64",
            Self::Tick128 => "128",
            Self::Both => "both",
        }
    }

    pub fn applies_to(self, server_tick: u16) -> bool {
        match self {
            Self::Tick64 => server_tick == 64,
            Self::Tick128 => server_tick == 128,
            Self::Both => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Technique {
    #[serde(rename = "jump throw")]
    JumpThrow,
    #[serde(rename = "running throw")]
    RunningThrow,
    #[serde(rename = "standing throw")]
    StandingThrow,
    #[serde(rename = "crouch throw")]
    CrouchThrow,
}

impl Technique {
    pub fn label(self) -> &'static str {
        match self {
            Self::JumpThrow => "jump throw",
            Self::RunningThrow => "running throw",
            Self::StandingThrow => "standing throw",
            Self::CrouchThrow => "crouch throw",
        }
    }
}
