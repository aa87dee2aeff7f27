use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use crate::lineup::{Difficulty, GrenadeType, Lineup, MapName, Position, Site, Technique, Tickrate};

static CATALOG: LazyLock<Vec<Lineup>> = LazyLock::new(sample_lineups);

/// The bundled lineup catalog. Built once, never mutated.
pub fn catalog() -> &'static [Lineup] {
    &CATALOG
}

pub fn find(lineups: &[Lineup], id: u32) -> Option<&Lineup> {
    lineups.iter().find(|lineup| lineup.id == id)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    DuplicateId(u32),
    SiteMismatch {
        id: u32,
        position: Position,
        site: Site,
    },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "duplicate lineup id {id}"),
            Self::SiteMismatch { id, position, site } => write!(
                f,
                "lineup {id} is positioned at {} but grouped under {}",
                position.label(),
                site.label()
            ),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Check id uniqueness and that site-naming positions agree with the lineup's site.
pub fn validate(lineups: &[Lineup]) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(lineups.len());
    for lineup in lineups {
        if !seen.insert(lineup.id) {
            return Err(CatalogError::DuplicateId(lineup.id));
        }
        if !lineup.position.is_consistent_with(lineup.site) {
            return Err(CatalogError::SiteMismatch {
                id: lineup.id,
                position: lineup.position,
                site: lineup.site,
            });
        }
    }
    Ok(())
}

fn unsplash(photo: &str) -> String {
    format!("https://images.unsplash.com/photo-{photo}?auto=format&fit=crop&w=800&q=80")
}

struct Record<'a> {
    id: u32,
    map: MapName,
    grenade: GrenadeType,
    title: &'a str,
    description: &'a str,
    photo: &'a str,
    difficulty: Difficulty,
    position: Position,
    site: Site,
    tickrate: Tickrate,
    technique: Technique,
    steps: [&'a str; 3],
}

impl Record<'_> {
    fn build(self) -> Lineup {
        let image = unsplash(self.photo);
        Lineup {
            id: self.id,
            map: self.map,
            grenade: self.grenade,
            title: self.title.to_string(),
            description: self.description.to_string(),
            image_url: image.clone(),
            setup_image_url: image.clone(),
            throw_image_url: image,
            difficulty: self.difficulty,
            position: self.position,
            site: self.site,
            video_url: format!("https://www.youtube.com/embed/example{}", self.id),
            tickrate: self.tickrate,
            technique: self.technique,
            steps: self.steps.iter().map(|step| step.to_string()).collect(),
        }
    }
}

fn sample_lineups() -> Vec<Lineup> {
    [
        Record {
            id: 1,
            map: MapName::Mirage,
            grenade: GrenadeType::Smoke,
            title: "A Site - CT Smoke",
            description: "Perfect smoke for CT spawn from T ramp",
            photo: "1542751371-adc38448a05e",
            difficulty: Difficulty::Easy,
            position: Position::ASite,
            site: Site::A,
            tickrate: Tickrate::Both,
            technique: Technique::JumpThrow,
            steps: [
                "Stand in the corner of T ramp",
                "Aim at the middle antenna",
                "Jump throw",
            ],
        },
        Record {
            id: 2,
            map: MapName::Dust2,
            grenade: GrenadeType::Flash,
            title: "Long A Flash",
            description: "Pop flash for long push",
            photo: "1579373903781-fd5c0c30c4cd",
            difficulty: Difficulty::Medium,
            position: Position::ASite,
            site: Site::A,
            tickrate: Tickrate::Tick128,
            technique: Technique::RunningThrow,
            steps: [
                "Run to the blue container",
                "Line up with the edge",
                "Running throw while pressing W",
            ],
        },
        Record {
            id: 3,
            map: MapName::Inferno,
            grenade: GrenadeType::Molotov,
            title: "B Default Plant Molly",
            description: "Molotov for default plant position from banana",
            photo: "1561141037-b9a2d4ac9bc3",
            difficulty: Difficulty::Hard,
            position: Position::BSite,
            site: Site::B,
            tickrate: Tickrate::Tick128,
            technique: Technique::JumpThrow,
            steps: [
                "Stand in the corner of banana",
                "Aim at the top of the wall",
                "Jump throw with run-up",
            ],
        },
        Record {
            id: 4,
            map: MapName::Vertigo,
            grenade: GrenadeType::Smoke,
            title: "A Ramp Smoke",
            description: "Smoke to block vision from A ramp",
            photo: "1590784176250-6879e9e99b1e",
            difficulty: Difficulty::Medium,
            position: Position::Ramp,
            site: Site::A,
            tickrate: Tickrate::Both,
            technique: Technique::StandingThrow,
            steps: [
                "Stand in the marked corner",
                "Aim at the edge of the building",
                "Standing throw",
            ],
        },
        Record {
            id: 5,
            map: MapName::Nuke,
            grenade: GrenadeType::Smoke,
            title: "Outside Smoke",
            description: "Smoke for outside take",
            photo: "1585504198199-20277593b94f",
            difficulty: Difficulty::Hard,
            position: Position::Outside,
            site: Site::Mid,
            tickrate: Tickrate::Tick128,
            technique: Technique::JumpThrow,
            steps: [
                "Position yourself at T roof",
                "Line up with the antenna",
                "Jump throw",
            ],
        },
        Record {
            id: 6,
            map: MapName::Anubis,
            grenade: GrenadeType::Flash,
            title: "Mid Flash",
            description: "Flash for mid control",
            photo: "1584722064669-95c332c94c56",
            difficulty: Difficulty::Easy,
            position: Position::Mid,
            site: Site::Mid,
            tickrate: Tickrate::Both,
            technique: Technique::StandingThrow,
            steps: [
                "Stand at mid entrance",
                "Aim above the doorway",
                "Standing throw",
            ],
        },
    ]
    .into_iter()
    .map(Record::build)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_is_valid() {
        assert_eq!(validate(catalog()), Ok(()));
        assert_eq!(catalog().len(), 6);
    }

    #[test]
    fn every_record_has_three_steps_and_its_own_video() {
        for lineup in catalog() {
            assert_eq!(lineup.steps.len(), 3, "lineup {}", lineup.id);
            assert!(lineup.video_url.ends_with(&format!("example{}", lineup.id)));
            assert_eq!(lineup.image_url, lineup.setup_image_url);
        }
    }

    #[test]
    fn find_returns_matching_record() {
        let lineup = find(catalog(), 3).unwrap();
        assert_eq!(lineup.title, "B Default Plant Molly");
        assert!(find(catalog(), 42).is_none());
    }

    #[test]
    fn validate_rejects_duplicate_ids() {
        let mut lineups = catalog().to_vec();
        lineups[1].id = 1;
        assert_eq!(validate(&lineups), Err(CatalogError::DuplicateId(1)));
    }

    #[test]
    fn validate_rejects_position_in_another_site() {
        let mut lineups = catalog().to_vec();
        lineups[5].site = Site::B;
        let err = validate(&lineups).unwrap_err();
        assert_eq!(
            err,
            CatalogError::SiteMismatch {
                id: 6,
                position: Position::Mid,
                site: Site::B,
            }
        );
        assert_eq!(
            err.to_string(),
            "lineup 6 is positioned at Mid but grouped under B Site"
        );
    }
}
