use std::str::FromStr;

use crate::lineup::{GrenadeType, Lineup, MapName, Site, UnknownSlug};

/// Value of the "all" option in both selectors.
pub const ALL_VALUE: &str = "all";

/// Enums that round-trip through a `<select>` option value.
pub trait Slug: Copy + FromStr<Err = UnknownSlug> {
    fn slug(self) -> &'static str;
}

impl Slug for MapName {
    fn slug(self) -> &'static str {
        MapName::slug(self)
    }
}

impl Slug for GrenadeType {
    fn slug(self) -> &'static str {
        GrenadeType::slug(self)
    }
}

/// Exact-match-or-everything selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: PartialEq> Selection<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }
}

impl<T: Slug> Selection<T> {
    pub fn as_value(&self) -> &'static str {
        match self {
            Self::All => ALL_VALUE,
            Self::Only(value) => value.slug(),
        }
    }
}

impl<T: Slug> FromStr for Selection<T> {
    type Err = UnknownSlug;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_VALUE {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

/// The three filter inputs. An empty search matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineupFilter {
    pub map: Selection<MapName>,
    pub grenade: Selection<GrenadeType>,
    pub search: String,
}

impl LineupFilter {
    pub fn matches(&self, lineup: &Lineup) -> bool {
        self.map.matches(&lineup.map)
            && self.grenade.matches(&lineup.grenade)
            && matches_search(lineup, &self.search.to_lowercase())
    }
}

fn matches_search(lineup: &Lineup, needle: &str) -> bool {
    needle.is_empty()
        || lineup.title.to_lowercase().contains(needle)
        || lineup.description.to_lowercase().contains(needle)
}

/// Catalog subset that satisfies every filter, in catalog order.
pub fn filter_lineups<'a>(lineups: &'a [Lineup], filter: &LineupFilter) -> Vec<&'a Lineup> {
    lineups.iter().filter(|lineup| filter.matches(lineup)).collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteBuckets<'a> {
    a: Vec<&'a Lineup>,
    b: Vec<&'a Lineup>,
    mid: Vec<&'a Lineup>,
}

impl<'a> SiteBuckets<'a> {
    pub fn bucket(&self, site: Site) -> &[&'a Lineup] {
        match site {
            Site::A => &self.a,
            Site::B => &self.b,
            Site::Mid => &self.mid,
        }
    }

    fn bucket_mut(&mut self, site: Site) -> &mut Vec<&'a Lineup> {
        match site {
            Site::A => &mut self.a,
            Site::B => &mut self.b,
            Site::Mid => &mut self.mid,
        }
    }

    /// Sites with at least one lineup, in render order.
    pub fn non_empty(&self) -> impl Iterator<Item = (Site, &[&'a Lineup])> + '_ {
        Site::ALL
            .into_iter()
            .map(|site| (site, self.bucket(site)))
            .filter(|(_, lineups)| !lineups.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Lineup> + '_ {
        self.a
            .iter()
            .chain(self.b.iter())
            .chain(self.mid.iter())
            .copied()
    }

    pub fn len(&self) -> usize {
        self.a.len() + self.b.len() + self.mid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapGroup<'a> {
    pub map: MapName,
    pub sites: SiteBuckets<'a>,
}

impl<'a> MapGroup<'a> {
    pub fn find(&self, id: u32) -> Option<&'a Lineup> {
        self.sites.iter().find(|lineup| lineup.id == id)
    }
}

/// Filtered lineups partitioned by map, then by site.
///
/// Maps appear in the order their first lineup appears in the input; maps with
/// no lineups have no group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedLineups<'a> {
    groups: Vec<MapGroup<'a>>,
}

impl<'a> GroupedLineups<'a> {
    pub fn groups(&self) -> &[MapGroup<'a>] {
        &self.groups
    }

    pub fn group(&self, map: MapName) -> Option<&MapGroup<'a>> {
        self.groups.iter().find(|group| group.map == map)
    }

    pub fn total(&self) -> usize {
        self.groups.iter().map(|group| group.sites.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn find(&self, id: u32) -> Option<&'a Lineup> {
        self.groups.iter().find_map(|group| group.find(id))
    }
}

pub fn group_lineups<'a>(filtered: &[&'a Lineup]) -> GroupedLineups<'a> {
    let mut groups: Vec<MapGroup<'a>> = Vec::new();
    for &lineup in filtered {
        let idx = match groups.iter().position(|group| group.map == lineup.map) {
            Some(idx) => idx,
            None => {
                groups.push(MapGroup {
                    map: lineup.map,
                    sites: SiteBuckets::default(),
                });
                groups.len() - 1
            }
        };
        groups[idx].sites.bucket_mut(lineup.site).push(lineup);
    }
    GroupedLineups { groups }
}

/// Filter then group in one step.
pub fn filter_and_group<'a>(lineups: &'a [Lineup], filter: &LineupFilter) -> GroupedLineups<'a> {
    group_lineups(&filter_lineups(lineups, filter))
}
