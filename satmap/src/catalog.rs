//! Orbital element catalogs, one satellite group per catalog.

use crate::{
    error::{Error, ParseFailure},
    fetch::Fetch,
    satellite::Satellite,
};
use satmap_protocol::{count_lines, parse_tle_catalog, LINES_PER_TLE};
use satmap_types::prelude::*;
use std::path::Path;
use tracing::{debug, info, warn};
use url::Url;

pub use crate::config::DEFAULT_CATALOG_URLS;

#[derive(Debug)]
pub struct SatelliteGroup {
    pub name: GroupName,
    /// In catalog order
    pub satellites: Vec<Satellite>,
}

/// Satellite groups in the order their catalogs were loaded
#[derive(Debug, Default)]
pub struct SatelliteGroups {
    groups: Vec<SatelliteGroup>,
}

impl SatelliteGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a group. A group with the same name is replaced at its original
    /// position and returned.
    pub fn insert(&mut self, group: SatelliteGroup) -> Option<SatelliteGroup> {
        match self.groups.iter_mut().find(|g| g.name == group.name) {
            Some(existing) => Some(std::mem::replace(existing, group)),
            None => {
                self.groups.push(group);
                None
            }
        }
    }

    pub fn get(&self, name: &GroupName) -> Option<&SatelliteGroup> {
        self.groups.iter().find(|g| &g.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SatelliteGroup> {
        self.groups.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &GroupName> {
        self.groups.iter().map(|g| &g.name)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn num_satellites(&self) -> usize {
        self.groups.iter().map(|g| g.satellites.len()).sum()
    }
}

/// Group name for a catalog: the upper-cased file stem of the URL path,
/// e.g. `.../gps-ops.txt` is `GPS-OPS`
pub fn group_name(url: &Url) -> GroupName {
    let file_name = url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .unwrap_or_default();
    group_name_from_path(Path::new(file_name))
}

/// Same as [`group_name`], for a catalog on the local file system
pub fn group_name_from_path(path: &Path) -> GroupName {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    GroupName::new(stem.to_uppercase())
}

/// Build a satellite for every complete line triplet in `text`.
///
/// A trailing partial entry is dropped. A triplet whose element lines can't be
/// parsed fails the whole catalog.
pub fn parse_catalog(group: GroupName, text: &str) -> Result<SatelliteGroup, Error> {
    let (rest, tles) = parse_tle_catalog(text).map_err(|e| ParseFailure::Catalog {
        group: group.to_string(),
        // Elide the borrow of `text` held by the nom error
        reason: e.to_string(),
    })?;

    if !rest.is_empty() {
        debug!(
            %group,
            dropped_lines = count_lines(rest),
            records = tles.len(),
            "Ignoring trailing lines that don't form a complete {LINES_PER_TLE}-line entry"
        );
    }

    let satellites = tles
        .iter()
        .map(|tle| {
            Satellite::from_tle(tle).map_err(|reason| ParseFailure::ElementSet {
                group: group.to_string(),
                satellite: tle.satellite_name.clone(),
                reason,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    for sat in satellites.iter() {
        debug!(
            %group,
            satellite = sat.name(),
            norad_id = sat.norad_id(),
            epoch = %sat.epoch(),
            "Parsed element set"
        );
    }

    Ok(SatelliteGroup {
        name: group,
        satellites,
    })
}

/// Fetch and parse every catalog, sequentially and in order.
///
/// Any failure aborts the load, there are no partial results.
pub fn load_catalogs<F: Fetch + ?Sized>(fetch: &F, urls: &[Url]) -> Result<SatelliteGroups, Error> {
    let mut groups = SatelliteGroups::new();
    for url in urls.iter() {
        let name = group_name(url);
        info!("Reading TLE file {url} for satellite group {name}");
        let text = fetch.fetch_text(url)?;
        let group = parse_catalog(name, &text)?;
        debug!(group = %group.name, satellites = group.satellites.len(), "Loaded catalog");
        if let Some(prev) = groups.insert(group) {
            warn!(group = %prev.name, "Catalog {url} replaces an earlier catalog for the same group");
        }
    }
    Ok(groups)
}
