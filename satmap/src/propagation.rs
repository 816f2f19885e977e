//! Observer-relative satellite positions.

use crate::{
    catalog::SatelliteGroups,
    error::{Error, PropagationError},
    frames,
    satellite::Satellite,
    units::Angle,
};
use nav_types::{ECEF, WGS84};
use satmap_types::prelude::*;
use std::collections::BTreeMap;
use tracing::debug;

/// Positions computed for a single observer and instant.
///
/// Records are keyed by group and catalog index, iteration follows the group
/// order of the source [`SatelliteGroups`] and the record order within each
/// group.
#[derive(Clone, Debug)]
pub struct PositionArena {
    observer: Observer,
    groups: Vec<GroupName>,
    records: BTreeMap<RecordKey, SatellitePosition>,
}

impl PositionArena {
    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    pub fn get(&self, key: &RecordKey) -> Option<&SatellitePosition> {
        self.records.get(key)
    }

    pub fn group_names(&self) -> &[GroupName] {
        &self.groups
    }

    /// Records of a single group, in catalog order
    pub fn group<'a>(
        &'a self,
        name: &'a GroupName,
    ) -> impl Iterator<Item = (&'a RecordKey, &'a SatellitePosition)> + 'a {
        self.records
            .range(RecordKey::new(name.clone(), 0)..)
            .take_while(move |(k, _)| &k.group == name)
    }

    /// Every record, grouped, in load order
    pub fn iter(&self) -> impl Iterator<Item = (&RecordKey, &SatellitePosition)> {
        self.groups.iter().flat_map(move |g| self.group(g))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Compute every satellite's position relative to `observer`.
///
/// The first satellite that fails to propagate aborts the computation.
pub fn compute_positions(groups: &SatelliteGroups, observer: &Observer) -> Result<PositionArena, Error> {
    let (observer_wgs, gmst) = observer_frame(observer)?;

    let mut records = BTreeMap::new();
    for group in groups.iter() {
        for (index, sat) in group.satellites.iter().enumerate() {
            let pos = position(sat, observer, &observer_wgs, gmst)
                .map_err(|reason| propagation_error(&group.name, sat, reason))?;
            records.insert(RecordKey::new(group.name.clone(), index), pos);
        }
        debug!(group = %group.name, satellites = group.satellites.len(), "Computed positions");
    }

    Ok(PositionArena {
        observer: *observer,
        groups: groups.names().cloned().collect(),
        records,
    })
}

/// Position of a single satellite of `group` relative to `observer`
pub fn compute_position(
    group: &GroupName,
    sat: &Satellite,
    observer: &Observer,
) -> Result<SatellitePosition, Error> {
    let (observer_wgs, gmst) = observer_frame(observer)?;
    Ok(position(sat, observer, &observer_wgs, gmst)
        .map_err(|reason| propagation_error(group, sat, reason))?)
}

fn observer_frame(observer: &Observer) -> Result<(WGS84<f64>, Angle), PropagationError> {
    if observer.latitude.is_nan() || observer.latitude.abs() > 90.0 {
        return Err(PropagationError::ObserverLatitude(observer.latitude));
    }
    if !observer.longitude.is_finite() {
        return Err(PropagationError::ObserverLongitude(observer.longitude));
    }
    let observer_wgs = WGS84::from_degrees_and_meters(
        observer.latitude,
        wrap_longitude(observer.longitude),
        0.0,
    );
    Ok((observer_wgs, frames::gmst(&observer.timestamp)))
}

fn propagation_error(group: &GroupName, sat: &Satellite, reason: String) -> PropagationError {
    PropagationError::Satellite {
        group: group.to_string(),
        satellite: sat.name().to_owned(),
        reason,
    }
}

fn position(
    sat: &Satellite,
    observer: &Observer,
    observer_wgs: &WGS84<f64>,
    gmst: Angle,
) -> Result<SatellitePosition, String> {
    let teme = sat.propagate(&observer.timestamp)?;
    let ecef = frames::teme_to_ecef(&teme, gmst);
    if !ecef.iter().all(|c| c.is_finite()) {
        return Err("propagated position is not finite".to_owned());
    }
    let target = ECEF::new(ecef.x, ecef.y, ecef.z);
    let (look, range) = frames::look_angle(observer_wgs, &target);
    Ok(SatellitePosition {
        name: sat.name().to_owned(),
        look,
        range: range.as_meters(),
        sub_point: frames::sub_point(&target),
        pos_ecef: ecef,
    })
}

/// Same meridian, in [-180, 180)
fn wrap_longitude(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::{parse_catalog, SatelliteGroups},
        observer::build_observer,
    };
    use approx::assert_relative_eq;
    use chrono::{TimeZone, Utc};

    const CATALOG: &str = "GPS BIIR-2  (PRN 13)
1 24876U 97035A   23190.50000000  .00000000  00000-0  00000-0 0  9991
2 24876  55.6670 108.1760 0045000  55.0000 305.5000  2.00563000190009
SES-5 (SBAS)
1 38652U 12036A   23190.50000000  .00000000  00000-0  00000-0 0  9996
2 38652   0.0400  90.0000 0002500 200.0000 160.0000  1.00270000 40009
";

    fn groups() -> SatelliteGroups {
        let mut groups = SatelliteGroups::new();
        groups.insert(parse_catalog(GroupName::from("A"), CATALOG).unwrap());
        groups.insert(parse_catalog(GroupName::from("B"), CATALOG).unwrap());
        groups
    }

    fn observer() -> Observer {
        Observer::new(
            0.0,
            0.0,
            Utc.with_ymd_and_hms(2023, 7, 10, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn arena_preserves_order() {
        let arena = compute_positions(&groups(), &observer()).unwrap();
        assert_eq!(arena.len(), 4);
        let keys: Vec<String> = arena.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["A[0]", "A[1]", "B[0]", "B[1]"]);
        assert_eq!(arena.group(&GroupName::from("B")).count(), 2);
        let sat = arena.get(&RecordKey::new(GroupName::from("A"), 1)).unwrap();
        assert_eq!(sat.name, "SES-5 (SBAS)");
    }

    #[test]
    fn positions_are_consistent() {
        let arena = compute_positions(&groups(), &observer()).unwrap();
        for (_, p) in arena.iter() {
            assert!(p.look.azimuth >= 0.0 && p.look.azimuth < std::f64::consts::TAU);
            assert!(p.look.elevation.abs() <= std::f64::consts::FRAC_PI_2);
            assert!(p.range > 19_000e3, "{p}");
            let back = ECEF::from(WGS84::from_radians_and_meters(
                p.sub_point.latitude,
                p.sub_point.longitude,
                p.sub_point.altitude,
            ));
            assert_relative_eq!(back.x(), p.pos_ecef.x, epsilon = 10.0);
            assert_relative_eq!(back.y(), p.pos_ecef.y, epsilon = 10.0);
            assert_relative_eq!(back.z(), p.pos_ecef.z, epsilon = 10.0);
        }
        // Near-equatorial geostationary satellite stays close to the equator
        let geo = arena.get(&RecordKey::new(GroupName::from("A"), 1)).unwrap();
        assert!(geo.sub_point.latitude.to_degrees().abs() < 1.0);
        assert!(geo.sub_point.altitude > 35_000e3);
    }

    #[test]
    fn inputs_are_untouched_and_recomputation_is_identical() {
        let groups = groups();
        let a = compute_positions(&groups, &observer()).unwrap();
        let b = compute_positions(&groups, &observer()).unwrap();
        assert_eq!(groups.num_satellites(), 4);
        let pa: Vec<_> = a.iter().map(|(_, p)| p.clone()).collect();
        let pb: Vec<_> = b.iter().map(|(_, p)| p.clone()).collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn observer_longitude_is_wrapped() {
        assert_relative_eq!(wrap_longitude(190.0), -170.0);
        assert_relative_eq!(wrap_longitude(-180.0), -180.0);
        assert_relative_eq!(wrap_longitude(45.0), 45.0);
        let mut obs = observer();
        obs.longitude = 360.0;
        let a = compute_positions(&groups(), &obs).unwrap();
        let b = compute_positions(&groups(), &observer()).unwrap();
        let k = RecordKey::new(GroupName::from("A"), 0);
        assert_relative_eq!(
            a.get(&k).unwrap().look.elevation,
            b.get(&k).unwrap().look.elevation,
            epsilon = 1e-9
        );
    }

    #[test]
    fn single_position_matches_arena() {
        let groups = groups();
        let arena = compute_positions(&groups, &observer()).unwrap();
        let name = GroupName::from("B");
        let sat = &groups.get(&name).unwrap().satellites[0];
        let single = compute_position(&name, sat, &observer()).unwrap();
        assert_eq!(&single, arena.get(&RecordKey::new(name, 0)).unwrap());
    }

    #[test]
    fn non_finite_observer_coordinates() {
        let at = |lat: &str, lon: &str| build_observer(lat, lon, Some(observer().timestamp)).unwrap();
        for (lat, lon) in [("NaN", "0"), ("inf", "0"), ("-inf", "10")] {
            let obs = at(lat, lon);
            assert!(matches!(
                compute_positions(&groups(), &obs),
                Err(Error::Propagation(PropagationError::ObserverLatitude(_)))
            ));
        }
        for (lat, lon) in [("0", "NaN"), ("0", "inf"), ("45", "-inf")] {
            let obs = at(lat, lon);
            assert!(matches!(
                compute_positions(&groups(), &obs),
                Err(Error::Propagation(PropagationError::ObserverLongitude(_)))
            ));
        }
        let groups = groups();
        let name = GroupName::from("A");
        let sat = &groups.get(&name).unwrap().satellites[0];
        let mut obs = observer();
        obs.latitude = f64::NAN;
        assert!(compute_position(&name, sat, &obs).is_err());
    }

    #[test]
    fn observer_off_the_ellipsoid() {
        let mut obs = observer();
        obs.latitude = 123.0;
        assert!(matches!(
            compute_positions(&groups(), &obs),
            Err(Error::Propagation(PropagationError::ObserverLatitude(_)))
        ));
    }
}
