//! Ordering of observation targets.
//!
//! Fixed targets come first, ordered by their base position. Then comes
//! [`Target::Any`], then moving targets with a standard ephemeris ordered by
//! NAIF id, then moving targets without one. Ties are left as ties; sorting
//! is stable, so tied targets keep their input order.
//!
//! ```
//! use skypos::target::{compare_base_position, SortKey, Target};
//! use std::cmp::Ordering;
//!
//! let jupiter = Target::MovingStandard { naif_id: 599 };
//! let mars = Target::MovingStandard { naif_id: 499 };
//! assert_eq!(compare_base_position(&mars, &jupiter, SortKey::Ra), Ordering::Less);
//! assert_eq!(compare_base_position(&Target::Any, &mars, SortKey::Ra), Ordering::Less);
//! ```

use crate::{Offset, Position};
use std::cmp::Ordering;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Target {
    FixedSingle(Position),
    /// A base position with members given as offsets from it.
    FixedCluster {
        position: Position,
        offsets: Vec<Offset>,
    },
    /// Several independent positions; the first is the base.
    FixedMulti {
        base: Position,
        others: Vec<Position>,
    },
    MovingStandard {
        naif_id: i32,
    },
    MovingNonStandard,
    Any,
}

impl Target {
    /// Builds a multi-position target; `None` when `positions` is empty.
    pub fn fixed_multi(positions: Vec<Position>) -> Option<Self> {
        let mut iter = positions.into_iter();
        let base = iter.next()?;
        Some(Self::FixedMulti {
            base,
            others: iter.collect(),
        })
    }

    pub fn is_fixed(&self) -> bool {
        self.base_position().is_some()
    }

    /// The position fixed targets are ordered by.
    pub fn base_position(&self) -> Option<&Position> {
        match self {
            Self::FixedSingle(position) => Some(position),
            Self::FixedCluster { position, .. } => Some(position),
            Self::FixedMulti { base, .. } => Some(base),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::FixedSingle(_) | Self::FixedCluster { .. } | Self::FixedMulti { .. } => 0,
            Self::Any => 1,
            Self::MovingStandard { .. } => 2,
            Self::MovingNonStandard => 3,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SortKey {
    /// Longitude, then latitude.
    #[default]
    Ra,
    /// Latitude, then longitude.
    Dec,
}

impl FromStr for SortKey {
    type Err = crate::CoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ra" | "lon" | "longitude" => Ok(Self::Ra),
            "dec" | "lat" | "latitude" => Ok(Self::Dec),
            other => Err(crate::CoordError::parsing_error(format!(
                "unknown sort key '{other}', expected ra or dec"
            ))),
        }
    }
}

fn compare_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

fn compare_positions(a: &Position, b: &Position, key: SortKey) -> Ordering {
    let (lon_a, lat_a) = (a.lon().degrees(), a.lat().degrees());
    let (lon_b, lat_b) = (b.lon().degrees(), b.lat().degrees());
    match key {
        SortKey::Ra => compare_f64(lon_a, lon_b).then_with(|| compare_f64(lat_a, lat_b)),
        SortKey::Dec => compare_f64(lat_a, lat_b).then_with(|| compare_f64(lon_a, lon_b)),
    }
}

/// Orders two targets. Fixed positions are compared as stored, without
/// conversion to a common system.
pub fn compare_base_position(t1: &Target, t2: &Target, key: SortKey) -> Ordering {
    match (t1, t2) {
        (Target::MovingStandard { naif_id: a }, Target::MovingStandard { naif_id: b }) => a.cmp(b),
        _ => match (t1.base_position(), t2.base_position()) {
            (Some(a), Some(b)) => compare_positions(a, b, key),
            _ => t1.rank().cmp(&t2.rank()),
        },
    }
}

/// Stable sort by [`compare_base_position`].
pub fn sort_targets(targets: &mut [Target], key: SortKey) {
    targets.sort_by(|a, b| compare_base_position(a, b, key));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoordinateSystem;

    fn fixed(lon: f64, lat: f64) -> Target {
        Target::FixedSingle(Position::from_degrees(lon, lat, CoordinateSystem::EQ_J2000).unwrap())
    }

    #[test]
    fn test_fixed_before_everything() {
        for other in [
            Target::Any,
            Target::MovingStandard { naif_id: 1 },
            Target::MovingNonStandard,
        ] {
            let first = fixed(359.0, 89.0);
            assert_eq!(compare_base_position(&first, &other, SortKey::Ra), Ordering::Less);
            assert_eq!(compare_base_position(&other, &first, SortKey::Dec), Ordering::Greater);
        }
    }

    #[test]
    fn test_any_and_moving() {
        let any = Target::Any;
        let std5 = Target::MovingStandard { naif_id: 5 };
        let nonstd = Target::MovingNonStandard;
        assert_eq!(compare_base_position(&any, &std5, SortKey::Ra), Ordering::Less);
        assert_eq!(compare_base_position(&any, &any, SortKey::Ra), Ordering::Equal);
        assert_eq!(compare_base_position(&std5, &nonstd, SortKey::Ra), Ordering::Less);
        assert_eq!(compare_base_position(&nonstd, &nonstd, SortKey::Ra), Ordering::Equal);
        assert_eq!(
            compare_base_position(
                &Target::MovingStandard { naif_id: 3 },
                &Target::MovingStandard { naif_id: 7 },
                SortKey::Dec
            ),
            Ordering::Less
        );
    }

    #[test]
    fn test_sort_keys() {
        let a = fixed(10.0, 50.0);
        let b = fixed(20.0, 40.0);
        assert_eq!(compare_base_position(&a, &b, SortKey::Ra), Ordering::Less);
        assert_eq!(compare_base_position(&a, &b, SortKey::Dec), Ordering::Greater);
        let c = fixed(10.0, 60.0);
        assert_eq!(compare_base_position(&a, &c, SortKey::Ra), Ordering::Less);
    }

    #[test]
    fn test_cluster_and_multi_use_base() {
        let base = Position::from_degrees(5.0, 5.0, CoordinateSystem::EQ_J2000).unwrap();
        let far = Position::from_degrees(300.0, 5.0, CoordinateSystem::EQ_J2000).unwrap();
        let multi = Target::fixed_multi(vec![base, far]).unwrap();
        let cluster = Target::FixedCluster {
            position: far,
            offsets: vec![Offset::new(10.0, 0.0, far)],
        };
        assert_eq!(compare_base_position(&multi, &cluster, SortKey::Ra), Ordering::Less);
        assert!(Target::fixed_multi(Vec::new()).is_none());
    }

    #[test]
    fn test_sort_is_stable() {
        let mut targets = vec![
            Target::MovingNonStandard,
            Target::MovingStandard { naif_id: 599 },
            fixed(30.0, 0.0),
            Target::Any,
            fixed(10.0, 0.0),
            Target::MovingStandard { naif_id: 301 },
        ];
        sort_targets(&mut targets, SortKey::Ra);
        assert_eq!(targets[0], fixed(10.0, 0.0));
        assert_eq!(targets[1], fixed(30.0, 0.0));
        assert_eq!(targets[2], Target::Any);
        assert_eq!(targets[3], Target::MovingStandard { naif_id: 301 });
        assert_eq!(targets[4], Target::MovingStandard { naif_id: 599 });
        assert_eq!(targets[5], Target::MovingNonStandard);
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("RA".parse::<SortKey>().unwrap(), SortKey::Ra);
        assert_eq!(" dec ".parse::<SortKey>().unwrap(), SortKey::Dec);
        assert!("az".parse::<SortKey>().is_err());
    }
}
