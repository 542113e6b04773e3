//! Sky positions: coordinate systems, conversions between them, small-angle
//! offsets and target ordering.
//!
//! Supported systems are equatorial and ecliptic at equinox B1950.0 (FK4) or
//! J2000.0 (FK5), galactic and supergalactic. Every [`Position`] can be
//! brought to equatorial J2000 as a [`PositionJ2000`], which remembers what it
//! was converted from.
//!
//! ```
//! use skypos::{CoordinateSystem, Position};
//!
//! let pole = Position::from_degrees(0.0, 90.0, CoordinateSystem::GALACTIC).unwrap();
//! let eq = pole.to_j2000().unwrap();
//! assert!((eq.ra().degrees() - 192.8595).abs() < 1e-3);
//! assert!((eq.dec().degrees() - 27.1283).abs() < 1e-3);
//! ```
//!
//! Module map:
//!
//! - [`convert`]: frame rotations and the FK4/FK5 transformations
//! - [`epoch`]: proper-motion propagation
//! - [`geometry`]: offsets, corners, separations, position angles
//! - [`target`]: ordering of observation targets
//! - [`sexagesimal`] and [`ingest`]: text in and out

pub mod convert;
pub mod epoch;
pub mod errors;
pub mod geometry;
pub mod ingest;
pub mod offset;
pub mod position;
pub mod proper_motion;
pub mod sexagesimal;
pub mod system;
pub mod target;

pub use convert::{convert, CoordinateConverter};
pub use errors::{CoordError, CoordResult};
pub use geometry::{
    angular_distance, central_point_and_radius, corners, destination, max_pairwise_distance,
    offset_of, offset_of_date, offset_of_years, position_angle, position_at, Corners,
};
pub use ingest::{parse_position, parse_target_list, ListedTarget, ParsedTarget, TargetListError};
pub use offset::Offset;
pub use position::{Position, PositionJ2000};
pub use proper_motion::ProperMotion;
pub use system::{ConversionCode, CoordinateSystem, Family};
pub use target::{compare_base_position, sort_targets, SortKey, Target};

pub use skypos_core::{Angle, Vector3};
