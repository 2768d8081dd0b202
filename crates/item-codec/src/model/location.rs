//! World locations.
//!
//! Three forms are supported: a config section (see
//! [`codec::config::write_location`](crate::codec::config::write_location)),
//! the compact `world@x,y,z[,yaw,pitch]` string, and a JSON object.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// Rotation granularity used when rounding, in degrees.
const ROTATION_STEP: f32 = 22.5;

/// A point in a named world, with facing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub world: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for Location {
    /// Spawn-ish fallback used for any missing component.
    fn default() -> Self {
        Self {
            world: "world".to_string(),
            x: 0.5,
            y: 64.5,
            z: 0.5,
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

/// How a location is written to a config section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocationStyle {
    /// Snap to the block centre and round the rotation.
    pub round: bool,
    /// Include yaw and pitch.
    pub rotation: bool,
}

impl LocationStyle {
    pub const EXACT: LocationStyle = LocationStyle { round: false, rotation: true };
    pub const BLOCK: LocationStyle = LocationStyle { round: true, rotation: false };
}

impl Location {
    pub fn new(world: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self {
            world: world.into(),
            x,
            y,
            z,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    pub fn with_rotation(mut self, yaw: f32, pitch: f32) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self
    }

    pub fn block_x(&self) -> i64 {
        self.x.floor() as i64
    }

    pub fn block_y(&self) -> i64 {
        self.y.floor() as i64
    }

    pub fn block_z(&self) -> i64 {
        self.z.floor() as i64
    }

    /// Centre of the block on x/z, floor on y, rotation snapped to 22.5°.
    pub fn rounded(&self) -> Location {
        Location {
            world: self.world.clone(),
            x: self.block_x() as f64 + 0.5,
            y: self.block_y() as f64,
            z: self.block_z() as f64 + 0.5,
            yaw: snap_angle(self.yaw),
            pitch: snap_angle(self.pitch),
        }
    }

    /// Compact form: block coordinates, then truncated yaw and pitch if asked.
    pub fn to_compact_string(&self, rotation: bool) -> String {
        let mut out = format!(
            "{}@{},{},{}",
            self.world,
            self.block_x(),
            self.block_y(),
            self.block_z()
        );
        if rotation {
            out.push_str(&format!(",{},{}", self.yaw as i32, self.pitch as i32));
        }
        out
    }

    /// Parses the compact form. With `center`, 0.5 is added to x and z.
    pub fn parse_compact(input: &str, center: bool) -> Result<Location, DecodeError> {
        let invalid = || DecodeError::InvalidLocation {
            input: input.to_string(),
        };

        let (world, coords) = input.split_once('@').ok_or_else(invalid)?;
        if world.is_empty() {
            return Err(invalid());
        }
        let parts: Vec<&str> = coords.split(',').map(str::trim).collect();
        if parts.len() != 3 && parts.len() != 5 {
            return Err(invalid());
        }

        let coord = |s: &str| s.parse::<f64>().map_err(|_| invalid());
        let mut loc = Location::new(world, coord(parts[0])?, coord(parts[1])?, coord(parts[2])?);
        if parts.len() == 5 {
            let angle = |s: &str| s.parse::<f32>().map_err(|_| invalid());
            loc.yaw = angle(parts[3])?;
            loc.pitch = angle(parts[4])?;
        }
        if center {
            loc.x += 0.5;
            loc.z += 0.5;
        }
        Ok(loc)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}) in {}",
            self.block_x(),
            self.block_y(),
            self.block_z(),
            self.world
        )
    }
}

fn snap_angle(angle: f32) -> f32 {
    (angle / ROTATION_STEP).round() * ROTATION_STEP
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_roundtrip() {
        let loc = Location::new("arena", 10.7, 65.0, -3.2).with_rotation(91.9, -12.4);
        let s = loc.to_compact_string(true);
        assert_eq!(s, "arena@10,65,-4,91,-12");

        let parsed = Location::parse_compact(&s, false).unwrap();
        assert_eq!(parsed.world, "arena");
        assert_eq!((parsed.x, parsed.y, parsed.z), (10.0, 65.0, -4.0));
        assert_eq!((parsed.yaw, parsed.pitch), (91.0, -12.0));
    }

    #[test]
    fn test_compact_centering() {
        let loc = Location::parse_compact("world@1,2,3", true).unwrap();
        assert_eq!((loc.x, loc.y, loc.z), (1.5, 2.0, 3.5));
        assert_eq!(loc.yaw, 0.0);
    }

    #[test]
    fn test_compact_rejects_garbage() {
        for bad in ["", "world", "@1,2,3", "world@1,2", "world@1,2,3,4", "world@a,b,c"] {
            assert!(
                matches!(
                    Location::parse_compact(bad, false),
                    Err(DecodeError::InvalidLocation { .. })
                ),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn test_display() {
        let loc = Location::new("nether", -0.5, 70.9, 12.1);
        assert_eq!(loc.to_string(), "(-1, 70, 12) in nether");
    }

    #[test]
    fn test_rounded() {
        let loc = Location::new("w", 3.9, 64.7, -2.1).with_rotation(100.0, 10.0);
        let r = loc.rounded();
        assert_eq!((r.x, r.y, r.z), (3.5, 64.0, -2.5));
        assert_eq!(r.yaw, 90.0);
        assert_eq!(r.pitch, 0.0);
    }

    #[test]
    fn test_json_defaults_missing_components() {
        let loc: Location = serde_json::from_str(r#"{"world":"end","y":10.0}"#).unwrap();
        assert_eq!(loc.world, "end");
        assert_eq!(loc.x, 0.5);
        assert_eq!(loc.y, 10.0);
        assert_eq!(loc.z, 0.5);
    }
}
