//! Position fix and workout classification types

use geo::Point;

/// A single raw GPS sample
///
/// This is the minimal input contract: a WGS84 coordinate, a millisecond
/// timestamp, and whatever extras the receiver reported. Fixes are immutable
/// once recorded; the session route log appends them and never rewrites one.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionFix {
    /// WGS84 coordinate (x = longitude, y = latitude, in degrees)
    point: Point<f64>,
    /// Millisecond epoch timestamp reported with the fix
    pub timestamp_ms: u64,
    /// Altitude above sea level in meters, when the receiver reports one
    pub altitude_m: Option<f64>,
    /// Instantaneous ground speed in m/s, when the receiver reports one
    pub speed_mps: Option<f64>,
    /// Horizontal accuracy estimate in meters
    pub accuracy_m: Option<f64>,
}

impl PositionFix {
    /// Creates a fix carrying only a coordinate and timestamp
    pub fn new(latitude: f64, longitude: f64, timestamp_ms: u64) -> Self {
        Self {
            point: Point::new(longitude, latitude),
            timestamp_ms,
            altitude_m: None,
            speed_mps: None,
            accuracy_m: None,
        }
    }

    /// Creates a fix with all receiver-reported extras
    pub fn with_details(
        latitude: f64,
        longitude: f64,
        timestamp_ms: u64,
        altitude_m: Option<f64>,
        speed_mps: Option<f64>,
        accuracy_m: Option<f64>,
    ) -> Self {
        Self {
            point: Point::new(longitude, latitude),
            timestamp_ms,
            altitude_m,
            speed_mps,
            accuracy_m,
        }
    }

    /// The WGS84 coordinate (x = longitude, y = latitude)
    #[inline]
    pub fn point(&self) -> Point<f64> {
        self.point
    }

    /// Latitude in degrees
    #[inline]
    pub fn latitude(&self) -> f64 {
        self.point.y()
    }

    /// Longitude in degrees
    #[inline]
    pub fn longitude(&self) -> f64 {
        self.point.x()
    }
}

/// Activity classification recorded in the session summary
///
/// Tracking itself is type-agnostic; the classification travels with the
/// finished session so the external store can file it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WorkoutType {
    Running,
    Walking,
    Cycling,
    Interval,
    Tempo,
    LongRun,
    Recovery,
}

impl std::fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            WorkoutType::Running => "running",
            WorkoutType::Walking => "walking",
            WorkoutType::Cycling => "cycling",
            WorkoutType::Interval => "interval",
            WorkoutType::Tempo => "tempo",
            WorkoutType::LongRun => "long_run",
            WorkoutType::Recovery => "recovery",
        };
        f.write_str(name)
    }
}

/// Error returned when parsing an unrecognized workout type name
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown workout type `{0}`")]
pub struct UnknownWorkoutType(pub String);

impl std::str::FromStr for WorkoutType {
    type Err = UnknownWorkoutType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(WorkoutType::Running),
            "walking" => Ok(WorkoutType::Walking),
            "cycling" => Ok(WorkoutType::Cycling),
            "interval" => Ok(WorkoutType::Interval),
            "tempo" => Ok(WorkoutType::Tempo),
            "long_run" => Ok(WorkoutType::LongRun),
            "recovery" => Ok(WorkoutType::Recovery),
            other => Err(UnknownWorkoutType(other.to_string())),
        }
    }
}
