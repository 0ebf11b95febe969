//! Live Track Library - Core Session Tracking for GPS Workout Applications
//!
//! This library ingests a stream of raw GPS position fixes and incrementally
//! derives distance, pace, elevation gain, speed extrema, split times and
//! calorie estimates, while maintaining an `Idle → Active ⇄ Paused →
//! Stopped` session lifecycle.
//!
//! # Architecture
//!
//! - **[`PositionFix`]**: Immutable GPS sample, appended to the route log
//! - **[`SessionTracker`]**: State machine owning the route, metrics and splits
//! - **[`SplitRecord`]**: One completed kilometer with its time and pace
//! - **[`LocationProvider`]**: Contract for the platform location collaborator
//! - **[`Clock`]**: Injectable time source for deterministic tests and replay
//!
//! # Concurrency Model
//!
//! Single-threaded event-driven: an irregular fix stream and a fixed 1 Hz
//! tick both funnel into one [`SessionTracker`], whose handlers are fast,
//! synchronous and non-blocking. The crate depends on no async runtime;
//! callers multiplex the two event sources however their platform prefers
//! and read consistent [`SessionMetrics`] copies via
//! [`SessionTracker::snapshot`] at any time.

pub mod calories;
mod clock;
mod fix;
pub mod format;
pub mod geodesy;
mod provider;
mod session;
mod splits;

// Public API exports
pub use clock::{Clock, ManualClock, SystemClock};
pub use fix::{PositionFix, UnknownWorkoutType, WorkoutType};
pub use provider::{FixCallback, LocationProvider, SubscriptionHandle, WatchOptions};
pub use session::{
    LifecycleState, SessionConfig, SessionMetrics, SessionSummary, SessionTracker,
};
pub use splits::SplitRecord;

/// Error types for session lifecycle contract violations
///
/// Everything else is handled by construction: out-of-lifecycle fixes and
/// ticks are dropped silently, divisions are guarded, permission denial is
/// a boolean at the [`LocationProvider`] boundary.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// `start()` was called on a tracker that is not idle
    #[error("session already started")]
    AlreadyStarted,
}

pub type Result<T> = std::result::Result<T, SessionError>;
