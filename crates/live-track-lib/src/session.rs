//! Session lifecycle and live metric accumulation
//!
//! [`SessionTracker`] is the single owner and sole mutator of the route log,
//! the derived metrics and the split list. Two event sources feed it: an
//! irregular stream of position fixes ([`SessionTracker::record_fix`]) and a
//! 1 Hz timer ([`SessionTracker::tick`]). Both handlers check the lifecycle
//! state first, so `stop()` acts as a barrier: events that were queued
//! before the stop but processed after it cannot mutate finalized metrics.

use crate::calories::{self, DEFAULT_BODY_MASS_KG};
use crate::clock::{Clock, SystemClock};
use crate::fix::{PositionFix, WorkoutType};
use crate::geodesy;
use crate::splits::{SplitDetector, SplitRecord};
use crate::{Result, SessionError};

/// Lifecycle of one tracked session
///
/// `Idle → Active ⇄ Paused → Stopped`, with `Stopped` terminal. Only
/// `Active` accrues duration and accepts fixes and ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LifecycleState {
    Idle,
    Active,
    Paused,
    Stopped,
}

/// Session parameters fixed at construction
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionConfig {
    /// Activity classification recorded in the summary
    pub workout_type: WorkoutType,
    /// Body mass used for the calorie estimate, in kilograms
    pub body_mass_kg: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            workout_type: WorkoutType::Running,
            body_mass_kg: DEFAULT_BODY_MASS_KG,
        }
    }
}

/// Live aggregate derived from the fix stream and the timer
///
/// All-zero at session start, mutated in place while active, frozen once the
/// session stops. `distance_km` is monotonically non-decreasing while
/// active; `elevation_gain_m` accumulates only positive altitude deltas.
/// Pace fields use `0.0` as the "no pace yet" sentinel, never NaN or
/// infinity.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionMetrics {
    /// Cumulative distance in kilometers
    pub distance_km: f64,
    /// Active time, in whole seconds (pauses excluded)
    pub duration_seconds: u64,
    /// Current pace in minutes per kilometer (0 until distance accrues)
    pub current_pace_min_per_km: f64,
    /// Average pace in minutes per kilometer (0 until distance accrues)
    pub average_pace_min_per_km: f64,
    /// Fastest instantaneous speed seen so far, in km/h
    pub max_speed_kmh: f64,
    /// Overall average speed in km/h (0 until duration accrues)
    pub average_speed_kmh: f64,
    /// Cumulative positive elevation change in meters
    pub elevation_gain_m: f64,
    /// Estimated calories burned so far
    pub estimated_calories: u32,
    /// Every accepted fix, in arrival order
    pub route: Vec<PositionFix>,
    /// Whether the session is currently accruing time and distance
    pub is_active: bool,
}

/// Finalized record of a stopped session
///
/// The shape the external data store accepts; persistence itself is out of
/// scope for this crate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionSummary {
    pub workout_type: WorkoutType,
    /// Millisecond epoch timestamp of `start()`
    pub started_at_ms: u64,
    pub distance_km: f64,
    /// Total active time in seconds
    pub duration_seconds: u64,
    /// Whole minutes of active time
    pub duration_minutes: u64,
    /// Seconds of active time beyond the whole minutes
    pub remainder_seconds: u32,
    pub calories: u32,
    pub elevation_gain_m: f64,
    pub average_pace_min_per_km: f64,
    pub max_speed_kmh: f64,
    pub route: Vec<PositionFix>,
    pub splits: Vec<SplitRecord>,
}

/// State machine driving one tracked session
///
/// Construct with [`SessionTracker::new`] for wall-clock time, or
/// [`SessionTracker::with_clock`] to inject a deterministic clock. The
/// tracker and everything it owns is discarded wholesale after `stop()`;
/// a new session means a new tracker.
pub struct SessionTracker {
    config: SessionConfig,
    clock: Box<dyn Clock>,
    state: LifecycleState,
    /// Wall-clock instant of `start()`
    started_at_ms: u64,
    /// Instant the current active stretch began
    resumed_at_ms: u64,
    /// Active milliseconds accumulated across completed stretches
    active_ms: u64,
    metrics: SessionMetrics,
    splits: SplitDetector,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl SessionTracker {
    /// Create an idle tracker using the system clock
    pub fn new(config: SessionConfig) -> Self {
        Self::with_clock(config, Box::new(SystemClock))
    }

    /// Create an idle tracker with an injected time source
    pub fn with_clock(config: SessionConfig, clock: Box<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            state: LifecycleState::Idle,
            started_at_ms: 0,
            resumed_at_ms: 0,
            active_ms: 0,
            metrics: SessionMetrics::default(),
            splits: SplitDetector::default(),
        }
    }

    /// Begin the session: `Idle → Active`
    ///
    /// Resets metrics, route log and splits, and records the start
    /// timestamp. Starting anything but an idle tracker is the one
    /// lifecycle violation that is an error rather than a no-op, so a
    /// caller cannot accidentally wipe an in-progress session.
    pub fn start(&mut self) -> Result<()> {
        if self.state != LifecycleState::Idle {
            return Err(SessionError::AlreadyStarted);
        }

        let now = self.clock.now_ms();
        self.metrics = SessionMetrics {
            is_active: true,
            ..SessionMetrics::default()
        };
        self.splits.reset();
        self.started_at_ms = now;
        self.resumed_at_ms = now;
        self.active_ms = 0;
        self.state = LifecycleState::Active;
        tracing::info!(started_at_ms = now, "session started");
        Ok(())
    }

    /// Suspend duration accrual: `Active → Paused`; no-op otherwise
    pub fn pause(&mut self) {
        if self.state != LifecycleState::Active {
            return;
        }
        let now = self.clock.now_ms();
        self.active_ms += now.saturating_sub(self.resumed_at_ms);
        self.state = LifecycleState::Paused;
        self.metrics.is_active = false;
        tracing::info!(active_ms = self.active_ms, "session paused");
    }

    /// Resume from the preserved active time: `Paused → Active`; no-op otherwise
    pub fn resume(&mut self) {
        if self.state != LifecycleState::Paused {
            return;
        }
        self.resumed_at_ms = self.clock.now_ms();
        self.state = LifecycleState::Active;
        self.metrics.is_active = true;
        tracing::info!(active_ms = self.active_ms, "session resumed");
    }

    /// Finalize the session: `Active | Paused → Stopped`
    ///
    /// Returns the summary record exactly once, on the transition; `None`
    /// when the tracker was never started or is already stopped. After this
    /// returns, no fix or tick mutates state again.
    pub fn stop(&mut self) -> Option<SessionSummary> {
        match self.state {
            LifecycleState::Active => {
                let now = self.clock.now_ms();
                self.active_ms += now.saturating_sub(self.resumed_at_ms);
            }
            LifecycleState::Paused => {}
            LifecycleState::Idle | LifecycleState::Stopped => return None,
        }

        self.state = LifecycleState::Stopped;
        self.refresh_time_derived();
        self.metrics.is_active = false;
        tracing::info!(
            distance_km = self.metrics.distance_km,
            duration_seconds = self.metrics.duration_seconds,
            "session stopped"
        );
        Some(self.summary())
    }

    /// Ingest one position fix
    ///
    /// Accepted only while `Active`; silently dropped in every other state.
    /// Returns the newly completed kilometer split, if this fix crossed a
    /// boundary — the caller's cue for a "km completed" notification.
    pub fn record_fix(&mut self, fix: PositionFix) -> Option<SplitRecord> {
        if self.state != LifecycleState::Active {
            tracing::debug!(state = ?self.state, "dropping fix outside active session");
            return None;
        }
        if !fix.latitude().is_finite() || !fix.longitude().is_finite() {
            tracing::warn!("dropping fix with non-finite coordinates");
            return None;
        }

        if let Some(prev) = self.metrics.route.last() {
            self.metrics.distance_km += geodesy::segment_distance_km(prev, &fix);

            // Uphill only; descending segments leave the gain untouched
            if let (Some(prev_alt), Some(alt)) = (prev.altitude_m, fix.altitude_m) {
                let delta = alt - prev_alt;
                if delta > 0.0 {
                    self.metrics.elevation_gain_m += delta;
                }
            }
        }

        if let Some(speed_mps) = fix.speed_mps {
            let speed_kmh = geodesy::mps_to_kmh(speed_mps);
            if speed_kmh > self.metrics.max_speed_kmh {
                self.metrics.max_speed_kmh = speed_kmh;
            }
        }

        self.metrics.route.push(fix);

        let elapsed_seconds = self.elapsed_active_ms() as f64 / 1000.0;
        self.metrics.average_speed_kmh = if elapsed_seconds > 0.0 {
            self.metrics.distance_km / (elapsed_seconds / 3600.0)
        } else {
            0.0
        };

        let split = self
            .splits
            .on_distance_update(self.metrics.distance_km, elapsed_seconds);
        if let Some(split) = &split {
            tracing::info!(
                km = split.split_index,
                pace_min_per_km = split.pace_min_per_km,
                "kilometer completed"
            );
        }
        split
    }

    /// 1 Hz timer handler
    ///
    /// Recomputes the duration-derived fields (duration, calories, paces)
    /// independently of fix arrival. No-op unless `Active`.
    pub fn tick(&mut self) {
        if self.state != LifecycleState::Active {
            tracing::trace!(state = ?self.state, "dropping tick outside active session");
            return;
        }
        self.refresh_time_derived();
    }

    /// Consistent, independently readable copy of the current metrics
    ///
    /// Copy semantics, not a live reference: the snapshot does not change
    /// when the tracker keeps accumulating.
    pub fn snapshot(&self) -> SessionMetrics {
        self.metrics.clone()
    }

    /// Completed kilometer splits, in order
    pub fn splits(&self) -> &[SplitRecord] {
        self.splits.splits()
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == LifecycleState::Active
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Milliseconds of active time, including the in-flight stretch
    fn elapsed_active_ms(&self) -> u64 {
        match self.state {
            LifecycleState::Active => {
                self.active_ms + self.clock.now_ms().saturating_sub(self.resumed_at_ms)
            }
            _ => self.active_ms,
        }
    }

    fn refresh_time_derived(&mut self) {
        self.metrics.duration_seconds = self.elapsed_active_ms() / 1000;
        let duration_minutes = self.metrics.duration_seconds as f64 / 60.0;

        self.metrics.estimated_calories =
            calories::estimate_calories(duration_minutes, self.config.body_mass_kg).max(0) as u32;

        let pace = if self.metrics.distance_km > 0.0 {
            duration_minutes / self.metrics.distance_km
        } else {
            0.0
        };
        self.metrics.current_pace_min_per_km = pace;
        self.metrics.average_pace_min_per_km = pace;
    }

    fn summary(&self) -> SessionSummary {
        let duration_seconds = self.metrics.duration_seconds;
        SessionSummary {
            workout_type: self.config.workout_type,
            started_at_ms: self.started_at_ms,
            distance_km: self.metrics.distance_km,
            duration_seconds,
            duration_minutes: duration_seconds / 60,
            remainder_seconds: (duration_seconds % 60) as u32,
            calories: self.metrics.estimated_calories,
            elevation_gain_m: self.metrics.elevation_gain_m,
            average_pace_min_per_km: self.metrics.average_pace_min_per_km,
            max_speed_kmh: self.metrics.max_speed_kmh,
            route: self.metrics.route.clone(),
            splits: self.splits.splits().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    /// Just over one kilometer of longitude at the equator, in degrees
    const KM_IN_EQUATOR_DEGREES: f64 = 0.0089933;

    fn tracker_with_manual_clock() -> (SessionTracker, ManualClock) {
        let clock = ManualClock::new(0);
        let tracker = SessionTracker::with_clock(SessionConfig::default(), Box::new(clock.clone()));
        (tracker, clock)
    }

    fn fix_at(lat: f64, lon: f64, timestamp_ms: u64) -> PositionFix {
        PositionFix::new(lat, lon, timestamp_ms)
    }

    #[test]
    fn test_new_tracker_is_idle() {
        let tracker = SessionTracker::new(SessionConfig::default());
        assert_eq!(tracker.state(), LifecycleState::Idle);
        assert!(!tracker.is_active());
        assert_eq!(tracker.snapshot(), SessionMetrics::default());
    }

    #[test]
    fn test_start_transitions_to_active() {
        let (mut tracker, _clock) = tracker_with_manual_clock();
        tracker.start().unwrap();
        assert_eq!(tracker.state(), LifecycleState::Active);
        assert!(tracker.snapshot().is_active);
    }

    #[test]
    fn test_double_start_is_an_error() {
        let (mut tracker, _clock) = tracker_with_manual_clock();
        tracker.start().unwrap();
        assert!(matches!(tracker.start(), Err(SessionError::AlreadyStarted)));

        // Still an error after stopping: a tracker tracks one session
        tracker.stop();
        assert!(matches!(tracker.start(), Err(SessionError::AlreadyStarted)));
    }

    #[test]
    fn test_fix_dropped_while_idle() {
        let (mut tracker, _clock) = tracker_with_manual_clock();
        assert!(tracker.record_fix(fix_at(0.0, 0.0, 0)).is_none());
        assert!(tracker.snapshot().route.is_empty());
    }

    #[test]
    fn test_distance_accumulates_and_is_monotonic() {
        let (mut tracker, clock) = tracker_with_manual_clock();
        tracker.start().unwrap();

        let mut previous_distance = 0.0;
        for i in 0..5 {
            clock.advance(1_000);
            tracker.record_fix(fix_at(0.0, i as f64 * 0.001, i * 1_000));
            let distance = tracker.snapshot().distance_km;
            assert!(distance >= previous_distance);
            previous_distance = distance;
        }
        // 4 segments of 0.001 degrees of equatorial longitude each
        assert!((previous_distance - 0.4448).abs() < 0.01);
        assert_eq!(tracker.snapshot().route.len(), 5);
    }

    #[test]
    fn test_first_fix_adds_no_distance() {
        let (mut tracker, _clock) = tracker_with_manual_clock();
        tracker.start().unwrap();
        tracker.record_fix(fix_at(51.5, -0.12, 0));
        assert_eq!(tracker.snapshot().distance_km, 0.0);
    }

    #[test]
    fn test_elevation_gain_ignores_descent() {
        let (mut tracker, clock) = tracker_with_manual_clock();
        tracker.start().unwrap();

        let climb = [100.0, 110.0, 105.0, 112.0];
        for (i, altitude) in climb.iter().enumerate() {
            clock.advance(1_000);
            tracker.record_fix(PositionFix::with_details(
                0.0,
                i as f64 * 0.0001,
                i as u64 * 1_000,
                Some(*altitude),
                None,
                None,
            ));
        }

        // +10 and +7; the -5 descent must not subtract
        let gain = tracker.snapshot().elevation_gain_m;
        assert!((gain - 17.0).abs() < 1e-9);
    }

    #[test]
    fn test_elevation_needs_both_altitudes() {
        let (mut tracker, clock) = tracker_with_manual_clock();
        tracker.start().unwrap();

        tracker.record_fix(PositionFix::with_details(0.0, 0.0, 0, None, None, None));
        clock.advance(1_000);
        tracker.record_fix(PositionFix::with_details(
            0.0,
            0.0001,
            1_000,
            Some(50.0),
            None,
            None,
        ));
        assert_eq!(tracker.snapshot().elevation_gain_m, 0.0);
    }

    #[test]
    fn test_max_speed_tracks_fastest_fix() {
        let (mut tracker, clock) = tracker_with_manual_clock();
        tracker.start().unwrap();

        for (i, speed_mps) in [Some(2.0), Some(4.0), None, Some(3.0)].iter().enumerate() {
            clock.advance(1_000);
            tracker.record_fix(PositionFix::with_details(
                0.0,
                i as f64 * 0.0001,
                i as u64 * 1_000,
                None,
                *speed_mps,
                None,
            ));
        }

        // 4.0 m/s is 14.4 km/h
        assert!((tracker.snapshot().max_speed_kmh - 14.4).abs() < 1e-9);
    }

    #[test]
    fn test_non_finite_fix_is_dropped() {
        let (mut tracker, clock) = tracker_with_manual_clock();
        tracker.start().unwrap();
        tracker.record_fix(fix_at(0.0, 0.0, 0));
        clock.advance(1_000);
        tracker.record_fix(fix_at(f64::NAN, 0.001, 1_000));

        let metrics = tracker.snapshot();
        assert_eq!(metrics.route.len(), 1);
        assert!(metrics.distance_km.is_finite());
        assert_eq!(metrics.distance_km, 0.0);
    }

    #[test]
    fn test_tick_updates_duration_and_calories() {
        let (mut tracker, clock) = tracker_with_manual_clock();
        tracker.start().unwrap();

        clock.advance(60_000);
        tracker.tick();

        let metrics = tracker.snapshot();
        assert_eq!(metrics.duration_seconds, 60);
        // 8.0 MET * 70 kg * 1 min / 60 = 9.33 -> 9
        assert_eq!(metrics.estimated_calories, 9);
    }

    #[test]
    fn test_pace_sentinel_while_no_distance() {
        let (mut tracker, clock) = tracker_with_manual_clock();
        tracker.start().unwrap();

        clock.advance(10_000);
        tracker.tick();

        let metrics = tracker.snapshot();
        assert_eq!(metrics.current_pace_min_per_km, 0.0);
        assert_eq!(metrics.average_pace_min_per_km, 0.0);
        assert_eq!(metrics.average_speed_kmh, 0.0);
        assert!(metrics.current_pace_min_per_km.is_finite());
    }

    #[test]
    fn test_average_speed_guard_at_zero_duration() {
        let (mut tracker, _clock) = tracker_with_manual_clock();
        tracker.start().unwrap();

        // Two fixes with no time elapsed at all
        tracker.record_fix(fix_at(0.0, 0.0, 0));
        tracker.record_fix(fix_at(0.0, 0.001, 0));

        let metrics = tracker.snapshot();
        assert!(metrics.distance_km > 0.0);
        assert_eq!(metrics.average_speed_kmh, 0.0);
    }

    #[test]
    fn test_pause_freezes_distance_and_route() {
        let (mut tracker, clock) = tracker_with_manual_clock();
        tracker.start().unwrap();
        tracker.record_fix(fix_at(0.0, 0.0, 0));
        clock.advance(5_000);
        tracker.record_fix(fix_at(0.0, 0.001, 5_000));

        tracker.pause();
        let frozen = tracker.snapshot();
        assert!(!frozen.is_active);

        clock.advance(10_000);
        assert!(tracker.record_fix(fix_at(0.0, 0.01, 15_000)).is_none());
        tracker.tick();

        let metrics = tracker.snapshot();
        assert_eq!(metrics.distance_km, frozen.distance_km);
        assert_eq!(metrics.route.len(), frozen.route.len());
        assert_eq!(metrics.duration_seconds, frozen.duration_seconds);
    }

    #[test]
    fn test_pause_is_a_noop_unless_active() {
        let (mut tracker, _clock) = tracker_with_manual_clock();
        tracker.pause();
        assert_eq!(tracker.state(), LifecycleState::Idle);

        tracker.start().unwrap();
        tracker.pause();
        tracker.pause();
        assert_eq!(tracker.state(), LifecycleState::Paused);
    }

    #[test]
    fn test_resume_preserves_accumulated_active_time() {
        let (mut tracker, clock) = tracker_with_manual_clock();
        tracker.start().unwrap();

        clock.advance(30_000);
        tracker.pause();

        // 100 seconds of paused wall time must not count
        clock.advance(100_000);
        tracker.resume();

        clock.advance(20_000);
        tracker.tick();

        assert_eq!(tracker.snapshot().duration_seconds, 50);
    }

    #[test]
    fn test_resume_is_a_noop_unless_paused() {
        let (mut tracker, clock) = tracker_with_manual_clock();
        tracker.resume();
        assert_eq!(tracker.state(), LifecycleState::Idle);

        tracker.start().unwrap();
        clock.advance(1_000);
        tracker.resume();
        assert_eq!(tracker.state(), LifecycleState::Active);
        tracker.tick();
        assert_eq!(tracker.snapshot().duration_seconds, 1);
    }

    #[test]
    fn test_stop_finalizes_and_is_idempotent() {
        let (mut tracker, clock) = tracker_with_manual_clock();
        tracker.start().unwrap();
        tracker.record_fix(fix_at(0.0, 0.0, 0));
        clock.advance(90_000);
        tracker.record_fix(fix_at(0.0, 0.002, 90_000));

        let summary = tracker.stop().expect("first stop returns the summary");
        assert_eq!(tracker.state(), LifecycleState::Stopped);
        assert_eq!(summary.duration_seconds, 90);
        assert_eq!(summary.duration_minutes, 1);
        assert_eq!(summary.remainder_seconds, 30);
        assert_eq!(summary.route.len(), 2);

        let before = tracker.snapshot();
        assert!(tracker.stop().is_none());
        assert_eq!(tracker.snapshot(), before);
    }

    #[test]
    fn test_stop_acts_as_barrier_for_queued_events() {
        let (mut tracker, clock) = tracker_with_manual_clock();
        tracker.start().unwrap();
        tracker.record_fix(fix_at(0.0, 0.0, 0));
        tracker.stop();

        // Events that were in flight when the stop landed
        clock.advance(1_000);
        assert!(tracker.record_fix(fix_at(0.0, 0.005, 1_000)).is_none());
        tracker.tick();

        let metrics = tracker.snapshot();
        assert_eq!(metrics.route.len(), 1);
        assert_eq!(metrics.distance_km, 0.0);
        assert_eq!(metrics.duration_seconds, 0);
    }

    #[test]
    fn test_stop_from_paused() {
        let (mut tracker, clock) = tracker_with_manual_clock();
        tracker.start().unwrap();
        clock.advance(45_000);
        tracker.pause();
        clock.advance(60_000);

        let summary = tracker.stop().unwrap();
        assert_eq!(summary.duration_seconds, 45);
    }

    #[test]
    fn test_stop_without_start_returns_none() {
        let (mut tracker, _clock) = tracker_with_manual_clock();
        assert!(tracker.stop().is_none());
        assert_eq!(tracker.state(), LifecycleState::Idle);
    }

    #[test]
    fn test_snapshot_is_an_independent_copy() {
        let (mut tracker, clock) = tracker_with_manual_clock();
        tracker.start().unwrap();
        tracker.record_fix(fix_at(0.0, 0.0, 0));

        let snapshot = tracker.snapshot();
        clock.advance(10_000);
        tracker.record_fix(fix_at(0.0, 0.002, 10_000));
        tracker.tick();

        assert_eq!(snapshot.route.len(), 1);
        assert_eq!(snapshot.distance_km, 0.0);
        assert_eq!(snapshot.duration_seconds, 0);
    }

    #[test]
    fn test_kilometer_scenario() {
        // Two fixes ~1 km apart, 600 seconds apart: one split at ~10 min/km
        let (mut tracker, clock) = tracker_with_manual_clock();
        tracker.start().unwrap();

        tracker.record_fix(fix_at(0.0, 0.0, 0));
        clock.advance(600_000);
        let split = tracker
            .record_fix(fix_at(0.0, KM_IN_EQUATOR_DEGREES, 600_000))
            .expect("crossing 1 km emits a split");

        assert_eq!(split.split_index, 1);
        assert!((split.elapsed_seconds_for_split - 600.0).abs() < 0.5);
        assert!((split.pace_min_per_km - 10.0).abs() < 0.01);

        tracker.tick();
        let metrics = tracker.snapshot();
        assert!((metrics.distance_km - 1.0).abs() < 0.001);
        assert!((metrics.average_pace_min_per_km - 10.0).abs() < 0.05);
        assert_eq!(tracker.splits().len(), 1);
    }

    #[test]
    fn test_three_sequential_kilometers() {
        let (mut tracker, clock) = tracker_with_manual_clock();
        tracker.start().unwrap();

        tracker.record_fix(fix_at(0.0, 0.0, 0));
        let mut indices = Vec::new();
        for km in 1..=3u64 {
            clock.advance(300_000);
            let lon = km as f64 * 1.001 * KM_IN_EQUATOR_DEGREES;
            if let Some(split) = tracker.record_fix(fix_at(0.0, lon, km * 300_000)) {
                indices.push(split.split_index);
            }
        }

        assert_eq!(indices, vec![1, 2, 3]);
        assert_eq!(tracker.splits().len(), 3);
    }

    #[test]
    fn test_restart_resets_metrics() {
        let (mut tracker, clock) = tracker_with_manual_clock();
        tracker.start().unwrap();
        tracker.record_fix(fix_at(0.0, 0.0, 0));
        clock.advance(10_000);
        tracker.record_fix(fix_at(0.0, 0.01, 10_000));
        tracker.tick();
        assert!(tracker.snapshot().distance_km > 0.0);

        // A fresh tracker (the supported way to run another session)
        let mut fresh =
            SessionTracker::with_clock(SessionConfig::default(), Box::new(clock.clone()));
        fresh.start().unwrap();
        let metrics = fresh.snapshot();
        assert_eq!(metrics.distance_km, 0.0);
        assert_eq!(metrics.duration_seconds, 0);
        assert!(metrics.route.is_empty());
    }

    #[test]
    fn test_summary_reflects_config() {
        let clock = ManualClock::new(5_000);
        let config = SessionConfig {
            workout_type: WorkoutType::Cycling,
            body_mass_kg: 80.0,
        };
        let mut tracker = SessionTracker::with_clock(config, Box::new(clock.clone()));
        tracker.start().unwrap();
        clock.advance(3_600_000);
        tracker.tick();

        let summary = tracker.stop().unwrap();
        assert_eq!(summary.workout_type, WorkoutType::Cycling);
        assert_eq!(summary.started_at_ms, 5_000);
        assert_eq!(summary.duration_seconds, 3_600);
        // 8.0 MET * 80 kg * 60 min / 60 = 640
        assert_eq!(summary.calories, 640);
    }
}
