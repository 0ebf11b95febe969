//! Contract required from the platform location services collaborator
//!
//! The tracking core does not talk to GPS hardware; it consumes fixes
//! through [`SessionTracker::record_fix`](crate::SessionTracker::record_fix).
//! This module specifies the boundary a platform integration (or a test
//! double) must implement to feed it. Permission denial is a boolean
//! outcome, never an error: the presentation layer decides how to prompt.
//! A fix-acquisition timeout is a transient gap — the tracker simply
//! receives nothing for that interval.

use crate::fix::PositionFix;

/// Options for a position watch subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchOptions {
    /// Request the most accurate positioning the platform offers
    pub high_accuracy: bool,
    /// Give up on a single fix acquisition after this long
    pub timeout_ms: u32,
    /// Maximum age of a cached fix the platform may deliver
    pub max_fix_age_ms: u32,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout_ms: 10_000,
            max_fix_age_ms: 3_000,
        }
    }
}

/// Opaque identifier of an active position watch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(pub u64);

/// Callback invoked by the collaborator for every acquired fix
pub type FixCallback = Box<dyn FnMut(PositionFix) + Send>;

/// Location services as the tracking core needs them
///
/// Implemented by platform integrations outside this crate; the bundled
/// implementations are deliberate fakes (CLI simulator, test doubles).
pub trait LocationProvider {
    /// Whether location access is currently granted, without prompting
    fn check_permission(&self) -> bool;

    /// Ask for location access, prompting the user if the platform allows
    fn request_permission(&mut self) -> bool;

    /// Begin delivering fixes to `on_fix` until the watch is cleared
    fn watch_position(&mut self, options: WatchOptions, on_fix: FixCallback) -> SubscriptionHandle;

    /// Stop an active watch; unknown handles are ignored
    fn clear_watch(&mut self, handle: SubscriptionHandle);
}
