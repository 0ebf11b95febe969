//! Simulated location services collaborator
//!
//! Generates fixes along a gently wobbled eastbound path at a configured
//! ground speed, delivered through the [`LocationProvider`] callback exactly
//! like a platform integration would. Permission is always granted; this is
//! a deliberate fake for demos and never a substitute for a real platform
//! integration.

use live_track_lib::{
    FixCallback, LocationProvider, PositionFix, SubscriptionHandle, WatchOptions, geodesy,
};
use std::time::Duration;

/// Degrees of longitude per kilometer at the equator
const DEG_PER_KM: f64 = 180.0 / (std::f64::consts::PI * geodesy::EARTH_RADIUS_KM);

/// Parameters of the synthetic fix stream
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Epoch milliseconds stamped on the first fix
    pub start_ms: u64,
    /// Interval between fixes, in simulated milliseconds
    pub fix_interval_ms: u64,
    /// Target ground speed, in km/h
    pub speed_kmh: f64,
    /// Replay acceleration factor (2 = fixes arrive twice as fast)
    pub speedup: u32,
}

/// Stand-in for platform location services
pub struct SimulatedGps {
    config: SimulationConfig,
    permission_granted: bool,
    next_handle: u64,
    watches: Vec<(SubscriptionHandle, tokio::task::JoinHandle<()>)>,
}

impl SimulatedGps {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            permission_granted: false,
            next_handle: 1,
            watches: Vec::new(),
        }
    }
}

impl LocationProvider for SimulatedGps {
    fn check_permission(&self) -> bool {
        self.permission_granted
    }

    fn request_permission(&mut self) -> bool {
        tracing::info!("simulated permission prompt: granted");
        self.permission_granted = true;
        true
    }

    fn watch_position(
        &mut self,
        options: WatchOptions,
        mut on_fix: FixCallback,
    ) -> SubscriptionHandle {
        let handle = SubscriptionHandle(self.next_handle);
        self.next_handle += 1;

        tracing::debug!(
            high_accuracy = options.high_accuracy,
            timeout_ms = options.timeout_ms,
            "starting simulated position watch"
        );

        let config = self.config.clone();
        let real_interval =
            Duration::from_millis(config.fix_interval_ms / config.speedup.max(1) as u64);
        let task = tokio::spawn(async move {
            let mut sequence: u64 = 0;
            loop {
                tokio::time::sleep(real_interval).await;
                sequence += 1;
                on_fix(synthesize_fix(&config, sequence));
            }
        });

        self.watches.push((handle, task));
        handle
    }

    fn clear_watch(&mut self, handle: SubscriptionHandle) {
        if let Some(index) = self.watches.iter().position(|(h, _)| *h == handle) {
            let (_, task) = self.watches.swap_remove(index);
            task.abort();
            tracing::debug!(handle = handle.0, "cleared simulated position watch");
        }
    }
}

/// Fix `sequence` along the synthetic path
fn synthesize_fix(config: &SimulationConfig, sequence: u64) -> PositionFix {
    let hours_per_interval = config.fix_interval_ms as f64 / 3_600_000.0;
    let km_covered = sequence as f64 * config.speed_kmh * hours_per_interval;

    let t = sequence as f64;
    let longitude = km_covered * DEG_PER_KM;
    let latitude = (t * 0.5).sin() * 0.00002;
    let altitude_m = 100.0 + (t * 0.05).sin() * 15.0;
    let speed_mps = config.speed_kmh / geodesy::MPS_TO_KMH + (t * 0.3).cos() * 0.4;

    PositionFix::with_details(
        latitude,
        longitude,
        config.start_ms + sequence * config.fix_interval_ms,
        Some(altitude_m),
        Some(speed_mps),
        Some(5.0),
    )
}
