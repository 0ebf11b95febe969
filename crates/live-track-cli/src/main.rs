//! Live session tracking demo
//!
//! Stands in for the presentation layer: wires the simulated location
//! collaborator to a [`SessionTracker`] on a single-threaded event loop and
//! renders live metrics once per second. Two event sources feed the
//! tracker, exactly as a mobile frontend would drive it: the irregular fix
//! stream (via an mpsc channel) and a fixed 1 Hz tick.

mod simulator;

use clap::Parser;
use live_track_lib::{
    Clock, LifecycleState, LocationProvider, ManualClock, SessionConfig, SessionSummary,
    SessionTracker, SystemClock, WatchOptions, WorkoutType, format,
};
use simulator::{SimulatedGps, SimulationConfig};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "live-track",
    version,
    about = "Simulate and live-track a GPS workout session"
)]
struct Args {
    /// Session length in simulated seconds
    #[arg(long, default_value_t = 120)]
    duration_secs: u64,

    /// Interval between simulated fixes in milliseconds
    #[arg(long, default_value_t = 2_000)]
    fix_interval_ms: u64,

    /// Ground speed of the simulated athlete in km/h
    #[arg(long, default_value_t = 12.0)]
    speed_kmh: f64,

    /// Workout type recorded in the session summary
    #[arg(long, default_value = "running")]
    workout_type: WorkoutType,

    /// Body mass used for the calorie estimate, in kilograms
    #[arg(long, default_value_t = 70.0)]
    body_mass_kg: f64,

    /// Pause the session this many simulated seconds in
    #[arg(long)]
    pause_at_secs: Option<u64>,

    /// Resume a paused session this many simulated seconds in
    #[arg(long)]
    resume_at_secs: Option<u64>,

    /// Replay acceleration factor (2 = twice real time)
    #[arg(long, default_value_t = 1)]
    speedup: u32,

    /// Print the final summary as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();

    rt.block_on(run(args));
}

async fn run(args: Args) {
    // Deterministic time: the event loop advances this clock one second per
    // tick, so --speedup accelerates the session without distorting it.
    let clock = ManualClock::new(SystemClock.now_ms());
    let mut tracker = SessionTracker::with_clock(
        SessionConfig {
            workout_type: args.workout_type,
            body_mass_kg: args.body_mass_kg,
        },
        Box::new(clock.clone()),
    );

    let mut provider = SimulatedGps::new(SimulationConfig {
        start_ms: clock.now_ms(),
        fix_interval_ms: args.fix_interval_ms,
        speed_kmh: args.speed_kmh,
        speedup: args.speedup,
    });

    if !provider.check_permission() && !provider.request_permission() {
        tracing::error!("location permission denied, not starting a session");
        return;
    }

    tracker.start().expect("fresh tracker starts");

    let (fix_tx, mut fix_rx) = tokio::sync::mpsc::unbounded_channel();
    let watch = provider.watch_position(
        WatchOptions::default(),
        Box::new(move |fix| {
            let _ = fix_tx.send(fix);
        }),
    );
    tracing::info!(
        workout_type = %args.workout_type,
        duration_secs = args.duration_secs,
        speed_kmh = args.speed_kmh,
        "simulation running"
    );

    let mut ticker = tokio::time::interval(Duration::from_secs_f64(
        1.0 / args.speedup.max(1) as f64,
    ));
    ticker.tick().await; // the first tick completes immediately

    let mut elapsed_secs: u64 = 0;
    let mut stream_done = false;

    loop {
        tokio::select! {
            maybe_fix = fix_rx.recv(), if !stream_done => {
                match maybe_fix {
                    Some(fix) => {
                        if let Some(split) = tracker.record_fix(fix) {
                            println!(
                                "km {:>2} completed in {} ({})",
                                split.split_index,
                                format::format_duration(split.elapsed_seconds_for_split.round() as u64),
                                format::format_pace(split.pace_min_per_km),
                            );
                        }
                    }
                    None => {
                        tracing::debug!("fix stream ended");
                        stream_done = true;
                    }
                }
            }
            _ = ticker.tick() => {
                clock.advance(1_000);
                elapsed_secs += 1;

                if args.pause_at_secs == Some(elapsed_secs) {
                    tracker.pause();
                }
                if args.resume_at_secs == Some(elapsed_secs) {
                    tracker.resume();
                }

                tracker.tick();
                print_status(&tracker);

                if elapsed_secs >= args.duration_secs {
                    break;
                }
            }
        }
    }

    provider.clear_watch(watch);
    let summary = tracker.stop().expect("running session stops exactly once");

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).expect("summary serializes")
        );
    } else {
        print_summary(&summary);
    }
}

fn print_status(tracker: &SessionTracker) {
    let state = match tracker.state() {
        LifecycleState::Idle => "IDLE",
        LifecycleState::Active => "ACTIVE",
        LifecycleState::Paused => "PAUSED",
        LifecycleState::Stopped => "STOPPED",
    };
    let metrics = tracker.snapshot();
    println!(
        "[{state}] {} | {:.2} km | {} | {:.1} km/h avg | {:.0} m climb | {} kcal",
        format::format_duration(metrics.duration_seconds),
        metrics.distance_km,
        format::format_pace(metrics.average_pace_min_per_km),
        metrics.average_speed_kmh,
        metrics.elevation_gain_m,
        metrics.estimated_calories,
    );
}

fn print_summary(summary: &SessionSummary) {
    println!();
    println!("=== {} session ===", summary.workout_type);
    println!("distance   {:.2} km", summary.distance_km);
    println!(
        "duration   {}",
        format::format_duration(summary.duration_seconds)
    );
    println!(
        "avg pace   {}",
        format::format_pace(summary.average_pace_min_per_km)
    );
    println!("max speed  {:.1} km/h", summary.max_speed_kmh);
    println!("climb      {:.0} m", summary.elevation_gain_m);
    println!("calories   {}", summary.calories);
    println!("gps fixes  {}", summary.route.len());

    if !summary.splits.is_empty() {
        println!();
        for split in &summary.splits {
            println!(
                "  km {:>2}  {}  {}",
                split.split_index,
                format::format_duration(split.elapsed_seconds_for_split.round() as u64),
                format::format_pace(split.pace_min_per_km),
            );
        }
    }
}
