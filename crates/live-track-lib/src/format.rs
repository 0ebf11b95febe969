//! Display formatting for durations and paces
//!
//! Shared by every consumer that renders live metrics, so the "no pace yet"
//! sentinel and the hour rollover render the same way everywhere.

/// Format an active duration as `m:ss`, or `h:mm:ss` from one hour up
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

/// Format a pace in minutes per kilometer as `m:ss/km`
///
/// The `0` sentinel (no distance covered yet) renders as `--:--`.
pub fn format_pace(pace_min_per_km: f64) -> String {
    if pace_min_per_km <= 0.0 {
        return "--:--".to_string();
    }
    let minutes = pace_min_per_km.floor();
    let seconds = ((pace_min_per_km - minutes) * 60.0).floor();
    format!("{}:{:02}/km", minutes as u64, seconds as u64)
}
