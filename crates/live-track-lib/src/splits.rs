//! Whole-kilometer split detection

use smallvec::SmallVec;

/// Time and pace for one completed kilometer of a tracked session
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SplitRecord {
    /// 1-based index of the completed kilometer
    pub split_index: u32,
    /// Active time spent on this kilometer, in seconds
    pub elapsed_seconds_for_split: f64,
    /// Pace over this kilometer, in minutes per kilometer
    pub pace_min_per_km: f64,
}

/// Observes cumulative distance and emits one [`SplitRecord`] per
/// whole-kilometer boundary crossing.
///
/// At most one record is emitted per distance update: if sparse fixes jump
/// the distance by more than one whole kilometer, the skipped kilometers are
/// never back-filled and their indices are skipped.
#[derive(Debug, Clone, Default)]
pub(crate) struct SplitDetector {
    splits: SmallVec<[SplitRecord; 8]>,
    last_whole_km: u32,
    /// Sum of all recorded splits' elapsed seconds
    recorded_seconds: f64,
}

impl SplitDetector {
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    /// Feed the current cumulative distance and active elapsed time
    ///
    /// Returns the newly completed split, if this update crossed a
    /// whole-kilometer boundary.
    pub(crate) fn on_distance_update(
        &mut self,
        cumulative_km: f64,
        elapsed_seconds: f64,
    ) -> Option<SplitRecord> {
        let current_whole_km = cumulative_km.floor() as u32;
        if current_whole_km <= self.last_whole_km {
            return None;
        }

        let elapsed_for_split = elapsed_seconds - self.recorded_seconds;
        let record = SplitRecord {
            split_index: self.last_whole_km + 1,
            elapsed_seconds_for_split: elapsed_for_split,
            pace_min_per_km: elapsed_for_split / 60.0,
        };
        self.splits.push(record);
        self.recorded_seconds += elapsed_for_split;
        self.last_whole_km = current_whole_km;
        Some(record)
    }

    pub(crate) fn splits(&self) -> &[SplitRecord] {
        &self.splits
    }
}
