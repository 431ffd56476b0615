//! Recorded checkpoint intervals and their grouped summaries.

use std::fmt;
use std::time::Duration;

use crate::utils::format::format_duration;

/// A single recorded interval between two checkpoints
///
/// **Public** - returned by `Tracer::measurements`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measurement {
    /// Label passed to `checkpoint`
    pub label: String,

    /// Time since the previous checkpoint (or session start)
    pub duration: Duration,
}

impl Measurement {
    pub fn new(label: impl Into<String>, duration: Duration) -> Self {
        Self {
            label: label.into(),
            duration,
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, format_duration(self.duration))
    }
}

/// Aggregate of measurements judged similar by duration
///
/// Built fresh on every render pass by `aggregator::group_similar`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedMeasurement {
    /// Seed label, suffixed with "+ N similar" / "+ N others" when members were folded in
    pub label: String,

    /// Number of measurements in the group (seed included)
    pub count: usize,

    pub total: Duration,
    pub min: Duration,
    pub max: Duration,

    /// `total / count`
    pub average: Duration,
}

impl GroupedMeasurement {
    /// Start a group from its seed measurement
    pub(crate) fn seed(m: &Measurement) -> Self {
        Self {
            label: m.label.clone(),
            count: 1,
            total: m.duration,
            min: m.duration,
            max: m.duration,
            average: m.duration,
        }
    }

    /// Fold another measurement into the group
    pub(crate) fn absorb(&mut self, m: &Measurement) {
        self.count += 1;
        self.total += m.duration;
        self.min = self.min.min(m.duration);
        self.max = self.max.max(m.duration);
        self.average = self.total / self.count as u32;
    }
}

impl fmt::Display for GroupedMeasurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (×{}): avg {}, range {}-{}",
            self.label,
            self.count,
            format_duration(self.average),
            format_duration(self.min),
            format_duration(self.max)
        )
    }
}

/// One row handed to a renderer: a raw span or a group of similar spans
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEntry {
    Span(Measurement),
    Group(GroupedMeasurement),
}

impl DisplayEntry {
    pub fn label(&self) -> &str {
        match self {
            DisplayEntry::Span(m) => &m.label,
            DisplayEntry::Group(g) => &g.label,
        }
    }

    /// Duration shown next to the label (the average for a group)
    pub fn display_duration(&self) -> Duration {
        match self {
            DisplayEntry::Span(m) => m.duration,
            DisplayEntry::Group(g) => g.average,
        }
    }

    /// Portion of the session this entry accounts for (the total for a group)
    pub fn share(&self) -> Duration {
        match self {
            DisplayEntry::Span(m) => m.duration,
            DisplayEntry::Group(g) => g.total,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, DisplayEntry::Group(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_absorb_keeps_invariants() {
        let mut group = GroupedMeasurement::seed(&Measurement::new("a", Duration::from_millis(40)));
        group.absorb(&Measurement::new("b", Duration::from_millis(44)));
        group.absorb(&Measurement::new("c", Duration::from_millis(36)));

        assert_eq!(group.count, 3);
        assert_eq!(group.total, Duration::from_millis(120));
        assert_eq!(group.average, Duration::from_millis(40));
        assert_eq!(group.min, Duration::from_millis(36));
        assert_eq!(group.max, Duration::from_millis(44));
        assert!(group.min <= group.average && group.average <= group.max);
    }

    #[test]
    fn test_display_entry_durations() {
        let mut group = GroupedMeasurement::seed(&Measurement::new("a", Duration::from_millis(10)));
        group.absorb(&Measurement::new("b", Duration::from_millis(20)));
        let entry = DisplayEntry::Group(group);

        assert!(entry.is_group());
        assert_eq!(entry.display_duration(), Duration::from_millis(15));
        assert_eq!(entry.share(), Duration::from_millis(30));
    }

    #[test]
    fn test_measurement_display() {
        let m = Measurement::new("load", Duration::from_millis(5));
        assert_eq!(m.to_string(), "load: 5.00ms");
    }
}
