//! Smart filtering and similarity grouping of recorded spans.
//!
//! Three optional stages run in a fixed order, each narrowing the input of
//! the next one:
//! 1. slow-only: keep spans at or above a threshold
//! 2. hide-ultra-fast: drop spans below a threshold
//! 3. group-similar: cluster spans whose durations are close to a seed span
//!
//! Example: durations `[5ms, 15ms, 50ms]` with slow-only 10ms and
//! hide-ultra-fast 20ms yield `[50ms]`.

use crate::tracer::measurement::{DisplayEntry, GroupedMeasurement, Measurement};
use crate::utils::format::format_threshold;
use log::debug;
use std::time::Duration;

/// Thresholds for the three filter stages; `None` disables a stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// Stage 1: keep only spans with `duration >= slow_only`
    pub slow_only: Option<Duration>,

    /// Stage 2: drop spans with `duration < hide_ultra_fast`
    pub hide_ultra_fast: Option<Duration>,

    /// Stage 3: group spans within this distance of a group's seed
    pub group_similar: Option<Duration>,
}

impl FilterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set all three stages at once; a zero threshold leaves that stage untouched
    pub fn smart(slow: Duration, ultra_fast: Duration, similar: Duration) -> Self {
        let mut config = Self::default();
        config.merge_smart(slow, ultra_fast, similar);
        config
    }

    /// Enable the stages whose thresholds are non-zero, keeping the others as they are
    pub fn merge_smart(&mut self, slow: Duration, ultra_fast: Duration, similar: Duration) {
        if !slow.is_zero() {
            self.slow_only = Some(slow);
        }
        if !ultra_fast.is_zero() {
            self.hide_ultra_fast = Some(ultra_fast);
        }
        if !similar.is_zero() {
            self.group_similar = Some(similar);
        }
    }

    pub fn is_active(&self) -> bool {
        self.slow_only.is_some() || self.hide_ultra_fast.is_some() || self.group_similar.is_some()
    }

    /// Short descriptions of the active stages, e.g. `["slow>10ms", "group±5ms"]`
    pub fn descriptions(&self) -> Vec<String> {
        let mut active = Vec::new();
        if let Some(t) = self.slow_only {
            active.push(format!("slow>{}", format_threshold(t)));
        }
        if let Some(t) = self.hide_ultra_fast {
            active.push(format!("hide<{}", format_threshold(t)));
        }
        if let Some(t) = self.group_similar {
            active.push(format!("group±{}", format_threshold(t)));
        }
        active
    }
}

/// Run the filter pipeline over real (non-"End") measurements
///
/// **Public** - main entry point used by every renderer
///
/// # Arguments
/// * `measurements` - Recorded spans in checkpoint order
/// * `config` - Active filter stages
///
/// # Returns
/// Entries to display, raw spans or groups, in input order
pub fn apply_smart_filter(measurements: &[Measurement], config: &FilterConfig) -> Vec<DisplayEntry> {
    let mut kept: Vec<&Measurement> = measurements.iter().collect();

    if let Some(threshold) = config.slow_only {
        kept.retain(|m| m.duration >= threshold);
        debug!("slow-only >= {:?}: {} spans remain", threshold, kept.len());
    }

    if let Some(threshold) = config.hide_ultra_fast {
        kept.retain(|m| m.duration >= threshold);
        debug!("hide-ultra-fast < {:?}: {} spans remain", threshold, kept.len());
    }

    let kept: Vec<Measurement> = kept.into_iter().cloned().collect();

    match config.group_similar {
        Some(threshold) if !kept.is_empty() => group_similar(&kept, threshold)
            .into_iter()
            .map(DisplayEntry::Group)
            .collect(),
        _ => kept.into_iter().map(DisplayEntry::Span).collect(),
    }
}

/// Greedy single-pass grouping by duration
///
/// **Public** - exposed for callers that only want grouping
///
/// # Algorithm
/// 1. Walk the spans in order; each span not yet consumed seeds a new group
/// 2. Fold in every later unconsumed span within `threshold` of the *seed*
/// 3. Label the group "<seed> + N similar" (N <= 2) or "<seed> + N others"
///
/// Similarity is measured against the seed only, so `[10, 15, 20]` at 5ms
/// groups as `{10, 15}` and `{20}` even though 15 and 20 are close.
pub fn group_similar(measurements: &[Measurement], threshold: Duration) -> Vec<GroupedMeasurement> {
    let mut consumed = vec![false; measurements.len()];
    let mut groups = Vec::new();

    for (i, seed) in measurements.iter().enumerate() {
        if consumed[i] {
            continue;
        }
        consumed[i] = true;

        let mut group = GroupedMeasurement::seed(seed);
        let mut similar = 0usize;

        for (j, other) in measurements.iter().enumerate().skip(i + 1) {
            if consumed[j] {
                continue;
            }
            if distance(seed.duration, other.duration) <= threshold {
                group.absorb(other);
                consumed[j] = true;
                similar += 1;
            }
        }

        match similar {
            0 => {}
            1 | 2 => group.label = format!("{} + {} similar", group.label, similar),
            n => group.label = format!("{} + {} others", group.label, n),
        }

        groups.push(group);
    }

    debug!(
        "Grouped {} spans into {} groups (threshold {:?})",
        measurements.len(),
        groups.len(),
        threshold
    );

    groups
}

fn distance(a: Duration, b: Duration) -> Duration {
    if a > b {
        a - b
    } else {
        b - a
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(millis: &[u64]) -> Vec<Measurement> {
        millis
            .iter()
            .enumerate()
            .map(|(i, ms)| Measurement::new(format!("op{}", i + 1), Duration::from_millis(*ms)))
            .collect()
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_no_filters_passes_everything() {
        let input = spans(&[5, 15, 50]);
        let out = apply_smart_filter(&input, &FilterConfig::new());

        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|e| !e.is_group()));
        assert_eq!(out[1].label(), "op2");
    }

    #[test]
    fn test_stage_order_matters() {
        let input = spans(&[5, 15, 50]);
        let config = FilterConfig {
            slow_only: Some(ms(10)),
            hide_ultra_fast: Some(ms(20)),
            group_similar: None,
        };

        let out = apply_smart_filter(&input, &config);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].display_duration(), ms(50));
    }

    #[test]
    fn test_slow_only_is_inclusive() {
        let input = spans(&[9, 10, 11]);
        let config = FilterConfig {
            slow_only: Some(ms(10)),
            ..Default::default()
        };

        let out = apply_smart_filter(&input, &config);
        let labels: Vec<&str> = out.iter().map(|e| e.label()).collect();
        assert_eq!(labels, vec!["op2", "op3"]);
    }

    #[test]
    fn test_hide_ultra_fast_keeps_threshold_value() {
        let input = spans(&[1, 2, 3]);
        let config = FilterConfig {
            hide_ultra_fast: Some(ms(2)),
            ..Default::default()
        };

        let out = apply_smart_filter(&input, &config);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_grouping_pair_and_singleton() {
        let groups = group_similar(&spans(&[40, 44, 100]), ms(5));

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "op1 + 1 similar");
        assert_eq!(groups[0].count, 2);
        assert_eq!(groups[0].average, ms(42));
        assert_eq!(groups[1].label, "op3");
        assert_eq!(groups[1].count, 1);
    }

    #[test]
    fn test_grouping_is_seed_only() {
        let groups = group_similar(&spans(&[10, 15, 20]), ms(5));

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].count, 2);
        assert_eq!(groups[0].min, ms(10));
        assert_eq!(groups[0].max, ms(15));
        assert_eq!(groups[1].total, ms(20));
    }

    #[test]
    fn test_grouping_others_suffix() {
        let groups = group_similar(&spans(&[10, 11, 12, 13, 90]), ms(5));

        assert_eq!(groups[0].label, "op1 + 3 others");
        assert_eq!(groups[0].count, 4);
        assert_eq!(groups[1].label, "op5");
    }

    #[test]
    fn test_grouping_absorbs_non_adjacent_members() {
        let groups = group_similar(&spans(&[10, 100, 12, 102]), ms(5));

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "op1 + 1 similar");
        assert_eq!(groups[0].total, ms(22));
        assert_eq!(groups[1].label, "op2 + 1 similar");
    }

    #[test]
    fn test_group_stage_skipped_when_empty() {
        let input = spans(&[1, 2]);
        let config = FilterConfig {
            slow_only: Some(ms(100)),
            group_similar: Some(ms(5)),
            ..Default::default()
        };

        assert!(apply_smart_filter(&input, &config).is_empty());
    }

    #[test]
    fn test_smart_zero_leaves_stage_disabled() {
        let config = FilterConfig::smart(ms(50), Duration::ZERO, ms(10));

        assert_eq!(config.slow_only, Some(ms(50)));
        assert_eq!(config.hide_ultra_fast, None);
        assert_eq!(config.group_similar, Some(ms(10)));
        assert_eq!(config.descriptions(), vec!["slow>50ms", "group±10ms"]);
    }
}
