//! Duration and percentage classification rules.
//!
//! Rules are ordered `(threshold, label, style)` lists evaluated top-down;
//! the first rule whose threshold the value reaches wins. They are plain
//! values handed to the renderers, so a plain-text or JSON renderer can use
//! the same labels without touching any colour.

use colored::{Color, Colorize};
use std::time::Duration;

/// Colour and weight applied to a piece of text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStyle {
    pub color: Option<Color>,
    pub bold: bool,
}

impl TextStyle {
    pub const PLAIN: TextStyle = TextStyle {
        color: None,
        bold: false,
    };

    pub const fn color(color: Color) -> Self {
        Self {
            color: Some(color),
            bold: false,
        }
    }

    pub const fn bold(color: Color) -> Self {
        Self {
            color: Some(color),
            bold: true,
        }
    }

    /// Wrap `text` in the ANSI escapes for this style
    pub fn apply(&self, text: &str) -> String {
        let mut styled = text.normal();
        if let Some(color) = self.color {
            styled = styled.color(color);
        }
        if self.bold {
            styled = styled.bold();
        }
        styled.to_string()
    }
}

/// Bucket for durations at or above `threshold`
#[derive(Debug, Clone, PartialEq)]
pub struct DurationRule {
    pub threshold: Duration,
    pub label: String,
    pub style: TextStyle,
}

/// Bucket for percentages at or above `threshold`
#[derive(Debug, Clone, PartialEq)]
pub struct PercentageRule {
    pub threshold: f64,
    pub label: String,
    pub style: TextStyle,
}

/// Result of a classification lookup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bucket<'a> {
    pub label: &'a str,
    pub style: TextStyle,
}

const UNCLASSIFIED: Bucket<'static> = Bucket {
    label: "Unclassified",
    style: TextStyle::PLAIN,
};

/// Ordered classification tables injected into every renderer
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationRules {
    /// Descending duration thresholds
    pub duration: Vec<DurationRule>,

    /// Descending percentage thresholds, used for progress bars
    pub percentage: Vec<PercentageRule>,
}

impl ClassificationRules {
    /// Classify a span duration; first matching rule wins
    pub fn duration_bucket(&self, d: Duration) -> Bucket<'_> {
        self.duration
            .iter()
            .find(|rule| d >= rule.threshold)
            .map(|rule| Bucket {
                label: &rule.label,
                style: rule.style,
            })
            .unwrap_or(UNCLASSIFIED)
    }

    /// Classify a share of the session, in percent
    pub fn percentage_bucket(&self, pct: f64) -> Bucket<'_> {
        self.percentage
            .iter()
            .find(|rule| pct >= rule.threshold)
            .map(|rule| Bucket {
                label: &rule.label,
                style: rule.style,
            })
            .unwrap_or(UNCLASSIFIED)
    }
}

fn duration_rule(threshold: Duration, label: &str, style: TextStyle) -> DurationRule {
    DurationRule {
        threshold,
        label: label.to_string(),
        style,
    }
}

fn percentage_rule(threshold: f64, label: &str, style: TextStyle) -> PercentageRule {
    PercentageRule {
        threshold,
        label: label.to_string(),
        style,
    }
}

impl Default for ClassificationRules {
    fn default() -> Self {
        let ms = Duration::from_millis;
        Self {
            duration: vec![
                duration_rule(Duration::from_secs(3), "Very Slow", TextStyle::bold(Color::Red)),
                duration_rule(Duration::from_secs(1), "Slow", TextStyle::color(Color::Red)),
                duration_rule(ms(500), "Medium-Slow", TextStyle::color(Color::Yellow)),
                duration_rule(ms(200), "Medium", TextStyle::color(Color::BrightBlue)),
                duration_rule(ms(100), "Normal", TextStyle::color(Color::Cyan)),
                duration_rule(ms(50), "Fast", TextStyle::color(Color::Green)),
                duration_rule(ms(10), "Very Fast", TextStyle::color(Color::BrightGreen)),
                duration_rule(Duration::ZERO, "Ultra Fast", TextStyle::color(Color::BrightBlack)),
            ],
            percentage: vec![
                percentage_rule(75.0, "Critical", TextStyle::bold(Color::Red)),
                percentage_rule(50.0, "High", TextStyle::color(Color::Red)),
                percentage_rule(25.0, "Medium", TextStyle::color(Color::Magenta)),
                percentage_rule(10.0, "Low", TextStyle::color(Color::Blue)),
                percentage_rule(5.0, "Very Low", TextStyle::color(Color::Green)),
                percentage_rule(0.0, "Minimal", TextStyle::color(Color::Cyan)),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_duration_buckets() {
        let rules = ClassificationRules::default();
        let cases = [
            (Duration::from_secs(4), "Very Slow"),
            (Duration::from_secs(3), "Very Slow"),
            (ms(1500), "Slow"),
            (ms(500), "Medium-Slow"),
            (ms(225), "Medium"),
            (ms(150), "Normal"),
            (ms(99), "Fast"),
            (ms(10), "Very Fast"),
            (ms(9), "Ultra Fast"),
            (Duration::ZERO, "Ultra Fast"),
        ];

        for (d, expected) in cases {
            assert_eq!(rules.duration_bucket(d).label, expected, "duration {:?}", d);
        }
    }

    #[test]
    fn test_percentage_buckets() {
        let rules = ClassificationRules::default();
        assert_eq!(rules.percentage_bucket(80.0).label, "Critical");
        assert_eq!(rules.percentage_bucket(50.0).label, "High");
        assert_eq!(rules.percentage_bucket(12.5).label, "Low");
        assert_eq!(rules.percentage_bucket(0.1).label, "Minimal");
    }

    #[test]
    fn test_custom_rules_fall_back_to_unclassified() {
        let rules = ClassificationRules {
            duration: vec![duration_rule(ms(100), "Slow", TextStyle::PLAIN)],
            percentage: Vec::new(),
        };

        assert_eq!(rules.duration_bucket(ms(150)).label, "Slow");
        assert_eq!(rules.duration_bucket(ms(50)).label, "Unclassified");
        assert_eq!(rules.percentage_bucket(10.0).label, "Unclassified");
    }
}
