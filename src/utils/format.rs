//! Human-readable duration and text helpers shared by the renderers.

use std::time::Duration;

/// Format a duration for display
///
/// Picks the largest unit that keeps the value readable:
/// `"0s"`, `"750ns"`, `"12.50µs"`, `"42.00ms"`, `"1.25s"`.
pub fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos == 0 {
        "0s".to_string()
    } else if nanos < 1_000 {
        format!("{}ns", nanos)
    } else if nanos < 1_000_000 {
        format!("{:.2}µs", nanos as f64 / 1_000.0)
    } else if nanos < 1_000_000_000 {
        format!("{:.2}ms", nanos as f64 / 1_000_000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}

/// Compact duration used in filter descriptions (`"10ms"`, `"1.5s"`)
pub fn format_threshold(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos == 0 {
        "0s".to_string()
    } else if nanos % 1_000_000_000 == 0 {
        format!("{}s", nanos / 1_000_000_000)
    } else if nanos % 1_000_000 == 0 {
        format!("{}ms", nanos / 1_000_000)
    } else if nanos % 1_000 == 0 {
        format!("{}µs", nanos / 1_000)
    } else {
        format_duration(d)
    }
}

/// Truncate text to `max` characters, ending with "..." when cut
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }
    let mut out: String = text.chars().take(max - 3).collect();
    out.push_str("...");
    out
}

/// Left-align text in a field of `width` characters
///
/// `format!("{:<w$}")` pads by `char` count as well; this exists so callers
/// can pad *before* wrapping text in ANSI escapes.
pub fn pad_right(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - len))
    }
}

/// Right-align text in a field of `width` characters
pub fn pad_left(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        text.to_string()
    } else {
        format!("{}{}", " ".repeat(width - len), text)
    }
}

/// Center text in a field of `width` characters, at least one space each side
pub fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let left = (width.saturating_sub(len) / 2).max(1);
    let right = width.saturating_sub(len + left).max(1);
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_units() {
        assert_eq!(format_duration(Duration::ZERO), "0s");
        assert_eq!(format_duration(Duration::from_nanos(750)), "750ns");
        assert_eq!(format_duration(Duration::from_micros(12)), "12.00µs");
        assert_eq!(format_duration(Duration::from_millis(42)), "42.00ms");
        assert_eq!(format_duration(Duration::from_millis(1250)), "1.25s");
    }

    #[test]
    fn test_format_threshold() {
        assert_eq!(format_threshold(Duration::from_millis(10)), "10ms");
        assert_eq!(format_threshold(Duration::from_secs(2)), "2s");
        assert_eq!(format_threshold(Duration::from_micros(500)), "500µs");
        assert_eq!(format_threshold(Duration::from_micros(1500)), "1500µs");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long operation name", 10), "a very ...");
        assert_eq!(truncate("abcdef", 3), "abc");
    }

    #[test]
    fn test_padding() {
        assert_eq!(pad_right("ab", 4), "ab  ");
        assert_eq!(pad_left("ab", 4), "  ab");
        assert_eq!(pad_right("abcdef", 4), "abcdef");
        assert_eq!(center("ab", 6), "  ab  ");
    }
}
