//! Output style selector.

use crate::utils::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Layout used when a session is rendered
///
/// Every style receives the same filtered data; only the layout differs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    /// Ruled two-column listing
    #[default]
    Default,

    /// Unicode box with coloured spans
    Colorful,

    /// Compact tree column
    Minimal,

    /// Summary statistics plus per-span percentages and progress bars
    Detailed,

    /// Numbered boxed table
    Table,

    /// Pretty-printed JSON
    #[serde(alias = "json")]
    Structured,
}

impl OutputStyle {
    pub const ALL: [OutputStyle; 6] = [
        OutputStyle::Default,
        OutputStyle::Colorful,
        OutputStyle::Minimal,
        OutputStyle::Detailed,
        OutputStyle::Table,
        OutputStyle::Structured,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputStyle::Default => "default",
            OutputStyle::Colorful => "colorful",
            OutputStyle::Minimal => "minimal",
            OutputStyle::Detailed => "detailed",
            OutputStyle::Table => "table",
            OutputStyle::Structured => "structured",
        }
    }
}

impl fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(OutputStyle::Default),
            "colorful" | "colourful" => Ok(OutputStyle::Colorful),
            "minimal" => Ok(OutputStyle::Minimal),
            "detailed" => Ok(OutputStyle::Detailed),
            "table" => Ok(OutputStyle::Table),
            "structured" | "json" => Ok(OutputStyle::Structured),
            other => Err(ConfigError::UnknownStyle(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_styles() {
        assert_eq!("Detailed".parse::<OutputStyle>().unwrap(), OutputStyle::Detailed);
        assert_eq!("json".parse::<OutputStyle>().unwrap(), OutputStyle::Structured);
        assert!("fancy".parse::<OutputStyle>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for style in OutputStyle::ALL {
            assert_eq!(style.to_string().parse::<OutputStyle>().unwrap(), style);
        }
    }
}
