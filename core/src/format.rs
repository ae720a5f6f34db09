//! Display formatting for countdowns

use tickdown_types::{CountdownConfig, TierColors};

/// Format a duration in seconds as `M:SS` (minutes unpadded)
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Urgency tier of a countdown, chosen from the seconds remaining.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTier {
    /// At or below the urgent threshold (red)
    Urgent,
    /// At or below the warning threshold (orange)
    Warning,
    /// Plenty of time left (green)
    Ok,
}

impl ColorTier {
    /// Thresholds are inclusive and checked urgent first.
    pub fn for_remaining(remaining_secs: u32, config: &CountdownConfig) -> Self {
        if remaining_secs <= config.urgent_threshold_secs {
            ColorTier::Urgent
        } else if remaining_secs <= config.warning_threshold_secs {
            ColorTier::Warning
        } else {
            ColorTier::Ok
        }
    }

    pub fn color<'a>(&self, colors: &'a TierColors) -> &'a str {
        match self {
            ColorTier::Urgent => &colors.urgent,
            ColorTier::Warning => &colors.warning,
            ColorTier::Ok => &colors.ok,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(9), "0:09");
        assert_eq!(format_clock(60), "1:00");
        assert_eq!(format_clock(125), "2:05");
        assert_eq!(format_clock(900), "15:00");
        assert_eq!(format_clock(3725), "62:05");
    }

    #[test]
    fn test_tier_boundaries_are_inclusive() {
        let config = CountdownConfig::default();
        assert_eq!(ColorTier::for_remaining(0, &config), ColorTier::Urgent);
        assert_eq!(ColorTier::for_remaining(60, &config), ColorTier::Urgent);
        assert_eq!(ColorTier::for_remaining(61, &config), ColorTier::Warning);
        assert_eq!(ColorTier::for_remaining(120, &config), ColorTier::Warning);
        assert_eq!(ColorTier::for_remaining(121, &config), ColorTier::Ok);
    }

    #[test]
    fn test_tier_colors() {
        let colors = TierColors::default();
        assert_eq!(ColorTier::Urgent.color(&colors), "#dc3545");
        assert_eq!(ColorTier::Warning.color(&colors), "#ff6c00");
        assert_eq!(ColorTier::Ok.color(&colors), "#28a745");
    }
}
