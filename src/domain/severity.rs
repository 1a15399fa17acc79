//! Outburst severity levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::GlacierError;

/// Confidence above which an analyzed outburst is rated [`Severity::High`].
pub const HIGH_CONFIDENCE: f64 = 0.8;

/// Confidence above which an analyzed outburst is rated [`Severity::Medium`].
pub const MEDIUM_CONFIDENCE: f64 = 0.6;

/// Categorical urgency label attached to every outburst event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Minor activity.
    Low,
    /// Moderate melt or outburst.
    Medium,
    /// Major outburst.
    High,
}

impl Severity {
    /// All severities, lowest first.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Maps an analysis confidence onto a severity.
    #[must_use]
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence > HIGH_CONFIDENCE {
            Self::High
        } else if confidence > MEDIUM_CONFIDENCE {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = GlacierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(GlacierError::InvalidRequest(format!(
                "invalid severity: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_thresholds_are_exclusive() {
        assert_eq!(Severity::from_confidence(0.95), Severity::High);
        assert_eq!(Severity::from_confidence(0.8), Severity::Medium);
        assert_eq!(Severity::from_confidence(0.61), Severity::Medium);
        assert_eq!(Severity::from_confidence(0.6), Severity::Low);
        assert_eq!(Severity::from_confidence(0.0), Severity::Low);
    }

    #[test]
    fn parses_wire_names() {
        for severity in Severity::ALL {
            assert_eq!(severity.as_str().parse::<Severity>().ok(), Some(severity));
        }
        assert!("critical".parse::<Severity>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&Severity::Medium).unwrap_or_default();
        assert_eq!(json, "\"medium\"");
    }
}
