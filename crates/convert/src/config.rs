//! Configuration for calendar conversion.

use std::fmt;
use std::str::FromStr;

use recal_calendar::Calendar;

use crate::error::ConvertError;

/// How a synthesised day is filled from its real neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Copy the closest real day; ties go to the preceding day.
    Nearest,
    /// Distance-weighted interpolation between the bracketing real days.
    #[default]
    Linear,
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Nearest => "nearest",
            Self::Linear => "linear",
        })
    }
}

impl FromStr for Interpolation {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "linear" => Ok(Self::Linear),
            _ => Err(ConvertError::UnknownInterpolation {
                name: s.to_string(),
            }),
        }
    }
}

/// How synthesised days with a real neighbour on one side only are filled.
///
/// This only happens at the first or last days of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeFill {
    /// Copy the closest real day.
    Nearest,
    /// Continue the line through the two closest real days. Applies to
    /// [`Interpolation::Linear`]; nearest interpolation always copies.
    #[default]
    Extrapolate,
}

impl fmt::Display for EdgeFill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Nearest => "nearest",
            Self::Extrapolate => "extrapolate",
        })
    }
}

impl FromStr for EdgeFill {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "extrapolate" => Ok(Self::Extrapolate),
            _ => Err(ConvertError::UnknownEdgeFill {
                name: s.to_string(),
            }),
        }
    }
}

/// Configuration for converting a 360-day series.
///
/// # Example
///
/// ```
/// use recal_convert::{ConvertConfig, Interpolation};
///
/// let config = ConvertConfig::new().with_interpolation(Interpolation::Nearest);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct ConvertConfig {
    target: Calendar,
    interpolation: Interpolation,
    edge_fill: EdgeFill,
}

impl ConvertConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `target = Standard`, `interpolation = Linear`,
    /// `edge_fill = Extrapolate`.
    pub fn new() -> Self {
        Self {
            target: Calendar::Standard,
            interpolation: Interpolation::default(),
            edge_fill: EdgeFill::default(),
        }
    }

    // --- Builder methods ---

    /// Sets the target calendar.
    pub fn with_target(mut self, target: Calendar) -> Self {
        self.target = target;
        self
    }

    /// Sets the interpolation policy for synthesised days.
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Sets the fill rule for synthesised days at the series edges.
    pub fn with_edge_fill(mut self, edge_fill: EdgeFill) -> Self {
        self.edge_fill = edge_fill;
        self
    }

    // --- Accessors ---

    /// Returns the target calendar.
    pub fn target(&self) -> Calendar {
        self.target
    }

    /// Returns the interpolation policy.
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Returns the edge-fill rule.
    pub fn edge_fill(&self) -> EdgeFill {
        self.edge_fill
    }

    /// Validates this configuration.
    ///
    /// The target must be `standard` or `proleptic_gregorian`.
    pub fn validate(&self) -> Result<(), ConvertError> {
        if !self.target.is_gregorian() {
            return Err(ConvertError::UnsupportedTarget {
                calendar: self.target.to_string(),
            });
        }
        Ok(())
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self::new()
    }
}
