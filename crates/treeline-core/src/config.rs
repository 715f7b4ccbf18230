use crate::error::{Error, Result};
use crate::model::HandleSide;
use serde::{Deserialize, Serialize};

/// Axis-aligned layout direction, matching the four rank directions of a
/// layered layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    TB,
    BT,
    LR,
    RL,
}

impl Direction {
    /// Parses the loose literals the UI sends. Unknown values are a
    /// programmer error and surface synchronously.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_uppercase().as_str() {
            "TB" | "TD" => Ok(Self::TB),
            "BT" => Ok(Self::BT),
            "LR" => Ok(Self::LR),
            "RL" => Ok(Self::RL),
            _ => Err(Error::UnknownDirection {
                value: raw.to_string(),
            }),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::LR | Self::RL)
    }

    /// Handle sides are a pure function of direction: `(source, target)`.
    pub fn handles(self) -> (HandleSide, HandleSide) {
        match self {
            Self::TB => (HandleSide::Bottom, HandleSide::Top),
            Self::BT => (HandleSide::Top, HandleSide::Bottom),
            Self::LR => (HandleSide::Right, HandleSide::Left),
            Self::RL => (HandleSide::Left, HandleSide::Right),
        }
    }
}

/// UI-facing scale factor multiplying spacing and ring radii.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Compact,
    #[default]
    Normal,
    Spacious,
}

impl Density {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "normal" => Ok(Self::Normal),
            "spacious" => Ok(Self::Spacious),
            _ => Err(Error::UnknownDensity {
                value: raw.to_string(),
            }),
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            Self::Compact => 0.75,
            Self::Normal => 1.0,
            Self::Spacious => 1.4,
        }
    }
}

/// Inter-rank and intra-rank gaps in pixels, before density scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spacing {
    pub rank_sep: f64,
    pub node_sep: f64,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            rank_sep: 120.0,
            node_sep: 60.0,
        }
    }
}

impl Spacing {
    /// Accepts the stringified numbers the configuration surface sends.
    pub fn parse(rank_sep: &str, node_sep: &str) -> Result<Self> {
        let parse_one = |raw: &str| -> Result<f64> {
            let value: f64 = raw.trim().parse().map_err(|_| Error::InvalidSpacing {
                value: raw.to_string(),
            })?;
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidSpacing {
                    value: raw.to_string(),
                });
            }
            Ok(value)
        };
        Ok(Self {
            rank_sep: parse_one(rank_sep)?,
            node_sep: parse_one(node_sep)?,
        })
    }
}

/// The two interchangeable layout strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    #[default]
    Hierarchical,
    Radial,
}

impl StrategyKind {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_lowercase().as_str() {
            "hierarchical" | "layered" => Ok(Self::Hierarchical),
            "radial" | "mindmap" => Ok(Self::Radial),
            _ => Err(Error::UnknownStrategy {
                value: raw.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub strategy: StrategyKind,
    pub direction: Direction,
    pub spacing: Spacing,
    pub density: Density,
}

impl LayoutConfig {
    /// Builds a config from the loose string surface the UI exposes. Any
    /// unknown literal raises; a degraded config is never silently invented.
    pub fn from_loose(
        strategy: &str,
        direction: &str,
        rank_sep: &str,
        node_sep: &str,
        density: &str,
    ) -> Result<Self> {
        Ok(Self {
            strategy: StrategyKind::parse(strategy)?,
            direction: Direction::parse(direction)?,
            spacing: Spacing::parse(rank_sep, node_sep)?,
            density: Density::parse(density)?,
        })
    }

    /// Spacing with the density multiplier applied.
    pub fn effective_spacing(&self) -> Spacing {
        let m = self.density.multiplier();
        Spacing {
            rank_sep: self.spacing.rank_sep * m,
            node_sep: self.spacing.node_sep * m,
        }
    }
}
