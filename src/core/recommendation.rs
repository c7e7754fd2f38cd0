//! Funding-differential classifier.
//!
//! Maps a signed differential (Variational − Backpack, percent per hour)
//! to an opportunity tier, a trade direction and a display label. Pure and
//! stateless: the same differential always yields the same recommendation.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

// =============================================================================
// Thresholds
// =============================================================================

/// Lower bounds (inclusive) of tiers 1..=3 on `|funding_diff|`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationThresholds {
    pub consider: f64,
    pub recommended: f64,
    pub strong: f64,
}

impl Default for RecommendationThresholds {
    fn default() -> Self {
        Self {
            consider: 0.005,
            recommended: 0.01,
            strong: 0.02,
        }
    }
}

impl RecommendationThresholds {
    pub fn validate(&self) -> Result<(), AppError> {
        let ordered = self.consider > 0.0
            && self.consider < self.recommended
            && self.recommended < self.strong
            && self.strong.is_finite();
        if !ordered {
            return Err(AppError::Config(format!(
                "recommendation thresholds must be positive and strictly ascending, got {}/{}/{}",
                self.consider, self.recommended, self.strong
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Tier / Direction
// =============================================================================

/// Opportunity tier, serialized as its integer level 0..=3
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(into = "u8")]
pub enum Tier {
    None = 0,
    Consider = 1,
    Recommended = 2,
    Strong = 3,
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> u8 {
        tier as u8
    }
}

impl Tier {
    fn label_prefix(self) -> &'static str {
        match self {
            Tier::None => "no opportunity",
            Tier::Consider => "consider",
            Tier::Recommended => "recommended",
            Tier::Strong => "strongly recommended",
        }
    }
}

/// Which venue to short; the other leg is the hedge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Variational pays more: short Variational, long Backpack
    ShortVariational,
    /// Backpack pays more: short Backpack, long Variational
    ShortBackpack,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::ShortVariational => "short Variational / long Backpack",
            Direction::ShortBackpack => "short Backpack / long Variational",
        }
    }
}

// =============================================================================
// Recommendation
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub tier: Tier,
    pub label: String,
    /// Empty at tier 0
    pub direction: String,
}

impl Recommendation {
    fn none() -> Self {
        Self {
            tier: Tier::None,
            label: Tier::None.label_prefix().to_string(),
            direction: String::new(),
        }
    }
}

/// Classify with the default thresholds (0.005 / 0.01 / 0.02).
pub fn classify(funding_diff: f64) -> Recommendation {
    classify_with(funding_diff, &RecommendationThresholds::default())
}

pub fn classify_with(funding_diff: f64, thresholds: &RecommendationThresholds) -> Recommendation {
    let magnitude = funding_diff.abs();
    if magnitude.is_nan() || magnitude < thresholds.consider {
        return Recommendation::none();
    }

    let tier = if magnitude < thresholds.recommended {
        Tier::Consider
    } else if magnitude < thresholds.strong {
        Tier::Recommended
    } else {
        Tier::Strong
    };

    let direction = if funding_diff > 0.0 {
        Direction::ShortVariational
    } else {
        Direction::ShortBackpack
    };

    Recommendation {
        tier,
        label: format!("{} {}", tier.label_prefix(), direction.as_str()),
        direction: direction.as_str().to_string(),
    }
}
