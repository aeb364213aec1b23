//! Age-based routing between scaler/model pairs.
//!
//! Tiers are kept sorted by their inclusive upper age bound. The last tier is
//! unbounded and catches every age above the previous bound, so routing is
//! total. The reference layout has two tiers:
//!
//! ```text
//! young: age <= 25
//! rest:  everything else
//! ```

use crate::error::PredictError;
use crate::models::{ModelArtifact, ScalerArtifact};

/// Inclusive upper bound of the "young" tier in the reference layout.
pub const YOUNG_MAX_AGE: u32 = 25;

/// Name and bound of one tier, before artifacts are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierBound {
    pub name: String,
    /// Inclusive upper age bound; `None` for the final catch-all tier.
    pub max_age: Option<u32>,
}

impl TierBound {
    pub fn new(name: impl Into<String>, max_age: Option<u32>) -> Self {
        Self {
            name: name.into(),
            max_age,
        }
    }

    /// `young` up to `young_max_age`, `rest` above.
    pub fn reference_layout(young_max_age: u32) -> Vec<TierBound> {
        vec![
            TierBound::new("young", Some(young_max_age)),
            TierBound::new("rest", None),
        ]
    }

    pub fn covers(&self, age: u32) -> bool {
        self.max_age.is_none_or(|max| age <= max)
    }
}

/// A routing entry with its loaded artifacts.
#[derive(Debug, Clone)]
pub struct Tier {
    pub bound: TierBound,
    pub scaler: ScalerArtifact,
    pub model: ModelArtifact,
}

impl Tier {
    pub fn name(&self) -> &str {
        &self.bound.name
    }
}

/// Check ordering rules shared by bounds and loaded tiers.
pub fn validate_layout(bounds: &[TierBound]) -> Result<(), PredictError> {
    let Some((last, bounded)) = bounds.split_last() else {
        return Err(PredictError::Routing("no tiers configured".to_string()));
    };
    if last.max_age.is_some() {
        return Err(PredictError::Routing(format!(
            "last tier '{}' must be unbounded",
            last.name
        )));
    }
    let mut previous: Option<u32> = None;
    for bound in bounded {
        let Some(max) = bound.max_age else {
            return Err(PredictError::Routing(format!(
                "tier '{}' is unbounded but is not last",
                bound.name
            )));
        };
        if previous.is_some_and(|p| max <= p) {
            return Err(PredictError::Routing(format!(
                "tier '{}' bound {max} does not increase",
                bound.name
            )));
        }
        previous = Some(max);
    }
    for (i, bound) in bounds.iter().enumerate() {
        if bounds[..i].iter().any(|s| s.name == bound.name) {
            return Err(PredictError::Routing(format!("duplicate tier name '{}'", bound.name)));
        }
    }
    Ok(())
}

/// Sorted tier table.
#[derive(Debug, Clone)]
pub struct Router {
    bounded: Vec<Tier>,
    fallback: Tier,
}

impl Router {
    pub fn new(mut tiers: Vec<Tier>) -> Result<Self, PredictError> {
        let bounds: Vec<TierBound> = tiers.iter().map(|t| t.bound.clone()).collect();
        validate_layout(&bounds)?;
        let fallback = tiers
            .pop()
            .ok_or_else(|| PredictError::Routing("no tiers configured".to_string()))?;
        Ok(Self {
            bounded: tiers,
            fallback,
        })
    }

    /// First tier whose bound covers `age`.
    pub fn route(&self, age: u32) -> &Tier {
        let tier = self
            .bounded
            .iter()
            .find(|t| t.bound.covers(age))
            .unwrap_or(&self.fallback);
        log::debug!("age {age} routed to tier '{}'", tier.name());
        tier
    }

    /// Tiers in routing order.
    pub fn tiers(&self) -> impl Iterator<Item = &Tier> + '_ {
        self.bounded.iter().chain(std::iter::once(&self.fallback))
    }
}
