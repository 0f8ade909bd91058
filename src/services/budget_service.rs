//! Budget Aggregator
//!
//! Budget totals appear in several places depending on which generation path
//! produced the itinerary: on the content itself, under the content's
//! breakdown estimates, on a root-level breakdown, or on the detached
//! detailed-budget object. This module walks those candidates in a fixed
//! precedence order and derives a single display total.
//!
//! A value of zero is treated as "unset" and skipped (matching the original
//! behavior); when no candidate is positive the result is the distinct
//! `Uncalculated` sentinel, so an unknown total is never displayed as zero.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::models::itinerary::{BudgetBreakdown, DetailedBudget, ItineraryContent};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BudgetTotal {
    Amount(f64),
    Uncalculated,
}

impl BudgetTotal {
    pub fn as_amount(&self) -> Option<f64> {
        match self {
            Self::Amount(amount) => Some(*amount),
            Self::Uncalculated => None,
        }
    }
}

impl fmt::Display for BudgetTotal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Amount(amount) => write!(f, "${:.2}", amount),
            Self::Uncalculated => f.write_str("uncalculated"),
        }
    }
}

impl Serialize for BudgetTotal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Amount(amount) => serializer.serialize_f64(*amount),
            Self::Uncalculated => serializer.serialize_str("uncalculated"),
        }
    }
}

/// Derive the display total from an explicit ordered candidate list; the
/// first positive value wins.
pub fn display_total(
    content: &ItineraryContent,
    root_budget: Option<&BudgetBreakdown>,
    detailed_budget: Option<&DetailedBudget>,
) -> BudgetTotal {
    let content_estimates = content
        .budget_breakdown
        .as_ref()
        .and_then(|b| b.total_estimates.as_ref());
    let root_estimates = root_budget.and_then(|b| b.total_estimates.as_ref());

    let candidates = [
        content.total_estimated_cost,
        content_estimates.and_then(|e| e.luxury_total),
        content_estimates.and_then(|e| e.budget_total),
        root_estimates.and_then(|e| e.luxury_total),
        root_estimates.and_then(|e| e.budget_total),
        detailed_budget.and_then(|b| b.total_estimated),
    ];

    candidates
        .into_iter()
        .flatten()
        .find(|amount| *amount > 0.0)
        .map(BudgetTotal::Amount)
        .unwrap_or(BudgetTotal::Uncalculated)
}
