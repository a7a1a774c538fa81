//! Carbon Footprint Aggregation
//!
//! Totals per-category values and decides which pie slices get an inline
//! label.

use crate::api::CarbonCategory;

/// Slices must exceed this share of the total to get an inline label
pub const LABEL_THRESHOLD: f64 = 0.05;

/// Sum of all category values, in tons of CO2
pub fn total(categories: &[CarbonCategory]) -> f64 {
    categories.iter().map(|c| c.value).sum()
}

/// Fraction of `total` taken by `value`; zero when nothing was emitted
pub fn share(value: f64, total: f64) -> f64 {
    if total > 0.0 {
        value / total
    } else {
        0.0
    }
}

/// A slice at exactly 5% stays unlabelled
pub fn shows_label(share: f64) -> bool {
    share > LABEL_THRESHOLD
}

/// A category with its derived share of the total
#[derive(Debug, Clone, PartialEq)]
pub struct Slice<'a> {
    pub category: &'a CarbonCategory,
    pub share: f64,
    /// Inline label such as `Transportation 95%`, if not suppressed
    pub label: Option<String>,
}

/// Footprint ready to be drawn
#[derive(Debug, Clone, PartialEq)]
pub struct Breakdown<'a> {
    pub total: f64,
    pub slices: Vec<Slice<'a>>,
}

/// Compute the total and per-slice shares and labels.
///
/// Returns `None` for an empty set; the panel shows its empty state instead.
pub fn breakdown(categories: &[CarbonCategory]) -> Option<Breakdown<'_>> {
    if categories.is_empty() {
        return None;
    }

    let total = total(categories);
    let slices = categories
        .iter()
        .map(|category| {
            let share = share(category.value, total);
            let label = shows_label(share)
                .then(|| format!("{} {:.0}%", category.name, share * 100.0));
            Slice {
                category,
                share,
                label,
            }
        })
        .collect();

    Some(Breakdown { total, slices })
}
