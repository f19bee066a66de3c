use std::collections::HashMap;

use crate::types::{GroupAggregate, Review, ScoredReview, TooltipData};

pub const AVERAGE_POINTS_LABEL: &str = "Average Points";
pub const AVERAGE_PRICE_LABEL: &str = "Average Price";

/// Group scored reviews by a key and compute per-group averages.
///
/// Groups come out in the order their key is first seen. The tooltip fields
/// are built from the first review of each group, then the two formatted
/// averages are appended. Inputs are not validated: filter out unparsable
/// prices and scores before calling, a `NaN` here turns the averages into `NaN`.
pub fn aggregate<K, T>(entries: &[ScoredReview<'_>], key: K, tooltip: T) -> Vec<GroupAggregate>
where
    K: Fn(&Review) -> Option<String>,
    T: Fn(&Review) -> TooltipData,
{
    let mut index: HashMap<Option<String>, usize> = HashMap::new();
    let mut groups: Vec<GroupAggregate> = Vec::new();

    for entry in entries {
        let group_key = key(entry.review);
        let slot = *index.entry(group_key.clone()).or_insert_with(|| {
            groups.push(GroupAggregate {
                key: group_key,
                points: Vec::new(),
                prices: Vec::new(),
                average_points: String::new(),
                average_price: String::new(),
                tooltip: tooltip(entry.review),
            });
            groups.len() - 1
        });
        groups[slot].points.push(entry.points);
        groups[slot].prices.push(entry.price);
    }

    for group in &mut groups {
        group.average_points = to_fixed(mean(&group.points));
        group.average_price = to_fixed(mean(&group.prices));
        let points_label = group.average_points.clone();
        let price_label = format!("${}", group.average_price);
        group.tooltip.insert(AVERAGE_POINTS_LABEL, points_label);
        group.tooltip.insert(AVERAGE_PRICE_LABEL, price_label);
    }

    groups
}

// Plain sum over count; groups are never empty
fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Format a value with exactly two decimals (`NaN` stays `NaN`).
///
/// Exact halfway cases round away from zero. A double sits exactly on a
/// third-decimal 5 only when it is an odd multiple of 1/8, where scaling by
/// 100 is exact; everything else formats to the nearest decimal already.
pub fn to_fixed(value: f64) -> String {
    let eighths = value * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        return format!("{:.2}", (value * 100.0).round() / 100.0);
    }
    format!("{:.2}", value)
}
