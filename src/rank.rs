use crate::model::Region;

/// Stable score-descending index order (chart and table sequence). Ties keep
/// insertion order; scores are finite by construction, so `total_cmp` agrees
/// with the numeric order.
pub fn sort_score_desc(regions: &[Region]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..regions.len()).collect();
    order.sort_by(|&a, &b| regions[b].score.total_cmp(&regions[a].score));
    order
}

/// Alphabetical index order (region roster / selection list). Independent of
/// the score ordering; the two are maintained side by side.
pub fn sort_by_name(regions: &[Region]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..regions.len()).collect();
    order.sort_by(|&a, &b| regions[a].name.cmp(&regions[b].name));
    order
}

/// 1-based rank of a store index within an order.
pub fn rank_of(order: &[usize], target: usize) -> Option<usize> {
    order.iter().position(|&idx| idx == target).map(|pos| pos + 1)
}
