use resmap::rank::{rank_of, sort_by_name, sort_score_desc};

mod common;
use common::RegionBuilder;

fn scored(name: &str, score: f64) -> resmap::model::Region {
    RegionBuilder::new(name).score(score).build()
}

// --- SCORE ORDER ---

#[test]
fn test_sort_score_desc_orders_highest_first() {
    let regions = vec![
        scored("Durham", 0.61),
        scored("Wake", 0.82),
        scored("Robeson", 0.34),
        scored("Orange", 0.75),
    ];

    let order = sort_score_desc(&regions);
    assert_eq!(order, vec![1, 3, 0, 2]);
}

#[test]
fn test_sort_score_desc_keeps_insertion_order_on_ties() {
    let regions = vec![
        scored("Alpha", 0.5),
        scored("Bravo", 0.5),
        scored("Charlie", 0.9),
        scored("Delta", 0.5),
    ];

    let order = sort_score_desc(&regions);
    assert_eq!(order, vec![2, 0, 1, 3]);
}

#[test]
fn test_sort_score_desc_empty() {
    let order = sort_score_desc(&[]);
    assert!(order.is_empty());
}

// --- NAME ORDER ---

#[test]
fn test_sort_by_name_is_alphabetical() {
    let regions = vec![
        scored("Wake", 0.82),
        scored("Buncombe", 0.55),
        scored("Dare", 0.41),
    ];

    let order = sort_by_name(&regions);
    assert_eq!(order, vec![1, 2, 0]);
}

#[test]
fn test_name_order_independent_of_scores() {
    // Reordering scores must not disturb the roster sequence.
    let low = vec![scored("Ashe", 0.1), scored("Bertie", 0.9)];
    let high = vec![scored("Ashe", 0.9), scored("Bertie", 0.1)];

    assert_eq!(sort_by_name(&low), sort_by_name(&high));
}

// --- RANK LOOKUP ---

#[test]
fn test_rank_of_is_one_based() {
    let regions = vec![scored("Durham", 0.6), scored("Wake", 0.8), scored("Dare", 0.4)];
    let order = sort_score_desc(&regions);

    assert_eq!(rank_of(&order, 1), Some(1));
    assert_eq!(rank_of(&order, 0), Some(2));
    assert_eq!(rank_of(&order, 2), Some(3));
}

#[test]
fn test_rank_of_unknown_index_is_none() {
    let order = vec![0, 1, 2];
    assert_eq!(rank_of(&order, 7), None);
}
