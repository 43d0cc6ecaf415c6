//! Popular-tag aggregation.

use std::collections::HashMap;

/// Ranks every distinct tag by how many times it occurs across all
/// articles. Duplicates inside a single article's list count once per
/// occurrence. Tags with equal counts are ordered lexicographically.
pub fn popular_tags(tag_lists: Vec<Vec<String>>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for tags in tag_lists {
        for tag in tags {
            *counts.entry(tag).or_insert(0) += 1;
        }
    }
    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|(a_tag, a_count), (b_tag, b_count)| {
        b_count.cmp(a_count).then_with(|| a_tag.cmp(b_tag))
    });
    ranked.into_iter().map(|(tag, _)| tag).collect()
}
