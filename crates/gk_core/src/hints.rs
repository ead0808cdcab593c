//! Relay hint merging.
//!
//! A relay named by several hint sets is a better bet than one named once,
//! so merged output is ordered by how many sets mention each url.

use std::collections::HashMap;

use gk_proto::normalize_relay_url;

pub trait HintMerger {
    fn merge(&self, hint_sets: &[Vec<String>], limit: Option<usize>) -> Vec<String>;
}

/// Scores each normalised url by the number of sets containing it; ties keep
/// first-seen order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoredMerger;

impl HintMerger for ScoredMerger {
    fn merge(&self, hint_sets: &[Vec<String>], limit: Option<usize>) -> Vec<String> {
        let mut scores: HashMap<String, (usize, usize)> = HashMap::new();

        for set in hint_sets {
            let mut seen_in_set = Vec::new();
            for url in set.iter().filter_map(|u| normalize_relay_url(u)) {
                if seen_in_set.contains(&url) {
                    continue;
                }
                let first_seen = scores.len();
                scores.entry(url.clone()).or_insert((0, first_seen)).0 += 1;
                seen_in_set.push(url);
            }
        }

        let mut ranked: Vec<_> = scores.into_iter().collect();
        ranked.sort_by(|(_, (score_a, seen_a)), (_, (score_b, seen_b))| {
            score_b.cmp(score_a).then(seen_a.cmp(seen_b))
        });

        ranked
            .into_iter()
            .map(|(url, _)| url)
            .take(limit.unwrap_or(usize::MAX))
            .collect()
    }
}
