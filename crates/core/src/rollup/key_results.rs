//! Key-result progress
//!
//! Progress of a key result is `currentValue / targetValue * 100`, clamped to
//! [0, 100]. A zero target yields 0 rather than a division by zero.

use ahash::AHashMap as HashMap;
use goalpulse_domain::constants::{MAX_PROGRESS, MIN_PROGRESS};
use goalpulse_domain::KeyResult;

/// Progress of a single key result
pub fn key_result_progress(key_result: &KeyResult) -> f64 {
    if key_result.target_value == 0.0 {
        return MIN_PROGRESS;
    }
    (key_result.current_value / key_result.target_value * 100.0).clamp(MIN_PROGRESS, MAX_PROGRESS)
}

/// Mean key-result progress of one goal
///
/// `None` when the goal has no key results, which is distinct from a goal
/// whose key results are all at 0.
pub fn progress_from_key_results(goal_id: &str, key_results: &[KeyResult]) -> Option<f64> {
    let (sum, count) = key_results
        .iter()
        .filter(|kr| kr.goal_id == goal_id)
        .fold((0.0, 0usize), |(sum, count), kr| (sum + key_result_progress(kr), count + 1));

    (count > 0).then(|| sum / count as f64)
}

/// Mean key-result progress of every goal that has key results
///
/// One pass over `key_results`; goals without key results are absent.
pub fn key_result_progress_by_goal(key_results: &[KeyResult]) -> HashMap<&str, f64> {
    let mut sums: HashMap<&str, (f64, usize)> = HashMap::new();
    for kr in key_results {
        let (sum, count) = sums.entry(kr.goal_id.as_str()).or_insert((0.0, 0));
        *sum += key_result_progress(kr);
        *count += 1;
    }

    sums.into_iter().map(|(goal_id, (sum, count))| (goal_id, sum / count as f64)).collect()
}
