//! Sum-decomposition: enumerating every way to write a clue's target sum as
//! `length` distinct digits, and the min/max feasible sums for a run of a
//! given length (used by edit-mode validation).

use im::HashSet;

use crate::cell::Combo;
use crate::config::EngineConfig;

/// The smallest sum a run of `length` distinct digits can have:
/// `digit_min + (digit_min+1) + ... `
pub fn min_sum(length: usize, config: &EngineConfig) -> u32 {
    sum_of_smallest(length, config.digit_min, config.digit_max)
}

/// The largest sum a run of `length` distinct digits can have:
/// `digit_max + (digit_max-1) + ...`
pub fn max_sum(length: usize, config: &EngineConfig) -> u32 {
    sum_of_largest(length, config.digit_min, config.digit_max)
}

fn sum_of_smallest(length: usize, digit_min: u8, digit_max: u8) -> u32 {
    if length == 0 {
        return 0;
    }
    let available = (digit_max - digit_min + 1) as usize;
    if length > available {
        // Infeasible; report a value no real sum could reach.
        return u32::MAX;
    }
    (0..length).map(|i| digit_min as u32 + i as u32).sum()
}

fn sum_of_largest(length: usize, digit_min: u8, digit_max: u8) -> u32 {
    if length == 0 {
        return 0;
    }
    let available = (digit_max - digit_min + 1) as usize;
    if length > available {
        return 0;
    }
    (0..length).map(|i| digit_max as u32 - i as u32).sum()
}

/// Every length-`length` sorted multiset of distinct digits in
/// `[config.digit_min, config.digit_max]` summing to `sum`, enumerated
/// exhaustively by odometer over positions in ascending order. Each
/// resulting combination is canonical (sorted ascending) and appears
/// exactly once.
pub fn combinations(sum: u32, length: usize, config: &EngineConfig) -> Vec<Combo> {
    let mut out = Vec::new();
    if length == 0 {
        if sum == 0 {
            out.push(Vec::new());
        }
        return out;
    }
    let mut current = Vec::with_capacity(length);
    search(
        config.digit_min,
        config.digit_max,
        length,
        sum,
        &mut current,
        &mut out,
    );
    out
}

fn search(
    start: u8,
    digit_max: u8,
    remaining_len: usize,
    remaining_sum: u32,
    current: &mut Vec<u8>,
    out: &mut Vec<Combo>,
) {
    if remaining_len == 0 {
        if remaining_sum == 0 {
            out.push(current.clone());
        }
        return;
    }
    // Prune: even the smallest/largest remaining choices can't reach the target.
    let lo: u32 = (0..remaining_len as u32).map(|i| start as u32 + i).sum();
    let hi: u32 = (0..remaining_len as u32)
        .map(|i| digit_max as u32 - i)
        .sum();
    if remaining_sum < lo || remaining_sum > hi {
        return;
    }
    for digit in start..=digit_max {
        if digit as u32 > remaining_sum {
            break;
        }
        current.push(digit);
        search(
            digit + 1,
            digit_max,
            remaining_len - 1,
            remaining_sum - digit as u32,
            current,
            out,
        );
        current.pop();
    }
}

/// The set of digits appearing in any of `combos` — the pruned domain a
/// clue's combo list implies for every cell in its run.
pub fn digit_universe(combos: &[Combo]) -> HashSet<u8> {
    combos.iter().flatten().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn std_config() -> EngineConfig {
        EngineConfig::standard()
    }

    #[test]
    fn sum_6_length_3_is_unique() {
        let combos = combinations(6, 3, &std_config());
        assert_eq!(combos, vec![vec![1, 2, 3]]);
    }

    #[test]
    fn sum_7_length_3_is_unique() {
        let combos = combinations(7, 3, &std_config());
        assert_eq!(combos, vec![vec![1, 2, 4]]);
    }

    #[test]
    fn sum_45_length_9_is_all_digits() {
        let combos = combinations(45, 9, &std_config());
        assert_eq!(combos, vec![vec![1, 2, 3, 4, 5, 6, 7, 8, 9]]);
    }

    #[test]
    fn no_combos_outside_feasible_range() {
        let config = std_config();
        assert!(combinations(3, 3, &config).is_empty()); // min for L=3 is 6
        assert!(combinations(25, 3, &config).is_empty()); // max for L=3 is 24
    }

    #[test]
    fn min_max_sum_match_classic_kakuro_tables() {
        let config = std_config();
        assert_eq!(min_sum(1, &config), 1);
        assert_eq!(max_sum(1, &config), 9);
        assert_eq!(min_sum(2, &config), 3);
        assert_eq!(max_sum(2, &config), 17);
        assert_eq!(min_sum(9, &config), 45);
        assert_eq!(max_sum(9, &config), 45);
    }

    proptest! {
        #[test]
        fn every_combination_is_distinct_sorted_and_sums_correctly(
            sum in 1u32..46,
            length in 1usize..10,
        ) {
            let config = std_config();
            let combos = combinations(sum, length, &config);
            for combo in &combos {
                prop_assert_eq!(combo.len(), length);
                prop_assert_eq!(combo.iter().copied().sum::<u32>(), sum);
                let mut sorted = combo.clone();
                sorted.sort_unstable();
                prop_assert_eq!(combo, &sorted);
                let unique: std::collections::HashSet<_> = combo.iter().collect();
                prop_assert_eq!(unique.len(), combo.len());
            }
            let unique_combos: std::collections::HashSet<_> = combos.iter().cloned().collect();
            prop_assert_eq!(unique_combos.len(), combos.len());
        }
    }
}
