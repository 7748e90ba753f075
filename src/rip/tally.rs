//! Hostname frequency tally

use std::collections::HashMap;

/// Counts how many times each hostname occurs
///
/// Pure and total: any finite sequence of hostnames (repeats and all) maps
/// to a frequency table whose counts sum to the input length. No iteration
/// order is guaranteed on the result.
pub fn tally_hosts<I>(hosts: I) -> HashMap<String, u64>
where
    I: IntoIterator<Item = String>,
{
    let mut counts = HashMap::new();
    for host in hosts {
        *counts.entry(host).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hosts(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(tally_hosts(hosts(&[])).is_empty());
    }

    #[test]
    fn test_counts_repeats() {
        let tally = tally_hosts(hosts(&["a.com", "b.com", "a.com"]));
        assert_eq!(tally.get("a.com"), Some(&2));
        assert_eq!(tally.get("b.com"), Some(&1));
        assert_eq!(tally.len(), 2);
    }

    #[test]
    fn test_counts_sum_to_input_length() {
        let input = hosts(&["a.com", "b.com", "a.com", "c.com", "b.com", "a.com"]);
        let tally = tally_hosts(input.clone());

        assert_eq!(tally.values().sum::<u64>(), input.len() as u64);
        for key in tally.keys() {
            assert!(input.contains(key));
        }
        for host in &input {
            assert!(tally.contains_key(host));
        }
    }

    #[test]
    fn test_empty_hostname_is_a_valid_key() {
        // Relative links report empty hostnames, which tally like any other.
        let tally = tally_hosts(hosts(&["", "", "a.com"]));
        assert_eq!(tally.get(""), Some(&2));
        assert_eq!(tally.get("a.com"), Some(&1));
    }
}
