//! Canonicalized representation of one input string.

use std::collections::HashSet;

use crate::config::Config;
use crate::engine::ComparisonInfo;

/// One input string reduced to the form the DP actually operates on:
/// a scalar sequence in canonical (tokenized, separator-joined,
/// edge-trimmed) form, plus the precomputed masks and sets every cost
/// helper needs.
#[derive(Debug, Clone)]
pub struct Item {
    pub text: Vec<char>,
    pub is_digit: Vec<bool>,
    pub spaceless_text: Vec<char>,
    pub unique_scalars: HashSet<char>,
    pub token_count: usize,
    pub norm_length: f64,
}

impl Item {
    pub fn new(s: &str, config: &Config) -> Self {
        let tokens = config.tokenize(s);
        let token_count = tokens.len();

        let mut text = String::new();
        for (idx, token) in tokens.iter().enumerate() {
            if idx > 0 {
                text.push(config.token_sep);
            }
            text.push_str(token);
        }
        let text: Vec<char> = text
            .trim_matches(config.token_sep)
            .chars()
            .collect();

        let is_digit: Vec<bool> = text.iter().map(|c| c.to_digit(10).is_some()).collect();
        let spaceless_text: Vec<char> = text
            .iter()
            .copied()
            .filter(|&c| c != config.token_sep)
            .collect();
        let unique_scalars: HashSet<char> = text.iter().copied().collect();

        let mut norm_length = 0.0;
        for i in 0..text.len() {
            norm_length += if Self::duplicate_at(&text, i) {
                config.duplicate_cost
            } else {
                config.ins_del_cost
            };
        }

        Item {
            text,
            is_digit,
            spaceless_text,
            unique_scalars,
            token_count,
            norm_length,
        }
    }

    fn duplicate_at(text: &[char], i: usize) -> bool {
        i > 0 && text[i] == text[i - 1]
    }

    pub fn duplicate(&self, i: usize) -> bool {
        Self::duplicate_at(&self.text, i)
    }

    pub fn is_token_sep(&self, i: usize, config: &Config) -> bool {
        self.text[i] == config.token_sep
    }

    pub fn is_token_start(&self, i: usize, config: &Config) -> bool {
        i == 0 || self.text[i - 1] == config.token_sep
    }

    /// `true` when position `i` of `self` and `j` of `other` form an
    /// adjacent transposition: `self.text[i-1] == other.text[j]` and
    /// `self.text[i] == other.text[j-1]`. Out-of-range indices (`i == 0` or
    /// `j == 0`) can never be a swap.
    pub fn is_swapped(&self, i: usize, other: &Item, j: usize) -> bool {
        if i == 0 || j == 0 {
            return false;
        }
        self.text[i - 1] == other.text[j] && self.text[i] == other.text[j - 1]
    }

    /// Admissible lower bound on the total cost, from the symmetric
    /// difference in the two strings' unique-scalar sets alone. Always >= 0.
    pub fn unique_char_min_cost(&self, other: &Item, config: &Config) -> f64 {
        let self_len = self.unique_scalars.len();
        let other_len = other.unique_scalars.len();
        let d = (self_len as f64 - other_len as f64).abs();
        let o = self.unique_scalars.intersection(&other.unique_scalars).count() as f64;
        let m = self_len.min(other_len) as f64;
        d * config.ins_del_cost + (m - o) * config.subst_cost
    }

    pub fn token_diff_penalty(&self, other: &Item, ctx: &ComparisonInfo, config: &Config) -> f64 {
        if ctx.spaceless_equals {
            return 0.0;
        }
        (self.token_count as f64 - other.token_count as f64).abs() * config.token_delta_penalty
    }

    pub fn subst_cost(&self, i: usize, other: &Item, j: usize, config: &Config) -> f64 {
        if self.text[i] == other.text[j] {
            return 0.0;
        }
        let mut cost = config.subst_cost;
        if self.is_token_start(i, config) || other.is_token_start(j, config) {
            cost += config.token_initial_penalty;
        }
        if self.is_token_sep(i, config) || other.is_token_sep(j, config) {
            cost += config.token_sep_subst_penalty;
        }
        if self.is_digit[i] && other.is_digit[j] {
            cost += config.digit_change_penalty;
        }
        cost
    }

    pub fn swap_cost(&self, i: usize, other: &Item, j: usize, config: &Config) -> f64 {
        let mut cost = config.swap_cost;
        if self.is_digit[i] && other.is_digit[j] {
            cost += config.digit_change_penalty;
        }
        cost
    }

    pub fn ins_del_cost(&self, i: usize, ctx: &ComparisonInfo, config: &Config) -> f64 {
        if ctx.spaceless_equals && self.is_token_sep(i, config) {
            return config.space_only_cost;
        }
        let mut cost = if self.duplicate(i) {
            config.duplicate_cost
        } else {
            config.ins_del_cost
        };
        if self.is_token_start(i, config) {
            cost += config.token_initial_penalty;
        }
        if self.is_digit[i] {
            cost += config.digit_change_penalty;
        }
        cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_form_trims_separators() {
        let config = Config::default();
        let item = Item::new("  an dog  ", &config);
        assert_eq!(item.text.iter().collect::<String>(), "an dog");
        assert_eq!(item.token_count, 2);
    }

    #[test]
    fn empty_input_yields_empty_item() {
        let config = Config::default();
        let item = Item::new("", &config);
        assert_eq!(item.text.len(), 0);
        assert_eq!(item.token_count, 0);
        assert_eq!(item.norm_length, 0.0);
        assert_eq!(item.spaceless_text.len(), 0);
    }

    #[test]
    fn norm_length_discounts_duplicates() {
        let config = Config::default();
        let item = Item::new("aabbccddee", &config);
        assert_eq!(item.norm_length, 5.0 * config.ins_del_cost + 5.0 * config.duplicate_cost);
    }

    #[test]
    fn duplicate_never_true_at_index_zero() {
        let config = Config::default();
        let item = Item::new("aaa", &config);
        assert!(!item.duplicate(0));
        assert!(item.duplicate(1));
        assert!(item.duplicate(2));
    }
}
