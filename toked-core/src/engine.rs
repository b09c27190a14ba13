//! Top-level `distance` entry points and the DP that computes them.

use crate::cell::Cell;
use crate::config::{Config, NormType};
use crate::item::Item;
use crate::row::Row;

/// Per-comparison context threaded through every cost-evaluation site, so
/// ins/del and per-token checks can apply the spaceless-equality discount
/// and the per-token cap.
#[derive(Debug, Clone, Copy)]
pub struct ComparisonInfo {
    pub curr_edit_limit: f64,
    pub curr_edit_norm_limit: f64,
    pub spaceless_equals: bool,
}

/// Weighted, token-aware edit distance between `a` and `b` under the
/// default `Config`, using its default limits.
pub fn distance(a: &str, b: &str) -> f64 {
    Config::default().distance(a, b)
}

/// As [`distance`], with an explicit absolute and normalized limit
/// overriding the `Config`'s defaults for this call only.
pub fn distance_with_limits(a: &str, b: &str, limit: f64, norm_limit: f64) -> f64 {
    Config::default().distance_with_limits(a, b, limit, norm_limit)
}

impl Config {
    pub fn distance(&self, a: &str, b: &str) -> f64 {
        self.distance_with_limits(a, b, self.default_limit, self.default_norm_limit)
    }

    pub fn distance_with_limits(&self, a: &str, b: &str, limit: f64, norm_limit: f64) -> f64 {
        let item_a = Item::new(a, self);
        let item_b = Item::new(b, self);
        compute_distance(self, &item_a, &item_b, limit, norm_limit)
    }
}

fn compute_distance(config: &Config, item_a: &Item, item_b: &Item, limit: f64, norm_limit: f64) -> f64 {
    if item_a.text == item_b.text {
        return 0.0;
    }

    let spaceless_equals = item_a.spaceless_text == item_b.spaceless_text;
    let ctx = ComparisonInfo {
        curr_edit_limit: limit,
        curr_edit_norm_limit: norm_limit,
        spaceless_equals,
    };

    if item_a.text.is_empty() || item_b.text.is_empty() {
        let ret_val = item_a.norm_length.max(item_b.norm_length);
        return empty_input_result(ret_val, item_a.text.len(), config, &ctx);
    }

    let delta = item_a.token_diff_penalty(item_b, &ctx, config);

    let limits_active = limit > 0.0 || norm_limit > 0.0;
    let adj = if limits_active {
        let adj = adjusted_limit(item_a.norm_length, item_b.norm_length, config, &ctx) - delta;
        if adj < item_a.unique_char_min_cost(item_b, config) {
            return f64::INFINITY;
        }
        Some(adj)
    } else {
        None
    };

    let width = item_b.text.len();
    let mut row_prev = Row::new(width);
    let mut row_curr = Row::new(width);
    let mut row_next = Row::new(width);

    row_curr.init_first_row(item_b, config, &ctx);

    for i in 0..item_a.text.len() {
        let mut row_min = row_next.init_first_cell(&row_curr, item_a, i, config, &ctx);

        for j in 0..item_b.text.len() {
            update_cell(&row_prev, &row_curr, &mut row_next, item_a, item_b, i, j, config, &ctx);
            row_min = row_min.min(row_next.cells[j + 1].cost);
        }

        if let Some(adj) = adj {
            if row_min > adj {
                return f64::INFINITY;
            }
        }

        let tmp = row_prev;
        row_prev = row_curr;
        row_curr = row_next;
        row_next = tmp;
    }

    let end = &row_curr.cells[item_b.text.len()];
    if end.over_token_edit_limit(config.per_token_limit, &ctx) {
        return f64::INFINITY;
    }
    if let Some(adj) = adj {
        if end.cost > adj {
            return f64::INFINITY;
        }
    }

    end.cost + delta
}

#[allow(clippy::too_many_arguments)]
fn update_cell(
    row_prev: &Row,
    row_curr: &Row,
    row_next: &mut Row,
    item_a: &Item,
    item_b: &Item,
    i: usize,
    j: usize,
    config: &Config,
    ctx: &ComparisonInfo,
) {
    let at_token_edge = item_a.is_token_sep(i, config) || item_b.is_token_sep(j, config);

    // Match/substitute (diagonal).
    let mut winner = Cell::zero();
    winner.set_costs_and_check_token_edge(&row_curr.cells[j], at_token_edge, config.per_token_limit, ctx);
    winner.increment_costs(item_a.subst_cost(i, item_b, j, config));

    // Swap: only reachable two rows back, so it requires both indices > 0.
    if item_a.is_swapped(i, item_b, j) {
        let mut candidate = Cell::zero();
        candidate.set_costs_and_check_token_edge(&row_prev.cells[j - 1], at_token_edge, config.per_token_limit, ctx);
        candidate.increment_costs(item_a.swap_cost(i, item_b, j, config));
        winner.set_if_costs_less(&candidate);
    }

    // Insert (from the left, same row).
    let mut candidate = Cell::zero();
    candidate.set_costs_and_check_token_edge(&row_next.cells[j], at_token_edge, config.per_token_limit, ctx);
    candidate.increment_costs(item_b.ins_del_cost(j, ctx, config));
    winner.set_if_costs_less(&candidate);

    // Delete (from above).
    let mut candidate = Cell::zero();
    candidate.set_costs_and_check_token_edge(&row_curr.cells[j + 1], at_token_edge, config.per_token_limit, ctx);
    candidate.increment_costs(item_a.ins_del_cost(i, ctx, config));
    winner.set_if_costs_less(&candidate);

    winner.token_norm_length = token_norm_length(row_next, row_curr, item_a, item_b, i, j, config);

    if at_token_edge {
        winner.start_new_token();
    }

    row_next.cells[j + 1] = winner;
}

fn token_norm_length(
    row_next: &Row,
    row_curr: &Row,
    item_a: &Item,
    item_b: &Item,
    i: usize,
    j: usize,
    config: &Config,
) -> f64 {
    let mut delta_l = if item_b.duplicate(j) {
        config.duplicate_cost
    } else {
        config.ins_del_cost
    };
    let mut delta_a = if item_a.duplicate(i) {
        config.duplicate_cost
    } else {
        config.ins_del_cost
    };
    let l = row_next.cells[j].token_norm_length;
    let a = row_curr.cells[j + 1].token_norm_length;

    match config.norm_type {
        NormType::Min => (l + delta_l).min(a + delta_a),
        NormType::First => {
            if item_b.is_token_start(j, config) {
                a + delta_a
            } else {
                l
            }
        }
        NormType::Max => {
            if !item_a.is_token_start(i, config) {
                delta_l = 0.0;
            }
            if i != 0 && !item_b.is_token_start(j, config) {
                delta_a = 0.0;
            }
            (l + delta_l).max(a + delta_a)
        }
    }
}

fn adjusted_limit(l1: f64, l2: f64, config: &Config, ctx: &ComparisonInfo) -> f64 {
    let norm_edit_max = if ctx.curr_edit_norm_limit <= 0.0 {
        0.0
    } else {
        let f = match config.norm_type {
            NormType::Max => l1.max(l2),
            NormType::Min => l1.min(l2),
            NormType::First => l1,
        };
        ctx.curr_edit_norm_limit * f
    };

    let mut adj = if ctx.curr_edit_limit > 0.0 && norm_edit_max > 0.0 {
        ctx.curr_edit_limit.min(norm_edit_max)
    } else {
        ctx.curr_edit_limit.max(norm_edit_max)
    };

    if config.swap_cost < config.ins_del_cost {
        adj += config.ins_del_cost - config.swap_cost;
    }

    adj
}

fn empty_input_result(ret_val: f64, first_len: usize, config: &Config, ctx: &ComparisonInfo) -> f64 {
    if ret_val == 0.0 {
        return 0.0;
    }
    if ctx.curr_edit_limit > 0.0 && ret_val > ctx.curr_edit_limit {
        return f64::INFINITY;
    }
    if ctx.curr_edit_norm_limit > 0.0 {
        let reject = ctx.curr_edit_norm_limit < 1.0
            || match config.norm_type {
                NormType::Min => true,
                NormType::First => first_len == 0,
                NormType::Max => false,
            };
        if reject {
            return f64::INFINITY;
        }
    }
    ret_val
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Locale;

    fn approx(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "expected {b}, got {a}");
    }

    #[test]
    fn identical_strings_are_zero() {
        approx(distance("dog", "dog"), 0.0);
    }

    #[test]
    fn default_locale_lowercases_before_comparing() {
        approx(distance("DoG", "dOg"), 0.0);
    }

    #[test]
    fn single_swap() {
        approx(distance("abcde", "abdce"), 1.25);
    }

    #[test]
    fn swap_under_tight_limit() {
        let config = Config::builder()
            .swap_cost(0.75)
            .ins_del_cost(1.0)
            .default_limit(0.99)
            .build()
            .unwrap();
        approx(config.distance("abc", "acb"), 0.75);
    }

    #[test]
    fn swap_with_digit_penalty() {
        approx(distance("12345", "12435"), 1.58);
    }

    #[test]
    fn duplicate_insertions_are_cheap() {
        approx(distance("aabbccddee", "abcde"), 0.25);
    }

    #[test]
    fn limits_reject_or_accept_depending_on_tightness() {
        let tight = distance_with_limits("abcdefghij", "acefghij", 1.0, 5.0);
        assert!(tight.is_infinite());

        let loose = distance_with_limits("abcdefghij", "acefghij", 10.0, 0.25);
        approx(loose, 2.0);
    }

    #[test]
    fn per_token_limit_gates_token_internal_edits() {
        let gated = Config::builder()
            .per_token_limit(true)
            .default_norm_limit(0.25)
            .build()
            .unwrap();
        assert!(gated.distance("an dog", "a dog").is_infinite());

        let ungated = Config::builder()
            .per_token_limit(false)
            .default_norm_limit(0.25)
            .build()
            .unwrap();
        approx(ungated.distance("an dog", "a dog"), 1.0);
    }

    #[test]
    fn empty_input_returns_the_other_side_norm_length() {
        let config = Config::builder().default_limit(0.0).build().unwrap();
        approx(config.distance("", "dog"), 3.0);
    }

    #[test]
    fn empty_input_over_default_limit_is_infinite() {
        let config = Config::default();
        assert!(config.distance("", "dog").is_infinite());
    }

    #[test]
    fn both_empty_is_zero() {
        approx(distance("", ""), 0.0);
    }

    #[test]
    fn custom_locale_none_disables_lowercasing() {
        let config = Config::builder().locale(Locale::None).build().unwrap();
        assert!(config.distance("DoG", "dog") > 0.0);
    }
}
