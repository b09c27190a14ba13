//! DP cell: total cost plus the per-token secondary accumulator.

use crate::engine::ComparisonInfo;

/// One cell of the dynamic-programming table.
///
/// `cost` is the total path cost to reach this cell. `token_cost` and
/// `token_norm_length` track the cost and normalized length accumulated
/// since the path last crossed a token separator; they reset to zero at
/// every token edge via [`Cell::start_new_token`].
///
/// A cost of `f64::INFINITY` represents "over limit." Arithmetic on
/// infinity stays infinity, which keeps the recurrence uniform without a
/// separate sentinel type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub cost: f64,
    pub token_cost: f64,
    pub token_norm_length: f64,
}

impl Cell {
    pub fn zero() -> Self {
        Self {
            cost: 0.0,
            token_cost: 0.0,
            token_norm_length: 0.0,
        }
    }

    /// Copy `cost` and `token_cost` from `other`. `token_norm_length` is left
    /// untouched — it is filled in separately by the token-length dispatch.
    pub fn set_costs(&mut self, other: &Cell) {
        self.cost = other.cost;
        self.token_cost = other.token_cost;
    }

    /// [`Cell::set_costs`], then poison `cost` to infinity if this transition
    /// crosses a token edge coming out of a predecessor that already blew its
    /// per-token budget. This is the sole enforcement point for the
    /// per-token limit: once poisoned, every descendant of this cell is
    /// dominated by cheaper alternatives.
    pub fn set_costs_and_check_token_edge(
        &mut self,
        other: &Cell,
        at_token_edge: bool,
        per_token_limit: bool,
        ctx: &ComparisonInfo,
    ) {
        self.set_costs(other);
        if at_token_edge
            && per_token_limit
            && !ctx.spaceless_equals
            && other.over_token_edit_limit(per_token_limit, ctx)
        {
            self.cost = f64::INFINITY;
        }
    }

    pub fn over_token_edit_limit(&self, per_token_limit: bool, ctx: &ComparisonInfo) -> bool {
        if !per_token_limit || ctx.spaceless_equals {
            return false;
        }
        if ctx.curr_edit_limit > 0.0 && self.token_cost > ctx.curr_edit_limit {
            return true;
        }
        if ctx.curr_edit_norm_limit > 0.0
            && self.token_cost > self.token_norm_length * ctx.curr_edit_norm_limit
        {
            return true;
        }
        false
    }

    pub fn increment_costs(&mut self, delta: f64) {
        self.cost += delta;
        self.token_cost += delta;
    }

    pub fn start_new_token(&mut self) {
        self.token_cost = 0.0;
        self.token_norm_length = 0.0;
    }

    /// Replace `self` with `other` when `other` is strictly cheaper. Ties
    /// keep `self`, so folding candidates in recurrence order (match, swap,
    /// insert, delete) makes the earlier candidate win on a tie.
    pub fn set_if_costs_less(&mut self, other: &Cell) {
        if other.cost < self.cost {
            *self = *other;
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(limit: f64, norm_limit: f64, spaceless_equals: bool) -> ComparisonInfo {
        ComparisonInfo {
            curr_edit_limit: limit,
            curr_edit_norm_limit: norm_limit,
            spaceless_equals,
        }
    }

    #[test]
    fn set_if_costs_less_keeps_ties() {
        let mut a = Cell {
            cost: 1.0,
            token_cost: 1.0,
            token_norm_length: 1.0,
        };
        let b = Cell {
            cost: 1.0,
            token_cost: 2.0,
            token_norm_length: 2.0,
        };
        a.set_if_costs_less(&b);
        assert_eq!(a.token_cost, 1.0, "tie should keep the original cell");
    }

    #[test]
    fn over_token_edit_limit_respects_spaceless_equality() {
        let mut c = Cell::zero();
        c.token_cost = 100.0;
        c.token_norm_length = 1.0;
        assert!(!c.over_token_edit_limit(true, &ctx(1.0, 0.0, true)));
        assert!(c.over_token_edit_limit(true, &ctx(1.0, 0.0, false)));
    }

    #[test]
    fn poisoning_propagates_to_infinity() {
        let mut blown = Cell::zero();
        blown.token_cost = 10.0;
        blown.token_norm_length = 1.0;

        let mut next = Cell::zero();
        next.set_costs_and_check_token_edge(&blown, true, true, &ctx(1.0, 0.0, false));
        assert!(next.cost.is_infinite());
    }
}
