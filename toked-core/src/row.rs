//! Fixed-width vector of [`Cell`]s, plus first-row/first-column init.

use crate::cell::Cell;
use crate::config::Config;
use crate::engine::ComparisonInfo;
use crate::item::Item;

/// A row of the DP table, `1 + item_b.text.len()` cells wide. Three of
/// these (previous, current, next) rotate through the engine's main loop;
/// a swap candidate looks two rows back.
#[derive(Debug, Clone)]
pub struct Row {
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(width: usize) -> Self {
        Self {
            cells: vec![Cell::zero(); width + 1],
        }
    }

    /// Initializes the header row: cell 0 stays `(0, 0, 0)`, and cell `i`
    /// accumulates the cost of inserting `item_b`'s first `i` scalars.
    pub fn init_first_row(&mut self, item_b: &Item, config: &Config, ctx: &ComparisonInfo) {
        for i in 1..=item_b.text.len() {
            let prev = self.cells[i - 1];
            let mut cell = prev;
            cell.increment_costs(item_b.ins_del_cost(i - 1, ctx, config));
            if item_b.is_token_sep(i - 1, config) {
                cell.start_new_token();
            }
            self.cells[i] = cell;
        }
    }

    /// Initializes cell 0 of a fresh row from the row above, accumulating
    /// the cost of inserting `item_a`'s scalar at position `i`. Returns the
    /// resulting cost, which seeds the row's running minimum.
    pub fn init_first_cell(
        &mut self,
        row_above: &Row,
        item_a: &Item,
        i: usize,
        config: &Config,
        ctx: &ComparisonInfo,
    ) -> f64 {
        let mut cell = row_above.cells[0];
        cell.increment_costs(item_a.ins_del_cost(i, ctx, config));
        if item_a.is_token_sep(i, config) {
            cell.start_new_token();
        }
        self.cells[0] = cell;
        cell.cost
    }
}
