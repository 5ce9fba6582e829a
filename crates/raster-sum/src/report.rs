//! Final result of a summation run.

/// Outcome of one full row scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SumOutcome {
    /// Unscaled running total, accumulated in double precision.
    pub total: f64,
    /// Number of cells that contributed to the total.
    pub cells_counted: u64,
    /// Rows scanned.
    pub rows: usize,
    /// Columns per row.
    pub cols: usize,
}

impl SumOutcome {
    /// The principal result: the total with the final scale factor
    /// applied.
    pub fn scaled(&self, scale: f64) -> f64 {
        self.total * scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_applies_once_at_the_end() {
        let outcome = SumOutcome {
            total: 10.0,
            cells_counted: 4,
            rows: 2,
            cols: 2,
        };
        assert_eq!(outcome.scaled(1.0), 10.0);
        assert_eq!(outcome.scaled(2.0), 20.0);
        assert_eq!(outcome.scaled(0.5), 5.0);
    }
}
