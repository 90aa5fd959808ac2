//! Per-entry progress ticks (observational only).

/// Sent once per processed entry, success or failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressTick {
    /// Job key the entry belongs to.
    pub key: String,
    /// Entries processed so far in this pass, including this one.
    pub current: usize,
    /// Entries in this pass.
    pub total: usize,
}

impl ProgressTick {
    /// Fraction processed in [0.0, 1.0].
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        (self.current as f64 / self.total as f64).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_bounds() {
        let t = |current, total| ProgressTick {
            key: "k".into(),
            current,
            total,
        };
        assert_eq!(t(0, 0).fraction(), 1.0);
        assert_eq!(t(1, 4).fraction(), 0.25);
        assert_eq!(t(4, 4).fraction(), 1.0);
    }
}
