//! Free-action quota counter
//!
//! Unauthenticated sessions are limited to a fixed number of turns. The
//! counter is reset whenever a new session starts or a saved one is loaded;
//! an entitled (authenticated) session is never gated by it.

use serde::{Deserialize, Serialize};

/// Number of actions an unauthenticated session may submit.
pub const MAX_FREE_ACTIONS: u32 = 5;

/// Counts actions consumed against a fixed ceiling.
///
/// A consumed action is never refunded: a turn that fails in transit still
/// counts as spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaCounter {
    used: u32,
    ceiling: u32,
}

impl Default for QuotaCounter {
    fn default() -> Self {
        Self::new(MAX_FREE_ACTIONS)
    }
}

impl QuotaCounter {
    pub fn new(ceiling: u32) -> Self {
        Self { used: 0, ceiling }
    }

    /// Record one consumed action.
    pub fn consume(&mut self) {
        self.used = self.used.saturating_add(1);
    }

    /// Reset to zero, keeping the ceiling.
    pub fn reset(&mut self) {
        self.used = 0;
    }

    pub fn used(&self) -> u32 {
        self.used
    }

    pub fn remaining(&self) -> u32 {
        self.ceiling.saturating_sub(self.used)
    }

    pub fn is_exhausted(&self) -> bool {
        self.used >= self.ceiling
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausts_exactly_at_the_ceiling() {
        let mut quota = QuotaCounter::new(3);
        assert!(!quota.is_exhausted());
        quota.consume();
        quota.consume();
        assert!(!quota.is_exhausted());
        assert_eq!(quota.remaining(), 1);
        quota.consume();
        assert!(quota.is_exhausted());
        assert_eq!(quota.remaining(), 0);
    }

    #[test]
    fn reset_clears_used_but_keeps_ceiling() {
        let mut quota = QuotaCounter::new(2);
        quota.consume();
        quota.consume();
        quota.reset();
        assert_eq!(quota.used(), 0);
        assert_eq!(quota.remaining(), 2);
    }

    #[test]
    fn consume_past_the_ceiling_saturates() {
        let mut quota = QuotaCounter::new(1);
        quota.consume();
        quota.consume();
        assert!(quota.is_exhausted());
        assert_eq!(quota.remaining(), 0);
    }
}
