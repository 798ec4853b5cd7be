// Per-invocation wall-clock budget.
//
// Checked between pipeline stages and inside the two loops whose cost grows
// fastest with input size (graph pair accumulation, LDA iterations).

use std::time::{Duration, Instant};

use crate::error::AnalysisError;

#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    limit: Duration,
}

impl Deadline {
    /// Start the clock now with the given budget.
    pub fn start(limit: Duration) -> Self {
        Self {
            started: Instant::now(),
            limit,
        }
    }

    /// A deadline that never expires. Handy when calling a stage on its own.
    pub fn unbounded() -> Self {
        Self::start(Duration::MAX)
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    pub fn expired(&self) -> bool {
        self.elapsed() >= self.limit
    }

    /// Fail with `DeadlineExceeded` naming `stage` if the budget is spent.
    pub fn check(&self, stage: &'static str) -> Result<(), AnalysisError> {
        if self.expired() {
            return Err(AnalysisError::DeadlineExceeded {
                stage,
                limit: self.limit,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_budget_expires_immediately() {
        let d = Deadline::start(Duration::ZERO);
        let err = d.check("graph").unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::DeadlineExceeded { stage: "graph", .. }
        ));
    }

    #[test]
    fn test_unbounded_never_expires() {
        let d = Deadline::unbounded();
        assert!(!d.expired());
        assert!(d.check("topics").is_ok());
    }
}
