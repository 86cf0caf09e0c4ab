//! Linear step index

use crate::core::error::DomainError;

/// Tracks the current step, always within `1..=total`.
///
/// The sequencer knows nothing about step contents; gating on completeness
/// is done by [`super::engine::Wizard`] before calling `handle_next`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSequencer {
    current: usize,
    total: usize,
}

impl StepSequencer {
    pub fn new(total: usize) -> Result<Self, DomainError> {
        if total == 0 {
            return Err(DomainError::EmptyWizard);
        }
        Ok(Self { current: 1, total })
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_first(&self) -> bool {
        self.current == 1
    }

    pub fn is_last(&self) -> bool {
        self.current == self.total
    }

    /// Move one step forward. Returns `false` at the last step.
    pub fn handle_next(&mut self) -> bool {
        if self.current < self.total {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Move one step back. Returns `false` at the first step.
    pub fn handle_previous(&mut self) -> bool {
        if self.current > 1 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to an earlier (or the current) step
    pub fn jump_back(&mut self, step: usize) -> bool {
        if (1..=self.current).contains(&step) {
            self.current = step;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.current = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_steps_rejected() {
        assert_eq!(StepSequencer::new(0), Err(DomainError::EmptyWizard));
    }

    #[test]
    fn test_bounds() {
        let mut seq = StepSequencer::new(3).unwrap();
        assert!(seq.is_first());
        assert!(!seq.handle_previous());
        assert_eq!(seq.current(), 1);

        assert!(seq.handle_next());
        assert!(seq.handle_next());
        assert!(seq.is_last());
        assert!(!seq.handle_next());
        assert_eq!(seq.current(), 3);

        assert!(seq.handle_previous());
        assert_eq!(seq.current(), 2);
    }

    #[test]
    fn test_jump_back_only() {
        let mut seq = StepSequencer::new(4).unwrap();
        seq.handle_next();
        seq.handle_next();
        assert!(!seq.jump_back(4));
        assert!(!seq.jump_back(0));
        assert!(seq.jump_back(1));
        assert_eq!(seq.current(), 1);
    }

    #[test]
    fn test_single_step_is_first_and_last() {
        let seq = StepSequencer::new(1).unwrap();
        assert!(seq.is_first() && seq.is_last());
    }
}
