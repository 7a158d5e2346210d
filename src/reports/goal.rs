//! Monthly goal progress
//!
//! The goal is informational only; nothing stops spending past it.

use crate::models::Money;

/// Progress of the current month's spending against the goal
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GoalProgress {
    /// No goal set (or a goal of zero)
    NoGoal,
    Tracking {
        current: Money,
        goal: Money,
        /// `current / goal * 100`, not capped
        percent: f64,
    },
}

impl GoalProgress {
    /// Compare spending with a goal; a missing or non-positive goal means no goal
    pub fn compute(current: Money, goal: Option<Money>) -> Self {
        match goal {
            Some(goal) if goal.is_positive() => Self::Tracking {
                current,
                goal,
                percent: current.as_f64() / goal.as_f64() * 100.0,
            },
            _ => Self::NoGoal,
        }
    }

    pub fn has_goal(&self) -> bool {
        matches!(self, Self::Tracking { .. })
    }

    /// Percentage of the goal spent; 0 without a goal
    pub fn percent(&self) -> f64 {
        match self {
            Self::NoGoal => 0.0,
            Self::Tracking { percent, .. } => *percent,
        }
    }

    /// Fill of a progress bar in percent, clamped to 0..=100
    pub fn bar_fill(&self) -> f64 {
        self.percent().clamp(0.0, 100.0)
    }

    pub fn is_over_budget(&self) -> bool {
        matches!(self, Self::Tracking { current, goal, .. } if current > goal)
    }

    /// How far past the goal, in percentage points
    pub fn over_by(&self) -> Option<f64> {
        if self.is_over_budget() {
            Some(self.percent() - 100.0)
        } else {
            None
        }
    }

    /// Amount left before reaching the goal (negative once over)
    pub fn remaining(&self) -> Option<Money> {
        match self {
            Self::NoGoal => None,
            Self::Tracking { current, goal, .. } => Some(*goal - *current),
        }
    }
}
