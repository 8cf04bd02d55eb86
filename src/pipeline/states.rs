use serde::{Deserialize, Serialize};
use std::fmt;

/// Pipeline run state definitions.
///
/// A run walks `Started → Collecting → Deriving → Recommending → Finalizing
/// → Completed`; `Failed` is reachable only from `Started`, for
/// pre-collection validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    /// Run created, input not yet validated
    Started,
    /// Source adapter calls in flight
    Collecting,
    /// Insight derivation in progress
    Deriving,
    /// Recommendation expansion in progress
    Recommending,
    /// Best-effort persistence and notification in progress
    Finalizing,
    /// Run finished with a full result
    Completed,
    /// Run rejected before collection
    Failed,
}

impl RunState {
    /// Check if this is a terminal state (no further transitions allowed)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Check if this is an active state (run is being processed)
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }

    /// Check whether `next` is a legal successor of this state.
    pub fn can_transition_to(&self, next: RunState) -> bool {
        matches!(
            (self, next),
            (Self::Started, Self::Collecting)
                | (Self::Started, Self::Failed)
                | (Self::Collecting, Self::Deriving)
                | (Self::Deriving, Self::Recommending)
                | (Self::Recommending, Self::Finalizing)
                | (Self::Finalizing, Self::Completed)
        )
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started => write!(f, "started"),
            Self::Collecting => write!(f, "collecting"),
            Self::Deriving => write!(f, "deriving"),
            Self::Recommending => write!(f, "recommending"),
            Self::Finalizing => write!(f, "finalizing"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

impl std::str::FromStr for RunState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "started" => Ok(Self::Started),
            "collecting" => Ok(Self::Collecting),
            "deriving" => Ok(Self::Deriving),
            "recommending" => Ok(Self::Recommending),
            "finalizing" => Ok(Self::Finalizing),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            _ => Err(format!("Invalid run state: {s}")),
        }
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::Started
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(RunState::Completed.is_terminal());
        assert!(RunState::Failed.is_terminal());
        assert!(!RunState::Started.is_terminal());
        assert!(!RunState::Collecting.is_terminal());
        assert!(!RunState::Finalizing.is_terminal());
    }

    #[test]
    fn test_failed_only_reachable_before_collection() {
        assert!(RunState::Started.can_transition_to(RunState::Failed));
        assert!(!RunState::Collecting.can_transition_to(RunState::Failed));
        assert!(!RunState::Deriving.can_transition_to(RunState::Failed));
        assert!(!RunState::Finalizing.can_transition_to(RunState::Failed));
    }

    #[test]
    fn test_happy_path_transitions() {
        let path = [
            RunState::Started,
            RunState::Collecting,
            RunState::Deriving,
            RunState::Recommending,
            RunState::Finalizing,
            RunState::Completed,
        ];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_state_string_conversion() {
        assert_eq!(RunState::Collecting.to_string(), "collecting");
        assert_eq!("completed".parse::<RunState>().unwrap(), RunState::Completed);
        assert!("bogus".parse::<RunState>().is_err());
    }
}
