use std::fmt;

/// Where a suspended generator is suspended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suspension {
    /// Suspended at one of its own yield steps.
    Direct,
    /// Suspended inside of an active delegation.
    Delegated,
}

/// The state of a generator.
///
/// ```text
/// Created -> Running -> Suspended -> Running -> ... -> Completed
///                                                  \-> Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionState {
    /// The generator has not been started.
    Created,
    /// The generator is running.
    Running,
    /// The generator is suspended.
    Suspended(Suspension),
    /// The generator has completed.
    Completed,
    /// The generator failed with an uncaught fault.
    Failed,
}

impl ExecutionState {
    /// Test if the state is terminal.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for ExecutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Running => write!(f, "running"),
            Self::Suspended(Suspension::Direct) => write!(f, "suspended"),
            Self::Suspended(Suspension::Delegated) => write!(f, "suspended(delegated)"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}
