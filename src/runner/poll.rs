use super::settings::PollPolicy;

/// Outcome of one look at the results document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    Ready,
    Pending,
}

/// Progress of waiting for a submitted test's results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Submitted,
    Polling { attempt: u32 },
    Ready { attempt: u32 },
    TimedOut { attempts: u32 },
}

impl PollState {
    #[must_use]
    pub const fn start(self) -> Self {
        match self {
            PollState::Submitted => PollState::Polling { attempt: 1 },
            PollState::Polling { .. } | PollState::Ready { .. } | PollState::TimedOut { .. } => {
                self
            }
        }
    }

    /// Applies the result of the current attempt. Only `Polling` moves.
    #[must_use]
    pub const fn advance(self, probe: Probe, policy: &PollPolicy) -> Self {
        match (self, probe) {
            (PollState::Polling { attempt }, Probe::Ready) => PollState::Ready { attempt },
            (PollState::Polling { attempt }, Probe::Pending) => {
                if attempt < policy.max_attempts.get() {
                    PollState::Polling {
                        attempt: attempt.saturating_add(1),
                    }
                } else {
                    PollState::TimedOut { attempts: attempt }
                }
            }
            (
                PollState::Submitted | PollState::Ready { .. } | PollState::TimedOut { .. },
                Probe::Ready | Probe::Pending,
            ) => self,
        }
    }

    /// A wait precedes every attempt except the first.
    #[must_use]
    pub const fn waits_before_attempt(self) -> bool {
        matches!(self, PollState::Polling { attempt } if attempt > 1)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, PollState::Ready { .. } | PollState::TimedOut { .. })
    }
}
