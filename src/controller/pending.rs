/// Two-state machine for a proposed change awaiting an explicit decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pending<T> {
    Idle,
    Pending(T),
}

impl<T> Default for Pending<T> {
    fn default() -> Self {
        Pending::Idle
    }
}

impl<T> Pending<T> {
    /// Stores `value` as the outstanding proposal, returning any proposal it replaced.
    pub fn propose(&mut self, value: T) -> Option<T> {
        match std::mem::replace(self, Pending::Pending(value)) {
            Pending::Idle => None,
            Pending::Pending(previous) => Some(previous),
        }
    }

    /// Takes the outstanding proposal for application.
    pub fn confirm(&mut self) -> Option<T> {
        self.take()
    }

    /// Drops the outstanding proposal.
    pub fn cancel(&mut self) -> Option<T> {
        self.take()
    }

    /// Takes the proposal only when `accept` matches it; otherwise it stays.
    pub fn confirm_if(&mut self, accept: impl FnOnce(&T) -> bool) -> Option<T> {
        if self.peek().is_some_and(accept) {
            self.take()
        } else {
            None
        }
    }

    /// Drops the proposal only when `accept` matches it.
    pub fn cancel_if(&mut self, accept: impl FnOnce(&T) -> bool) -> Option<T> {
        self.confirm_if(accept)
    }

    pub fn peek(&self) -> Option<&T> {
        match self {
            Pending::Idle => None,
            Pending::Pending(value) => Some(value),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Pending::Pending(_))
    }

    fn take(&mut self) -> Option<T> {
        match std::mem::replace(self, Pending::Idle) {
            Pending::Idle => None,
            Pending::Pending(value) => Some(value),
        }
    }
}
