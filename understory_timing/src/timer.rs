// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// A single cancellable deadline carrying a payload.
///
/// Arming a timer that is already armed replaces the pending payload and
/// hands the old one back, so callers can decide whether to deliver or drop
/// it.
#[derive(Clone, Debug)]
pub struct Timer<T> {
    pending: Option<(f64, T)>,
}

impl<T> Default for Timer<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> Timer<T> {
    /// Creates a disarmed timer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the timer to fire at `deadline`, returning any payload that was
    /// still pending.
    pub fn arm(&mut self, deadline: f64, payload: T) -> Option<T> {
        self.pending.replace((deadline, payload)).map(|(_, p)| p)
    }

    /// Disarms the timer, returning its payload if one was pending.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, p)| p)
    }

    /// Returns `true` while a payload is pending.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Time at which the pending payload is due.
    #[must_use]
    pub fn deadline(&self) -> Option<f64> {
        self.pending.as_ref().map(|(d, _)| *d)
    }

    /// Returns the pending payload if its deadline is at or before `now`.
    pub fn poll(&mut self, now: f64) -> Option<T> {
        match self.pending {
            Some((deadline, _)) if deadline <= now => self.cancel(),
            _ => None,
        }
    }

    /// Peeks at the pending payload.
    #[must_use]
    pub fn payload(&self) -> Option<&T> {
        self.pending.as_ref().map(|(_, p)| p)
    }
}
