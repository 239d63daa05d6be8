//! Time-gated wrappers around callbacks.
//!
//! The host clock is passed in on every call, so these stay deterministic and need no timer
//! thread. A [`Debounced`] callback fires from [`Debounced::flush`], which the owner calls
//! once per frame.

use crate::foundation::core::Millis;

/// Leading-edge throttle gate: open at most once per `limit_ms`.
#[derive(Clone, Copy, Debug)]
pub struct Throttle {
    limit_ms: u64,
    last: Option<Millis>,
}

impl Throttle {
    pub fn new(limit_ms: u64) -> Self {
        Self {
            limit_ms,
            last: None,
        }
    }

    /// Returns true (and arms the gate) if at least `limit_ms` passed since the last pass.
    pub fn ready(&mut self, now: Millis) -> bool {
        match self.last {
            Some(last) if now >= last && now.since(last) < self.limit_ms => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// A callback that runs on the leading edge, then ignores calls for `limit_ms`.
pub struct Throttled<F> {
    gate: Throttle,
    f: F,
}

impl<F> Throttled<F> {
    pub fn call<A>(&mut self, now: Millis, arg: A) -> bool
    where
        F: FnMut(A),
    {
        if self.gate.ready(now) {
            (self.f)(arg);
            true
        } else {
            false
        }
    }
}

pub fn throttle<F>(f: F, limit_ms: u64) -> Throttled<F> {
    Throttled {
        gate: Throttle::new(limit_ms),
        f,
    }
}

/// A callback that runs once `wait_ms` after the most recent call (trailing edge).
pub struct Debounced<A, F> {
    wait_ms: u64,
    pending: Option<(Millis, A)>,
    f: F,
}

impl<A, F: FnMut(A)> Debounced<A, F> {
    /// Record a call; any earlier pending call is superseded.
    pub fn call(&mut self, now: Millis, arg: A) {
        self.pending = Some((now.after(self.wait_ms), arg));
    }

    /// Run the pending call if its quiet period has elapsed. Returns true if it ran.
    pub fn flush(&mut self, now: Millis) -> bool {
        match self.pending.take() {
            Some((due, arg)) if now >= due => {
                (self.f)(arg);
                true
            }
            other => {
                self.pending = other;
                false
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

pub fn debounce<A, F: FnMut(A)>(f: F, wait_ms: u64) -> Debounced<A, F> {
    Debounced {
        wait_ms,
        pending: None,
        f,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/timing.rs"]
mod tests;
