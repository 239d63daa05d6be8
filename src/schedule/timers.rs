use std::collections::{BTreeMap, HashMap};

use crate::foundation::core::Millis;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

/// One-shot timers carrying an action value.
///
/// Due actions come out in deadline order, ties broken by creation order.
#[derive(Debug)]
pub struct TimerQueue<T> {
    next: u64,
    pending: BTreeMap<(Millis, u64), T>,
    deadlines: HashMap<u64, Millis>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            next: 0,
            pending: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_timeout(&mut self, now: Millis, delay_ms: u64, action: T) -> TimerId {
        let seq = self.next;
        self.next += 1;
        let due = now.after(delay_ms);
        self.pending.insert((due, seq), action);
        self.deadlines.insert(seq, due);
        TimerId(seq)
    }

    /// Cancel a timer. Returns false if it already fired or never existed.
    pub fn clear(&mut self, id: TimerId) -> bool {
        match self.deadlines.remove(&id.0) {
            Some(due) => self.pending.remove(&(due, id.0)).is_some(),
            None => false,
        }
    }

    /// Remove and return every action due at or before `now`.
    pub fn due(&mut self, now: Millis) -> Vec<T> {
        let later = self.pending.split_off(&(now, u64::MAX));
        let ready = std::mem::replace(&mut self.pending, later);
        ready
            .into_iter()
            .map(|((_, seq), action)| {
                self.deadlines.remove(&seq);
                action
            })
            .collect()
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.pending.keys().next().map(|(due, _)| *due)
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id.0)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear_all(&mut self) {
        self.pending.clear();
        self.deadlines.clear();
    }
}
