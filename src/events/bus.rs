//! Typed broadcast channel.
//!
//! Publishers and subscribers never reference each other: a publisher pushes a value and every
//! live subscription receives its own copy in an inbox that the subscriber drains on its own
//! schedule. Subscriptions are named, so the set of listeners can be enumerated.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

/// Lifecycle signals of a page transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionSignal {
    /// The overlay is about to cover the page; dependents should pause.
    Started,
    /// Navigation ran while the overlay still covers the page; dependents may rebuild.
    AlmostComplete,
    /// The overlay is gone; dependents should resume and refresh.
    Complete,
}

impl TransitionSignal {
    pub fn name(self) -> &'static str {
        match self {
            Self::Started => "transition-started",
            Self::AlmostComplete => "transition-almost-complete",
            Self::Complete => "transition-complete",
        }
    }
}

type Inbox<E> = RefCell<VecDeque<E>>;

struct Subscriber<E> {
    name: &'static str,
    inbox: Weak<Inbox<E>>,
}

/// Cloneable handle to one broadcast channel.
pub struct EventBus<E> {
    subscribers: Rc<RefCell<Vec<Subscriber<E>>>>,
}

impl<E> Clone for EventBus<E> {
    fn clone(&self) -> Self {
        Self {
            subscribers: Rc::clone(&self.subscribers),
        }
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self {
            subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl<E: Clone + std::fmt::Debug> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, name: &'static str) -> Subscription<E> {
        let inbox = Rc::new(RefCell::new(VecDeque::new()));
        self.subscribers.borrow_mut().push(Subscriber {
            name,
            inbox: Rc::downgrade(&inbox),
        });
        Subscription { name, inbox }
    }

    /// Deliver `event` to every live subscription. Returns how many received it.
    pub fn publish(&self, event: E) -> usize {
        let mut subs = self.subscribers.borrow_mut();
        subs.retain(|s| s.inbox.strong_count() > 0);
        for s in subs.iter() {
            if let Some(inbox) = s.inbox.upgrade() {
                inbox.borrow_mut().push_back(event.clone());
            }
        }
        tracing::debug!(?event, receivers = subs.len(), "broadcast");
        subs.len()
    }

    /// Names of the live subscriptions, in subscription order.
    pub fn subscribers(&self) -> Vec<&'static str> {
        self.subscribers
            .borrow()
            .iter()
            .filter(|s| s.inbox.strong_count() > 0)
            .map(|s| s.name)
            .collect()
    }
}

/// Receiving end of a bus. Dropping it unsubscribes.
pub struct Subscription<E> {
    name: &'static str,
    inbox: Rc<Inbox<E>>,
}

impl<E> Subscription<E> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Take every pending event in publish order.
    pub fn drain(&self) -> Vec<E> {
        self.inbox.borrow_mut().drain(..).collect()
    }

    pub fn pending(&self) -> usize {
        self.inbox.borrow().len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/events/bus.rs"]
mod tests;
