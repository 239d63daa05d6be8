//! Frame-batched priority task queue.
//!
//! `schedule` enqueues a closure and requests a frame if none is pending. Each
//! [`TaskScheduler::run_frame`] stable-sorts the queue by priority, runs at most `batch_size`
//! tasks and requests another frame only if work remains. A failing or panicking task resolves
//! its handle to `None` and never affects the rest of the batch.

use std::cell::RefCell;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use crate::foundation::error::{MotionError, MotionResult};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
}

struct Slot<T> {
    outcome: Option<Option<T>>,
    waker: Option<Waker>,
}

impl<T> Slot<T> {
    fn resolve(&mut self, value: Option<T>) {
        self.outcome = Some(value);
        if let Some(w) = self.waker.take() {
            w.wake();
        }
    }
}

/// Result of a scheduled task: `Some(value)` on success, `None` on failure or cancellation.
///
/// Can be awaited, or polled synchronously with [`TaskHandle::try_take`].
pub struct TaskHandle<T> {
    slot: Rc<RefCell<Slot<T>>>,
}

impl<T> TaskHandle<T> {
    pub fn is_ready(&self) -> bool {
        self.slot.borrow().outcome.is_some()
    }

    /// `None` while pending; `Some(outcome)` once resolved (taken exactly once).
    pub fn try_take(&self) -> Option<Option<T>> {
        self.slot.borrow_mut().outcome.take()
    }
}

impl<T> Future for TaskHandle<T> {
    type Output = Option<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut slot = self.slot.borrow_mut();
        match slot.outcome.take() {
            Some(outcome) => Poll::Ready(outcome),
            None => {
                slot.waker = Some(cx.waker().clone());
                Poll::Pending
            }
        }
    }
}

// `true` runs the task, `false` cancels it.
type Job = Box<dyn FnOnce(bool)>;

struct Queued {
    priority: Priority,
    job: Job,
}

struct State {
    queue: Vec<Queued>,
    frame_pending: bool,
    batch_size: usize,
    frames_requested: u64,
}

/// Cloneable handle to a single-threaded task queue.
#[derive(Clone)]
pub struct TaskScheduler {
    state: Rc<RefCell<State>>,
}

impl TaskScheduler {
    pub fn new(batch_size: usize) -> Self {
        Self {
            state: Rc::new(RefCell::new(State {
                queue: Vec::new(),
                frame_pending: false,
                batch_size: batch_size.max(1),
                frames_requested: 0,
            })),
        }
    }

    pub fn schedule<T, F>(&self, task: F, priority: Priority) -> TaskHandle<T>
    where
        T: 'static,
        F: FnOnce() -> anyhow::Result<T> + 'static,
    {
        let slot = Rc::new(RefCell::new(Slot {
            outcome: None,
            waker: None,
        }));
        let writer = Rc::clone(&slot);
        let job: Job = Box::new(move |run| {
            let value = if run {
                match run_isolated(task) {
                    Ok(v) => Some(v),
                    Err(err) => {
                        tracing::warn!(?priority, error = %err, "scheduled task failed");
                        None
                    }
                }
            } else {
                None
            };
            writer.borrow_mut().resolve(value);
        });

        let mut st = self.state.borrow_mut();
        st.queue.push(Queued { priority, job });
        if !st.frame_pending {
            st.frame_pending = true;
            st.frames_requested += 1;
        }
        TaskHandle { slot }
    }

    /// Whether a frame callback is currently requested.
    pub fn frame_pending(&self) -> bool {
        self.state.borrow().frame_pending
    }

    pub fn queued(&self) -> usize {
        self.state.borrow().queue.len()
    }

    /// Number of frame callbacks requested so far.
    pub fn frames_requested(&self) -> u64 {
        self.state.borrow().frames_requested
    }

    /// The frame callback. Returns how many tasks ran.
    pub fn run_frame(&self) -> usize {
        let batch: Vec<Queued> = {
            let mut st = self.state.borrow_mut();
            if !st.frame_pending {
                return 0;
            }
            // Vec::sort_by is stable, so FIFO order holds within a priority.
            st.queue.sort_by(|a, b| b.priority.cmp(&a.priority));
            let n = st.queue.len().min(st.batch_size);
            st.queue.drain(..n).collect()
        };

        // Tasks may schedule more work; the state borrow is released while they run.
        let ran = batch.len();
        for q in batch {
            (q.job)(true);
        }

        let mut st = self.state.borrow_mut();
        if st.queue.is_empty() {
            st.frame_pending = false;
        } else {
            st.frames_requested += 1;
        }
        ran
    }

    /// Drop every queued task (handles resolve to `None`) and cancel the pending frame.
    pub fn cleanup(&self) {
        let dropped: Vec<Queued> = {
            let mut st = self.state.borrow_mut();
            st.frame_pending = false;
            std::mem::take(&mut st.queue)
        };
        for q in dropped {
            (q.job)(false);
        }
    }
}

/// Run one task, turning both an error and a panic into [`MotionError::Task`].
fn run_isolated<T>(task: impl FnOnce() -> anyhow::Result<T>) -> MotionResult<T> {
    match panic::catch_unwind(AssertUnwindSafe(task)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(MotionError::task(format!("{err:#}"))),
        Err(payload) => {
            let msg = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "non-string payload".to_string());
            Err(MotionError::task(format!("panicked: {msg}")))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/tasks.rs"]
mod tests;
