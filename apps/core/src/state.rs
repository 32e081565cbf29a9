use std::cell::{Ref, RefCell};
use std::fmt;
use std::future::Future;
use std::rc::Rc;

use tracing::debug;

/// Lifecycle of the data behind one view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> ViewState<T> {
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// What happened when a cycle tried to publish its result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    Ready,
    Failed,
    /// A newer cycle (or an unmount) took over; the result was dropped
    Superseded,
}

#[derive(Debug)]
struct Slot<T> {
    state: ViewState<T>,
    generation: u64,
}

/// Shared handle on a view's state.
///
/// Cloning is cheap; all clones observe the same slot. Only the latest
/// [`Cycle`] started through [`ViewHandle::begin`] may write to it.
#[derive(Debug)]
pub struct ViewHandle<T> {
    slot: Rc<RefCell<Slot<T>>>,
}

impl<T> Clone for ViewHandle<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T> Default for ViewHandle<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ViewHandle<T> {
    pub fn new() -> Self {
        Self {
            slot: Rc::new(RefCell::new(Slot {
                state: ViewState::Idle,
                generation: 0,
            })),
        }
    }

    /// Starts a new fetch cycle keyed by the route parameter that triggered it.
    ///
    /// The view enters `Loading` immediately and any cycle still in flight
    /// loses the right to commit.
    pub fn begin(&self, key: impl Into<String>) -> Cycle<T> {
        let key = key.into();
        let mut slot = self.slot.borrow_mut();
        slot.generation += 1;
        slot.state = ViewState::Loading;
        debug!(key = %key, generation = slot.generation, "fetch cycle started");
        Cycle {
            handle: self.clone(),
            generation: slot.generation,
            key,
        }
    }

    /// Drops the view's data and invalidates any in-flight cycle
    pub fn unmount(&self) {
        let mut slot = self.slot.borrow_mut();
        slot.generation += 1;
        slot.state = ViewState::Idle;
    }

    pub fn state(&self) -> Ref<'_, ViewState<T>> {
        Ref::map(self.slot.borrow(), |slot| &slot.state)
    }
}

impl<T: Clone> ViewHandle<T> {
    pub fn snapshot(&self) -> ViewState<T> {
        self.slot.borrow().state.clone()
    }
}

/// The right to publish one fetch result into a [`ViewHandle`]
#[derive(Debug)]
pub struct Cycle<T> {
    handle: ViewHandle<T>,
    generation: u64,
    key: String,
}

impl<T> Cycle<T> {
    fn is_current(&self) -> bool {
        self.handle.slot.borrow().generation == self.generation
    }

    /// Publishes the outcome unless a newer cycle has started since
    pub fn commit<E: fmt::Display>(self, outcome: Result<T, E>) -> Commit {
        if !self.is_current() {
            debug!(
                key = %self.key,
                generation = self.generation,
                "discarding superseded fetch result"
            );
            return Commit::Superseded;
        }

        let mut slot = self.handle.slot.borrow_mut();
        match outcome {
            Ok(data) => {
                slot.state = ViewState::Ready(data);
                Commit::Ready
            }
            Err(err) => {
                slot.state = ViewState::Failed(err.to_string());
                Commit::Failed
            }
        }
    }

    /// Awaits the loader and commits its result
    pub async fn run<F, E>(self, load: F) -> Commit
    where
        F: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        let outcome = load.await;
        self.commit(outcome)
    }
}
