//! Resource state stores: an ordered collection mirrored from the API plus
//! the request status of the actions that change it.
//!
//! # Design
//! Every action runs the same lifecycle: enter `loading`, await one API
//! call, commit the result or record the error message, leave `loading`.
//! Leaving is done by a drop guard, so the flag is released on success, on
//! failure and when the action future is dropped mid-flight.
//!
//! State lives in a `tokio::sync::watch` channel. Views call
//! [`Store::subscribe`] and re-render on `changed()`; nothing polls.
//!
//! Contracts:
//! - `loading()` is true while at least one action of the store is in flight.
//! - A failed action stores `ApiError`'s message and leaves `items` untouched.
//!   The error is not returned; callers observe it through the state.
//! - A successful action clears the previous error.
//! - Replace-style actions take a ticket right before the request whose
//!   response they commit. When a newer replace has taken a ticket since,
//!   the older response is discarded.

mod todo;
mod user;

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::ApiError;

pub use todo::TodoStore;
pub use user::{PageInfo, UserStore};

/// Receiver half handed to views; yields on every state change.
pub type StoreWatcher<T> = watch::Receiver<StoreState<T>>;

/// Snapshot of one store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreState<T> {
    items: Vec<T>,
    in_flight: usize,
    error: Option<String>,
}

impl<T> Default for StoreState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            in_flight: 0,
            error: None,
        }
    }
}

impl<T> StoreState<T> {
    /// Items in server response order, plus local appends.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Message of the last failed action, if not cleared since.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Reactive container shared by the resource stores.
#[derive(Debug)]
pub struct Store<T> {
    name: &'static str,
    state: watch::Sender<StoreState<T>>,
    replace_ticket: AtomicU64,
}

impl<T> Store<T> {
    pub(crate) fn new(name: &'static str) -> Self {
        let (state, _) = watch::channel(StoreState::default());
        Self {
            name,
            state,
            replace_ticket: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> StoreWatcher<T> {
        self.state.subscribe()
    }

    pub fn loading(&self) -> bool {
        self.state.borrow().loading()
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    pub fn len(&self) -> usize {
        self.state.borrow().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().items.is_empty()
    }

    pub fn clear_error(&self) {
        self.state.send_if_modified(|state| state.error.take().is_some());
    }

    /// Run one action: `call` is awaited inside the loading window and its
    /// value handed to `commit` on success.
    pub(crate) async fn track<R, F>(
        &self,
        action: &'static str,
        call: F,
        commit: impl FnOnce(&mut StoreState<T>, R),
    ) where
        F: Future<Output = Result<R, ApiError>>,
    {
        let _in_flight = InFlight::enter(&self.state);
        match call.await {
            Ok(value) => self.state.send_modify(|state| {
                state.error = None;
                commit(state, value);
            }),
            Err(err) => {
                warn!(store = self.name, action, error = %err, "store action failed");
                let message = err.to_string();
                self.state.send_modify(|state| state.error = Some(message));
            }
        }
    }

    /// Like [`Store::track`], but `commit` only runs if no newer replace
    /// started while `call` was in flight.
    pub(crate) async fn replace<R, F>(
        &self,
        action: &'static str,
        call: F,
        commit: impl FnOnce(&mut StoreState<T>, R),
    ) where
        F: Future<Output = Result<R, ApiError>>,
    {
        let ticket = self.next_ticket();
        self.track(action, call, |state, value| {
            self.commit_if_current(action, ticket, state, value, commit)
        })
        .await
    }

    /// Claim the newest replace slot; any response carrying an older ticket
    /// is discarded from now on.
    pub(crate) fn next_ticket(&self) -> u64 {
        self.replace_ticket.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub(crate) fn commit_if_current<R>(
        &self,
        action: &'static str,
        ticket: u64,
        state: &mut StoreState<T>,
        value: R,
        commit: impl FnOnce(&mut StoreState<T>, R),
    ) {
        if self.replace_ticket.load(Ordering::SeqCst) == ticket {
            commit(state, value);
        } else {
            debug!(store = self.name, action, ticket, "discarding superseded response");
        }
    }
}

impl<T: Clone> Store<T> {
    pub fn snapshot(&self) -> StoreState<T> {
        self.state.borrow().clone()
    }

    pub fn items(&self) -> Vec<T> {
        self.state.borrow().items.clone()
    }
}

/// Holds the store in `loading` for as long as it lives.
struct InFlight<'a, T> {
    state: &'a watch::Sender<StoreState<T>>,
}

impl<'a, T> InFlight<'a, T> {
    fn enter(state: &'a watch::Sender<StoreState<T>>) -> Self {
        state.send_modify(|s| s.in_flight += 1);
        Self { state }
    }
}

impl<T> Drop for InFlight<'_, T> {
    fn drop(&mut self) {
        self.state
            .send_modify(|s| s.in_flight = s.in_flight.saturating_sub(1));
    }
}
