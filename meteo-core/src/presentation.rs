//! State holders that own UI state and publish snapshots through `watch` channels.
//!
//! Each holder is the single writer of its state. Readers call `subscribe()` and
//! see the current value immediately, then every change.

use std::sync::atomic::{AtomicU64, Ordering};
use tokio::{sync::watch, task::JoinHandle};

pub mod search;
pub mod weather;

pub use search::{CitySearchUiState, CitySearchViewModel, SearchPhase};
pub use weather::{WeatherRequest, WeatherUiState, WeatherViewModel};

/// Monotonic request token. Only the holder of the latest token may write state.
#[derive(Debug, Default)]
pub(crate) struct Generation(AtomicU64);

impl Generation {
    pub(crate) fn advance(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub(crate) fn is_current(&self, token: u64) -> bool {
        self.0.load(Ordering::SeqCst) == token
    }

    /// Run `update` on `state` and notify readers, but only while `token` is current.
    /// The check and the write happen under the channel's lock.
    pub(crate) fn publish<T>(
        &self,
        state: &watch::Sender<T>,
        token: u64,
        update: impl FnOnce(&mut T),
    ) -> bool {
        state.send_if_modified(|value| {
            if !self.is_current(token) {
                return false;
            }
            update(value);
            true
        })
    }
}

/// At most one background task; replacing or dropping it aborts the previous one.
#[derive(Debug, Default)]
pub(crate) struct TaskSlot(Option<JoinHandle<()>>);

impl TaskSlot {
    pub(crate) fn replace(&mut self, handle: JoinHandle<()>) {
        self.cancel();
        self.0 = Some(handle);
    }

    pub(crate) fn cancel(&mut self) {
        if let Some(handle) = self.0.take() {
            handle.abort();
        }
    }
}

impl Drop for TaskSlot {
    fn drop(&mut self) {
        self.cancel();
    }
}
