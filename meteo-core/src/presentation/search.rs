use parking_lot::Mutex;
use std::{sync::Arc, time::Duration};
use tokio::sync::watch;

use crate::{
    model::City,
    usecase::{SearchCityUseCase, searchable_query},
};

use super::{Generation, TaskSlot};

/// Where the search box is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// Empty query, nothing listed.
    Idle,
    /// Query present but not searched (yet, or too short to search).
    Typing,
    Searching,
    Results,
    NoResults,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CitySearchUiState {
    pub query: String,
    pub is_loading: bool,
    /// Authoritative only while `error_message` is `None`.
    pub results: Vec<City>,
    pub error_message: Option<String>,
    /// Trimmed query the current `results`/`error_message` answer.
    pub answered_query: Option<String>,
}

impl CitySearchUiState {
    pub fn phase(&self) -> SearchPhase {
        if self.error_message.is_some() {
            SearchPhase::Failed
        } else if self.is_loading {
            SearchPhase::Searching
        } else if self.query.trim().is_empty() {
            SearchPhase::Idle
        } else if self.answered_query.as_deref() != Some(self.query.trim()) {
            SearchPhase::Typing
        } else if self.results.is_empty() {
            SearchPhase::NoResults
        } else {
            SearchPhase::Results
        }
    }

    fn clear_outcome(&mut self) {
        self.is_loading = false;
        self.results.clear();
        self.error_message = None;
        self.answered_query = None;
    }
}

#[derive(Debug)]
struct Shared {
    use_case: SearchCityUseCase,
    state: watch::Sender<CitySearchUiState>,
    generation: Generation,
}

impl Shared {
    /// Apply `update` only if `token` is still the latest request.
    fn apply(&self, token: u64, update: impl FnOnce(&mut CitySearchUiState)) -> bool {
        let applied = self.generation.publish(&self.state, token, update);
        if !applied {
            tracing::debug!(token, "discarding superseded search update");
        }
        applied
    }

    async fn run(&self, token: u64, query: &str) {
        let Some(cleaned) = searchable_query(query) else {
            self.apply(token, CitySearchUiState::clear_outcome);
            return;
        };

        if !self.apply(token, |state| {
            state.is_loading = true;
            state.error_message = None;
        }) {
            return;
        }

        tracing::debug!(query = cleaned, "searching cities");
        let result = self.use_case.execute(cleaned).await;

        self.apply(token, |state| {
            state.is_loading = false;
            state.answered_query = Some(cleaned.to_string());
            match result {
                Ok(cities) => {
                    state.results = cities;
                    state.error_message = None;
                }
                Err(error) => {
                    tracing::info!(query = cleaned, %error, "city search failed");
                    state.results.clear();
                    state.error_message = Some(error.user_message());
                }
            }
        });
    }
}

#[derive(Debug, Default)]
struct Pending {
    task: TaskSlot,
    /// Trimmed query of the last scheduled search.
    scheduled: Option<String>,
}

/// Search-as-you-type over [`SearchCityUseCase`].
///
/// Edits are debounced; a newer edit, submit or clear cancels the previous
/// pending search, and a response that still races past cancellation is dropped.
/// Must be used from within a Tokio runtime.
#[derive(Debug)]
pub struct CitySearchViewModel {
    shared: Arc<Shared>,
    pending: Mutex<Pending>,
    debounce: Duration,
}

impl CitySearchViewModel {
    pub fn new(use_case: SearchCityUseCase, debounce: Duration) -> Self {
        let (state, _) = watch::channel(CitySearchUiState::default());
        Self {
            shared: Arc::new(Shared {
                use_case,
                state,
                generation: Generation::default(),
            }),
            pending: Mutex::new(Pending::default()),
            debounce,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<CitySearchUiState> {
        self.shared.state.subscribe()
    }

    pub fn state(&self) -> CitySearchUiState {
        self.shared.state.borrow().clone()
    }

    pub fn on_query_change(&self, text: &str) {
        let trimmed = text.trim().to_string();
        let mut pending = self.pending.lock();
        let changed = pending.scheduled.as_deref() != Some(trimmed.as_str());
        let token = changed.then(|| self.shared.generation.advance());

        self.shared.state.send_modify(|state| {
            state.query = text.to_string();
            if state.error_message.take().is_some() {
                state.answered_query = None;
            }
            if changed {
                state.is_loading = false;
            }
        });

        let Some(token) = token else {
            return;
        };

        let shared = Arc::clone(&self.shared);
        let delay = self.debounce;
        pending.scheduled = Some(trimmed.clone());
        pending.task.replace(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            shared.run(token, &trimmed).await;
        }));
    }

    /// Search the current query now, skipping the debounce window.
    pub fn search(&self) {
        let query = self.shared.state.borrow().query.trim().to_string();
        let mut pending = self.pending.lock();

        let token = self.shared.generation.advance();
        let shared = Arc::clone(&self.shared);
        pending.scheduled = Some(query.clone());
        pending.task.replace(tokio::spawn(async move {
            shared.run(token, &query).await;
        }));
    }

    pub fn clear_results(&self) {
        let mut pending = self.pending.lock();
        pending.task.cancel();
        pending.scheduled = None;

        self.shared.generation.advance();
        self.shared.state.send_modify(CitySearchUiState::clear_outcome);
    }

    /// Drop the search session and hand the picked city back to the caller.
    pub fn select_city(&self, city: City) -> City {
        self.clear_results();
        self.shared.state.send_modify(|state| state.query.clear());
        city
    }
}
