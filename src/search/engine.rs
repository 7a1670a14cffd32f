//! Debounced incremental search session.
//!
//! One [`SearchEngine`] backs one search box. Query mutations arm a
//! trailing-edge debounce timer; only the newest mutation survives the
//! delay window, so a burst of keystrokes costs a single provider call.
//! Results are filtered to records with a usable title, truncated to the
//! suggestion limit, and exposed as two index-aligned sequences: display
//! strings and the full records behind them.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::provider::SearchProvider;
use crate::model::AnimeRecord;

/// Trailing-edge delay between the last keystroke and the provider call.
pub const DEBOUNCE: Duration = Duration::from_millis(300);

/// Queries shorter than this (after trimming) never reach the provider.
pub const MIN_QUERY_LEN: usize = 2;

/// Cap on suggestions held by a session.
pub const SUGGESTION_LIMIT: usize = 10;

/// Copy of the observable session state.
///
/// `suggestions[i]` and `records[i]` always describe the same item, and
/// `suggestions.len() <=` the configured limit.
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    pub query_text: String,
    pub is_loading: bool,
    pub suggestions_visible: bool,
    pub suggestions: Vec<String>,
    pub records: Vec<AnimeRecord>,
}

#[derive(Default)]
struct SessionState {
    query_text: String,
    is_loading: bool,
    suggestions_visible: bool,
    suggestions: Vec<String>,
    records: Vec<AnimeRecord>,
    /// Bumped on every query mutation. A fetch result is applied only if
    /// the generation it was armed under is still current, so a response
    /// from a superseded query can never clobber a newer one.
    generation: u64,
}

impl SessionState {
    fn clear_results(&mut self) {
        self.suggestions.clear();
        self.records.clear();
        self.suggestions_visible = false;
    }
}

/// Per-search-box session owning the query text, debounce timer, and the
/// index-aligned suggestion/record sequences.
///
/// Mutating methods must be called from within a tokio runtime: the
/// debounce timer is a spawned task. Dropping the engine aborts any
/// armed-but-unfired timer, so a torn-down session is never mutated by a
/// late callback.
pub struct SearchEngine<P: SearchProvider + 'static> {
    provider: Arc<P>,
    state: Arc<Mutex<SessionState>>,
    timer: Option<JoinHandle<()>>,
    debounce: Duration,
    min_query_len: usize,
    limit: usize,
}

impl<P: SearchProvider + 'static> SearchEngine<P> {
    pub fn new(provider: P) -> Self {
        Self::with_settings(provider, DEBOUNCE, MIN_QUERY_LEN, SUGGESTION_LIMIT)
    }

    pub fn with_settings(
        provider: P,
        debounce: Duration,
        min_query_len: usize,
        limit: usize,
    ) -> Self {
        Self {
            provider: Arc::new(provider),
            state: Arc::new(Mutex::new(SessionState::default())),
            timer: None,
            debounce,
            min_query_len,
            limit,
        }
    }

    /// Record a query mutation.
    ///
    /// A trimmed query below the minimum length clears the session
    /// synchronously without arming the timer or touching the provider.
    /// Otherwise the debounce timer is cancelled and re-armed; when it
    /// fires, the provider is queried with this text.
    pub fn set_query(&mut self, text: &str) {
        self.cancel_timer();

        let generation = {
            let mut state = self.state.lock();
            state.query_text = text.to_string();
            state.generation += 1;
            if text.trim().chars().count() < self.min_query_len {
                state.clear_results();
                state.is_loading = false;
                return;
            }
            state.generation
        };

        let provider = Arc::clone(&self.provider);
        let state = Arc::clone(&self.state);
        let debounce = self.debounce;
        let limit = self.limit;
        let query = text.to_string();
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            run_fetch(provider, state, query, generation, limit).await;
        }));
    }

    /// Query the provider immediately for the current query, bypassing the
    /// debounce delay. Short queries clear the session instead, exactly as
    /// in [`set_query`](Self::set_query).
    pub async fn refresh(&self) {
        let (query, generation) = {
            let mut state = self.state.lock();
            if state.query_text.trim().chars().count() < self.min_query_len {
                state.clear_results();
                state.is_loading = false;
                return;
            }
            (state.query_text.clone(), state.generation)
        };
        run_fetch(
            Arc::clone(&self.provider),
            Arc::clone(&self.state),
            query,
            generation,
            self.limit,
        )
        .await;
    }

    /// Replace the query text without triggering a search. Cancels any
    /// armed timer and invalidates in-flight fetches.
    pub fn set_query_text(&mut self, text: &str) {
        self.cancel_timer();
        let mut state = self.state.lock();
        state.query_text = text.to_string();
        state.generation += 1;
        state.is_loading = false;
    }

    /// Accept a suggestion: adopt its text as the query and hide the list.
    /// Does not call the provider and leaves the result sequences intact.
    pub fn select_suggestion(&mut self, text: &str) {
        self.set_query_text(text);
        self.state.lock().suggestions_visible = false;
    }

    /// Hide the suggestion list without touching query or results.
    pub fn hide_suggestions(&self) {
        self.state.lock().suggestions_visible = false;
    }

    /// Show the suggestion list again; no-op while there are no suggestions.
    pub fn show_suggestions(&self) {
        let mut state = self.state.lock();
        if !state.suggestions.is_empty() {
            state.suggestions_visible = true;
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock();
        SessionSnapshot {
            query_text: state.query_text.clone(),
            is_loading: state.is_loading,
            suggestions_visible: state.suggestions_visible,
            suggestions: state.suggestions.clone(),
            records: state.records.clone(),
        }
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl<P: SearchProvider + 'static> Drop for SearchEngine<P> {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

/// Run one provider fetch and fold the outcome into the session.
///
/// Every failure path degrades to the cleared/hidden shape; nothing
/// escapes to the caller and `is_loading` is always unwound. The
/// generation is re-checked after the await so a fetch superseded while
/// in flight is discarded.
async fn run_fetch<P: SearchProvider>(
    provider: Arc<P>,
    state: Arc<Mutex<SessionState>>,
    query: String,
    generation: u64,
    limit: usize,
) {
    {
        let mut state = state.lock();
        if state.generation != generation {
            return;
        }
        state.is_loading = true;
    }

    let outcome = provider.search(&query, limit).await;

    let mut state = state.lock();
    if state.generation != generation {
        debug!(%query, "discarding stale search response");
        return;
    }
    state.is_loading = false;

    match outcome {
        Ok(records) => {
            let kept: Vec<AnimeRecord> = records
                .into_iter()
                .filter(|record| record.display_title().is_some())
                .take(limit)
                .collect();
            state.suggestions = kept
                .iter()
                .map(|record| record.display_title().unwrap_or_default().to_string())
                .collect();
            state.records = kept;
            state.suggestions_visible = !state.suggestions.is_empty();
        }
        Err(err) => {
            warn!(%query, "anime search failed: {err}");
            state.clear_results();
        }
    }
}
