use std::time::Duration;
use tracing::{debug, warn};

use crate::{FetchError, LocationCandidate, WeatherProvider, debounce::Debouncer};

/// Queries must be longer than this many characters to reach the provider.
pub const MIN_QUERY_CHARS: usize = 2;

pub fn is_searchable(query: &str) -> bool {
    query.chars().count() > MIN_QUERY_CHARS
}

/// Search affordance of the current-conditions screen.
#[derive(Debug)]
pub struct LocationSearch {
    open: bool,
    debouncer: Debouncer<String>,
    candidates: Vec<LocationCandidate>,
    last_error: Option<FetchError>,
}

impl LocationSearch {
    pub fn new(delay: Duration) -> Self {
        Self { open: false, debouncer: Debouncer::new(delay), candidates: Vec::new(), last_error: None }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Closing drops candidates and any input still waiting on the debouncer.
    pub fn close(&mut self) {
        self.open = false;
        self.candidates.clear();
        self.debouncer.cancel();
    }

    pub fn toggle(&mut self) {
        if self.open { self.close() } else { self.open() }
    }

    /// Candidates are only shown while the affordance is open.
    pub fn candidates(&self) -> &[LocationCandidate] {
        if self.open { &self.candidates } else { &[] }
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    pub fn has_pending_input(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Records a keystroke. Nothing is sent until [`LocationSearch::settle`].
    pub fn input(&mut self, text: &str) {
        self.debouncer.schedule(text.to_string());
    }

    /// Waits for the input to go quiet, then searches if the query is long
    /// enough. Returns the number of candidates when a search was issued.
    pub async fn settle(&mut self, provider: &dyn WeatherProvider) -> Option<usize> {
        let query = self.debouncer.fire().await?;
        if !is_searchable(&query) {
            debug!(%query, "query too short, not searching");
            return None;
        }

        match provider.fetch_locations(&query).await {
            Ok(found) => {
                self.last_error = None;
                self.candidates = found;
            }
            Err(e) => {
                warn!(%query, error = %e, "location search failed");
                self.candidates.clear();
                self.last_error = Some(e);
            }
        }
        Some(self.candidates.len())
    }
}
