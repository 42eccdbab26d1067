//! Location search: query, live suggestion batch, highlight and dropdown
//!
//! `LocationSearch` is a plain state machine. It never performs I/O and never
//! owns a timer; it returns commands and events that the reducer turns into
//! effects:
//!
//! - [`LocationSearch::set_text`] returns a [`SearchCommand`]: cancel the
//!   scheduled lookup, or (re)schedule it after [`DEBOUNCE`].
//! - [`LocationSearch::begin_fetch`] runs when the debounce timer fires and
//!   hands out the sequence number the lookup is tagged with.
//! - [`LocationSearch::apply_results`] accepts only the response tagged with
//!   the latest sequence number, so a slow answer for an older query can never
//!   overwrite a newer batch.
//!
//! Committing a suggestion or the raw query yields a [`SearchEvent`] for the
//! caller; loading the weather is the caller's business.

use std::fmt;
use std::time::Duration;

/// Queries shorter than this (in characters) never reach the provider.
pub const MIN_QUERY_CHARS: usize = 2;

/// At most this many suggestions are kept from one lookup.
pub const MAX_SUGGESTIONS: usize = 5;

/// Quiet period after the last keystroke before a lookup is issued.
pub const DEBOUNCE: Duration = Duration::from_millis(300);

/// One candidate location from a location lookup.
#[derive(Clone, Debug, PartialEq)]
pub struct Suggestion {
    pub name: String,
    pub region: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Suggestion {
    /// Identity within a batch.
    pub fn id(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    /// `"{name}, {region}, {country}"`, the text committed for this suggestion.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.name, self.region, self.country)
    }
}

/// Suggestions together with the query that produced them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SuggestionBatch {
    pub query: String,
    pub items: Vec<Suggestion>,
}

impl SuggestionBatch {
    /// Build a batch of at most [`MAX_SUGGESTIONS`] items with distinct ids.
    ///
    /// The first suggestion for a given position wins.
    pub fn new(query: impl Into<String>, items: Vec<Suggestion>) -> Self {
        let mut seen = Vec::with_capacity(MAX_SUGGESTIONS);
        let items: Vec<Suggestion> = items
            .into_iter()
            .filter(|s| {
                let id = s.id();
                if seen.contains(&id) {
                    false
                } else {
                    seen.push(id);
                    true
                }
            })
            .take(MAX_SUGGESTIONS)
            .collect();
        Self {
            query: query.into(),
            items,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Display labels in order.
    pub fn labels(&self) -> Vec<String> {
        self.items.iter().map(Suggestion::label).collect()
    }
}

/// Navigation keys the search reacts to. Everything else is text editing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchKey {
    Down,
    Up,
    Enter,
    Escape,
}

/// What the caller must do about the scheduled lookup after a text change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchCommand {
    /// Drop any scheduled lookup
    Cancel,
    /// Replace any scheduled lookup with one for `query` after [`DEBOUNCE`]
    Debounce { query: String },
}

/// Notifications for the owner of the search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchEvent {
    /// The user picked a suggestion or submitted the query
    Committed(String),
    /// The user asked for weather at their current position
    CurrentLocationRequested,
}

/// Result of a navigation key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not handled, fall through to text editing
    Ignored,
    /// Highlight moved
    Moved,
    /// Dropdown closed and input focus released
    Dismissed,
    /// A commit happened
    Event(SearchEvent),
}

#[derive(Clone, Debug, Default)]
pub struct LocationSearch {
    query: String,
    suggestions: SuggestionBatch,
    visible: bool,
    highlight: Option<usize>,
    pending: bool,
    latest_seq: u64,
}

impl LocationSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn suggestions(&self) -> &SuggestionBatch {
        &self.suggestions
    }

    /// Whether the dropdown is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    /// Whether a lookup is running whose answer will be applied.
    ///
    /// Edits, commits and dismissals give up on a running lookup, so this
    /// turns false before the request itself finishes.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Sequence number of the most recently issued lookup.
    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    /// Replace the query after an edit.
    ///
    /// Any scheduled lookup is dropped and a lookup in flight turns stale.
    /// Short queries also clear the suggestions; longer ones schedule a new
    /// lookup.
    pub fn set_text(&mut self, text: impl Into<String>) -> SearchCommand {
        self.query = text.into();
        self.settle();

        if self.query.chars().count() < MIN_QUERY_CHARS {
            self.clear_suggestions();
            return SearchCommand::Cancel;
        }

        SearchCommand::Debounce {
            query: self.query.clone(),
        }
    }

    /// The debounce timer fired for `text`.
    ///
    /// Returns the sequence number to tag the lookup with, or `None` when the
    /// query has changed since the timer was armed.
    pub fn begin_fetch(&mut self, text: &str) -> Option<u64> {
        if text != self.query || text.chars().count() < MIN_QUERY_CHARS {
            return None;
        }
        self.latest_seq += 1;
        self.pending = true;
        Some(self.latest_seq)
    }

    /// Apply the outcome of lookup `seq`.
    ///
    /// Returns `false` (and changes nothing) when a newer lookup has been
    /// issued since. Failures clear the suggestions; the error is not shown.
    pub fn apply_results(&mut self, seq: u64, result: Result<Vec<Suggestion>, String>) -> bool {
        if seq != self.latest_seq {
            tracing::debug!(seq, latest = self.latest_seq, "Dropping stale suggestions");
            return false;
        }

        self.pending = false;
        match result {
            Ok(items) => {
                self.suggestions = SuggestionBatch::new(self.query.clone(), items);
                self.visible = !self.suggestions.is_empty();
                self.highlight = None;
            }
            Err(error) => {
                tracing::debug!(seq, %error, "Suggestion lookup failed");
                self.clear_suggestions();
            }
        }
        true
    }

    /// Handle a navigation key.
    ///
    /// Down, Up and Enter act on the dropdown only while it is open with
    /// suggestions. Enter with a closed dropdown submits the raw query.
    /// Escape always closes the dropdown and gives up focus.
    pub fn handle_key(&mut self, key: SearchKey) -> KeyOutcome {
        let open = self.visible && !self.suggestions.is_empty();

        match key {
            SearchKey::Escape => {
                self.hide();
                self.settle();
                KeyOutcome::Dismissed
            }
            SearchKey::Down if open => {
                let last = self.suggestions.len() - 1;
                self.highlight = Some(self.highlight.map_or(0, |h| (h + 1).min(last)));
                KeyOutcome::Moved
            }
            SearchKey::Up if open => {
                self.highlight = self.highlight.and_then(|h| h.checked_sub(1));
                KeyOutcome::Moved
            }
            SearchKey::Enter => {
                let event = match self.highlight {
                    Some(index) if open => self.commit_suggestion(index),
                    _ => self.commit_raw(),
                };
                event.map_or(KeyOutcome::Ignored, KeyOutcome::Event)
            }
            SearchKey::Down | SearchKey::Up => KeyOutcome::Ignored,
        }
    }

    /// Commit suggestion `index` of the live batch.
    pub fn commit_suggestion(&mut self, index: usize) -> Option<SearchEvent> {
        let label = self.suggestions.items.get(index)?.label();
        self.query = label.clone();
        self.hide();
        self.settle();
        Some(SearchEvent::Committed(label))
    }

    /// Commit the trimmed query text. Blank queries commit nothing.
    pub fn commit_raw(&mut self) -> Option<SearchEvent> {
        let trimmed = self.query.trim();
        if trimmed.is_empty() {
            return None;
        }
        let text = trimmed.to_string();
        self.hide();
        self.settle();
        Some(SearchEvent::Committed(text))
    }

    /// A click landed outside the search bar and dropdown.
    pub fn blur(&mut self) {
        self.hide();
        self.settle();
    }

    /// Ask for the current position. Query and suggestions are untouched.
    pub fn request_current_location(&self) -> SearchEvent {
        SearchEvent::CurrentLocationRequested
    }

    fn hide(&mut self) {
        self.visible = false;
        self.highlight = None;
    }

    fn clear_suggestions(&mut self) {
        self.suggestions = SuggestionBatch::default();
        self.hide();
    }

    // A lookup still in flight answers for text that is no longer current,
    // or for a dropdown the user closed. Bumping the sequence turns it stale.
    fn settle(&mut self) {
        if self.pending {
            self.latest_seq += 1;
            self.pending = false;
        }
    }
}
