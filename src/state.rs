//! Screen state and its reducer
//!
//! Every change to a screen goes through `ScreenState::apply`. Actions that
//! require network work come back as an `Effect` for the caller to execute.

use crate::form::{FieldSpec, FormState};

/// Whether a request is in flight for the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
}

/// Transitions of a screen
#[derive(Debug, Clone, PartialEq)]
pub enum Action<E> {
    FetchStarted,
    Fetched(Vec<E>),
    FetchFailed(String),
    SubmitStarted,
    Created,
    CreateFailed(String),
    /// Submission refused before any request was made
    Rejected(String),
}

/// Network work requested by a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Fetch,
    Create(serde_json::Value),
}

#[derive(Debug, Clone)]
pub struct ScreenState<E> {
    pub form: FormState,
    /// Whatever the last successful GET returned, in server order
    pub items: Vec<E>,
    /// Last user-visible error, replaced by the next outcome
    pub error: Option<String>,
    in_flight: usize,
}

impl<E> ScreenState<E> {
    pub fn new(fields: &[FieldSpec]) -> Self {
        Self {
            form: FormState::new(fields),
            items: Vec::new(),
            error: None,
            in_flight: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.in_flight > 0 {
            Phase::Loading
        } else {
            Phase::Idle
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase() == Phase::Loading
    }

    fn settle(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    pub fn apply(&mut self, action: Action<E>) -> Option<Effect> {
        match action {
            Action::FetchStarted | Action::SubmitStarted => {
                self.in_flight += 1;
                None
            }
            Action::Fetched(items) => {
                self.settle();
                self.items = items;
                self.error = None;
                None
            }
            Action::FetchFailed(message) => {
                self.settle();
                self.error = Some(message);
                None
            }
            Action::Created => {
                self.settle();
                self.form.reset();
                self.error = None;
                Some(Effect::Fetch)
            }
            Action::CreateFailed(message) => {
                self.settle();
                self.error = Some(message);
                None
            }
            Action::Rejected(message) => {
                self.error = Some(message);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FieldKind;

    const FIELDS: &[FieldSpec] = &[FieldSpec::new("name", "Name", FieldKind::Text)];

    #[test]
    fn test_fetch_cycle_returns_to_idle() {
        let mut state: ScreenState<u32> = ScreenState::new(FIELDS);
        assert_eq!(state.phase(), Phase::Idle);

        state.apply(Action::FetchStarted);
        assert_eq!(state.phase(), Phase::Loading);

        state.apply(Action::Fetched(vec![3, 1, 2]));
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.items, vec![3, 1, 2]);
    }

    #[test]
    fn test_fetch_failure_keeps_previous_list() {
        let mut state: ScreenState<u32> = ScreenState::new(FIELDS);
        state.apply(Action::FetchStarted);
        state.apply(Action::Fetched(vec![7]));

        state.apply(Action::FetchStarted);
        state.apply(Action::FetchFailed("Failed to fetch orders".to_string()));
        assert_eq!(state.items, vec![7]);
        assert_eq!(state.error.as_deref(), Some("Failed to fetch orders"));
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn test_created_resets_form_and_requests_refresh() {
        let mut state: ScreenState<u32> = ScreenState::new(FIELDS);
        state.form.set("name", "ada");
        state.apply(Action::Rejected("stale".to_string()));

        state.apply(Action::SubmitStarted);
        let effect = state.apply(Action::Created);

        assert_eq!(effect, Some(Effect::Fetch));
        assert_eq!(state.form.value("name"), "");
        assert!(state.error.is_none());
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn test_errors_are_replaced_not_accumulated() {
        let mut state: ScreenState<u32> = ScreenState::new(FIELDS);
        state.apply(Action::Rejected("first".to_string()));
        state.apply(Action::SubmitStarted);
        state.apply(Action::CreateFailed("second".to_string()));
        assert_eq!(state.error.as_deref(), Some("second"));
    }

    #[test]
    fn test_overlapping_requests_stay_loading_until_all_settle() {
        let mut state: ScreenState<u32> = ScreenState::new(FIELDS);
        state.apply(Action::SubmitStarted);
        state.apply(Action::SubmitStarted);
        state.apply(Action::CreateFailed("boom".to_string()));
        assert!(state.is_loading());
        state.apply(Action::CreateFailed("boom".to_string()));
        assert!(!state.is_loading());
    }
}
