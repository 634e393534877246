//! Hero search form and itinerary results.

use tracing::{info, warn};

use crate::api::{self, ItineraryDay, SearchParams, TravelBackend};

use super::{Notification, Rejection};

/// Field of the search form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    /// "Where do you want to go?"
    Destination,
    /// "What do you want to do?"
    Activity,
    /// "When do you want to go?"
    Date,
    /// "Budget"
    Budget,
}

/// Search widget phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchPhase {
    /// Form editable, no results open.
    #[default]
    Idle,
    /// Itinerary request in flight.
    Loading,
    /// Results display open.
    ResultsShown,
}

/// Search widget state.
///
/// The last successful itinerary is kept after the results display is
/// dismissed and is only replaced by the next successful fetch.
#[derive(Debug, Clone, Default)]
pub struct SearchWidget {
    params: SearchParams,
    phase: SearchPhase,
    itinerary: Vec<ItineraryDay>,
}

impl SearchWidget {
    /// Create an empty widget.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The query as currently entered.
    #[must_use]
    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// Whether an itinerary request is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == SearchPhase::Loading
    }

    /// Whether the results display is open.
    #[must_use]
    pub fn results_visible(&self) -> bool {
        self.phase == SearchPhase::ResultsShown
    }

    /// Most recent itinerary.
    #[must_use]
    pub fn itinerary(&self) -> &[ItineraryDay] {
        &self.itinerary
    }

    /// Update one form field. Blank values clear the field. Ignored while
    /// loading.
    pub fn set_field(&mut self, field: SearchField, value: &str) -> bool {
        if self.is_loading() {
            return false;
        }
        let value = Some(value.trim())
            .filter(|v| !v.is_empty())
            .map(ToOwned::to_owned);
        let slot = match field {
            SearchField::Destination => &mut self.params.destination,
            SearchField::Activity => &mut self.params.activity,
            SearchField::Date => &mut self.params.date,
            SearchField::Budget => &mut self.params.budget,
        };
        *slot = value;
        true
    }

    /// Submit the form.
    ///
    /// Returns the query to send and enters [`SearchPhase::Loading`]. Without
    /// a destination or activity the widget stays put and reports
    /// [`Rejection::MissingQuery`].
    pub fn submit(&mut self) -> Result<SearchParams, Rejection> {
        if self.is_loading() {
            return Err(Rejection::Busy);
        }
        if !self.params.has_subject() {
            return Err(Rejection::MissingQuery);
        }
        self.phase = SearchPhase::Loading;
        Ok(self.params.clone())
    }

    /// Apply the backend outcome of the outstanding request.
    pub fn resolve(&mut self, outcome: api::Result<Vec<ItineraryDay>>) -> Option<Notification> {
        if !self.is_loading() {
            return None;
        }
        match outcome {
            Ok(days) => {
                info!(name: "itinerary.generated", days = days.len(), "Itinerary ready");
                self.itinerary = days;
                self.phase = SearchPhase::ResultsShown;
                None
            }
            Err(e) => {
                warn!(name: "itinerary.failed", error = %e, "Itinerary request failed");
                self.phase = SearchPhase::Idle;
                Some(Notification::itinerary_unavailable())
            }
        }
    }

    /// Close the results display.
    pub fn dismiss(&mut self) -> bool {
        if self.results_visible() {
            self.phase = SearchPhase::Idle;
            true
        } else {
            false
        }
    }

    /// Submit, call the backend and apply the outcome.
    pub async fn plan(
        &mut self,
        backend: &dyn TravelBackend,
    ) -> Result<Option<Notification>, Rejection> {
        let params = self.submit()?;
        let outcome = backend.generate_itinerary(&params).await;
        Ok(self.resolve(outcome))
    }
}
