use serde::Serialize;
use tracing::{error, info, warn};

use super::Loadable;
use crate::{
    api_client::ApiClient,
    config::SuggestionConfig,
    models::{BestSeatSuggestion, Screen, ScreenId, TheaterId},
    services::{
        refresh::{RefreshSequence, RefreshTicket},
        submission::{SubmissionState, SubmitOutcome, SuggestionForm},
    },
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BestSeatDisplay {
    Recommended {
        seat: String,
        notes: Option<String>,
    },
    NoneYet,
    /// The best seat request failed and the screen has nothing on record.
    Failed {
        message: String,
    },
}

impl BestSeatDisplay {
    pub fn text(&self) -> String {
        match self {
            BestSeatDisplay::Recommended { seat, .. } => format!("Best Seat - {}", seat),
            BestSeatDisplay::NoneYet => "No best seat recommendation yet".to_string(),
            BestSeatDisplay::Failed { message } => message.clone(),
        }
    }

    /// What the theater payload itself knows: the newest embedded
    /// suggestion, then the seat stored on the screen row.
    pub fn on_record(screen: &Screen) -> Self {
        if let Some(suggestion) = screen.latest_suggestion() {
            return BestSeatDisplay::from(suggestion);
        }
        match &screen.best_seat {
            Some(seat) => BestSeatDisplay::Recommended {
                seat: seat.clone(),
                notes: None,
            },
            None => BestSeatDisplay::NoneYet,
        }
    }
}

impl From<&BestSeatSuggestion> for BestSeatDisplay {
    fn from(suggestion: &BestSeatSuggestion) -> Self {
        BestSeatDisplay::Recommended {
            seat: suggestion.suggested_seat.clone(),
            notes: suggestion.user_notes.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenView {
    pub theater_id: TheaterId,
    pub screen_id: ScreenId,
    /// "{theater} - {screen}".
    pub heading: String,
    pub screen_type: Option<String>,
    pub best_seat: BestSeatDisplay,
    pub best_seat_text: String,
}

/// Full refetch of the parent theater plus the screen's current best seat.
pub async fn fetch_screen_view(
    client: &ApiClient,
    theater_id: &str,
    screen_id: &str,
) -> Loadable<ScreenView> {
    let theater = match client.get_theater_by_id(theater_id).await {
        Ok(Some(theater)) => theater,
        Ok(None) => return Loadable::NotFound("Theater not found".to_string()),
        Err(e) => {
            error!("Failed to load theater {}: {}", theater_id, e);
            return Loadable::Failed(e.user_message());
        }
    };
    let Some(screen) = theater.find_screen(screen_id) else {
        return Loadable::NotFound("Screen not found".to_string());
    };

    // Отсутствие рекомендации и сбой запроса показываются по-разному
    let best_seat = match client.get_best_seat(screen_id).await {
        Ok(Some(best)) => BestSeatDisplay::from(&best),
        Ok(None) => BestSeatDisplay::on_record(screen),
        Err(e) => {
            warn!("Best seat for screen {} unavailable: {}", screen_id, e);
            match BestSeatDisplay::on_record(screen) {
                BestSeatDisplay::NoneYet => BestSeatDisplay::Failed {
                    message: e.user_message(),
                },
                shown => shown,
            }
        }
    };

    Loadable::Ready(ScreenView {
        theater_id: theater.id.clone(),
        screen_id: screen.id.clone(),
        heading: format!("{} - {}", theater.name, screen.display_name()),
        screen_type: screen.screen_type.clone(),
        best_seat_text: best_seat.text(),
        best_seat,
    })
}

/// Serializable picture of the page for the renderer.
#[derive(Debug, Serialize)]
pub struct ScreenPageSnapshot<'a> {
    pub view: &'a Loadable<ScreenView>,
    pub submission: &'a SubmissionState,
}

/// Screen detail page: the displayed best seat plus the suggestion form.
#[derive(Debug)]
pub struct ScreenPage {
    city_slug: String,
    theater_id: TheaterId,
    screen_id: ScreenId,
    view: Loadable<ScreenView>,
    form: SuggestionForm,
    refresh: RefreshSequence,
}

impl ScreenPage {
    pub fn new(
        city_slug: impl Into<String>,
        theater_id: TheaterId,
        screen_id: ScreenId,
        limits: SuggestionConfig,
    ) -> Self {
        Self {
            city_slug: city_slug.into(),
            theater_id,
            screen_id,
            view: Loadable::Loading,
            form: SuggestionForm::new(limits),
            refresh: RefreshSequence::new(),
        }
    }

    /// Builds the page and performs the initial load.
    pub async fn load(
        client: &ApiClient,
        city_slug: impl Into<String>,
        theater_id: TheaterId,
        screen_id: ScreenId,
        limits: SuggestionConfig,
    ) -> Self {
        let mut page = Self::new(city_slug, theater_id, screen_id, limits);
        page.reload(client).await;
        page
    }

    pub fn city_slug(&self) -> &str {
        &self.city_slug
    }

    pub fn view(&self) -> &Loadable<ScreenView> {
        &self.view
    }

    pub fn form(&self) -> &SuggestionForm {
        &self.form
    }

    pub fn snapshot(&self) -> ScreenPageSnapshot<'_> {
        ScreenPageSnapshot {
            view: &self.view,
            submission: self.form.state(),
        }
    }

    pub fn toggle_form(&mut self) -> bool {
        self.form.toggle()
    }

    pub fn edit_seat(&mut self, seat: &str) -> bool {
        self.form.edit_seat(seat)
    }

    pub fn edit_notes(&mut self, notes: &str) -> bool {
        self.form.edit_notes(notes)
    }

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.refresh.issue()
    }

    /// Applies a refetch result if `ticket` is still the newest one. A failed
    /// refetch never replaces a page that already shows data.
    pub fn apply_refresh(&mut self, ticket: RefreshTicket, view: Loadable<ScreenView>) -> bool {
        if !self.refresh.accepts(ticket) {
            info!(
                "Discarding stale refresh #{} for screen {}",
                ticket.sequence(),
                self.screen_id
            );
            return false;
        }
        if matches!(view, Loadable::Failed(_)) && self.view.is_ready() {
            warn!("Refresh of screen {} failed, keeping current view", self.screen_id);
            return false;
        }
        self.view = view;
        true
    }

    pub async fn reload(&mut self, client: &ApiClient) -> bool {
        let ticket = self.begin_refresh();
        let view = fetch_screen_view(client, self.theater_id.as_str(), self.screen_id.as_str()).await;
        self.apply_refresh(ticket, view)
    }

    /// Validate → submit → refetch. The form stays open on any failure.
    pub async fn submit(&mut self, client: &ApiClient) -> SubmitOutcome {
        let pending = match self.form.begin_submit() {
            Ok(pending) => pending,
            Err(blocked) => return SubmitOutcome::Blocked(blocked),
        };

        let result = client
            .submit_suggestion(
                self.screen_id.as_str(),
                &pending.seat,
                pending.notes.as_deref(),
            )
            .await;

        let outcome = self.form.finish_submit(result);
        if matches!(outcome, SubmitOutcome::Accepted { .. }) {
            self.reload(client).await;
            self.form.finish_refresh();
        }
        outcome
    }

    /// The page left the screen; responses still in flight are dropped.
    pub fn unmount(&mut self) {
        self.refresh.unmount();
    }
}
