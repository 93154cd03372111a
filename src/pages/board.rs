use std::sync::{Arc, Mutex};

use log::{debug, info};

use crate::api::doctor::{Doctor, DoctorFilter};
use crate::card::{self, ActionOutcome, CardAction, DoctorCard};
use crate::client::service::ClinicApi;
use crate::session::Session;
use crate::ui::Ui;

use super::{Generation, Navigation, PageState};

pub const NO_DOCTORS: &str = "No doctors found.";
pub const NO_FILTERED_DOCTORS: &str = "No doctors found with the given filters.";

/// The doctor list both dashboards are built around. Cards are rendered for
/// the board's session, so the same list shows different actions per role.
pub struct DoctorBoard {
    api: Arc<dyn ClinicApi>,
    ui: Arc<dyn Ui>,
    session: Session,

    state: Mutex<PageState<DoctorCard>>,
    generation: Generation,
}

impl DoctorBoard {
    pub fn new(api: Arc<dyn ClinicApi>, ui: Arc<dyn Ui>, session: Session) -> Self {
        Self {
            api,
            ui,
            session,
            state: Mutex::new(PageState::Idle),
            generation: Generation::default(),
        }
    }

    pub fn api(&self) -> &dyn ClinicApi {
        self.api.as_ref()
    }

    pub fn ui(&self) -> &dyn Ui {
        self.ui.as_ref()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> PageState<DoctorCard> {
        self.state.lock().unwrap().clone()
    }

    pub fn cards(&self) -> Vec<DoctorCard> {
        self.state.lock().unwrap().items().to_vec()
    }

    pub fn card(&self, doctor_id: u64) -> Option<DoctorCard> {
        self.state
            .lock()
            .unwrap()
            .items()
            .iter()
            .find(|card| card.doctor_id() == Some(doctor_id))
            .cloned()
    }

    /// Fetches every doctor. Returns false when a newer cycle superseded this
    /// one and the result was dropped.
    pub async fn load(&self) -> bool {
        let generation = self.begin();
        let doctors = self.api.get_doctors().await;
        self.finish(generation, doctors, NO_DOCTORS)
    }

    /// Blank fields are left out of the query, so an all-blank filter lists
    /// every doctor.
    pub async fn filter(&self, name: &str, time: &str, specialty: &str) -> bool {
        let filter = DoctorFilter::new(name, time, specialty);
        let generation = self.begin();
        let doctors = self.api.filter_doctors(&filter).await;
        self.finish(generation, doctors, NO_FILTERED_DOCTORS)
    }

    /// Drops one card, the rest of the board stays as it is.
    pub fn remove_card(&self, doctor_id: u64) {
        let mut state = self.state.lock().unwrap();
        if let PageState::Loaded(cards) = &mut *state {
            cards.retain(|card| card.doctor_id() != Some(doctor_id));
            if cards.is_empty() {
                *state = PageState::Empty(String::from(NO_DOCTORS));
            }
        }
    }

    /// Clicks `action` on the card of `doctor_id` and applies the outcome to
    /// the board.
    pub async fn activate(&self, doctor_id: u64, action: CardAction) -> Navigation {
        let card = match self.card(doctor_id) {
            Some(card) => card,
            None => {
                self.ui.alert(&format!("Doctor {doctor_id} is not on the list."));
                return Navigation::Stay;
            }
        };

        let outcome = card
            .activate(action, &self.session, self.api.as_ref(), self.ui.as_ref())
            .await;
        match outcome {
            ActionOutcome::Removed => {
                self.remove_card(doctor_id);
                Navigation::Stay
            }
            ActionOutcome::Redirect(page) => Navigation::Redirect(page),
            ActionOutcome::Unchanged | ActionOutcome::BookingShown => Navigation::Stay,
        }
    }

    fn begin(&self) -> u64 {
        let mut state = self.state.lock().unwrap();
        *state = PageState::Loading;
        self.generation.next()
    }

    fn finish(&self, generation: u64, doctors: Vec<Doctor>, empty_message: &str) -> bool {
        let mut state = self.state.lock().unwrap();
        if !self.generation.is_current(generation) {
            debug!("Drop doctors of superseded cycle {generation}");
            return false;
        }

        let cards: Vec<_> = doctors
            .iter()
            .map(|doctor| card::render(doctor, &self.session))
            .collect();
        info!("Show {} doctor(s)", cards.len());
        *state = PageState::from_items(cards, empty_message);
        true
    }
}
