use std::sync::{Arc, Mutex};

use log::debug;

use crate::api::appointment::{Appointment, AppointmentFilter, Requester};
use crate::card::SESSION_EXPIRED;
use crate::client::service::ClinicApi;
use crate::session::Session;

use super::{Generation, PageState};

pub const NO_APPOINTMENTS: &str = "No appointments found.";
pub const NO_FILTERED_APPOINTMENTS: &str = "No appointments found with the given filters.";

/// Appointment list of a patient, readable by the patient or a doctor.
pub struct AppointmentsPage {
    api: Arc<dyn ClinicApi>,
    session: Session,

    state: Mutex<PageState<Appointment>>,
    generation: Generation,
}

impl AppointmentsPage {
    pub fn new(api: Arc<dyn ClinicApi>, session: Session) -> Self {
        Self {
            api,
            session,
            state: Mutex::new(PageState::Idle),
            generation: Generation::default(),
        }
    }

    pub fn state(&self) -> PageState<Appointment> {
        self.state.lock().unwrap().clone()
    }

    pub fn appointments(&self) -> Vec<Appointment> {
        self.state.lock().unwrap().items().to_vec()
    }

    pub async fn load(&self, patient_id: u64, requester: Requester) -> bool {
        let token = match self.session.token() {
            Some(token) => token,
            None => return self.expired(),
        };

        let generation = self.begin();
        let appointments = self
            .api
            .get_patient_appointments(patient_id, requester, token)
            .await;
        self.finish(generation, appointments, NO_APPOINTMENTS)
    }

    pub async fn filter(&self, condition: &str, name: &str) -> bool {
        let token = match self.session.token() {
            Some(token) => token,
            None => return self.expired(),
        };

        let filter = AppointmentFilter::new(condition, name);
        let generation = self.begin();
        let appointments = self.api.filter_appointments(&filter, token).await;
        self.finish(generation, appointments, NO_FILTERED_APPOINTMENTS)
    }

    fn expired(&self) -> bool {
        self.generation.next();
        *self.state.lock().unwrap() = PageState::Error(String::from(SESSION_EXPIRED));
        false
    }

    fn begin(&self) -> u64 {
        let mut state = self.state.lock().unwrap();
        *state = PageState::Loading;
        self.generation.next()
    }

    fn finish(&self, generation: u64, appointments: Vec<Appointment>, empty_message: &str) -> bool {
        let mut state = self.state.lock().unwrap();
        if !self.generation.is_current(generation) {
            debug!("Drop appointments of superseded cycle {generation}");
            return false;
        }
        *state = PageState::from_items(appointments, empty_message);
        true
    }
}
