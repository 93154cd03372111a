use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::api::appointment::{Appointment, AppointmentFilter, Requester};
use crate::api::doctor::{Doctor, DoctorFilter, NewDoctor};
use crate::api::patient::{AdminCredentials, Credentials, NewPatient, Patient};
use crate::api::ApiResult;
use crate::client::service::ClinicApi;
use crate::ui::{BookingOverlay, Ui};

pub fn doctor(id: u64, name: &str) -> Doctor {
    Doctor {
        id: Some(id),
        name: name.to_string(),
        specialty: String::from("Cardiology"),
        email: format!("{}@clinic.com", name.to_lowercase().replace(' ', "")),
        password: None,
        mobile: String::from("5550100"),
        availability: vec![String::from("09:00-10:00"), String::from("10:00-11:00")],
    }
}

pub fn appointment(id: u64, patient: &str) -> Appointment {
    Appointment {
        id: Some(id),
        patient_id: Some(7),
        patient_name: Some(patient.to_string()),
        doctor_id: Some(1),
        doctor_name: Some(String::from("Dr. Ada")),
        appointment_time: Some(String::from("2024-05-01T09:00:00")),
        status: None,
    }
}

/// Holds a doctor filter with the given name until released.
#[derive(Default)]
pub struct Gate {
    pub entered: Notify,
    pub release: Notify,
}

/// In-memory backend: canned answers plus a record of every call.
pub struct FakeApi {
    pub doctors: Vec<Doctor>,
    /// Answers of `filter_doctors` keyed by the name filter, `doctors` otherwise.
    pub filtered: HashMap<String, Vec<Doctor>>,
    pub gates: HashMap<String, Arc<Gate>>,
    pub save_result: ApiResult,
    pub delete_result: ApiResult,
    pub login_result: ApiResult,
    pub signup_result: ApiResult,
    pub patient: Option<Patient>,
    pub appointments: Vec<Appointment>,

    pub calls: Mutex<HashMap<&'static str, usize>>,
    pub deleted: Mutex<Vec<u64>>,
    pub saved: Mutex<Vec<NewDoctor>>,
    pub filters: Mutex<Vec<DoctorFilter>>,
    pub tokens: Mutex<Vec<String>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            doctors: vec![doctor(1, "Dr. Ada"), doctor(2, "Dr. Bob")],
            filtered: HashMap::new(),
            gates: HashMap::new(),
            save_result: ApiResult::ok("Doctor added successfully"),
            delete_result: ApiResult::ok("Doctor deleted successfully"),
            login_result: ApiResult::with_token("Login successful", String::from("token-1")),
            signup_result: ApiResult::ok("Signup successful"),
            patient: Some(Patient {
                id: Some(7),
                name: String::from("Pat"),
                email: String::from("pat@example.com"),
                ..Default::default()
            }),
            appointments: vec![appointment(1, "Pat"), appointment(2, "Sam")],
            calls: Mutex::new(HashMap::new()),
            deleted: Mutex::new(Vec::new()),
            saved: Mutex::new(Vec::new()),
            filters: Mutex::new(Vec::new()),
            tokens: Mutex::new(Vec::new()),
        }
    }
}

impl FakeApi {
    pub fn calls(&self, name: &str) -> usize {
        self.calls.lock().unwrap().get(name).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }

    pub fn deleted(&self) -> Vec<u64> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn saved(&self) -> Vec<NewDoctor> {
        self.saved.lock().unwrap().clone()
    }

    pub fn filters(&self) -> Vec<DoctorFilter> {
        self.filters.lock().unwrap().clone()
    }

    pub fn tokens(&self) -> Vec<String> {
        self.tokens.lock().unwrap().clone()
    }

    fn record(&self, name: &'static str, token: Option<&str>) {
        *self.calls.lock().unwrap().entry(name).or_insert(0) += 1;
        if let Some(token) = token {
            self.tokens.lock().unwrap().push(token.to_string());
        }
    }
}

#[async_trait]
impl ClinicApi for FakeApi {
    async fn get_doctors(&self) -> Vec<Doctor> {
        self.record("get_doctors", None);
        self.doctors.clone()
    }

    async fn filter_doctors(&self, filter: &DoctorFilter) -> Vec<Doctor> {
        self.record("filter_doctors", None);
        self.filters.lock().unwrap().push(filter.clone());

        let name = filter.name.clone().unwrap_or_default();
        if let Some(gate) = self.gates.get(&name) {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        match self.filtered.get(&name) {
            Some(doctors) => doctors.clone(),
            None => self.doctors.clone(),
        }
    }

    async fn save_doctor(&self, doctor: &NewDoctor, token: &str) -> ApiResult {
        self.record("save_doctor", Some(token));
        self.saved.lock().unwrap().push(doctor.clone());
        self.save_result.clone()
    }

    async fn delete_doctor(&self, id: u64, token: &str) -> ApiResult {
        self.record("delete_doctor", Some(token));
        self.deleted.lock().unwrap().push(id);
        self.delete_result.clone()
    }

    async fn admin_login(&self, _creds: &AdminCredentials) -> ApiResult {
        self.record("admin_login", None);
        self.login_result.clone()
    }

    async fn doctor_login(&self, _creds: &Credentials) -> ApiResult {
        self.record("doctor_login", None);
        self.login_result.clone()
    }

    async fn patient_signup(&self, _patient: &NewPatient) -> ApiResult {
        self.record("patient_signup", None);
        self.signup_result.clone()
    }

    async fn patient_login(&self, _creds: &Credentials) -> ApiResult {
        self.record("patient_login", None);
        self.login_result.clone()
    }

    async fn get_patient_data(&self, token: &str) -> Option<Patient> {
        self.record("get_patient_data", Some(token));
        self.patient.clone()
    }

    async fn get_patient_appointments(
        &self,
        _patient_id: u64,
        _requester: Requester,
        token: &str,
    ) -> Vec<Appointment> {
        self.record("get_patient_appointments", Some(token));
        self.appointments.clone()
    }

    async fn filter_appointments(
        &self,
        filter: &AppointmentFilter,
        token: &str,
    ) -> Vec<Appointment> {
        self.record("filter_appointments", Some(token));
        match filter.name {
            Some(ref name) => self
                .appointments
                .iter()
                .filter(|a| a.patient_name.as_deref() == Some(name.as_str()))
                .cloned()
                .collect(),
            None => self.appointments.clone(),
        }
    }
}

/// Ui that records everything and answers every confirmation the same way.
#[derive(Default)]
pub struct RecordingUi {
    answer: bool,
    alerts: Mutex<Vec<String>>,
    confirms: Mutex<Vec<String>>,
    overlays: Mutex<Vec<BookingOverlay>>,
}

impl RecordingUi {
    pub fn confirming(answer: bool) -> Self {
        Self {
            answer,
            ..Default::default()
        }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn confirms(&self) -> Vec<String> {
        self.confirms.lock().unwrap().clone()
    }

    pub fn overlays(&self) -> Vec<BookingOverlay> {
        self.overlays.lock().unwrap().clone()
    }
}

impl Ui for RecordingUi {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.confirms.lock().unwrap().push(message.to_string());
        self.answer
    }

    fn show_booking(&self, overlay: &BookingOverlay) {
        self.overlays.lock().unwrap().push(overlay.clone());
    }
}
