use async_trait::async_trait;
use log::{error, warn};

use crate::api::appointment::{Appointment, AppointmentFilter, Requester};
use crate::api::doctor::{Doctor, DoctorFilter, NewDoctor};
use crate::api::patient::{AdminCredentials, Credentials, NewPatient, Patient};
use crate::api::{ApiResult, MessageBody};

use super::{RequestError, RestfulClient};

/// The operations the pages need from the backend. Implementations never fail:
/// list reads degrade to an empty list, mutations report through
/// [`ApiResult`].
#[async_trait]
pub trait ClinicApi: Send + Sync {
    async fn get_doctors(&self) -> Vec<Doctor>;

    async fn filter_doctors(&self, filter: &DoctorFilter) -> Vec<Doctor>;

    async fn save_doctor(&self, doctor: &NewDoctor, token: &str) -> ApiResult;

    async fn delete_doctor(&self, id: u64, token: &str) -> ApiResult;

    async fn admin_login(&self, creds: &AdminCredentials) -> ApiResult;

    async fn doctor_login(&self, creds: &Credentials) -> ApiResult;

    async fn patient_signup(&self, patient: &NewPatient) -> ApiResult;

    async fn patient_login(&self, creds: &Credentials) -> ApiResult;

    async fn get_patient_data(&self, token: &str) -> Option<Patient>;

    async fn get_patient_appointments(
        &self,
        patient_id: u64,
        requester: Requester,
        token: &str,
    ) -> Vec<Appointment>;

    async fn filter_appointments(&self, filter: &AppointmentFilter, token: &str)
        -> Vec<Appointment>;
}

/// Fallback texts of one mutating operation.
struct Messages {
    done: &'static str,
    rejected: &'static str,
    broken: &'static str,
}

impl Messages {
    const SAVE_DOCTOR: Messages = Messages {
        done: "Doctor added successfully",
        rejected: "Failed to save doctor",
        broken: "Error occurred while saving doctor",
    };

    const DELETE_DOCTOR: Messages = Messages {
        done: "Doctor deleted successfully",
        rejected: "Failed to delete doctor",
        broken: "Error occurred while deleting doctor",
    };

    const SIGNUP: Messages = Messages {
        done: "Signup successful",
        rejected: "Signup failed",
        broken: "Network or server error occurred",
    };

    const LOGIN: Messages = Messages {
        done: "Login successful",
        rejected: "Invalid credentials",
        broken: "Network or server error occurred",
    };

    fn operation(&self, action: &str, result: Result<Option<String>, RequestError>) -> ApiResult {
        match result {
            Ok(message) => ApiResult::ok(message.unwrap_or_else(|| self.done.to_string())),
            Err(err) => {
                error!("Error {action}: {err}");
                ApiResult::failed(self.failure(&err))
            }
        }
    }

    fn login(&self, action: &str, result: Result<MessageBody, RequestError>) -> ApiResult {
        match result {
            Ok(body) => {
                let message = body.text().unwrap_or_else(|| self.done.to_string());
                match body.token {
                    Some(token) => ApiResult::with_token(message, token),
                    None => ApiResult::failed(self.rejected),
                }
            }
            Err(err) => {
                error!("Error {action}: {err}");
                ApiResult::failed(self.failure(&err))
            }
        }
    }

    fn failure(&self, err: &RequestError) -> String {
        match err {
            RequestError::Server { .. } | RequestError::MissingToken => err
                .server_message()
                .unwrap_or(self.rejected)
                .to_string(),
            _ => self.broken.to_string(),
        }
    }
}

fn list_or_empty<T>(action: &str, result: Result<Vec<T>, RequestError>) -> Vec<T> {
    match result {
        Ok(list) => list,
        Err(err) => {
            warn!("Failed to {action}: {err}");
            Vec::new()
        }
    }
}

#[async_trait]
impl ClinicApi for RestfulClient {
    async fn get_doctors(&self) -> Vec<Doctor> {
        list_or_empty("fetch doctors", self.list_doctors().await)
    }

    async fn filter_doctors(&self, filter: &DoctorFilter) -> Vec<Doctor> {
        list_or_empty("filter doctors", RestfulClient::filter_doctors(self, filter).await)
    }

    async fn save_doctor(&self, doctor: &NewDoctor, token: &str) -> ApiResult {
        let result = RestfulClient::save_doctor(self, doctor, token).await;
        Messages::SAVE_DOCTOR.operation("saving doctor", result)
    }

    async fn delete_doctor(&self, id: u64, token: &str) -> ApiResult {
        let result = RestfulClient::delete_doctor(self, id, token).await;
        Messages::DELETE_DOCTOR.operation("deleting doctor", result)
    }

    async fn admin_login(&self, creds: &AdminCredentials) -> ApiResult {
        let result = RestfulClient::admin_login(self, creds).await;
        Messages::LOGIN.login("during admin login", result)
    }

    async fn doctor_login(&self, creds: &Credentials) -> ApiResult {
        let result = RestfulClient::doctor_login(self, creds).await;
        Messages::LOGIN.login("during doctor login", result)
    }

    async fn patient_signup(&self, patient: &NewPatient) -> ApiResult {
        let result = RestfulClient::patient_signup(self, patient).await;
        Messages::SIGNUP.operation("during patient signup", result)
    }

    async fn patient_login(&self, creds: &Credentials) -> ApiResult {
        let result = RestfulClient::patient_login(self, creds).await;
        Messages::LOGIN.login("during patient login", result)
    }

    async fn get_patient_data(&self, token: &str) -> Option<Patient> {
        match self.patient_me(token).await {
            Ok(patient) => Some(patient),
            Err(err) => {
                warn!("Failed to fetch patient data: {err}");
                None
            }
        }
    }

    async fn get_patient_appointments(
        &self,
        patient_id: u64,
        requester: Requester,
        token: &str,
    ) -> Vec<Appointment> {
        let result = self.patient_appointments(patient_id, requester, token).await;
        list_or_empty("fetch patient appointments", result)
    }

    async fn filter_appointments(
        &self,
        filter: &AppointmentFilter,
        token: &str,
    ) -> Vec<Appointment> {
        let result = RestfulClient::filter_appointments(self, filter, token).await;
        list_or_empty("filter appointments", result)
    }
}
