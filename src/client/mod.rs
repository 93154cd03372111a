pub mod service;

use log::debug;
use reqwest::{Method, StatusCode, Url};
use serde::Serialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::api::appointment::{
    patient_appointments_path, Appointment, AppointmentFilter, Requester,
};
use crate::api::doctor::{Doctor, DoctorFilter, NewDoctor};
use crate::api::patient::{AdminCredentials, Credentials, NewPatient, Patient};
use crate::api::{self, extract_list, extract_object, MessageBody, QueryFields, RequestField};

#[derive(Error, Debug)]
pub enum RequestError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("client error: {0}")]
    Client(String),

    #[error("server error: status {status}, {message}")]
    Server { status: u16, message: String },

    #[error("server returned invalid json: {0:?}")]
    InvalidJson(String),

    #[error("server accepted the login but returned no token")]
    MissingToken,
}

impl RequestError {
    /// Message the server attached to a rejection, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            RequestError::Server { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, RequestError::Server { status, .. } if *status == StatusCode::UNAUTHORIZED)
    }
}

/// Raw reply of a request: status plus the decoded JSON body (`Null` when the
/// body is empty).
struct Reply {
    status: StatusCode,
    body: JsonValue,
}

/// Typed client of the clinic REST backend. Every call surfaces failures as
/// [`RequestError`]; see [`service::ClinicApi`] for the normalized variant
/// used by the pages.
#[derive(Debug, Clone)]
pub struct RestfulClient {
    url: String,
    client: reqwest::Client,
}

pub struct RestfulClientBuilder {
    url: String,
    accept_invalid_certs: bool,
}

impl RestfulClient {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn list_doctors(&self) -> Result<Vec<Doctor>, RequestError> {
        let body = self
            .request_data(Method::GET, api::DOCTOR_PATH, Vec::new(), None, None::<&()>)
            .await?;
        extract_list(body, "doctors").map_err(|e| RequestError::InvalidJson(e.to_string()))
    }

    pub async fn filter_doctors(&self, filter: &DoctorFilter) -> Result<Vec<Doctor>, RequestError> {
        let body = self
            .request_data(
                Method::GET,
                api::DOCTOR_FILTER_PATH,
                filter.fields(),
                None,
                None::<&()>,
            )
            .await?;
        extract_list(body, "doctors").map_err(|e| RequestError::InvalidJson(e.to_string()))
    }

    pub async fn save_doctor(
        &self,
        doctor: &NewDoctor,
        token: &str,
    ) -> Result<Option<String>, RequestError> {
        let body = self
            .request_data(
                Method::POST,
                api::DOCTOR_PATH,
                Vec::new(),
                Some(token),
                Some(doctor),
            )
            .await?;
        Ok(MessageBody::from_json(&body).text())
    }

    pub async fn delete_doctor(&self, id: u64, token: &str) -> Result<Option<String>, RequestError> {
        let path = format!("{}/{id}", api::DOCTOR_PATH);
        let body = self
            .request_data(Method::DELETE, &path, Vec::new(), Some(token), None::<&()>)
            .await?;
        Ok(MessageBody::from_json(&body).text())
    }

    pub async fn admin_login(&self, creds: &AdminCredentials) -> Result<MessageBody, RequestError> {
        self.login(api::ADMIN_LOGIN_PATH, creds).await
    }

    pub async fn doctor_login(&self, creds: &Credentials) -> Result<MessageBody, RequestError> {
        self.login(api::DOCTOR_LOGIN_PATH, creds).await
    }

    pub async fn patient_login(&self, creds: &Credentials) -> Result<MessageBody, RequestError> {
        self.login(api::PATIENT_LOGIN_PATH, creds).await
    }

    pub async fn patient_signup(&self, patient: &NewPatient) -> Result<Option<String>, RequestError> {
        let body = self
            .request_data(
                Method::POST,
                api::PATIENT_SIGNUP_PATH,
                Vec::new(),
                None,
                Some(patient),
            )
            .await?;
        Ok(MessageBody::from_json(&body).text())
    }

    pub async fn patient_me(&self, token: &str) -> Result<Patient, RequestError> {
        let body = self
            .request_data(
                Method::GET,
                api::PATIENT_ME_PATH,
                Vec::new(),
                Some(token),
                None::<&()>,
            )
            .await?;
        extract_object(body, "patient").map_err(|e| RequestError::InvalidJson(e.to_string()))
    }

    pub async fn patient_appointments(
        &self,
        patient_id: u64,
        requester: Requester,
        token: &str,
    ) -> Result<Vec<Appointment>, RequestError> {
        let path = patient_appointments_path(requester, patient_id);
        let body = self
            .request_data(Method::GET, &path, Vec::new(), Some(token), None::<&()>)
            .await?;
        extract_list(body, "appointments").map_err(|e| RequestError::InvalidJson(e.to_string()))
    }

    pub async fn filter_appointments(
        &self,
        filter: &AppointmentFilter,
        token: &str,
    ) -> Result<Vec<Appointment>, RequestError> {
        let body = self
            .request_data(
                Method::GET,
                api::APPOINTMENT_FILTER_PATH,
                filter.fields(),
                Some(token),
                None::<&()>,
            )
            .await?;
        extract_list(body, "appointments").map_err(|e| RequestError::InvalidJson(e.to_string()))
    }

    async fn login<B: Serialize>(&self, path: &str, creds: &B) -> Result<MessageBody, RequestError> {
        let body = self
            .request_data(Method::POST, path, Vec::new(), None, Some(creds))
            .await?;
        let body = MessageBody::from_json(&body);
        match body.token {
            Some(ref token) if !token.is_empty() => Ok(body),
            _ => Err(RequestError::MissingToken),
        }
    }

    /// Sends the request and rejects every non-2xx reply.
    async fn request_data<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        query: Vec<RequestField>,
        token: Option<&str>,
        body: Option<&B>,
    ) -> Result<JsonValue, RequestError> {
        let reply = self.do_request(method, path, query, token, body).await?;
        if !reply.status.is_success() {
            let message = MessageBody::from_json(&reply.body)
                .text()
                .unwrap_or_default();
            return Err(RequestError::Server {
                status: reply.status.as_u16(),
                message,
            });
        }
        Ok(reply.body)
    }

    async fn do_request<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        query: Vec<RequestField>,
        token: Option<&str>,
        body: Option<&B>,
    ) -> Result<Reply, RequestError> {
        let mut url = match Url::parse(&format!("{}{}", self.url, path)) {
            Ok(url) => url,
            Err(e) => return Err(RequestError::Client(format!("invalid request url: {e}"))),
        };
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for field in query {
                pairs.append_pair(field.name, &field.value);
            }
        }
        debug!("Request server: {method} {url}");

        let mut req = self
            .client
            .request(method, url)
            .header(api::HEADER_CONTENT_TYPE, api::MIME_JSON);
        if let Some(token) = token {
            req = req.header(api::HEADER_AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(body) = body {
            let json = match serde_json::to_string(body) {
                Ok(json) => json,
                Err(e) => return Err(RequestError::Client(format!("encode request body: {e}"))),
            };
            req = req.body(json);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        debug!("Server replied {status} with {} bytes", text.len());

        let body = if text.trim().is_empty() {
            JsonValue::Null
        } else {
            match serde_json::from_str(&text) {
                Ok(body) => body,
                // A failed request explains itself in plain text sometimes.
                Err(_) if !status.is_success() => serde_json::json!({ "message": text.trim() }),
                Err(_) => return Err(RequestError::InvalidJson(text)),
            }
        };

        Ok(Reply { status, body })
    }
}

impl RestfulClientBuilder {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            accept_invalid_certs: false,
        }
    }

    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn build(self) -> anyhow::Result<RestfulClient> {
        let parsed = match Url::parse(&self.url) {
            Ok(url) => url,
            Err(_) => anyhow::bail!("invalid server url '{}'", self.url),
        };

        match parsed.scheme() {
            "http" | "https" => {}
            _ => anyhow::bail!(
                "invalid url scheme, expect 'http' or 'https', not '{}'",
                parsed.scheme()
            ),
        }

        let client = if self.accept_invalid_certs && parsed.scheme() == "https" {
            reqwest::Client::builder()
                .danger_accept_invalid_certs(true)
                .build()?
        } else {
            reqwest::Client::new()
        };

        Ok(RestfulClient {
            url: self.url,
            client,
        })
    }
}
