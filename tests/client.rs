use std::sync::{Arc, Mutex};

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use clinicdesk::api::appointment::{AppointmentFilter, Requester};
use clinicdesk::api::doctor::{DoctorFilter, NewDoctor};
use clinicdesk::api::patient::{AdminCredentials, Credentials, NewPatient};
use clinicdesk::card::CardAction;
use clinicdesk::client::service::ClinicApi;
use clinicdesk::client::RestfulClientBuilder;
use clinicdesk::pages::board::DoctorBoard;
use clinicdesk::session::{Role, Session};
use clinicdesk::ui::{BookingOverlay, Ui};
use serde_json::{json, Value};

const TOKEN: &str = "good-token";

fn bearer(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(json!({ "error": "Invalid or unauthorized token." }))
}

async fn list_doctors() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "doctors": [
            {
                "id": 1,
                "name": "Dr. Ada",
                "specialty": "Cardiology",
                "email": "ada@clinic.com",
                "phone": "5550100",
                "availableTimes": ["09:00-10:00", "10:00-11:00"]
            },
            { "id": 2, "name": "Dr. Bob", "specialty": "Dermatology" }
        ]
    }))
}

/// Echoes the raw query string as the doctor name.
async fn filter_doctors(req: HttpRequest) -> HttpResponse {
    HttpResponse::Ok().json(json!([{ "id": 1, "name": req.query_string() }]))
}

async fn save_doctor(req: HttpRequest, body: web::Json<Value>) -> HttpResponse {
    if bearer(&req) != Some(TOKEN) {
        return unauthorized();
    }
    if body["email"] == "taken@clinic.com" {
        return HttpResponse::Conflict().json(json!({ "message": "Doctor already exists" }));
    }
    HttpResponse::Created().json(json!({ "message": "Doctor added to db" }))
}

async fn delete_doctor(req: HttpRequest, id: web::Path<u64>) -> HttpResponse {
    if bearer(&req) != Some(TOKEN) {
        return unauthorized();
    }
    match id.into_inner() {
        1 => HttpResponse::Ok().json(json!({ "message": "Doctor deleted successfully" })),
        99 => HttpResponse::InternalServerError().finish(),
        _ => HttpResponse::NotFound().json(json!({ "message": "Doctor not found with id" })),
    }
}

async fn admin_login(body: web::Json<Value>) -> HttpResponse {
    if body["username"] == "admin" && body["password"] == "secret" {
        HttpResponse::Ok().json(json!({ "token": "admin-token" }))
    } else {
        HttpResponse::Unauthorized().json(json!({ "error": "Invalid credentials" }))
    }
}

/// Accepts every doctor but forgets the token.
async fn doctor_login() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "message": "Welcome" }))
}

async fn patient_login(body: web::Json<Value>) -> HttpResponse {
    if body["password"] == "pw" {
        HttpResponse::Ok().json(json!({ "message": "Welcome back", "token": "patient-token" }))
    } else {
        HttpResponse::Unauthorized().json(json!({ "error": "Invalid password" }))
    }
}

async fn patient_signup(body: web::Json<Value>) -> HttpResponse {
    if body["email"] == "taken@example.com" {
        return HttpResponse::Conflict()
            .json(json!({ "error": "Patient with email id or phone no already exist" }));
    }
    HttpResponse::Created().json(json!({ "message": "Signup successful" }))
}

async fn patient_me(req: HttpRequest) -> HttpResponse {
    if bearer(&req) != Some(TOKEN) {
        return unauthorized();
    }
    HttpResponse::Ok().json(json!({
        "patient": { "id": 7, "name": "Pat", "email": "pat@example.com", "phone": "5550000000" }
    }))
}

async fn patient_appointments(req: HttpRequest, path: web::Path<(String, u64)>) -> HttpResponse {
    if bearer(&req) != Some(TOKEN) {
        return unauthorized();
    }
    let (role, id) = path.into_inner();
    HttpResponse::Ok().json(json!({
        "appointments": [
            { "id": 1, "patientId": id, "patientName": role, "appointmentTime": "2024-05-01T09:00:00", "status": 0 }
        ]
    }))
}

async fn filter_appointments(req: HttpRequest) -> HttpResponse {
    if bearer(&req) != Some(TOKEN) {
        return unauthorized();
    }
    HttpResponse::Ok().json(json!([{ "id": 2, "patientName": req.query_string(), "status": 1 }]))
}

async fn start_backend() -> String {
    let server = HttpServer::new(|| {
        App::new()
            .route("/doctor", web::get().to(list_doctors))
            .route("/doctor", web::post().to(save_doctor))
            .route("/doctor/filter", web::get().to(filter_doctors))
            .route("/doctor/login", web::post().to(doctor_login))
            .route("/doctor/{id}", web::delete().to(delete_doctor))
            .route("/admin", web::post().to(admin_login))
            .route("/patient/login", web::post().to(patient_login))
            .route("/patient/signup", web::post().to(patient_signup))
            .route("/patient/me", web::get().to(patient_me))
            .route(
                "/patient/appointments/filter",
                web::get().to(filter_appointments),
            )
            .route(
                "/patient/{role}/{id}/appointments",
                web::get().to(patient_appointments),
            )
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    format!("http://{addr}")
}

/// Every request fails with an empty 500.
async fn start_broken_backend() -> String {
    let server = HttpServer::new(|| {
        App::new().default_service(web::to(|| async { HttpResponse::InternalServerError().finish() }))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    format!("http://{addr}")
}

/// Answers like a backend that writes unset fields as `null`.
async fn start_null_backend() -> String {
    let server = HttpServer::new(|| {
        App::new()
            .route(
                "/doctor",
                web::get().to(|| async {
                    HttpResponse::Ok().json(json!([
                        { "id": 1, "name": "Dr. Ada", "specialty": "Cardiology", "availableTimes": ["09:00-10:00"] },
                        {
                            "id": 2,
                            "name": "Dr. Bob",
                            "specialty": null,
                            "email": null,
                            "phone": null,
                            "availableTimes": null
                        }
                    ]))
                }),
            )
            .route(
                "/patient/me",
                web::get().to(|| async {
                    HttpResponse::Ok().json(json!({
                        "patient": { "id": 7, "name": "Pat", "email": null, "phone": null, "address": null }
                    }))
                }),
            )
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    format!("http://{addr}")
}

/// Goes through the normalized trait, the inherent methods of the client
/// return raw results.
fn connect(url: &str) -> Arc<dyn ClinicApi> {
    Arc::new(RestfulClientBuilder::new(url).build().unwrap())
}

fn new_doctor(email: &str) -> NewDoctor {
    NewDoctor {
        name: String::from("Dr. Cy"),
        specialty: String::from("Neurology"),
        email: email.to_string(),
        password: String::from("secret"),
        mobile: String::from("5550199"),
        availability: vec![String::from("09:00-10:00")],
    }
}

fn new_patient(email: &str) -> NewPatient {
    NewPatient {
        name: String::from("Pat"),
        email: email.to_string(),
        password: String::from("pw"),
        phone: String::from("5550000000"),
        address: String::from("1 Main St"),
    }
}

#[actix_web::test]
async fn test_list_doctors() {
    let api = connect(&start_backend().await);

    let doctors = api.get_doctors().await;
    assert_eq!(doctors.len(), 2);
    assert_eq!(doctors[0].mobile, "5550100");
    assert_eq!(doctors[0].availability, vec!["09:00-10:00", "10:00-11:00"]);
    assert_eq!(doctors[1].email, "");
    assert!(doctors[1].availability.is_empty());
}

#[actix_web::test]
async fn test_null_fields() {
    let api = connect(&start_null_backend().await);

    let doctors = api.get_doctors().await;
    assert_eq!(doctors.len(), 2);
    assert_eq!(doctors[1].name, "Dr. Bob");
    assert_eq!(doctors[1].email, "");
    assert!(doctors[1].availability.is_empty());

    let board = DoctorBoard::new(api.clone(), Arc::new(AlertLog::default()), Session::default());
    board.load().await;
    let cards = board.cards();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[1].email(), "Not Provided");
    assert_eq!(cards[1].availability(), "N/A");

    let patient = api.get_patient_data(TOKEN).await.unwrap();
    assert_eq!(patient.id, Some(7));
    assert_eq!(patient.address, "");
}

#[actix_web::test]
async fn test_filter_query() {
    let api = connect(&start_backend().await);

    let doctors = api.filter_doctors(&DoctorFilter::new("", "", "")).await;
    assert_eq!(doctors[0].name, "");

    let doctors = api
        .filter_doctors(&DoctorFilter::new("A", "", "Cardiology"))
        .await;
    assert_eq!(doctors[0].name, "name=A&specialty=Cardiology");

    let doctors = api
        .filter_doctors(&DoctorFilter::new(" Ada ", "AM", ""))
        .await;
    assert_eq!(doctors[0].name, "name=Ada&time=AM");
}

#[actix_web::test]
async fn test_unreachable_backend() {
    let api = connect("http://127.0.0.1:1");

    assert!(api.get_doctors().await.is_empty());
    assert!(api.filter_doctors(&DoctorFilter::default()).await.is_empty());
    assert!(api.get_patient_data(TOKEN).await.is_none());

    let result = api.save_doctor(&new_doctor("cy@clinic.com"), TOKEN).await;
    assert!(!result.success);
    assert_eq!(result.message, "Error occurred while saving doctor");

    let result = api.patient_login(&Credentials::new("pat@example.com", "pw")).await;
    assert!(!result.success);
    assert_eq!(result.message, "Network or server error occurred");
    assert_eq!(result.token, None);
}

#[actix_web::test]
async fn test_broken_backend() {
    let api = connect(&start_broken_backend().await);

    assert!(api.get_doctors().await.is_empty());
    assert!(api
        .get_patient_appointments(7, Requester::Patient, TOKEN)
        .await
        .is_empty());
    assert!(api
        .filter_appointments(&AppointmentFilter::default(), TOKEN)
        .await
        .is_empty());

    let result = api.delete_doctor(1, TOKEN).await;
    assert!(!result.success);
    assert_eq!(result.message, "Failed to delete doctor");

    let result = api.patient_signup(&new_patient("pat@example.com")).await;
    assert!(!result.success);
    assert_eq!(result.message, "Signup failed");

    let result = api
        .admin_login(&AdminCredentials::new("admin", "secret"))
        .await;
    assert!(!result.success);
    assert_eq!(result.message, "Invalid credentials");
}

#[actix_web::test]
async fn test_save_doctor() {
    let api = connect(&start_backend().await);

    let result = api.save_doctor(&new_doctor("cy@clinic.com"), TOKEN).await;
    assert!(result.success);
    assert_eq!(result.message, "Doctor added to db");

    let result = api.save_doctor(&new_doctor("cy@clinic.com"), "stale").await;
    assert!(!result.success);
    assert_eq!(result.message, "Invalid or unauthorized token.");

    let result = api.save_doctor(&new_doctor("taken@clinic.com"), TOKEN).await;
    assert!(!result.success);
    assert_eq!(result.message, "Doctor already exists");
}

#[actix_web::test]
async fn test_delete_doctor() {
    let api = connect(&start_backend().await);

    let result = api.delete_doctor(1, TOKEN).await;
    assert!(result.success);
    assert_eq!(result.message, "Doctor deleted successfully");

    let result = api.delete_doctor(5, TOKEN).await;
    assert!(!result.success);
    assert_eq!(result.message, "Doctor not found with id");

    let result = api.delete_doctor(99, TOKEN).await;
    assert!(!result.success);
    assert_eq!(result.message, "Failed to delete doctor");
}

#[actix_web::test]
async fn test_logins() {
    let api = connect(&start_backend().await);

    let result = api
        .admin_login(&AdminCredentials::new("admin", "secret"))
        .await;
    assert!(result.success);
    assert_eq!(result.message, "Login successful");
    assert_eq!(result.token.as_deref(), Some("admin-token"));

    let result = api
        .admin_login(&AdminCredentials::new("admin", "wrong"))
        .await;
    assert!(!result.success);
    assert_eq!(result.message, "Invalid credentials");

    // A 2xx without a token is still a failed login.
    let result = api
        .doctor_login(&Credentials::new("doc@clinic.com", "pw"))
        .await;
    assert!(!result.success);
    assert_eq!(result.token, None);

    let result = api
        .patient_login(&Credentials::new("pat@example.com", "pw"))
        .await;
    assert!(result.success);
    assert_eq!(result.message, "Welcome back");
    assert_eq!(result.token.as_deref(), Some("patient-token"));

    let result = api
        .patient_login(&Credentials::new("pat@example.com", "nope"))
        .await;
    assert!(!result.success);
    assert_eq!(result.message, "Invalid password");
}

#[actix_web::test]
async fn test_patient_signup() {
    let api = connect(&start_backend().await);

    let result = api.patient_signup(&new_patient("pat@example.com")).await;
    assert!(result.success);
    assert_eq!(result.message, "Signup successful");

    let result = api.patient_signup(&new_patient("taken@example.com")).await;
    assert!(!result.success);
    assert_eq!(
        result.message,
        "Patient with email id or phone no already exist"
    );
}

#[actix_web::test]
async fn test_patient_data() {
    let api = connect(&start_backend().await);

    let patient = api.get_patient_data(TOKEN).await.unwrap();
    assert_eq!(patient.id, Some(7));
    assert_eq!(patient.name, "Pat");
    assert_eq!(patient.address, "");

    assert!(api.get_patient_data("stale").await.is_none());
}

#[actix_web::test]
async fn test_appointments() {
    let api = connect(&start_backend().await);

    let appointments = api
        .get_patient_appointments(7, Requester::Doctor, TOKEN)
        .await;
    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0].patient_id, Some(7));
    assert_eq!(appointments[0].patient_name.as_deref(), Some("doctor"));
    assert_eq!(appointments[0].display_status(), "pending");
    assert_eq!(appointments[0].display_time(), "2024-05-01 09:00");

    let appointments = api
        .filter_appointments(&AppointmentFilter::new("future", "Sam"), TOKEN)
        .await;
    assert_eq!(
        appointments[0].patient_name.as_deref(),
        Some("condition=future&name=Sam")
    );
    assert_eq!(appointments[0].display_status(), "consulted");

    assert!(api
        .filter_appointments(&AppointmentFilter::default(), "stale")
        .await
        .is_empty());
}

#[derive(Default)]
struct AlertLog {
    alerts: Mutex<Vec<String>>,
}

impl Ui for AlertLog {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }

    fn confirm(&self, _message: &str) -> bool {
        true
    }

    fn show_booking(&self, _overlay: &BookingOverlay) {}
}

#[actix_web::test]
async fn test_board_over_http() {
    let api = connect(&start_backend().await);
    let ui = Arc::new(AlertLog::default());
    let session = Session::logged_in(String::from(TOKEN), Role::Admin);
    let board = DoctorBoard::new(api, ui.clone(), session);

    board.load().await;
    assert_eq!(board.cards().len(), 2);

    board.activate(1, CardAction::Delete).await;
    let cards = board.cards();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].name(), "Dr. Bob");
    assert_eq!(
        *ui.alerts.lock().unwrap(),
        vec!["Doctor Dr. Ada deleted successfully."]
    );
}
