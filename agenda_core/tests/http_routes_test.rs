use agenda_core::{create_app, AppState, Appointment, AppointmentStore, MemoryStore};
use agenda_core::config::ScheduleConfig;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use std::sync::Arc;
use tower::ServiceExt;

fn setup() -> (Router, MemoryStore) {
    let store = MemoryStore::new();
    let state = AppState::with_store(Arc::new(store.clone()), ScheduleConfig::default());
    (create_app(state), store)
}

fn booked(id: u64, datetime: &str) -> Appointment {
    Appointment {
        id,
        name: format!("Paciente {}", id),
        email: format!("p{}@example.com", id),
        datetime: datetime.to_string(),
        reason: "Consulta".to_string(),
    }
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_create_screen_lists_free_hours() {
    let (app, store) = setup();
    store.append(booked(1, "2024-05-01 09:00")).await.unwrap();

    let response = app.oneshot(get("/?screen=create&date=2024-05-01")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_string(response).await;
    assert!(!html.contains("<option value=\"09:00\">"));
    assert!(html.contains("<option value=\"10:00\">"));
    assert!(html.contains("<option value=\"17:00\">"));
}

#[tokio::test]
async fn test_default_screen_is_create() {
    let (app, _) = setup();
    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_string(response).await;
    assert!(html.contains("<strong>Book appointment</strong>"));
}

#[tokio::test]
async fn test_form_booking_appends() {
    let (app, store) = setup();

    let response = app
        .oneshot(form_post(
            "/appointments",
            "name=Ana+P%C3%A9rez&email=ana%40example.com&date=2024-05-01&time=10%3A00&reason=Revisi%C3%B3n",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Appointment booked for 2024-05-01 10:00"));

    let all = store.list_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Ana Pérez");
    assert_eq!(all[0].reason, "Revisión");
}

#[tokio::test]
async fn test_form_with_empty_field_is_rejected() {
    let (app, store) = setup();

    let response = app
        .oneshot(form_post(
            "/appointments",
            "name=Ana&email=&date=2024-05-01&time=10%3A00&reason=Consulta",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_string(response).await.contains("email: This field is required"));
    assert!(store.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_form_booking_keeps_multi_line_reason() {
    let (app, store) = setup();

    let response = app
        .oneshot(form_post(
            "/appointments",
            "name=Ana&email=ana%40example.com&date=2024-05-01&time=11%3A00&reason=Dolor+de+cabeza%0D%0Adesde+ayer",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let all = store.list_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].reason, "Dolor de cabeza\r\ndesde ayer");
}

#[tokio::test]
async fn test_cancel_with_bad_index_renders_screen() {
    let (app, store) = setup();
    store.append(booked(1, "2024-05-01 09:00")).await.unwrap();

    for body in ["index=abc", ""] {
        let response = app.clone().oneshot(form_post("/appointments/cancel", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let html = body_string(response).await;
        assert!(html.contains("<strong>Cancel appointment</strong>"));
        assert!(html.contains("<p class=\"error\">Invalid cancel selection"));
    }
    assert_eq!(store.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_and_cancel_screens() {
    let (app, store) = setup();
    store.append(booked(1, "2024-05-01 09:00")).await.unwrap();
    store.append(booked(2, "2024-05-01 10:00")).await.unwrap();
    store.append(booked(3, "2024-05-01 11:00")).await.unwrap();

    let html = body_string(app.clone().oneshot(get("/?screen=list")).await.unwrap()).await;
    assert!(html.contains("Paciente 2"));

    let response = app
        .clone()
        .oneshot(form_post("/appointments/cancel", "index=1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Appointment 2 on 2024-05-01 10:00 cancelled"));

    let ids: Vec<u64> = store.list_all().await.unwrap().iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![1, 3]);

    let response = app.oneshot(form_post("/appointments/cancel", "index=9")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_json_api_round() {
    let (app, _) = setup();

    let request = Request::builder()
        .method("POST")
        .uri("/api/appointments")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::json!({
                "name": "Luis",
                "email": "luis@example.com",
                "date": "2024-06-03",
                "time": "15:00",
                "reason": "Control"
            })
            .to_string(),
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(created["data"]["id"], 1);
    assert_eq!(created["data"]["datetime"], "2024-06-03 15:00");

    let response = app.clone().oneshot(get("/api/availability?date=2024-06-03")).await.unwrap();
    let availability: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    let hours = availability["data"]["hours"].as_array().unwrap();
    assert_eq!(hours.len(), 8);
    assert!(!hours.contains(&serde_json::json!("15:00")));

    let response = app.clone().oneshot(get("/api/appointments")).await.unwrap();
    let listed: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(listed["data"]["count"], 1);

    let request = Request::builder()
        .method("DELETE")
        .uri("/api/appointments/0")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/api/appointments")).await.unwrap();
    let listed: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(listed["data"]["count"], 0);
}

#[tokio::test]
async fn test_api_double_booking_conflict() {
    let (app, store) = setup();
    store.append(booked(1, "2024-06-03 15:00")).await.unwrap();

    let request = Request::builder()
        .method("POST")
        .uri("/api/appointments")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            r#"{"name":"Luis","email":"luis@example.com","date":"2024-06-03","time":"15:00","reason":"Control"}"#,
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(store.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_bad_availability_date() {
    let (app, _) = setup();
    let response = app.oneshot(get("/api/availability?date=tomorrow")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_reports_backend() {
    let (app, _) = setup();
    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let health: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(health["data"]["storage"], "memory");
    assert_eq!(health["data"]["store_stats"]["total_appointments"], 0);
}

#[tokio::test]
async fn test_liveness_and_stats() {
    let (app, store) = setup();
    store.append(booked(1, "2024-06-03 09:00")).await.unwrap();

    let response = app.clone().oneshot(get("/live")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/api/stats")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let stats: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(stats["data"]["total_appointments"], 1);
    assert_eq!(stats["data"]["source"], "memory");
}
