//! Drives `HttpTravelApi` against stub backends on loopback.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use artemis::api::http::HttpTravelApi;
use artemis::api::TravelApi;
use artemis::chat::{fetch_itinerary, ChatSession, QuickAction, ITINERARY_FAILURE};
use artemis::config::ApiConfig;
use artemis::errors::ApiError;
use artemis::models::{AlertRequest, BucketListItem, Coordinates, PictureUpload, ProfileUpdate};

type Captured = Arc<Mutex<Vec<Value>>>;

/// Serves `router` on an ephemeral port and returns its base URL.
async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub backend");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn client(base: &str) -> HttpTravelApi {
    let config = ApiConfig {
        assistant_url: base.to_string(),
        travel_url: base.to_string(),
        timeout: Duration::from_secs(2),
        ..ApiConfig::default()
    };
    HttpTravelApi::new(config).unwrap()
}

fn profile_json(bucket: Value) -> Value {
    json!({
        "id": "user123",
        "profilePicture": null,
        "name": "Test User",
        "bio": "This is a test user.",
        "age": 25,
        "height": "5'8\"",
        "weight": "150lbs",
        "trips": 5,
        "countries": 3,
        "bucketList": bucket,
    })
}

// ── Assistant service ─────────────────────────────────────────────────────────

#[tokio::test]
async fn chat_posts_query_and_reads_response_field() {
    let captured: Captured = Arc::default();
    let router = Router::new()
        .route(
            "/chatbot",
            post(|State(c): State<Captured>, Json(body): Json<Value>| async move {
                let query = body["query"].as_str().unwrap_or_default().to_string();
                c.lock().unwrap().push(body);
                Json(json!({ "response": format!("You asked about {query}") }))
            }),
        )
        .with_state(captured.clone());
    let api = client(&spawn(router).await);

    let mut session = ChatSession::new();
    session.press(&api, QuickAction::LocalNews).await;

    assert_eq!(session.messages().last().unwrap().text, "You asked about Local News");
    assert_eq!(captured.lock().unwrap().as_slice(), [json!({ "query": "Local News" })]);
}

#[tokio::test]
async fn itinerary_sends_start_end_and_stops() {
    let captured: Captured = Arc::default();
    let router = Router::new()
        .route(
            "/plan_itinerary",
            post(|State(c): State<Captured>, Json(body): Json<Value>| async move {
                c.lock().unwrap().push(body);
                Json(json!({ "response": "• Day 1: Paris\n• Day 2: Nice" }))
            }),
        )
        .with_state(captured.clone());
    let api = client(&spawn(router).await);

    let plan = fetch_itinerary(&api, "Paris", "Nice", &["Lyon".to_string()]).await;
    assert_eq!(plan, "• Day 1: Paris\n• Day 2: Nice");
    assert_eq!(
        captured.lock().unwrap()[0],
        json!({ "start_location": "Paris", "end_location": "Nice", "stops": ["Lyon"] })
    );
}

#[tokio::test]
async fn itinerary_on_http_500_returns_the_fallback() {
    let router = Router::new().route(
        "/plan_itinerary",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let api = client(&spawn(router).await);

    let plan = fetch_itinerary(&api, "A", "C", &["B".to_string()]).await;
    assert_eq!(plan, ITINERARY_FAILURE);
}

#[tokio::test]
async fn malformed_json_is_a_decode_error() {
    let router = Router::new().route("/chatbot", post(|| async { "not json" }));
    let api = client(&spawn(router).await);

    let err = api.chat("hi").await.unwrap_err();
    assert!(matches!(err, ApiError::Decode { .. }), "{err:?}");
}

#[tokio::test]
async fn refused_connection_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = client(&format!("http://{addr}"));
    let err = api.chat("hi").await.unwrap_err();
    assert!(err.is_network(), "{err:?}");
}

#[tokio::test]
async fn slow_backend_hits_the_timeout() {
    let router = Router::new().route(
        "/chatbot",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({ "response": "too late" }))
        }),
    );
    let base = spawn(router).await;
    let config = ApiConfig {
        assistant_url: base,
        timeout: Duration::from_secs(1),
        ..ApiConfig::default()
    };
    let api = HttpTravelApi::new(config).unwrap();

    assert!(api.chat("hi").await.unwrap_err().is_network());
}

// ── Travel service ────────────────────────────────────────────────────────────

#[tokio::test]
async fn city_data_posts_the_name() {
    let captured: Captured = Arc::default();
    let router = Router::new()
        .route(
            "/api/get_city_data",
            post(|State(c): State<Captured>, Json(body): Json<Value>| async move {
                c.lock().unwrap().push(body);
                Json(json!({
                    "city_name": "Rome",
                    "safety_score": 7,
                    "description": "Eternal city.",
                    "safety_description": "Watch for pickpockets.",
                    "image_url": "https://images.test/rome.jpg",
                }))
            }),
        )
        .with_state(captured.clone());
    let api = client(&spawn(router).await);

    let city = api.city_data("Rome").await.unwrap();
    assert_eq!(city.safety_score, "7");
    assert_eq!(city.image_or_placeholder(), "https://images.test/rome.jpg");
    assert_eq!(captured.lock().unwrap()[0], json!({ "city_name": "Rome" }));
}

#[tokio::test]
async fn emergency_numbers_and_alert_round_trip() {
    let captured: Captured = Arc::default();
    let router = Router::new()
        .route(
            "/api/get_emergency_numbers",
            post(|Json(_): Json<Value>| async {
                Json(json!({
                    "country": "Australia",
                    "emergency_numbers": { "Police": 0, "Ambulance": "000", "Fire": "000" },
                }))
            }),
        )
        .route(
            "/api/send_emergency_alert",
            post(|State(c): State<Captured>, Json(body): Json<Value>| async move {
                c.lock().unwrap().push(body);
                "ok"
            }),
        )
        .with_state(captured.clone());
    let api = client(&spawn(router).await);

    let numbers = api.emergency_numbers(Coordinates::new(-33.86, 151.21)).await.unwrap();
    assert_eq!(numbers.country, "Australia");
    assert_eq!(numbers.contacts()[0].number, "0");

    // Plain-text body on a 2xx still counts as sent.
    let alert = AlertRequest { latitude: -33.86, longitude: 151.21, message: "help".into() };
    let receipt = api.send_alert(&alert).await.unwrap();
    assert_eq!(receipt.message, None);
    assert_eq!(
        captured.lock().unwrap()[0],
        json!({ "latitude": -33.86, "longitude": 151.21, "message": "help" })
    );
}

#[tokio::test]
async fn alert_failure_reports_status() {
    let router = Router::new().route(
        "/api/send_emergency_alert",
        post(|| async { (StatusCode::BAD_REQUEST, "Could not determine country") }),
    );
    let api = client(&spawn(router).await);
    let alert = AlertRequest { latitude: 0.0, longitude: 0.0, message: "help".into() };
    assert_eq!(api.send_alert(&alert).await.unwrap_err().status(), Some(400));
}

#[tokio::test]
async fn profile_update_is_multipart_with_picture() {
    let captured: Captured = Arc::default();
    let router = Router::new()
        .route(
            "/api/user/{id}",
            post(|State(c): State<Captured>, Path(id): Path<String>, mut form: Multipart| async move {
                let mut seen = serde_json::Map::new();
                seen.insert("id".into(), json!(id));
                while let Some(field) = form.next_field().await.unwrap() {
                    let name = field.name().unwrap_or_default().to_string();
                    let value = match field.file_name() {
                        Some(file) => {
                            let file = file.to_string();
                            let len = field.bytes().await.unwrap().len();
                            json!({ "file": file, "len": len })
                        }
                        None => json!(field.text().await.unwrap()),
                    };
                    seen.insert(name, value);
                }
                c.lock().unwrap().push(Value::Object(seen));
                let mut profile = profile_json(json!([]));
                profile["name"] = json!("Avanti Singh");
                profile["profilePicture"] = json!("uploads/1_me.png");
                Json(profile)
            }),
        )
        .with_state(captured.clone());
    let api = client(&spawn(router).await);

    let update = ProfileUpdate {
        fields: vec![("name", "Avanti Singh".into()), ("age", "22".into())],
        picture: Some(PictureUpload {
            file_name: "me.png".into(),
            content_type: Some("image/png".into()),
            bytes: vec![0u8; 16],
        }),
    };
    let profile = api.update_user("user123", &update).await.unwrap();
    assert_eq!(profile.name, "Avanti Singh");
    assert_eq!(profile.profile_picture.as_deref(), Some("uploads/1_me.png"));

    let seen = captured.lock().unwrap()[0].clone();
    assert_eq!(seen["id"], "user123");
    assert_eq!(seen["name"], "Avanti Singh");
    assert_eq!(seen["age"], "22");
    assert_eq!(seen["profilePicture"], json!({ "file": "me.png", "len": 16 }));
}

#[tokio::test]
async fn bucket_list_add_get_and_remove() {
    let store: Arc<Mutex<Vec<Value>>> = Arc::default();
    let router = Router::new()
        .route(
            "/api/user/{id}",
            get(|State(s): State<Captured>| async move {
                Json(profile_json(Value::Array(s.lock().unwrap().clone())))
            }),
        )
        .route(
            "/api/user/{id}/bucket-list",
            post(|State(s): State<Captured>, Json(item): Json<Value>| async move {
                s.lock().unwrap().push(item);
                Json(profile_json(Value::Array(s.lock().unwrap().clone())))
            }),
        )
        .route(
            "/api/user/{id}/bucket-list/{name}",
            delete(|State(s): State<Captured>, Path((_id, name)): Path<(String, String)>| async move {
                s.lock().unwrap().retain(|item| item["name"] != json!(name));
                Json(profile_json(Value::Array(s.lock().unwrap().clone())))
            }),
        )
        .with_state(store.clone());
    let api = client(&spawn(router).await);

    let item = BucketListItem { name: "Pinned Location 1".into(), lat: 35.0, lng: 139.0 };
    let after_add = api.add_bucket_item("user123", &item).await.unwrap();
    assert_eq!(after_add.bucket_list, vec![item.clone()]);

    let fetched = api.user("user123").await.unwrap();
    assert_eq!(fetched.bucket_list.len(), 1);

    let after_remove = api.remove_bucket_item("user123", "Pinned Location 1").await.unwrap();
    assert!(after_remove.bucket_list.is_empty());
}

#[tokio::test]
async fn missing_user_is_a_404() {
    let router = Router::new().route(
        "/api/user/{id}",
        get(|| async { (StatusCode::NOT_FOUND, Json(json!({ "detail": "User not found" }))) }),
    );
    let api = client(&spawn(router).await);
    assert!(api.user("ghost").await.unwrap_err().is_not_found());
}
