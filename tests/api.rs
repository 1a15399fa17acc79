//! HTTP integration tests against a server on an ephemeral port.

#![allow(clippy::panic, clippy::indexing_slicing)]

mod common;

use reqwest::StatusCode;
use serde_json::{Value, json};

use common::{spawn_app, test_config};

async fn json_body(response: reqwest::Response) -> Value {
    let Ok(value) = response.json::<Value>().await else {
        panic!("response body should be JSON");
    };
    value
}

#[tokio::test]
async fn detection_is_saved_and_listed() {
    let addr = spawn_app(test_config()).await;
    let client = reqwest::Client::new();

    let Ok(response) = client
        .post(format!("http://{addr}/api/detections"))
        .json(&json!({"type": "glacier_melt", "confidence": 0.75, "coordinates": [10, 20]}))
        .send()
        .await
    else {
        panic!("POST failed");
    };
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Detection saved successfully");
    let Some(id) = body["id"].as_i64() else {
        panic!("id should be an integer");
    };
    assert!(id > 0);

    let Ok(response) = client.get(format!("http://{addr}/api/detections")).send().await else {
        panic!("GET failed");
    };
    assert_eq!(response.status(), StatusCode::OK);
    let rows = json_body(response).await;
    let Some(rows) = rows.as_array() else {
        panic!("list should be an array");
    };
    let Some(row) = rows.iter().find(|r| r["id"].as_i64() == Some(id)) else {
        panic!("saved row should be listed");
    };
    assert_eq!(row["confidence"], 0.75);
    assert_eq!(row["type"], "glacier_melt");
    assert_eq!(row["coordinates"], json!([10, 20]));
}

#[tokio::test]
async fn unparsable_detection_is_rejected() {
    let addr = spawn_app(test_config()).await;
    let client = reqwest::Client::new();

    for body in ["{broken", "null", "{}"] {
        let Ok(response) = client
            .post(format!("http://{addr}/api/detections"))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
        else {
            panic!("POST failed");
        };
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(json_body(response).await, json!({"error": "Invalid input data"}));
    }
}

#[tokio::test]
async fn detections_preflight_is_ok() {
    let addr = spawn_app(test_config()).await;
    let client = reqwest::Client::new();
    let Ok(response) = client
        .request(reqwest::Method::OPTIONS, format!("http://{addr}/api/detections"))
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .send()
        .await
    else {
        panic!("OPTIONS failed");
    };
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn seeded_events_and_nearby_report() {
    let addr = spawn_app(test_config()).await;
    let client = reqwest::Client::new();

    let Ok(response) = client.get(format!("http://{addr}/api/events")).send().await else {
        panic!("GET failed");
    };
    let events = json_body(response).await;
    assert_eq!(events.as_array().map(Vec::len), Some(3));
    assert_eq!(events[0]["id"], "1");

    // About 11 km north of the Uttarakhand seed event.
    let Ok(response) = client
        .post(format!("http://{addr}/api/events"))
        .json(&json!({
            "location": {"latitude": 30.1869, "longitude": 79.3199},
            "severity": "medium",
            "description": "Moraine breach"
        }))
        .send()
        .await
    else {
        panic!("POST failed");
    };
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["event"]["id"], "4");
    assert_eq!(body["nearby"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["nearby"][0]["event"]["id"], "3");

    let Ok(response) = client
        .get(format!(
            "http://{addr}/api/events/nearby?latitude=30.0869&longitude=79.3199&radiusKm=5"
        ))
        .send()
        .await
    else {
        panic!("GET failed");
    };
    let nearby = json_body(response).await;
    assert_eq!(nearby.as_array().map(Vec::len), Some(1));
    assert_eq!(nearby[0]["distanceKm"], 0.0);

    let Ok(response) = client.get(format!("http://{addr}/api/events/42")).send().await else {
        panic!("GET failed");
    };
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(json_body(response).await["error"].is_string());
}

#[tokio::test]
async fn event_with_bad_location_is_rejected() {
    let addr = spawn_app(test_config()).await;
    let client = reqwest::Client::new();
    let Ok(response) = client
        .post(format!("http://{addr}/api/events"))
        .json(&json!({
            "location": {"latitude": 120.0, "longitude": 79.0},
            "severity": "low"
        }))
        .send()
        .await
    else {
        panic!("POST failed");
    };
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn session_lifecycle() {
    let addr = spawn_app(test_config()).await;
    let client = reqwest::Client::new();

    let Ok(response) = client.get(format!("http://{addr}/api/auth/session")).send().await else {
        panic!("GET failed");
    };
    assert_eq!(
        json_body(response).await,
        json!({"isAuthenticated": false, "user": null})
    );

    let Ok(response) = client
        .put(format!("http://{addr}/api/auth/location"))
        .json(&json!({"location": {"latitude": 27.0, "longitude": 88.0}}))
        .send()
        .await
    else {
        panic!("PUT failed");
    };
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let Ok(response) = client
        .post(format!("http://{addr}/api/auth/login"))
        .json(&json!({"email": "ranger@example.org", "password": "secret1"}))
        .send()
        .await
    else {
        panic!("POST failed");
    };
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["user"]["username"], "testuser");
    assert_eq!(body["user"]["phoneNumber"], "+919876543210");

    let Ok(response) = client.post(format!("http://{addr}/api/auth/logout")).send().await else {
        panic!("POST failed");
    };
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let Ok(response) = client.get(format!("http://{addr}/api/auth/session")).send().await else {
        panic!("GET failed");
    };
    assert_eq!(json_body(response).await["isAuthenticated"], false);
}

#[tokio::test]
async fn signup_without_location_is_rejected() {
    let addr = spawn_app(test_config()).await;
    let client = reqwest::Client::new();
    let Ok(response) = client
        .post(format!("http://{addr}/api/auth/signup"))
        .json(&json!({
            "email": "asha@example.in",
            "username": "asha",
            "phoneNumber": "+919812345678",
            "password": "secret1"
        }))
        .send()
        .await
    else {
        panic!("POST failed");
    };
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({"error": "Location is required to register."})
    );
}

#[tokio::test]
async fn admin_analysis_checks_content_type_and_reports() {
    let addr = spawn_app(test_config()).await;
    let client = reqwest::Client::new();

    let Ok(response) = client
        .post(format!("http://{addr}/api/admin/analyze"))
        .header("content-type", "text/plain")
        .body("hello")
        .send()
        .await
    else {
        panic!("POST failed");
    };
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let Ok(response) = client
        .post(format!(
            "http://{addr}/api/admin/analyze?latitude=30.2&longitude=79.4"
        ))
        .header("content-type", "image/png")
        .body(vec![0x89, b'P', b'N', b'G'])
        .send()
        .await
    else {
        panic!("POST failed");
    };
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let Some(confidence) = body["result"]["confidence"].as_f64() else {
        panic!("confidence should be a number");
    };
    assert!((0.5..1.0).contains(&confidence));
    let is_outburst = body["result"]["isOutburst"].as_bool() == Some(true);
    assert_eq!(!body["event"].is_null(), is_outburst);

    let Ok(response) = client.get(format!("http://{addr}/api/admin/status")).send().await else {
        panic!("GET failed");
    };
    assert_eq!(json_body(response).await, json!({"isAnalyzing": false}));
}

#[tokio::test]
async fn health_and_severities() {
    let addr = spawn_app(test_config()).await;
    let Ok(response) = reqwest::get(format!("http://{addr}/health")).await else {
        panic!("GET failed");
    };
    assert_eq!(json_body(response).await["status"], "healthy");

    let Ok(response) = reqwest::get(format!("http://{addr}/config/severities")).await else {
        panic!("GET failed");
    };
    let catalog = json_body(response).await;
    assert_eq!(catalog.as_array().map(Vec::len), Some(3));
    assert_eq!(catalog[2]["severity"], "high");
    assert_eq!(catalog[2]["minConfidenceExclusive"], 0.8);
}
