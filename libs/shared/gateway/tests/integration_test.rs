use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared_config::AppConfig;
use shared_gateway::{ApiGateway, HttpGateway};
use shared_models::{AppError, PersonStatus, Resource, Role};

fn config_for(server: &MockServer, token: Option<&str>) -> AppConfig {
    AppConfig {
        api_base_url: server.uri(),
        api_token: token.map(str::to_string),
        request_timeout_secs: 5,
    }
}

#[tokio::test]
async fn test_gateway_requires_base_url() {
    let result = HttpGateway::new(&AppConfig::default());
    assert!(result.is_err());

    assert!(matches!(
        HttpGateway::connect(&AppConfig::default()),
        Err(AppError::NotConfigured(ref var)) if var == "DASHBOARD_API_URL"
    ));
}

#[tokio::test]
async fn test_load_all_decodes_items_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Patient"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                { "id": 1, "fullName": "A", "email": "a@example.com", "role": 0, "status": "active" },
                { "id": 2, "fullName": "B", "email": "b@example.com", "role": 0, "status": "critical" }
            ]
        })))
        .mount(&mock_server)
        .await;

    let gateway = HttpGateway::new(&config_for(&mock_server, None)).unwrap();
    let collection = gateway.load_all(Resource::Patient).await.unwrap();

    assert_eq!(collection.items.len(), 2);
    assert_eq!(collection.items[1].status, Some(PersonStatus::Critical));
    assert_eq!(collection.items[0].role, Role::Patient);
}

#[tokio::test]
async fn test_bearer_token_is_forwarded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Doctor"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = HttpGateway::new(&config_for(&mock_server, Some("test-token"))).unwrap();
    let collection = gateway.load_all(Resource::Doctor).await.unwrap();

    assert!(collection.items.is_empty());
}

#[tokio::test]
async fn test_load_all_by_id_uses_nested_resource_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/RecoveryLog/patient/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "timestamp": "2024-03-01T09:30:00Z",
                "temperature": 36.6,
                "heartRate": 70,
                "systolic": 118,
                "diastolic": 76,
                "painLevel": 1,
                "description": "Stable",
                "isEmergency": false
            }
        ])))
        .mount(&mock_server)
        .await;

    let gateway = HttpGateway::new(&config_for(&mock_server, None)).unwrap();
    let records = gateway
        .load_all_by_id(Resource::RecoveryLogByPatient, 42)
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["heartRate"], 70);
}

#[tokio::test]
async fn test_create_posts_payload() {
    let mock_server = MockServer::start().await;
    let payload = json!({
        "fullName": "Dr. John Doe",
        "email": "john@example.com",
        "password": "secret1",
        "role": 1
    });

    Mock::given(method("POST"))
        .and(path("/Doctor"))
        .and(body_json(&payload))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 10,
            "fullName": "Dr. John Doe",
            "email": "john@example.com",
            "role": 1
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = HttpGateway::new(&config_for(&mock_server, None)).unwrap();
    let doctor = gateway.create(Resource::Doctor, payload).await.unwrap();

    assert_eq!(doctor.id, Some(10));
    assert_eq!(doctor.role, Role::Doctor);
}

#[tokio::test]
async fn test_create_by_id_accepts_empty_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/Rehabilitation/plan/5"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let gateway = HttpGateway::new(&config_for(&mock_server, None)).unwrap();
    let response = gateway
        .create_by_id(Resource::RehabilitationPlan, 5, json!({ "plan": "Daily walks" }))
        .await
        .unwrap();

    assert!(response.is_null());
}

#[tokio::test]
async fn test_update_puts_to_record_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/Patient/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3,
            "fullName": "Renamed",
            "email": "r@example.com",
            "role": 0
        })))
        .mount(&mock_server)
        .await;

    let gateway = HttpGateway::new(&config_for(&mock_server, None)).unwrap();
    let patient = gateway
        .update(Resource::Patient, 3, json!({ "fullName": "Renamed" }))
        .await
        .unwrap();

    assert_eq!(patient.full_name, "Renamed");
}

#[tokio::test]
async fn test_remove_sends_delete() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/Patient/9"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = HttpGateway::new(&config_for(&mock_server, None)).unwrap();
    assert!(gateway.remove(Resource::Patient, 9).await.is_ok());
}

#[tokio::test]
async fn test_error_statuses_are_classified() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Doctor"))
        .respond_with(ResponseTemplate::new(401).set_body_string("expired"))
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/Doctor/1"))
        .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/Patient"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let gateway = HttpGateway::new(&config_for(&mock_server, None)).unwrap();

    let auth = gateway.load_all(Resource::Doctor).await.unwrap_err();
    assert!(auth.to_string().starts_with("Authentication error"));

    let missing = gateway.remove(Resource::Doctor, 1).await.unwrap_err();
    assert!(missing.to_string().starts_with("Resource not found"));

    let server = gateway.load_all(Resource::Patient).await.unwrap_err();
    assert!(server.to_string().contains("500"));
}
