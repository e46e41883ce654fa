//! Integration tests for entity CRUD over HTTP.
//!
//! These tests drive entity types built with the default HTTP transport
//! against a mock server and verify paths, verbs, bodies, hydration, and
//! error propagation.

use rest_entity::{EntityConfig, EntityError, EntityType, HttpError, HttpTransport, Identity};
use serde_json::json;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a `cars` entity type pointing at the mock server.
fn cars(server: &MockServer) -> EntityType<HttpTransport> {
    EntityConfig::builder()
        .base_address(server.uri())
        .resource_name("cars")
        .add_action("repairAll")
        .build_type()
        .unwrap()
}

// ============================================================================
// Collection Operations
// ============================================================================

#[tokio::test]
async fn test_list_returns_entities_in_server_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cars"))
        .and(query_param("color", "red"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Herbie"},
            {"id": 2, "name": "Christine"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let list = cars(&server).list(&json!({"color": "red"})).await.unwrap();

    assert_eq!(list.len(), 2);
    assert_eq!(list[0].identity(), Some(&Identity::Number(1)));
    assert_eq!(list[0].get("name"), Some(&json!("Herbie")));
    assert_eq!(list[1].identity(), Some(&Identity::Number(2)));
    assert!(list[1].handle().url().ends_with("/cars/2"));
}

#[tokio::test]
async fn test_list_of_empty_collection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cars"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    assert!(cars(&server).list(&()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_then_retrieve_and_update_use_instance_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cars"))
        .and(body_json(json!({"name": "x"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 7, "name": "x"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cars/7"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": 7, "name": "x", "color": "red"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/cars/7"))
        .and(body_json(json!({"name": "y"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7, "name": "y"})))
        .expect(1)
        .mount(&server)
        .await;

    let cars = cars(&server);
    let mut car = cars.create(&json!({"name": "x"})).await.unwrap();
    assert_eq!(car.identity(), Some(&Identity::Number(7)));

    car.retrieve().await.unwrap();
    assert_eq!(car.get("color"), Some(&json!("red")));

    car.update(&json!({"name": "y"})).await.unwrap();
    assert_eq!(car.get("name"), Some(&json!("y")));
    assert_eq!(car.get("color"), Some(&json!("red")));
}

// ============================================================================
// Instance Operations
// ============================================================================

#[tokio::test]
async fn test_delete_returns_server_response() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/cars/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let car = cars(&server).entity(3);
    let result = car.delete().await.unwrap();

    assert_eq!(result, json!({}));
    assert_eq!(car.identity(), Some(&Identity::Number(3)));
}

#[tokio::test]
async fn test_delete_with_empty_body_is_null() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/cars/3"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let result = cars(&server).entity(3).delete().await.unwrap();

    assert!(result.is_null());
}

#[tokio::test]
async fn test_operations_without_identity_send_nothing() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let cars = cars(&server);
    let mut car = cars.new_entity();

    assert!(matches!(car.retrieve().await, Err(EntityError::NoIdentity { .. })));
    assert!(matches!(
        car.update(&json!({"a": 1})).await,
        Err(EntityError::NoIdentity { .. })
    ));
    assert!(matches!(car.delete().await, Err(EntityError::NoIdentity { .. })));
}

#[tokio::test]
async fn test_string_identity_is_url_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cars/plate%2053"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "plate 53"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut car = cars(&server).entity("plate 53");
    car.retrieve().await.unwrap();

    assert_eq!(car.identity(), Some(&Identity::Text("plate 53".to_string())));
}

#[tokio::test]
async fn test_custom_action_posts_to_inner_resource() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cars/7/repair-all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"repaired": 4})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cars/repair-all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let cars = cars(&server);

    let instance = cars.entity(7).action("repairAll").unwrap();
    assert_eq!(instance.post(json!({})).await.unwrap(), json!({"repaired": 4}));

    let collection = cars.new_entity().action("repairAll").unwrap();
    assert_eq!(collection.get(&()).await.unwrap(), json!([]));
}

// ============================================================================
// Errors
// ============================================================================

#[tokio::test]
async fn test_http_errors_propagate_with_status_and_request_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cars/9"))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("x-request-id", "req-404")
                .set_body_json(json!({"errors": "Not Found"})),
        )
        .mount(&server)
        .await;

    let mut car = cars(&server).entity(9);
    let error = car.retrieve().await.unwrap_err();

    assert_eq!(error.status(), Some(404));
    assert_eq!(error.request_id(), Some("req-404"));
    assert!(matches!(error, EntityError::Http(HttpError::Response(_))));
    assert!(car.data().is_empty());
}

#[tokio::test]
async fn test_list_error_propagates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cars"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let error = cars(&server).list(&()).await.unwrap_err();

    assert_eq!(error.status(), Some(500));
}

// ============================================================================
// Listeners and Transport Options
// ============================================================================

#[tokio::test]
async fn test_request_listeners_observe_every_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&seen);
    let cars = EntityConfig::builder()
        .base_address(server.uri())
        .resource_name("cars")
        .add_request_listener(move |request| {
            recorder
                .lock()
                .unwrap()
                .push(format!("{} {}", request.method, request.url));
        })
        .build_type()
        .unwrap();

    cars.list(&()).await.unwrap();
    cars.list(&()).await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], format!("get {}/cars", server.uri()));
}

#[tokio::test]
async fn test_transport_option_headers_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cars"))
        .and(header("authorization", "Bearer t0ken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let cars = EntityConfig::builder()
        .base_address(server.uri())
        .resource_name("cars")
        .transport_option("headers", json!({"Authorization": "Bearer t0ken"}))
        .build_type()
        .unwrap();

    cars.list(&()).await.unwrap();
}
