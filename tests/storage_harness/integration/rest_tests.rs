//! REST integration test macro for storage backends.
//!
//! The `rest_integration_tests!` macro generates HTTP-level tests that drive
//! a `PropertyStore` through full REST round-trips:
//! JSON → HTTP request → handler → PropertyService → HTTP response → JSON.

/// Generate a REST integration test suite for a storage backend.
///
/// `$store_factory` must produce an `impl PropertyStore + 'static`.
///
/// # Generated Tests
///
/// ## Create / Get
/// - `test_rest_create`: POST 201 + id string
/// - `test_rest_get_round_trip`: GET returns the stored fields
/// - `test_rest_create_applies_defaults`: omitted optionals come back defaulted
///
/// ## List
/// - `test_rest_list_default_limit`: 24 records without `limit`
/// - `test_rest_list_limit_bounds`: 0 and 101 rejected, 1 and 100 accepted
/// - `test_rest_list_city_case_insensitive`: dubai and DUBAI give the same set
/// - `test_rest_list_combined_filters`: price/bedrooms/featured scenario
///
/// ## Error handling
/// - `test_rest_malformed_id` vs `test_rest_unknown_id`: 400 vs 404
/// - `test_rest_validation_lists_fields`: 422 with every violated field
/// - `test_rest_invalid_json`, `test_rest_negative_params`, `test_rest_bad_flag`
///
/// ## Middleware
/// - `test_rest_cors_echoes_origin`: permissive CORS reflects the request origin
#[macro_export]
macro_rules! rest_integration_tests {
    ($store_factory:expr) => {
        mod rest_integration_tests {
            use super::*;
            use axum::http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN};
            use axum::http::{HeaderValue, StatusCode};
            use axum_test::TestServer;
            use listings::core::service::PropertyStore;
            use serde_json::{Value, json};
            use std::sync::Arc;
            use storage_harness::integration::{build_test_router, create_listing, sorted_ids};

            async fn make_server() -> TestServer {
                let store = $store_factory;
                let store: Arc<dyn PropertyStore> = Arc::new(store);
                TestServer::new(build_test_router(store))
            }

            // ==============================================================
            // Root / diagnostics
            // ==============================================================

            #[tokio::test]
            async fn test_rest_root_message() {
                let server = make_server().await;

                let response = server.get("/").await;
                response.assert_status_ok();
                response.assert_json(&json!({ "message": "Luxury Real Estate API running" }));
            }

            #[tokio::test]
            async fn test_rest_diagnostics() {
                let server = make_server().await;
                create_listing(&server, &dubai_villa_json()).await;

                let response = server.get("/test").await;
                response.assert_status_ok();

                let body: Value = response.json();
                assert_eq!(body["backend"], "✅ Running");
                assert_eq!(body["database"], "✅ Connected & Working");
                assert_eq!(body["database_url"], "✅ Set");
                assert!(
                    body["collections"]
                        .as_array()
                        .unwrap()
                        .iter()
                        .any(|c| c == "property")
                );
            }

            #[tokio::test]
            async fn test_rest_cors_echoes_origin() {
                let server = make_server().await;
                let origin = HeaderValue::from_static("https://listings.example.com");

                let response = server
                    .get("/properties")
                    .add_header(ORIGIN, origin.clone())
                    .await;

                response.assert_status_ok();
                assert_eq!(response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN), Some(&origin));
            }

            // ==============================================================
            // Create / Get
            // ==============================================================

            #[tokio::test]
            async fn test_rest_create() {
                let server = make_server().await;

                let response = server.post("/properties").json(&dubai_villa_json()).await;
                response.assert_status(StatusCode::CREATED);

                let id: String = response.json();
                assert_eq!(id.len(), 24);
                assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
            }

            #[tokio::test]
            async fn test_rest_get_round_trip() {
                let server = make_server().await;
                let payload = dubai_villa_json();
                let id = create_listing(&server, &payload).await;

                let response = server.get(&format!("/properties/{}", id)).await;
                response.assert_status_ok();

                let mut expected = payload.clone();
                expected["id"] = json!(id);
                response.assert_json(&expected);
            }

            #[tokio::test]
            async fn test_rest_create_applies_defaults() {
                let server = make_server().await;
                let mut payload = minimal_json("Dubai", 1000.0, 1, false);
                payload.as_object_mut().unwrap().remove("featured");
                payload["description"] = Value::Null;
                let id = create_listing(&server, &payload).await;

                let body: Value = server.get(&format!("/properties/{}", id)).await.json();
                assert_eq!(body["status"], "For Sale");
                assert_eq!(body["badges"], json!([]));
                assert_eq!(body["featured"], false);
                assert!(body["description"].is_null());
                assert!(body["location"].is_null());
            }

            #[tokio::test]
            async fn test_rest_create_accepts_integral_float_counts() {
                let server = make_server().await;
                let mut payload = minimal_json("Dubai", 1000.0, 1, false);
                payload["bedrooms"] = json!(3.0);
                let id = create_listing(&server, &payload).await;

                let body: Value = server.get(&format!("/properties/{}", id)).await.json();
                assert_eq!(body["bedrooms"], 3);
            }

            // ==============================================================
            // List
            // ==============================================================

            #[tokio::test]
            async fn test_rest_list_empty() {
                let server = make_server().await;

                let response = server.get("/properties").await;
                response.assert_status_ok();
                response.assert_json(&json!([]));
            }

            #[tokio::test]
            async fn test_rest_list_default_limit() {
                let server = make_server().await;
                for i in 0..30 {
                    create_listing(&server, &minimal_json("Dubai", i as f64, 1, false)).await;
                }

                let records: Vec<Value> = server.get("/properties").await.json();
                assert_eq!(records.len(), 24);

                let records: Vec<Value> = server
                    .get("/properties")
                    .add_query_param("limit", 5)
                    .await
                    .json();
                assert_eq!(records.len(), 5);
            }

            #[tokio::test]
            async fn test_rest_list_limit_bounds() {
                let server = make_server().await;
                create_listing(&server, &dubai_villa_json()).await;

                for rejected in ["0", "101", "-1"] {
                    let response = server
                        .get("/properties")
                        .add_query_param("limit", rejected)
                        .await;
                    response.assert_status(StatusCode::BAD_REQUEST);
                    let body: Value = response.json();
                    assert_eq!(body["code"], "LIMIT_OUT_OF_RANGE");
                }

                for accepted in ["1", "100"] {
                    server
                        .get("/properties")
                        .add_query_param("limit", accepted)
                        .await
                        .assert_status_ok();
                }
            }

            #[tokio::test]
            async fn test_rest_list_city_case_insensitive() {
                let server = make_server().await;
                create_listing(&server, &minimal_json("Dubai", 1.0, 1, false)).await;
                create_listing(&server, &minimal_json("dubai", 2.0, 1, false)).await;
                create_listing(&server, &minimal_json("Paris", 3.0, 1, false)).await;

                let lower: Vec<Value> = server
                    .get("/properties")
                    .add_query_param("city", "dubai")
                    .await
                    .json();
                let upper: Vec<Value> = server
                    .get("/properties")
                    .add_query_param("city", "DUBAI")
                    .await
                    .json();

                assert_eq!(lower.len(), 2);
                assert_eq!(sorted_ids(&lower), sorted_ids(&upper));
            }

            #[tokio::test]
            async fn test_rest_list_empty_city_is_ignored() {
                let server = make_server().await;
                create_listing(&server, &minimal_json("Dubai", 1.0, 1, false)).await;
                create_listing(&server, &minimal_json("Paris", 2.0, 1, false)).await;

                let records: Vec<Value> = server
                    .get("/properties")
                    .add_query_param("city", "")
                    .await
                    .json();
                assert_eq!(records.len(), 2);
            }

            #[tokio::test]
            async fn test_rest_list_combined_filters() {
                let server = make_server().await;
                let id = create_listing(&server, &dubai_villa_json()).await;
                create_listing(&server, &minimal_json("Dubai", 500000.0, 1, true)).await;

                let hits: Vec<Value> = server
                    .get("/properties")
                    .add_query_param("min_price", 400000)
                    .add_query_param("max_price", 600000)
                    .add_query_param("bedrooms", 3)
                    .add_query_param("featured", "true")
                    .await
                    .json();
                assert_eq!(sorted_ids(&hits), vec![id]);

                let misses: Vec<Value> = server
                    .get("/properties")
                    .add_query_param("min_price", 600001)
                    .add_query_param("bedrooms", 3)
                    .add_query_param("featured", "true")
                    .await
                    .json();
                assert!(misses.is_empty());
            }

            // ==============================================================
            // Error handling
            // ==============================================================

            #[tokio::test]
            async fn test_rest_malformed_id() {
                let server = make_server().await;

                let response = server.get("/properties/not-an-id").await;
                response.assert_status(StatusCode::BAD_REQUEST);
                let body: Value = response.json();
                assert_eq!(body["code"], "INVALID_IDENTIFIER");
            }

            #[tokio::test]
            async fn test_rest_unknown_id() {
                let server = make_server().await;
                create_listing(&server, &dubai_villa_json()).await;

                let response = server.get("/properties/000000000000000000000000").await;
                response.assert_status(StatusCode::NOT_FOUND);
                let body: Value = response.json();
                assert_eq!(body["code"], "PROPERTY_NOT_FOUND");
            }

            #[tokio::test]
            async fn test_rest_validation_lists_fields() {
                let server = make_server().await;

                let response = server
                    .post("/properties")
                    .json(&json!({
                        "title": "Broken",
                        "price": -5,
                        "bedrooms": 1.5,
                        "featured": "yes"
                    }))
                    .await;
                response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

                let body: Value = response.json();
                assert_eq!(body["code"], "VALIDATION_ERROR");
                let fields: Vec<&str> = body["details"]["fields"]
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|f| f["field"].as_str().unwrap())
                    .collect();
                for expected in ["address", "price", "bedrooms", "area", "type", "featured"] {
                    assert!(fields.contains(&expected), "missing {} in {:?}", expected, fields);
                }
                assert!(!fields.contains(&"title"));

                let listed: Vec<Value> = server.get("/properties").await.json();
                assert!(listed.is_empty());
            }

            #[tokio::test]
            async fn test_rest_invalid_json() {
                let server = make_server().await;

                let response = server
                    .post("/properties")
                    .content_type("application/json")
                    .bytes("{not json".into())
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
                let body: Value = response.json();
                assert_eq!(body["code"], "INVALID_JSON");
            }

            #[tokio::test]
            async fn test_rest_negative_params() {
                let server = make_server().await;

                for param in ["min_price", "max_price", "bedrooms"] {
                    let response = server.get("/properties").add_query_param(param, -1).await;
                    response.assert_status(StatusCode::BAD_REQUEST);
                    let body: Value = response.json();
                    assert_eq!(body["code"], "INVALID_PARAMETER");
                    assert_eq!(body["details"]["parameter"], param);
                }
            }

            #[tokio::test]
            async fn test_rest_bad_flag() {
                let server = make_server().await;

                let response = server
                    .get("/properties")
                    .add_query_param("featured", "maybe")
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
                let body: Value = response.json();
                assert_eq!(body["details"]["parameter"], "featured");
            }
        }
    };
}
