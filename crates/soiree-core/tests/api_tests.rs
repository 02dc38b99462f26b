mod common;

use common::{create_test_planner, event_record, jwt, MockServer, Reply};
use jiff::SignedDuration;
use serde_json::json;
use soiree_core::{
    db::{ACCESS_TOKEN_KEY, AUTH_STORE_KEY, REFRESH_TOKEN_KEY},
    params::{Id, Login},
    ApiError, LocalStorage, PlanningError,
};
use tempfile::TempDir;

fn storage(temp_dir: &TempDir) -> LocalStorage {
    LocalStorage::new(temp_dir.path().join("test.db")).unwrap()
}

fn store_tokens(temp_dir: &TempDir, access: &str, refresh: &str) {
    let mut storage = storage(temp_dir);
    storage.set_item(ACCESS_TOKEN_KEY, access).unwrap();
    storage.set_item(REFRESH_TOKEN_KEY, refresh).unwrap();
}

#[tokio::test]
async fn test_fresh_token_is_sent_as_bearer() {
    let server = MockServer::start(|_| Reply::json(200, json!([]))).await;
    let (temp_dir, planner) = create_test_planner(&server.url).await;
    let access = jwt(SignedDuration::from_hours(1));
    store_tokens(&temp_dir, &access, "refresh-1");

    let events = planner.list_events().await.unwrap();
    assert!(events.is_empty());

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].header("authorization"),
        Some(format!("Bearer {access}").as_str())
    );
}

#[tokio::test]
async fn test_requests_without_login_carry_no_token() {
    let server = MockServer::start(|_| Reply::json(200, json!({ "results": [] }))).await;
    let (_temp_dir, planner) = create_test_planner(&server.url).await;

    planner.list_events().await.unwrap();
    assert_eq!(server.requests()[0].header("authorization"), None);
}

#[tokio::test]
async fn test_expiring_token_is_refreshed_first() {
    let fresh = jwt(SignedDuration::from_hours(1));
    let issued = fresh.clone();
    let server = MockServer::start(move |request| match request.path() {
        "/api/auth/token/refresh/" => Reply::json(200, json!({ "access": issued })),
        _ => Reply::json(200, json!([])),
    })
    .await;
    let (temp_dir, planner) = create_test_planner(&server.url).await;
    // inside the 30 second margin
    store_tokens(&temp_dir, &jwt(SignedDuration::from_secs(10)), "refresh-1");

    planner.list_events().await.unwrap();

    let refreshes = server.requests_to("POST", "/auth/token/refresh/");
    assert_eq!(refreshes.len(), 1);
    assert_eq!(refreshes[0].json(), json!({ "refresh": "refresh-1" }));

    let listed = server.requests_to("GET", "/events/");
    assert_eq!(
        listed[0].header("authorization"),
        Some(format!("Bearer {fresh}").as_str())
    );
    assert_eq!(
        storage(&temp_dir).get_item(ACCESS_TOKEN_KEY).unwrap(),
        Some(fresh)
    );
}

#[tokio::test]
async fn test_concurrent_requests_share_one_refresh() {
    let fresh = jwt(SignedDuration::from_hours(1));
    let server = MockServer::start(move |request| match request.path() {
        "/api/auth/token/refresh/" => Reply::json(200, json!({ "access": fresh })),
        _ => Reply::json(200, json!([])),
    })
    .await;
    let (temp_dir, planner) = create_test_planner(&server.url).await;
    store_tokens(&temp_dir, &jwt(-SignedDuration::from_mins(5)), "refresh-1");

    let (a, b, c) = tokio::join!(
        planner.list_events(),
        planner.api().states(),
        planner.api().cities("Goa")
    );
    a.unwrap();
    b.unwrap();
    c.unwrap();

    assert_eq!(server.requests_to("POST", "/auth/token/refresh/").len(), 1);
}

#[tokio::test]
async fn test_failed_refresh_clears_tokens() {
    let server = MockServer::start(|request| match request.path() {
        "/api/auth/token/refresh/" => Reply::json(401, json!({ "detail": "Token is invalid" })),
        _ => Reply::json(200, json!([])),
    })
    .await;
    let (temp_dir, planner) = create_test_planner(&server.url).await;
    store_tokens(&temp_dir, &jwt(-SignedDuration::from_mins(1)), "stale-refresh");

    let err = planner.list_events().await.unwrap_err();
    assert!(matches!(err, PlanningError::Api(ApiError::RefreshFailed)));
    assert!(server.requests_to("GET", "/events/").is_empty());

    let storage = storage(&temp_dir);
    assert_eq!(storage.get_item(ACCESS_TOKEN_KEY).unwrap(), None);
    assert_eq!(storage.get_item(REFRESH_TOKEN_KEY).unwrap(), None);
}

#[tokio::test]
async fn test_unauthorized_response_clears_tokens() {
    let server = MockServer::start(|_| Reply::json(401, json!({ "detail": "nope" }))).await;
    let (temp_dir, planner) = create_test_planner(&server.url).await;
    store_tokens(&temp_dir, &jwt(SignedDuration::from_hours(1)), "refresh-1");

    let err = planner.list_events().await.unwrap_err();
    assert!(matches!(err, PlanningError::Api(ApiError::Unauthorized)));
    assert_eq!(storage(&temp_dir).get_item(ACCESS_TOKEN_KEY).unwrap(), None);
}

#[tokio::test]
async fn test_missing_event_maps_to_not_found() {
    let server = MockServer::start(|_| Reply::json(404, json!({ "detail": "Not found." }))).await;
    let (_temp_dir, planner) = create_test_planner(&server.url).await;

    let err = planner.get_event(&Id { id: 99 }).await.unwrap_err();
    assert!(matches!(err, PlanningError::EventNotFound { id: 99 }));
}

#[tokio::test]
async fn test_server_error_keeps_status_and_hides_body() {
    let server = MockServer::start(|_| {
        Reply::json(500, json!({ "password": "hunter2", "trace": "..." }))
    })
    .await;
    let (_temp_dir, planner) = create_test_planner(&server.url).await;

    let err = planner.list_events().await.unwrap_err();
    match &err {
        PlanningError::Api(api) => assert_eq!(api.status(), Some(500)),
        other => panic!("expected API error, got {other:?}"),
    }
    assert!(!err.to_string().contains("hunter2"));
}

#[tokio::test]
async fn test_event_list_accepts_paginated_envelope() {
    let server = MockServer::start(|_| {
        Reply::json(
            200,
            json!({ "count": 1, "results": [event_record(12, "Onam Feast")] }),
        )
    })
    .await;
    let (_temp_dir, planner) = create_test_planner(&server.url).await;

    let events = planner.list_events().await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, 12);
    assert_eq!(events[0].payload.attendees, 320);
    assert_eq!(events[0].status.as_deref(), Some("planning"));
}

#[tokio::test]
async fn test_login_stores_tokens_and_auth_store() {
    let server = MockServer::start(|_| {
        Reply::json(
            200,
            json!({
                "access": "access-1",
                "refresh": "refresh-1",
                "user": { "id": 3, "email": "host@example.com" }
            }),
        )
    })
    .await;
    let (temp_dir, planner) = create_test_planner(&server.url).await;

    planner
        .login(&Login {
            email: " host@example.com ".to_string(),
            password: "secret".to_string(),
        })
        .await
        .unwrap();

    let sent = server.requests_to("POST", "/auth/login/");
    assert_eq!(
        sent[0].json(),
        json!({ "email": "host@example.com", "password": "secret" })
    );
    assert_eq!(sent[0].header("authorization"), None);

    let storage = storage(&temp_dir);
    assert_eq!(
        storage.get_item(ACCESS_TOKEN_KEY).unwrap().as_deref(),
        Some("access-1")
    );
    let auth: serde_json::Value =
        serde_json::from_str(&storage.get_item(AUTH_STORE_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(auth["state"]["isAuthenticated"], json!(true));
    assert_eq!(auth["state"]["user"]["email"], json!("host@example.com"));

    assert!(planner.logout().await.unwrap());
    assert_eq!(storage.get_item(AUTH_STORE_KEY).unwrap(), None);
}

#[tokio::test]
async fn test_catalog_endpoints_send_expected_queries() {
    let server = MockServer::start(|request| match request.path() {
        // bare list
        "/api/events/cities/" => Reply::json(200, json!(["Kochi", { "name": "Munnar" }])),
        // paginated envelope
        "/api/events/traditions/by_event_type/" => Reply::json(
            200,
            json!({ "count": 1, "results": [{ "id": 4, "name": "Kerala Hindu", "description": "Temple rites" }] }),
        ),
        // keyed envelope
        "/api/events/requirements/" => Reply::json(
            200,
            json!({ "requirements": [{ "id": "chenda", "name": "Chenda Melam", "unit": "hours", "allows_quantity": true }] }),
        ),
        "/api/events/requirement-questions/" => Reply::json(
            200,
            json!([{ "id": 8, "question_text": "How many drummers?", "question_type": "number" }]),
        ),
        "/api/events/requirement-images/" => Reply::json(
            200,
            json!({ "results": [{ "image_url": "https://cdn.example.com/chenda.jpg" }] }),
        ),
        _ => Reply::json(404, json!({})),
    })
    .await;
    let (_temp_dir, planner) = create_test_planner(&server.url).await;
    let api = planner.api();

    let cities = api.cities("Kerala").await.unwrap();
    assert_eq!(cities, vec!["Kochi", "Munnar"]);

    let traditions = api.traditions("wedding").await.unwrap();
    assert_eq!(traditions.len(), 1);
    assert_eq!(traditions[0].name, "Kerala Hindu");

    let requirements = api.requirements("social").await.unwrap();
    assert_eq!(requirements[0].id, "chenda");
    assert_eq!(requirements[0].unit.as_deref(), Some("hours"));
    assert!(requirements[0].allows_quantity);

    let questions = api.requirement_questions("chenda").await.unwrap();
    assert_eq!(questions[0].id, 8);
    assert_eq!(questions[0].question_type, "number");

    let images = api.requirement_images("chenda", "wedding").await.unwrap();
    assert_eq!(images[0].image_url, "https://cdn.example.com/chenda.jpg");

    let targets: Vec<String> = server.requests().into_iter().map(|r| r.target).collect();
    assert_eq!(
        targets,
        vec![
            "/api/events/cities/?state=Kerala",
            "/api/events/traditions/by_event_type/?event_type=wedding",
            "/api/events/requirements/?event_id=social",
            "/api/events/requirement-questions/?requirement_id=chenda",
            "/api/events/requirement-images/?requirement_name=chenda&event_name=wedding",
        ]
    );
    assert!(server.requests().iter().all(|r| r.method == "GET"));
}

#[tokio::test]
async fn test_catalog_query_values_are_encoded() {
    let server = MockServer::start(|_| Reply::json(200, json!(["Panaji"]))).await;
    let (_temp_dir, planner) = create_test_planner(&server.url).await;

    let cities = planner.cities("Tamil Nadu & Goa").await;
    assert_eq!(cities, vec!["Panaji"]);
    assert_eq!(
        server.requests()[0].target,
        "/api/events/cities/?state=Tamil+Nadu+%26+Goa"
    );
}
