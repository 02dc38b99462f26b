mod common;

use common::{create_test_planner, event_record, MockServer, Reply};
use serde_json::json;
use soiree_core::{
    params::RequestQuote, PlanningChoice, PlanningError, ProviderRef, QuoteMode, StartOrigin,
    WizardContext, WizardState, WizardStep,
};

fn fill_gated_steps(state: &mut WizardState) {
    for (field, value) in [
        ("eventName", "Meera & Arjun"),
        ("clientName", "Meera Nair"),
        ("clientEmail", "meera@example.com"),
        ("clientPhone", "9895012345"),
        ("attendees", "320"),
        ("state", "Kerala"),
        ("city", "Kochi"),
        ("dateTime", "2025-12-14T18:30"),
        ("duration", "6 hours"),
        ("budget", "1500000"),
    ] {
        state.set_field(field, value).unwrap();
    }
}

fn provider(id: u64, name: &str, category: &str) -> ProviderRef {
    ProviderRef {
        id,
        name: name.to_string(),
        category: category.to_string(),
    }
}

#[tokio::test]
async fn test_create_flow_submits_and_removes_draft() {
    let server = MockServer::start(|request| match (request.method.as_str(), request.path()) {
        ("POST", "/api/events/") => {
            let mut record = request.json();
            record["id"] = json!(42);
            Reply::json(201, record)
        }
        _ => Reply::json(404, json!({})),
    })
    .await;
    let (_temp_dir, planner) = create_test_planner(&server.url).await;
    let context = WizardContext::new("social", "wedding", None);

    let mut state = planner.start_wizard(&context).await.unwrap().state;
    fill_gated_steps(&mut state);
    for _ in 0..4 {
        state.advance().unwrap();
    }
    assert_eq!(state.current_step, WizardStep::Thankyou);
    state.choose_planning(PlanningChoice::Detailed).unwrap();
    assert_eq!(state.current_step, WizardStep::Tradition);
    state.set_field("requirement", "photography:2").unwrap();
    planner.save_draft(&mut state).await.unwrap();

    let result = planner.submit(&mut state).await.unwrap();
    assert_eq!(result.event.id, 42);
    assert!(!result.updated);
    assert!(result.draft_removed);
    assert_eq!(state.current_step, WizardStep::Success);
    assert_eq!(state.progress_percent(), 100);

    let sent = server.requests_to("POST", "/events/")[0].json();
    assert_eq!(sent["event_type"], json!("wedding"));
    assert_eq!(sent["event_date"], json!("2025-12-14"));
    assert_eq!(sent["event_time"], json!("18:30:00"));
    assert_eq!(sent["attendees"], json!(320));
    assert_eq!(sent["form_data"]["schema_version"], json!(1));
    assert_eq!(
        sent["special_requirements"]["photography"]["quantity"],
        json!(2)
    );

    let restarted = planner.start_wizard(&context).await.unwrap();
    assert_eq!(restarted.origin, StartOrigin::Fresh);
}

#[tokio::test]
async fn test_failed_submit_keeps_draft_and_step() {
    let server = MockServer::start(|_| Reply::json(400, json!({ "services": ["required"] }))).await;
    let (_temp_dir, planner) = create_test_planner(&server.url).await;
    let context = WizardContext::new("corporate", "conference", None);

    let mut state = WizardState::new(context.clone());
    fill_gated_steps(&mut state);
    planner.save_draft(&mut state).await.unwrap();

    let err = planner.submit(&mut state).await.unwrap_err();
    assert!(matches!(err, PlanningError::Api(ref api) if api.status() == Some(400)));
    assert_eq!(state.current_step, WizardStep::Basic);
    assert!(planner.resume_session(&context).await.is_ok());
}

#[tokio::test]
async fn test_edit_flow_loads_and_updates_event() {
    let server = MockServer::start(|request| match (request.method.as_str(), request.path()) {
        ("GET", "/api/events/7/") => Reply::json(200, event_record(7, "Meera & Arjun")),
        ("PUT", "/api/events/7/") => {
            let mut record = request.json();
            record["id"] = json!(7);
            Reply::json(200, record)
        }
        _ => Reply::json(404, json!({})),
    })
    .await;
    let (_temp_dir, planner) = create_test_planner(&server.url).await;
    let context = WizardContext::new("social", "wedding", Some(7));

    let start = planner.start_wizard(&context).await.unwrap();
    assert_eq!(start.origin, StartOrigin::RemoteEvent);
    let mut state = start.state;
    assert_eq!(state.form.attendees, Some(320));
    assert_eq!(state.form.city, "Kochi");
    assert!(state.completed_steps.contains(&WizardStep::Budget));
    assert!(!state.plan().contains(WizardStep::Thankyou));

    state.set_field("attendees", "400").unwrap();
    let result = planner.submit(&mut state).await.unwrap();
    assert!(result.updated);
    assert!(!result.draft_removed);

    let sent = server.requests_to("PUT", "/events/7/")[0].json();
    assert_eq!(sent["attendees"], json!(400));
    assert!(server.requests_to("POST", "/events/").is_empty());
}

#[tokio::test]
async fn test_targeted_quote_notifies_vendors() {
    let server = MockServer::start(|request| match (request.method.as_str(), request.path()) {
        ("GET", "/api/events/7/") => Reply::json(200, event_record(7, "Meera & Arjun")),
        ("POST", "/api/quote-requests/") => {
            Reply::json(201, json!({ "id": "55", "status": "pending" }))
        }
        ("POST", "/api/events/7/send-quotes/") => Reply::json(200, json!({ "sent": 2 })),
        _ => Reply::json(404, json!({})),
    })
    .await;
    let (_temp_dir, planner) = create_test_planner(&server.url).await;

    let receipt = planner
        .request_quote(&RequestQuote {
            event_id: Some(7),
            vendors: vec![provider(3, "Lens & Light", "Photographer")],
            venues: vec![provider(9, "Bolgatty Palace", "Banquet Hall")],
            expand_to_network: true,
            notify_vendors: true,
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(receipt.id, Some(55));
    assert!(receipt.sent_to_vendors);

    let quote = server.requests_to("POST", "/quote-requests/")[0].json();
    assert_eq!(quote["quote_type"], json!("targeted"));
    assert_eq!(quote["expand_to_network"], json!(true));
    assert_eq!(quote["client_email"], json!("meera@example.com"));
    assert_eq!(quote["event_date"], json!("2025-12-14"));
    assert_eq!(quote["vendor_ids"], json!([3]));
    assert_eq!(quote["venue_ids"], json!([9]));

    let notify = server.requests_to("POST", "/events/7/send-quotes/")[0].json();
    assert_eq!(notify["quote_request_id"], json!(55));
}

#[tokio::test]
async fn test_quote_without_providers_is_rejected_locally() {
    let server = MockServer::start(|_| Reply::json(201, json!({ "id": 1 }))).await;
    let (_temp_dir, planner) = create_test_planner(&server.url).await;

    let err = planner
        .request_quote(&RequestQuote {
            mode: QuoteMode::Comprehensive,
            client_name: Some("Ravi".to_string()),
            event_date: Some("2026-02-01".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();

    let errors = err.field_errors().expect("expected field errors");
    assert!(errors.contains("providers"));
    assert!(errors.contains("clientEmail"));
    assert!(!errors.contains("eventDate"));
    assert!(server.requests().is_empty());
}
