use crate::common;
use actix_web::http::StatusCode;
use actix_web::test;
use cupid::notify::templates::Templates;
use cupid::notify::NotificationKind;
use serde_json::{json, Value};

fn card_payload() -> Value {
    json!({
        "receiverName": "Ada",
        "receiverEmail": "ada@example.com",
        "senderName": "Charles",
        "Email Address": "charles@example.com",
        "giftPackage": "Yes",
        "message": "Will you be my valentine?",
    })
}

#[actix_web::test]
async fn test_create_document_when_templates_loaded_expect_both_notifications() {
    let recorder = common::RecordingMailer::new();
    let state = common::state(
        common::MemoryStore::new(),
        recorder.clone(),
        common::load_templates(),
    );
    let app = common::initialize_app(&state).await;
    let req = test::TestRequest::post()
        .uri("/api/documents")
        .set_json(card_payload())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let sends = common::wait_for_sends(&recorder, 2).await;
    let mut destinations: Vec<&str> = sends.iter().map(|sent| sent.to.as_str()).collect();
    destinations.sort_unstable();
    assert_eq!(destinations, ["ada@example.com", "charles@example.com"]);

    let to_receiver = sends.iter().find(|sent| sent.to == "ada@example.com").unwrap();
    assert_eq!(to_receiver.subject, NotificationKind::Receiver.subject());
    let to_sender = sends.iter().find(|sent| sent.to == "charles@example.com").unwrap();
    assert_eq!(to_sender.subject, NotificationKind::Sender.subject());
}

#[actix_web::test]
async fn test_notification_content_expect_names_and_card_link() {
    let store = common::MemoryStore::new();
    let recorder = common::RecordingMailer::new();
    let state = common::state(store.clone(), recorder.clone(), common::load_templates());
    let app = common::initialize_app(&state).await;
    let req = test::TestRequest::post()
        .uri("/api/documents")
        .set_json(card_payload())
        .to_request();
    let _resp = test::call_service(&app, req).await;

    let sends = common::wait_for_sends(&recorder, 2).await;
    let to_receiver = sends.iter().find(|sent| sent.to == "ada@example.com").unwrap();
    assert!(to_receiver.html_body.contains("Ada"));
    let to_sender = sends.iter().find(|sent| sent.to == "charles@example.com").unwrap();
    assert!(to_sender.html_body.contains("Charles"));

    // Both notifications carry the stored id as the link back to the card.
    let inserted_id = store.documents()[0].get_object_id("_id").unwrap();
    let card_link = format!("{}/{}", common::TEST_WEBSITE_URL, inserted_id.to_hex());
    for sent in &sends {
        assert!(
            sent.html_body.contains(&card_link),
            "notification to {} doesn't link to {card_link}",
            sent.to
        );
    }
}

#[actix_web::test]
async fn test_notification_when_gift_package_exact_yes_expect_gift_mentioned() {
    let recorder = common::RecordingMailer::new();
    let state = common::state(
        common::MemoryStore::new(),
        recorder.clone(),
        common::load_templates(),
    );
    let app = common::initialize_app(&state).await;
    let req = test::TestRequest::post()
        .uri("/api/documents")
        .set_json(card_payload())
        .to_request();
    let _resp = test::call_service(&app, req).await;

    let sends = common::wait_for_sends(&recorder, 2).await;
    for sent in &sends {
        assert!(
            sent.html_body.contains("gift package"),
            "notification to {} doesn't mention the gift package",
            sent.to
        );
    }
}

#[actix_web::test]
async fn test_notification_when_gift_package_lowercase_yes_expect_no_gift_mention() {
    // The gift marker has to be exactly "Yes"; anything else means no gift.
    let recorder = common::RecordingMailer::new();
    let state = common::state(
        common::MemoryStore::new(),
        recorder.clone(),
        common::load_templates(),
    );
    let app = common::initialize_app(&state).await;
    let mut payload = card_payload();
    payload["giftPackage"] = json!("yes");
    let req = test::TestRequest::post()
        .uri("/api/documents")
        .set_json(payload)
        .to_request();
    let _resp = test::call_service(&app, req).await;

    let sends = common::wait_for_sends(&recorder, 2).await;
    for sent in &sends {
        assert!(
            !sent.html_body.contains("gift package"),
            "notification to {} mentions a gift package it shouldn't",
            sent.to
        );
    }
}

#[actix_web::test]
async fn test_create_document_when_templates_missing_expect_stored_but_no_sends() {
    let store = common::MemoryStore::new();
    let recorder = common::RecordingMailer::new();
    let state = common::state(store.clone(), recorder.clone(), Templates::none());
    let app = common::initialize_app(&state).await;
    let req = test::TestRequest::post()
        .uri("/api/documents")
        .set_json(card_payload())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    common::settle_notifications().await;
    assert_eq!(store.documents().len(), 1);
    assert!(recorder.sends().is_empty());
}

#[actix_web::test]
async fn test_create_document_when_sparse_submission_expect_sends_still_attempted() {
    // A card with none of the well-known fields still queues both
    // notifications; they just address empty strings and render blanks.
    let recorder = common::RecordingMailer::new();
    let state = common::state(
        common::MemoryStore::new(),
        recorder.clone(),
        common::load_templates(),
    );
    let app = common::initialize_app(&state).await;
    let req = test::TestRequest::post()
        .uri("/api/documents")
        .set_json(json!({ "message": "guess who" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let sends = common::wait_for_sends(&recorder, 2).await;
    assert!(sends.iter().all(|sent| sent.to.is_empty()));
}

#[actix_web::test]
async fn test_create_document_when_receiver_send_refused_expect_sender_send_delivered() {
    // The two sends are independent tasks; the receiver's mailbox bouncing
    // must not cost the sender their confirmation.
    let mailer = common::RejectingMailer::new("ada@example.com");
    let state = common::state(
        common::MemoryStore::new(),
        mailer.clone(),
        common::load_templates(),
    );
    let app = common::initialize_app(&state).await;
    let req = test::TestRequest::post()
        .uri("/api/documents")
        .set_json(card_payload())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    common::wait_for_sends(mailer.delivered(), 1).await;
    common::settle_notifications().await;
    let sends = mailer.delivered().sends();
    assert_eq!(sends.len(), 1);
    assert_eq!(sends[0].to, "charles@example.com");
    assert_eq!(sends[0].subject, NotificationKind::Sender.subject());
}
