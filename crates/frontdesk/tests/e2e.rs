// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end integration tests for the webhook -> controller -> platform
//! pipeline, with real SQLite session storage and mock collaborators.
//!
//! Each test builds an isolated stack with a temp database. Tests are
//! independent and order-insensitive.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use frontdesk_config::model::StorageConfig;
use frontdesk_core::types::Owner;
use frontdesk_core::SessionStore;
use frontdesk_handoff::{HandoffConfig, HandoffController, HANDOFF_PREAMBLE};
use frontdesk_storage::SqliteSessionStore;
use frontdesk_test_utils::{MockPlatform, MockResponder, ScriptedVerdict};
use frontdesk_webhook::{build_router, AuthConfig, HealthState, WebhookState};

struct Stack {
    app: axum::Router,
    controller: Arc<HandoffController>,
    store: Arc<SqliteSessionStore>,
    responder: Arc<MockResponder>,
    platform: Arc<MockPlatform>,
    _temp_dir: tempfile::TempDir,
}

async fn build_stack(script: Vec<ScriptedVerdict>) -> Stack {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let db_path = temp_dir.path().join("e2e.db");

    let store = Arc::new(SqliteSessionStore::new(StorageConfig {
        database_path: db_path.to_string_lossy().into_owned(),
        wal_mode: true,
    }));
    store.initialize().await.unwrap();

    let responder = Arc::new(MockResponder::with_script(script));
    let platform = Arc::new(MockPlatform::new());

    let controller = Arc::new(HandoffController::new(
        store.clone(),
        responder.clone(),
        platform.clone(),
        HandoffConfig {
            bot_operator_id: "op-bot".to_string(),
            fallback_operator_id: "op-human".to_string(),
        },
    ));

    let state = WebhookState {
        controller: controller.clone(),
        health: HealthState {
            start_time: Instant::now(),
        },
    };
    let app = build_router(state, AuthConfig { secret: None });

    Stack {
        app,
        controller,
        store,
        responder,
        platform,
        _temp_dir: temp_dir,
    }
}

async fn post_webhook(stack: &Stack, body: serde_json::Value) {
    let response = stack
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/webhook")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty(), "webhook ack must have no body");
}

fn user_message(chat_id: &str, content: &str) -> serde_json::Value {
    serde_json::json!({
        "event": "new_message",
        "data": {
            "chat_id": chat_id,
            "sender": {"id": "visitor-1", "type": "user"},
            "type": "text",
            "content": content
        }
    })
}

// ---- Answering flow ----

#[tokio::test]
async fn visitor_question_is_answered_end_to_end() {
    let stack = build_stack(vec![ScriptedVerdict::Reply(
        "Our pricing page lists all plans.".into(),
    )])
    .await;

    post_webhook(&stack, user_message("chat-e2e-1", "What does it cost?")).await;
    stack.controller.drain().await;

    assert_eq!(
        stack.responder.utterances().await,
        vec!["What does it cost?"]
    );
    assert_eq!(
        stack.platform.sent_texts("chat-e2e-1").await,
        vec!["Our pricing page lists all plans."]
    );

    let session = stack.store.get("chat-e2e-1").await.unwrap().unwrap();
    assert_eq!(session.owner, Owner::Bot);
    assert!(!session.pending_transfer);
}

// ---- Handoff and close flow ----

#[tokio::test]
async fn refund_request_hands_off_then_close_returns_to_bot() {
    let stack = build_stack(vec![ScriptedVerdict::Defer]).await;

    post_webhook(&stack, user_message("chat-e2e-2", "I want a refund")).await;
    stack.controller.drain().await;

    let session = stack.store.get("chat-e2e-2").await.unwrap().unwrap();
    assert_eq!(session.owner, Owner::Human);
    assert!(session.pending_transfer);
    assert_eq!(
        stack.platform.sent_texts("chat-e2e-2").await,
        vec![HANDOFF_PREAMBLE]
    );
    assert_eq!(
        stack.platform.transfers("chat-e2e-2").await,
        vec!["op-human"]
    );

    post_webhook(
        &stack,
        serde_json::json!({"event": "close_chat", "data": {"chat_id": "chat-e2e-2"}}),
    )
    .await;
    stack.controller.drain().await;

    let session = stack.store.get("chat-e2e-2").await.unwrap().unwrap();
    assert_eq!(session.owner, Owner::Bot);
    assert!(!session.pending_transfer);
    assert_eq!(
        stack.platform.transfers("chat-e2e-2").await,
        vec!["op-human", "op-bot"]
    );
}

#[tokio::test]
async fn duplicate_deliveries_produce_one_transfer() {
    let stack = build_stack(vec![ScriptedVerdict::Defer, ScriptedVerdict::Defer]).await;

    let body = user_message("chat-e2e-3", "I want a refund");
    post_webhook(&stack, body.clone()).await;
    post_webhook(&stack, body).await;
    stack.controller.drain().await;

    assert_eq!(stack.platform.transfers("chat-e2e-3").await.len(), 1);
    let session = stack.store.get("chat-e2e-3").await.unwrap().unwrap();
    assert_eq!(session.owner, Owner::Human);
}

// ---- Out-of-band reassignment ----

#[tokio::test]
async fn human_owner_hint_silences_bot_without_responder_call() {
    let stack = build_stack(vec![]).await;

    post_webhook(
        &stack,
        serde_json::json!({
            "event": "new_message",
            "data": {
                "chat_id": "chat-e2e-4",
                "sender": {"id": "visitor-1", "type": "user"},
                "type": "text",
                "content": "hello?",
                "owner": "human"
            }
        }),
    )
    .await;
    stack.controller.drain().await;

    assert_eq!(stack.responder.call_count().await, 0);
    assert!(stack.platform.calls().await.is_empty());
    let session = stack.store.get("chat-e2e-4").await.unwrap().unwrap();
    assert_eq!(session.owner, Owner::Human);
}

// ---- Acknowledgement latency ----

#[tokio::test]
async fn ack_does_not_wait_for_slow_reply_generation() {
    let stack = build_stack(vec![ScriptedVerdict::Reply("slow answer".into())]).await;
    stack.responder.set_delay(Duration::from_millis(800)).await;

    let started = Instant::now();
    post_webhook(&stack, user_message("chat-e2e-5", "hello")).await;
    let ack_latency = started.elapsed();

    assert!(
        ack_latency < Duration::from_millis(400),
        "webhook ack waited on reply generation: {ack_latency:?}"
    );

    stack.controller.drain().await;
    assert_eq!(
        stack.platform.sent_texts("chat-e2e-5").await,
        vec!["slow answer"]
    );
}

// ---- Durability ----

#[tokio::test]
async fn ownership_survives_controller_restart() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let db_path = temp_dir
        .path()
        .join("restart.db")
        .to_string_lossy()
        .into_owned();

    // First incarnation hands the conversation off.
    {
        let store = Arc::new(SqliteSessionStore::new(StorageConfig {
            database_path: db_path.clone(),
            wal_mode: true,
        }));
        store.initialize().await.unwrap();
        let responder = Arc::new(MockResponder::with_script(vec![ScriptedVerdict::Defer]));
        let platform = Arc::new(MockPlatform::new());
        let controller = Arc::new(HandoffController::new(
            store.clone(),
            responder,
            platform,
            HandoffConfig {
                bot_operator_id: "op-bot".into(),
                fallback_operator_id: "op-human".into(),
            },
        ));
        controller
            .handle(frontdesk_test_utils::TestHarness::user_message(
                "chat-e2e-6",
                "I want a refund",
            ))
            .await;
        controller.drain().await;
        store.close().await.unwrap();
    }

    // Second incarnation sees the handed-off session and stays silent.
    let store = Arc::new(SqliteSessionStore::new(StorageConfig {
        database_path: db_path,
        wal_mode: true,
    }));
    store.initialize().await.unwrap();
    let responder = Arc::new(MockResponder::new());
    let platform = Arc::new(MockPlatform::new());
    let controller = Arc::new(HandoffController::new(
        store.clone(),
        responder.clone(),
        platform.clone(),
        HandoffConfig {
            bot_operator_id: "op-bot".into(),
            fallback_operator_id: "op-human".into(),
        },
    ));

    controller
        .handle(frontdesk_test_utils::TestHarness::user_message(
            "chat-e2e-6",
            "anyone there?",
        ))
        .await;
    controller.drain().await;

    assert_eq!(responder.call_count().await, 0);
    assert!(platform.calls().await.is_empty());
}
