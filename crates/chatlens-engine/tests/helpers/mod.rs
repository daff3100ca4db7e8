//! Test helpers: build a coordinator with a fast processing schedule and
//! poll uploads to a terminal status.
#![allow(dead_code)]

use std::time::Duration;

use uuid::Uuid;

use chatlens_core::models::{ChatMessage, FileType, NewUpload, UploadStatusView};
use chatlens_core::EngineConfig;
use chatlens_engine::LifecycleCoordinator;

pub const POLL_TIMEOUT: Duration = Duration::from_secs(5);

/// Engine config with a short simulated schedule so tests finish quickly.
pub fn fast_config() -> EngineConfig {
    EngineConfig {
        progress_step_percent: 25,
        step_delay: Duration::from_millis(10),
        ..EngineConfig::default()
    }
}

/// Config with a slow enough schedule that a test can act mid-flight.
pub fn slow_config() -> EngineConfig {
    EngineConfig {
        progress_step_percent: 10,
        step_delay: Duration::from_millis(100),
        ..EngineConfig::default()
    }
}

pub fn coordinator() -> LifecycleCoordinator {
    let _ = chatlens_core::telemetry::init_tracing();
    LifecycleCoordinator::new(fast_config())
}

pub fn json_upload(messages: Vec<ChatMessage>) -> NewUpload {
    NewUpload {
        filename: "chat.json".to_string(),
        file_type: FileType::Json,
        file_size: 256,
        messages,
    }
}

pub fn two_message_transcript() -> Vec<ChatMessage> {
    vec![
        ChatMessage::new("alice", "hello there"),
        ChatMessage::new("bob", "hi alice"),
    ]
}

/// Poll an upload's status until it reaches a terminal state, asserting the
/// observed progress sequence never decreases along the way.
pub async fn wait_for_terminal(
    coordinator: &LifecycleCoordinator,
    id: Uuid,
    tenant_id: &str,
) -> UploadStatusView {
    let deadline = tokio::time::Instant::now() + POLL_TIMEOUT;
    let mut last_progress = 0u8;
    loop {
        let view = coordinator
            .status(id, tenant_id)
            .await
            .expect("upload should remain visible while polling");
        assert!(
            view.progress >= last_progress,
            "progress regressed from {} to {}",
            last_progress,
            view.progress
        );
        last_progress = view.progress;
        if view.status.is_terminal() {
            return view;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "upload {} did not reach a terminal status in time",
            id
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
