#![allow(dead_code)]

use actix_web::test::TestRequest;
use async_trait::async_trait;
use serde_json::{json, Value};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::sync::{Arc, Mutex};

use fitgenie_backend::config::Config;
use fitgenie_backend::db;
use fitgenie_backend::inference::{ChatModel, ChatRequest, InferenceError};

// 1x1 transparent PNG.
pub const PNG_BASE64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

/// Builds an initialised service around the given pool and model.
macro_rules! test_app {
    ($pool:expr, $model:expr) => {{
        let model: std::sync::Arc<dyn fitgenie_backend::inference::ChatModel> = $model.clone();
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($pool.clone()))
                .app_data(actix_web::web::Data::new($crate::common::test_config()))
                .app_data(actix_web::web::Data::from(model))
                .app_data(fitgenie_backend::startup::json_config(1024 * 1024))
                .configure(fitgenie_backend::startup::routes),
        )
        .await
    }};
}

/// Chat model that records every request instead of calling out.
pub struct RecordingModel {
    pub calls: Mutex<Vec<ChatRequest>>,
    reply: Option<String>,
}

impl RecordingModel {
    pub fn answering(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            reply: Some(reply.to_string()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            reply: None,
        })
    }

    pub fn calls(&self) -> Vec<ChatRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for RecordingModel {
    async fn chat(&self, request: ChatRequest) -> Result<String, InferenceError> {
        self.calls.lock().unwrap().push(request);
        self.reply.clone().ok_or(InferenceError::EmptyResponse)
    }
}

pub fn test_config() -> Config {
    Config {
        bcrypt_cost: 4,
        ..Config::default()
    }
}

pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    db::migrate(&pool).await.unwrap();
    pool
}

pub fn register_request(body: Value) -> TestRequest {
    TestRequest::post().uri("/api/register").set_json(body)
}

pub fn jane() -> Value {
    json!({
        "email": "jane@example.com",
        "password": "correct horse",
        "age": 34,
        "gender": "female",
        "height": 180,
        "weight": 81,
        "existing_conditions": "asthma",
        "diet_type": "vegetarian",
        "activity_level": "moderate",
        "primary_goal": "run a marathon",
        "stress_level": "low"
    })
}
