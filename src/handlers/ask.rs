use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use validator::Validate;
use log::info;
use crate::config::Config;
use crate::db::find_profile;
use crate::errors::AppError;
use crate::inference::{ChatModel, ChatRequest};
use crate::prompt;
use crate::utils::image::decode_image;
use crate::utils::validation::validate_payload;

#[derive(Deserialize, Validate)]
pub struct AskRequest {
    #[validate(required(message = "No question provided"), length(min = 1, message = "No question provided"))]
    question: Option<String>,
}

#[derive(Deserialize)]
pub struct AskWithPictureRequest {
    question: Option<String>,
    image_base64: Option<String>,
}

#[derive(Serialize)]
pub struct AskResponse {
    question: String,
    answer: String,
}

fn require_question(question: Option<String>) -> Result<String, AppError> {
    let payload = AskRequest { question };
    validate_payload(&payload)?;
    payload
        .question
        .ok_or_else(|| AppError::BadRequest("No question provided".to_string()))
}

// POST /api/ask/{id}
pub async fn ask(
    path: web::Path<i64>,
    req: web::Json<AskRequest>,
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    model: web::Data<dyn ChatModel>,
) -> Result<HttpResponse, AppError> {
    let user = find_profile(&pool, path.into_inner()).await?;
    let question = require_question(req.into_inner().question)?;

    info!("Answering question for user {}", user.id);

    let request = ChatRequest::text(
        &config.models.text_model,
        prompt::question_prompt(&question, &user),
    );
    let answer = model.chat(request).await?;

    Ok(HttpResponse::Ok().json(AskResponse { question, answer }))
}

// POST /api/ask_with_picture/{id}
pub async fn ask_with_picture(
    path: web::Path<i64>,
    req: web::Json<AskWithPictureRequest>,
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    model: web::Data<dyn ChatModel>,
) -> Result<HttpResponse, AppError> {
    let AskWithPictureRequest { question, image_base64 } = req.into_inner();
    let image_base64 = image_base64
        .ok_or_else(|| AppError::BadRequest("No base64 image provided".to_string()))?;

    let user = find_profile(&pool, path.into_inner()).await?;
    let question = require_question(question)?;
    let image = decode_image(&image_base64)?;

    info!("Answering picture question for user {}", user.id);

    let request = ChatRequest::with_image(
        &config.models.vision_model,
        prompt::image_prompt(&question, &user),
        image,
    );
    let answer = model.chat(request).await?;

    Ok(HttpResponse::Ok().json(AskResponse { question, answer }))
}

