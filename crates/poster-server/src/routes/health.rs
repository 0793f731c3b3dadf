use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct Message {
    message: String,
}

pub async fn welcome() -> Json<Message> {
    Json(Message {
        message: "Welcome to the Scientific Poster ML Service".to_string(),
    })
}

#[derive(Serialize)]
pub struct Health {
    status: String,
}

pub async fn health_check() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
    })
}
