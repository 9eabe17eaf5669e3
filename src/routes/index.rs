use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct Status {
    status: &'static str,
    message: &'static str,
}

pub async fn get_index_route() -> Json<Status> {
    Json(Status {
        status: "online",
        message: "API de Gerenciamento Escolar está funcionando corretamente",
    })
}
