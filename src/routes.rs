use crate::{
    routes::{
        docs::{get_api_spec, get_docs_page},
        index::get_index_route,
        students::{delete_student, get_student, get_students, post_student, put_student},
    },
    state::EscolaState,
};
use axum::{Router, routing::get};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

pub mod docs;
pub mod index;
pub mod students;

pub const MAX_BODY_BYTES: usize = 64 * 1024;

pub fn router(state: EscolaState) -> Router {
    Router::new()
        .route("/", get(get_index_route))
        .route("/alunos", get(get_students).post(post_student))
        .route(
            "/alunos/{id}",
            get(get_student).put(put_student).delete(delete_student),
        )
        .route("/apispec.json", get(get_api_spec))
        .route("/docs", get(get_docs_page))
        .route("/docs/", get(get_docs_page))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
