use crate::error::EscolaError;
use axum::extract::{FromRequest, FromRequestParts, Json, Path};

//same as axum's extractors, but rejections come out as `{"error": ...}` 400s

#[derive(FromRequest)]
#[from_request(via(Json), rejection(EscolaError))]
pub struct JsonBody<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(Path), rejection(EscolaError))]
pub struct IdPath<T>(pub T);
