use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use snafu::Snafu;
use std::num::ParseIntError;

pub type EscolaResult<T> = Result<T, EscolaError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum EscolaError {
    #[snafu(display("Falha ao conectar ao banco de dados"))]
    ConnectDatabase { source: sqlx::Error },
    #[snafu(display("O campo \"{field}\" é obrigatório"))]
    MissingRequiredField { field: &'static str },
    #[snafu(display("Corpo da requisição inválido: {source}"))]
    InvalidBody { source: JsonRejection },
    #[snafu(display("Identificador inválido: {source}"))]
    InvalidPath { source: PathRejection },
    #[snafu(display("Aluno não encontrado"))]
    MissingStudent { id: i64 },
    #[snafu(display("Erro ao consultar dados: {source}"))]
    QueryStudents { source: sqlx::Error },
    #[snafu(display("Erro ao inserir dados: {source}"))]
    InsertStudent { source: sqlx::Error },
    #[snafu(display("Erro ao atualizar dados: {source}"))]
    UpdateStudent { source: sqlx::Error },
    #[snafu(display("Erro ao excluir dados: {source}"))]
    DeleteStudent { source: sqlx::Error },
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse database port {:?}", original))]
    ParsePort {
        source: ParseIntError,
        original: String,
    },
    #[snafu(display("Unable to listen on {}", address))]
    BindListener {
        source: std::io::Error,
        address: String,
    },
    #[snafu(display("Error serving app"))]
    Serve { source: std::io::Error },
}

impl From<JsonRejection> for EscolaError {
    fn from(source: JsonRejection) -> Self {
        Self::InvalidBody { source }
    }
}

impl From<PathRejection> for EscolaError {
    fn from(source: PathRejection) -> Self {
        Self::InvalidPath { source }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl EscolaError {
    pub fn status_code(&self) -> StatusCode {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const NF: StatusCode = StatusCode::NOT_FOUND; //not found
        const BI: StatusCode = StatusCode::BAD_REQUEST; //bad input
        const TL: StatusCode = StatusCode::PAYLOAD_TOO_LARGE; //too large

        match self {
            Self::ConnectDatabase { .. } => ISE,
            Self::InvalidBody { source } if source.status() == TL => TL,
            Self::MissingRequiredField { .. } | Self::InvalidBody { .. } | Self::InvalidPath { .. } => BI,
            Self::MissingStudent { .. } => NF,
            Self::QueryStudents { .. }
            | Self::InsertStudent { .. }
            | Self::UpdateStudent { .. }
            | Self::DeleteStudent { .. } => ISE,
            Self::BadEnvVar { .. } | Self::ParsePort { .. } => ISE,
            Self::BindListener { .. } | Self::Serve { .. } => ISE,
        }
    }
}

impl IntoResponse for EscolaError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            error!(?self, "Error!");
        } else {
            warn!(?self, "Rejected request");
        }

        (
            status_code,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
