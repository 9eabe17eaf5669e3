use crate::{
    config::docs::ApiDocsConfig,
    maud_conveniences::{code, render_table, title},
    state::EscolaState,
};
use axum::{Json, extract::State};
use maud::{DOCTYPE, Markup, html};
use serde_json::{Map, Value, json};

#[derive(Debug, Clone, Copy)]
pub enum Shape {
    Status,
    StudentList,
    Student,
    Confirmation,
}

impl Shape {
    fn schema(self) -> Value {
        match self {
            Self::Status => json!({"$ref": "#/components/schemas/Status"}),
            Self::StudentList => json!({
                "type": "array",
                "items": {"$ref": "#/components/schemas/Aluno"}
            }),
            Self::Student => json!({"$ref": "#/components/schemas/Aluno"}),
            Self::Confirmation => json!({"$ref": "#/components/schemas/Confirmacao"}),
        }
    }
}

#[derive(Debug)]
pub struct Endpoint {
    pub method: &'static str,
    pub path: &'static str,
    pub tag: &'static str,
    pub summary: &'static str,
    pub takes_id: bool,
    pub takes_body: bool,
    pub success: (u16, &'static str, Shape),
    pub failures: &'static [(u16, &'static str)],
}

pub const ENDPOINTS: &[Endpoint] = &[
    Endpoint {
        method: "get",
        path: "/",
        tag: "Status",
        summary: "Verifica o status da API",
        takes_id: false,
        takes_body: false,
        success: (200, "API está funcionando corretamente", Shape::Status),
        failures: &[],
    },
    Endpoint {
        method: "get",
        path: "/alunos",
        tag: "Alunos",
        summary: "Retorna a lista de todos os alunos",
        takes_id: false,
        takes_body: false,
        success: (200, "Lista de alunos recuperada com sucesso", Shape::StudentList),
        failures: &[(500, "Erro ao conectar ao banco de dados")],
    },
    Endpoint {
        method: "get",
        path: "/alunos/{id}",
        tag: "Alunos",
        summary: "Retorna um aluno específico",
        takes_id: true,
        takes_body: false,
        success: (200, "Aluno encontrado com sucesso", Shape::Student),
        failures: &[
            (400, "Identificador inválido"),
            (404, "Aluno não encontrado"),
            (500, "Erro ao conectar ao banco de dados"),
        ],
    },
    Endpoint {
        method: "post",
        path: "/alunos",
        tag: "Alunos",
        summary: "Cadastra um novo aluno",
        takes_id: false,
        takes_body: true,
        success: (201, "Aluno cadastrado com sucesso", Shape::Confirmation),
        failures: &[
            (400, "Dados inválidos"),
            (500, "Erro ao conectar ao banco de dados ou inserir dados"),
        ],
    },
    Endpoint {
        method: "put",
        path: "/alunos/{id}",
        tag: "Alunos",
        summary: "Atualiza os dados de um aluno",
        takes_id: true,
        takes_body: true,
        success: (200, "Aluno atualizado com sucesso", Shape::Confirmation),
        failures: &[
            (400, "Dados inválidos"),
            (404, "Aluno não encontrado"),
            (500, "Erro ao conectar ao banco de dados ou atualizar dados"),
        ],
    },
    Endpoint {
        method: "delete",
        path: "/alunos/{id}",
        tag: "Alunos",
        summary: "Remove um aluno",
        takes_id: true,
        takes_body: false,
        success: (200, "Aluno excluído com sucesso", Shape::Confirmation),
        failures: &[
            (400, "Identificador inválido"),
            (404, "Aluno não encontrado"),
            (500, "Erro ao conectar ao banco de dados ou excluir dados"),
        ],
    },
];

pub struct Field {
    pub key: &'static str,
    pub kind: &'static str,
    pub format: Option<&'static str>,
    pub description: &'static str,
}

pub const STUDENT_FIELDS: &[Field] = &[
    Field {
        key: "nome_completo",
        kind: "string",
        format: None,
        description: "Nome completo do aluno",
    },
    Field {
        key: "data_nascimento",
        kind: "string",
        format: Some("date"),
        description: "Data de nascimento do aluno",
    },
    Field {
        key: "id_turma",
        kind: "integer",
        format: None,
        description: "ID da turma do aluno",
    },
    Field {
        key: "nome_responsavel",
        kind: "string",
        format: None,
        description: "Nome do responsável pelo aluno",
    },
    Field {
        key: "telefone_responsavel",
        kind: "string",
        format: None,
        description: "Telefone do responsável",
    },
    Field {
        key: "email_responsavel",
        kind: "string",
        format: None,
        description: "Email do responsável",
    },
    Field {
        key: "informacoes_adicionais",
        kind: "string",
        format: None,
        description: "Informações adicionais sobre o aluno",
    },
];

fn field_properties(with_id: bool) -> Map<String, Value> {
    let mut properties = Map::new();
    if with_id {
        properties.insert(
            "id_aluno".into(),
            json!({"type": "integer", "description": "ID único do aluno"}),
        );
    }

    for field in STUDENT_FIELDS {
        let mut property = json!({"type": field.kind, "description": field.description});
        if let Some(format) = field.format {
            property["format"] = json!(format);
        }
        if field.key != "nome_completo" {
            property["nullable"] = json!(true);
        }
        properties.insert(field.key.into(), property);
    }

    properties
}

fn operation(endpoint: &Endpoint) -> Value {
    let (success_code, success_description, shape) = endpoint.success;

    let mut responses = Map::new();
    responses.insert(
        success_code.to_string(),
        json!({
            "description": success_description,
            "content": {"application/json": {"schema": shape.schema()}}
        }),
    );
    for (code, description) in endpoint.failures {
        responses.insert(
            code.to_string(),
            json!({
                "description": description,
                "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Erro"}}}
            }),
        );
    }

    let mut operation = json!({
        "tags": [endpoint.tag],
        "summary": endpoint.summary,
        "responses": responses,
    });
    if endpoint.takes_id {
        operation["parameters"] = json!([{
            "name": "id",
            "in": "path",
            "required": true,
            "schema": {"type": "integer"}
        }]);
    }
    if endpoint.takes_body {
        operation["requestBody"] = json!({
            "required": true,
            "content": {"application/json": {"schema": {"$ref": "#/components/schemas/AlunoEntrada"}}}
        });
    }

    operation
}

pub fn build_api_spec(docs: &ApiDocsConfig) -> Value {
    let mut paths: Map<String, Value> = Map::new();
    for endpoint in ENDPOINTS {
        let item = paths
            .entry(endpoint.path)
            .or_insert_with(|| Value::Object(Map::new()));
        item[endpoint.method] = operation(endpoint);
    }

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": docs.title,
            "description": docs.description,
            "version": docs.version,
            "contact": docs.contact,
        },
        "paths": paths,
        "components": {
            "schemas": {
                "Aluno": {
                    "type": "object",
                    "required": ["id_aluno", "nome_completo"],
                    "properties": field_properties(true),
                },
                "AlunoEntrada": {
                    "type": "object",
                    "required": ["nome_completo"],
                    "properties": field_properties(false),
                },
                "Confirmacao": {
                    "type": "object",
                    "properties": {
                        "message": {"type": "string"},
                        "id_aluno": {"type": "integer"}
                    }
                },
                "Status": {
                    "type": "object",
                    "properties": {
                        "status": {"type": "string"},
                        "message": {"type": "string"}
                    }
                },
                "Erro": {
                    "type": "object",
                    "properties": {"error": {"type": "string"}}
                }
            }
        }
    })
}

pub async fn get_api_spec(State(state): State<EscolaState>) -> Json<Value> {
    Json(build_api_spec(&state.docs()))
}

pub async fn get_docs_page(State(state): State<EscolaState>) -> Markup {
    let docs = state.docs();

    let endpoint_rows = ENDPOINTS
        .iter()
        .map(|endpoint| {
            let statuses = std::iter::once(endpoint.success.0)
                .chain(endpoint.failures.iter().map(|(code, _)| *code))
                .map(|code| code.to_string())
                .collect::<Vec<_>>()
                .join(", ");

            [
                code(endpoint.method.to_uppercase()),
                code(endpoint.path),
                html! {(endpoint.summary)},
                html! {(statuses)},
            ]
        })
        .collect();

    let field_rows = STUDENT_FIELDS
        .iter()
        .map(|field| {
            [
                code(field.key),
                html! {
                    (field.kind)
                    @if let Some(format) = field.format {
                        " (" (format) ")"
                    }
                },
                html! {(field.description)},
            ]
        })
        .collect();

    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="UTF-8" {}
                meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                title { (docs.title) }
            }
            body {
                (title(&docs.title))
                p { (docs.description) }
                p {
                    "Versão " (docs.version) " · "
                    a href={"mailto:" (docs.contact.email)} { (docs.contact.name) }
                }
                p {
                    "Especificação OpenAPI: "
                    a href="/apispec.json" { "/apispec.json" }
                }
                (render_table("Endpoints", ["Método", "Caminho", "Descrição", "Respostas"], endpoint_rows))
                (render_table("Aluno", ["Campo", "Tipo", "Descrição"], field_rows))
                p {
                    "Erros são devolvidos como " (code(r#"{"error": "..."}"#)) "."
                }
            }
        }
    }
}
