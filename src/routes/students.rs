use crate::{
    data::{
        DataType,
        student::{Student, StudentForm},
    },
    error::{EscolaResult, MissingStudentSnafu},
    extract::{IdPath, JsonBody},
    state::EscolaState,
};
use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use snafu::OptionExt;

#[derive(Serialize, Debug)]
pub struct Confirmation {
    message: &'static str,
    #[serde(rename = "id_aluno")]
    id: i32,
}

//ids past the column's range can't match any row
fn row_id(id: i64) -> EscolaResult<i32> {
    i32::try_from(id).ok().context(MissingStudentSnafu { id })
}

//every handler grabs the statement's result *before* releasing, so the connection is closed on all paths

pub async fn get_students(State(state): State<EscolaState>) -> EscolaResult<Json<Vec<Student>>> {
    let mut conn = state.get_connection().await?;
    let students = Student::get_all(&mut conn).await;
    state.release_connection(conn).await;

    let students = students?;
    info!(count = students.len(), "READ: listed all students");
    Ok(Json(students))
}

pub async fn get_student(
    State(state): State<EscolaState>,
    IdPath(id): IdPath<i64>,
) -> EscolaResult<Json<Student>> {
    let id = row_id(id)?;
    let mut conn = state.get_connection().await?;
    let student = Student::get_from_db_by_id(id, &mut conn).await;
    state.release_connection(conn).await;

    let student = student?.context(MissingStudentSnafu { id })?;
    info!(id, "READ: fetched student");
    Ok(Json(student))
}

pub async fn post_student(
    State(state): State<EscolaState>,
    JsonBody(form): JsonBody<StudentForm>,
) -> EscolaResult<(StatusCode, Json<Confirmation>)> {
    form.ensure_full_name()?;

    let mut conn = state.get_connection().await?;
    let id = Student::insert_into_database(&form, &mut conn).await;
    state.release_connection(conn).await;

    let id = id?;
    info!(id, "CREATE: student inserted");
    Ok((
        StatusCode::CREATED,
        Json(Confirmation {
            message: "Aluno cadastrado com sucesso!",
            id,
        }),
    ))
}

pub async fn put_student(
    State(state): State<EscolaState>,
    IdPath(id): IdPath<i64>,
    JsonBody(form): JsonBody<StudentForm>,
) -> EscolaResult<Json<Confirmation>> {
    let id = row_id(id)?;
    let mut conn = state.get_connection().await?;
    let replaced = Student::replace_in_database(id, &form, &mut conn).await;
    state.release_connection(conn).await;

    if !replaced? {
        return MissingStudentSnafu { id }.fail();
    }
    info!(id, "UPDATE: student replaced");
    Ok(Json(Confirmation {
        message: "Aluno atualizado com sucesso!",
        id,
    }))
}

pub async fn delete_student(
    State(state): State<EscolaState>,
    IdPath(id): IdPath<i64>,
) -> EscolaResult<Json<Confirmation>> {
    let id = row_id(id)?;
    let mut conn = state.get_connection().await?;
    let removed = Student::remove_from_database(id, &mut conn).await;
    state.release_connection(conn).await;

    if !removed? {
        return MissingStudentSnafu { id }.fail();
    }
    info!(id, "DELETE: student removed");
    Ok(Json(Confirmation {
        message: "Aluno excluído com sucesso!",
        id,
    }))
}

#[cfg(test)]
mod tests {
    use crate::{
        data::student::Student,
        routes::test_utils::{live_router, send, unreachable_router},
    };
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    #[tokio::test]
    async fn create_without_full_name_is_rejected_before_connecting() {
        //the database is unreachable, so anything but a 400 means a connection was attempted
        for body in [
            json!({}),
            json!({"nome_completo": ""}),
            json!({"nome_completo": null, "nome_responsavel": "Maria"}),
        ] {
            let (status, response) = send(unreachable_router(), "POST", "/alunos", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(response["error"], "O campo \"nome_completo\" é obrigatório");
        }
    }

    #[tokio::test]
    async fn malformed_bodies_are_bad_requests() {
        let (status, response) = send(
            unreachable_router(),
            "POST",
            "/alunos",
            Some(json!({"nome_completo": "Ana", "id_turma": "três"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            response["error"]
                .as_str()
                .unwrap()
                .starts_with("Corpo da requisição inválido")
        );

        let (status, _) = send(unreachable_router(), "POST", "/alunos", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(unreachable_router(), "PUT", "/alunos/1", Some(json!("texto"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn non_numeric_ids_are_bad_requests() {
        for method in ["GET", "DELETE"] {
            let (status, response) = send(unreachable_router(), method, "/alunos/abc", None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(
                response["error"]
                    .as_str()
                    .unwrap()
                    .starts_with("Identificador inválido")
            );
        }
    }

    #[tokio::test]
    async fn ids_beyond_the_column_range_are_not_found() {
        //answered without a connection, which is why the unreachable database doesn't matter
        let requests = [
            ("GET", None),
            ("PUT", Some(json!({"nome_completo": "João da Silva"}))),
            ("DELETE", None),
        ];

        for id in ["3000000000", "-3000000000"] {
            for (method, body) in requests.clone() {
                let uri = format!("/alunos/{id}");
                let (status, response) = send(unreachable_router(), method, &uri, body).await;
                assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
                assert_eq!(response["error"], "Aluno não encontrado");
            }
        }
    }

    #[tokio::test]
    async fn unreachable_database_is_a_server_error() {
        let requests = [
            ("GET", "/alunos", None),
            ("GET", "/alunos/1", None),
            ("POST", "/alunos", Some(json!({"nome_completo": "João da Silva"}))),
            ("PUT", "/alunos/1", Some(json!({"nome_completo": "João da Silva"}))),
            ("DELETE", "/alunos/1", None),
        ];

        for (method, uri, body) in requests {
            let (status, response) = send(unreachable_router(), method, uri, body).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
            assert_eq!(response["error"], "Falha ao conectar ao banco de dados");
        }
    }

    async fn create(body: Value) -> i32 {
        let router = live_router().await;
        let (status, response) = send(router, "POST", "/alunos", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(response["message"], "Aluno cadastrado com sucesso!");
        let id = response["id_aluno"].as_i64().unwrap();
        assert!(id > 0);
        i32::try_from(id).unwrap()
    }

    async fn fetch(id: i32) -> (StatusCode, Value) {
        let router = live_router().await;
        send(router, "GET", &format!("/alunos/{id}"), None).await
    }

    #[tokio::test]
    #[ignore = "needs ESCOLA_TEST_DATABASE_URL"]
    async fn create_with_only_full_name_reads_back_nulls() {
        let id = create(json!({"nome_completo": "João da Silva"})).await;
        let (status, student) = fetch(id).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            serde_json::from_value::<Student>(student).unwrap(),
            Student {
                id,
                full_name: "João da Silva".into(),
                birth_date: None,
                class_id: None,
                guardian_name: None,
                guardian_phone: None,
                guardian_email: None,
                additional_info: None,
            }
        );
    }

    #[tokio::test]
    #[ignore = "needs ESCOLA_TEST_DATABASE_URL"]
    async fn create_then_get_returns_every_submitted_field() {
        let mut submitted = json!({
            "nome_completo": "Maria Souza",
            "data_nascimento": "2010-05-15",
            "id_turma": 3,
            "nome_responsavel": "Maria da Silva",
            "telefone_responsavel": "(11) 98765-4321",
            "email_responsavel": "maria@exemplo.com",
            "informacoes_adicionais": "Alergia a amendoim"
        });
        let id = create(submitted.clone()).await;
        let (status, student) = fetch(id).await;

        submitted["id_aluno"] = json!(id);
        assert_eq!(status, StatusCode::OK);
        assert_eq!(student, submitted);
    }

    #[tokio::test]
    #[ignore = "needs ESCOLA_TEST_DATABASE_URL"]
    async fn update_replaces_every_field() {
        let id = create(json!({
            "nome_completo": "Carlos Pereira",
            "id_turma": 2,
            "nome_responsavel": "Paula Pereira",
            "informacoes_adicionais": "Usa óculos"
        }))
        .await;

        let router = live_router().await;
        let (status, response) = send(
            router,
            "PUT",
            &format!("/alunos/{id}"),
            Some(json!({"nome_completo": "Carlos Pereira Jr", "id_turma": 4})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response, json!({"message": "Aluno atualizado com sucesso!", "id_aluno": id}));

        let (_, student) = fetch(id).await;
        assert_eq!(student["nome_completo"], "Carlos Pereira Jr");
        assert_eq!(student["id_turma"], 4);
        assert_eq!(student["nome_responsavel"], Value::Null);
        assert_eq!(student["informacoes_adicionais"], Value::Null);
    }

    #[tokio::test]
    #[ignore = "needs ESCOLA_TEST_DATABASE_URL"]
    async fn update_of_missing_id_is_not_found_and_changes_nothing() {
        let router = live_router().await;

        let (status, response) = send(
            router,
            "PUT",
            &format!("/alunos/{}", i32::MAX),
            Some(json!({"nome_completo": "Ninguém Aqui"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(response["error"], "Aluno não encontrado");

        let (status, _) = fetch(i32::MAX).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let router = live_router().await;
        let (_, listed) = send(router, "GET", "/alunos", None).await;
        assert!(
            listed
                .as_array()
                .unwrap()
                .iter()
                .all(|student| student["nome_completo"] != "Ninguém Aqui")
        );
    }

    #[tokio::test]
    #[ignore = "needs ESCOLA_TEST_DATABASE_URL"]
    async fn delete_removes_the_row() {
        let id = create(json!({"nome_completo": "Ana Costa"})).await;

        let router = live_router().await;
        let (status, response) = send(router, "DELETE", &format!("/alunos/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response, json!({"message": "Aluno excluído com sucesso!", "id_aluno": id}));

        let (status, response) = fetch(id).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(response["error"], "Aluno não encontrado");

        let router = live_router().await;
        let (status, _) = send(router, "DELETE", &format!("/alunos/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    #[ignore = "needs ESCOLA_TEST_DATABASE_URL"]
    async fn list_includes_every_created_row() {
        let mut ids = Vec::new();
        for name in ["Pedro", "Beatriz", "Lucas"] {
            ids.push(create(json!({"nome_completo": name})).await);
        }

        let router = live_router().await;
        let (status, listed) = send(router, "GET", "/alunos", None).await;
        assert_eq!(status, StatusCode::OK);

        let listed: Vec<Student> = serde_json::from_value(listed).unwrap();
        assert!(listed.len() >= ids.len());
        for id in ids {
            assert!(listed.iter().any(|student| student.id == id), "{id} not listed");
        }
    }
}
