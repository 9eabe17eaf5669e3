use crate::{
    data::DataType,
    error::{
        DeleteStudentSnafu, EscolaResult, InsertStudentSnafu, MissingRequiredFieldSnafu,
        QueryStudentsSnafu, UpdateStudentSnafu,
    },
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use snafu::{OptionExt, ResultExt};
use sqlx::{FromRow, PgConnection};

pub const FULL_NAME_KEY: &str = "nome_completo";

//columns are aliased onto the struct fields so `FromRow` can stay derived
const SELECT_ALL: &str = "SELECT id_aluno AS id, nome_completo AS full_name, data_nascimento AS birth_date, \
    id_turma AS class_id, nome_responsavel AS guardian_name, telefone_responsavel AS guardian_phone, \
    email_responsavel AS guardian_email, informacoes_adicionais AS additional_info FROM aluno";
const SELECT_BY_ID: &str = "SELECT id_aluno AS id, nome_completo AS full_name, data_nascimento AS birth_date, \
    id_turma AS class_id, nome_responsavel AS guardian_name, telefone_responsavel AS guardian_phone, \
    email_responsavel AS guardian_email, informacoes_adicionais AS additional_info FROM aluno WHERE id_aluno = $1";
const INSERT: &str = "INSERT INTO aluno (nome_completo, data_nascimento, id_turma, nome_responsavel, \
    telefone_responsavel, email_responsavel, informacoes_adicionais) VALUES ($1, $2, $3, $4, $5, $6, $7) \
    RETURNING id_aluno";
//full replace: all seven columns, always
const UPDATE: &str = "UPDATE aluno SET nome_completo = $1, data_nascimento = $2, id_turma = $3, \
    nome_responsavel = $4, telefone_responsavel = $5, email_responsavel = $6, informacoes_adicionais = $7 \
    WHERE id_aluno = $8";
const DELETE: &str = "DELETE FROM aluno WHERE id_aluno = $1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Student {
    #[serde(rename = "id_aluno")]
    pub id: i32,
    #[serde(rename = "nome_completo")]
    pub full_name: String,
    #[serde(rename = "data_nascimento")]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "id_turma")]
    pub class_id: Option<i32>,
    #[serde(rename = "nome_responsavel")]
    pub guardian_name: Option<String>,
    #[serde(rename = "telefone_responsavel")]
    pub guardian_phone: Option<String>,
    #[serde(rename = "email_responsavel")]
    pub guardian_email: Option<String>,
    #[serde(rename = "informacoes_adicionais")]
    pub additional_info: Option<String>,
}

/// Request body for both creation and full replacement. Absent keys and
/// explicit `null`s both end up as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentForm {
    #[serde(rename = "nome_completo", default)]
    pub full_name: Option<String>,
    #[serde(rename = "data_nascimento", default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "id_turma", default)]
    pub class_id: Option<i32>,
    #[serde(rename = "nome_responsavel", default)]
    pub guardian_name: Option<String>,
    #[serde(rename = "telefone_responsavel", default)]
    pub guardian_phone: Option<String>,
    #[serde(rename = "email_responsavel", default)]
    pub guardian_email: Option<String>,
    #[serde(rename = "informacoes_adicionais", default)]
    pub additional_info: Option<String>,
}

impl StudentForm {
    pub fn ensure_full_name(&self) -> EscolaResult<&str> {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .context(MissingRequiredFieldSnafu {
                field: FULL_NAME_KEY,
            })
    }
}

impl DataType for Student {
    type Id = i32;
    type FormForAdding = StudentForm;

    async fn get_from_db_by_id(id: Self::Id, conn: &mut PgConnection) -> EscolaResult<Option<Self>> {
        sqlx::query_as::<_, Self>(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(conn)
            .await
            .context(QueryStudentsSnafu)
    }

    async fn get_all(conn: &mut PgConnection) -> EscolaResult<Vec<Self>> {
        sqlx::query_as::<_, Self>(SELECT_ALL)
            .fetch_all(conn)
            .await
            .context(QueryStudentsSnafu)
    }

    async fn insert_into_database(
        to_be_added: &Self::FormForAdding,
        conn: &mut PgConnection,
    ) -> EscolaResult<Self::Id> {
        let StudentForm {
            full_name,
            birth_date,
            class_id,
            guardian_name,
            guardian_phone,
            guardian_email,
            additional_info,
        } = to_be_added;

        sqlx::query_scalar::<_, Self::Id>(INSERT)
            .bind(full_name)
            .bind(birth_date)
            .bind(class_id)
            .bind(guardian_name)
            .bind(guardian_phone)
            .bind(guardian_email)
            .bind(additional_info)
            .fetch_one(conn)
            .await
            .context(InsertStudentSnafu)
    }

    async fn replace_in_database(
        id: Self::Id,
        replacement: &Self::FormForAdding,
        conn: &mut PgConnection,
    ) -> EscolaResult<bool> {
        let StudentForm {
            full_name,
            birth_date,
            class_id,
            guardian_name,
            guardian_phone,
            guardian_email,
            additional_info,
        } = replacement;

        let result = sqlx::query(UPDATE)
            .bind(full_name)
            .bind(birth_date)
            .bind(class_id)
            .bind(guardian_name)
            .bind(guardian_phone)
            .bind(guardian_email)
            .bind(additional_info)
            .bind(id)
            .execute(conn)
            .await
            .context(UpdateStudentSnafu)?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove_from_database(id: Self::Id, conn: &mut PgConnection) -> EscolaResult<bool> {
        let result = sqlx::query(DELETE)
            .bind(id)
            .execute(conn)
            .await
            .context(DeleteStudentSnafu)?;

        Ok(result.rows_affected() > 0)
    }
}
