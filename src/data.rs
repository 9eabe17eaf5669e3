use crate::error::EscolaResult;
use sqlx::PgConnection;

pub mod student;

//each method is exactly one statement against the connection it is handed
#[allow(async_fn_in_trait)]
pub trait DataType: Sized {
    type Id;
    type FormForAdding;

    async fn get_from_db_by_id(id: Self::Id, conn: &mut PgConnection) -> EscolaResult<Option<Self>>;
    async fn get_all(conn: &mut PgConnection) -> EscolaResult<Vec<Self>>;
    async fn insert_into_database(
        to_be_added: &Self::FormForAdding,
        conn: &mut PgConnection,
    ) -> EscolaResult<Self::Id>;
    /// Overwrites every mutable column. Returns `false` when no row has `id`.
    async fn replace_in_database(
        id: Self::Id,
        replacement: &Self::FormForAdding,
        conn: &mut PgConnection,
    ) -> EscolaResult<bool>;
    /// Returns `false` when no row has `id`.
    async fn remove_from_database(id: Self::Id, conn: &mut PgConnection) -> EscolaResult<bool>;
}
