use crate::{
    config::{RuntimeConfiguration, docs::ApiDocsConfig},
    error::{ConnectDatabaseSnafu, EscolaResult},
};
use snafu::ResultExt;
use sqlx::{Connection, PgConnection};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct EscolaState {
    config: RuntimeConfiguration,
}

impl EscolaState {
    pub const fn new(config: RuntimeConfiguration) -> Self {
        Self { config }
    }

    pub fn docs(&self) -> Arc<ApiDocsConfig> {
        self.config.docs_config()
    }

    //one fresh connection per operation, no pooling
    pub async fn get_connection(&self) -> EscolaResult<PgConnection> {
        let db_config = self.config.db_config();
        PgConnection::connect_with(db_config.connect_options())
            .await
            .context(ConnectDatabaseSnafu)
    }

    #[allow(clippy::unused_self)] //keeps acquire and release on the same handle
    pub async fn release_connection(&self, conn: PgConnection) {
        if let Err(e) = conn.close().await {
            warn!(?e, "Error closing db connection");
        }
    }
}
