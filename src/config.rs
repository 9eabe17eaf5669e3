use crate::{
    config::docs::ApiDocsConfig,
    error::{BadEnvVarSnafu, EscolaResult, ParsePortSnafu},
};
use dotenvy::var;
use secrecy::{ExposeSecret, SecretString};
use snafu::ResultExt;
use sqlx::postgres::PgConnectOptions;
use std::sync::Arc;

pub mod docs;

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    db_config: Arc<DbConfig>,
    docs_config: Arc<ApiDocsConfig>,
}

impl RuntimeConfiguration {
    pub fn new() -> EscolaResult<Self> {
        Ok(Self::from_parts(DbConfig::new()?, ApiDocsConfig::from_env()))
    }

    pub fn from_parts(db_config: DbConfig, docs_config: ApiDocsConfig) -> Self {
        Self {
            db_config: Arc::new(db_config),
            docs_config: Arc::new(docs_config),
        }
    }

    pub fn db_config(&self) -> Arc<DbConfig> {
        self.db_config.clone()
    }

    pub fn docs_config(&self) -> Arc<ApiDocsConfig> {
        self.docs_config.clone()
    }
}

#[derive(Debug)]
pub struct DbConfig {
    options: PgConnectOptions,
}

impl DbConfig {
    pub fn new() -> EscolaResult<Self> {
        let get_env_var = |name| var(name).context(BadEnvVarSnafu { name });

        let user = get_env_var("DB_USER")?;
        let password = SecretString::from(get_env_var("DB_PASSWORD")?);
        let host = get_env_var("DB_PATH")?;
        let port = get_env_var("DB_PORT")?;
        let port = port.parse().context(ParsePortSnafu { original: port })?;
        let database = get_env_var("DB_NAME")?;

        Ok(Self::from_options(
            PgConnectOptions::new()
                .username(&user)
                .password(password.expose_secret())
                .host(&host)
                .port(port)
                .database(&database),
        ))
    }

    pub const fn from_options(options: PgConnectOptions) -> Self {
        Self { options }
    }

    pub const fn connect_options(&self) -> &PgConnectOptions {
        &self.options
    }
}
