use dotenvy::var;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ApiContact {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiDocsConfig {
    pub title: String,
    pub description: String,
    pub version: String,
    pub contact: ApiContact,
}

impl ApiDocsConfig {
    //falls back to the defaults for anything not set
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            title: var("ESCOLA_API_TITLE").unwrap_or(defaults.title),
            version: var("ESCOLA_API_VERSION").unwrap_or(defaults.version),
            ..defaults
        }
    }
}

impl Default for ApiDocsConfig {
    fn default() -> Self {
        Self {
            title: "API de Gerenciamento Escolar".into(),
            description: "API para gerenciamento de alunos e recursos escolares".into(),
            version: "1.0.0".into(),
            contact: ApiContact {
                name: "Equipe de Desenvolvimento".into(),
                email: "dev@escola.com".into(),
            },
        }
    }
}
