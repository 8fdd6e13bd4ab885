use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::Error as SerdeError;

use crate::error::{ConfigError, LoadError};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub enum AppResponse {
    LoadError(String),
    ConfigError(String),
    SerializationError(String),
    NotLoaded(String),
    BadRequest(String),
    Ok(String),
}

impl Display for AppResponse {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AppResponse::LoadError(msg) => write!(f, "Load error: {}", msg),
            AppResponse::ConfigError(msg) => write!(f, "Config error: {}", msg),
            AppResponse::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            AppResponse::NotLoaded(msg) => write!(f, "Not loaded: {}", msg),
            AppResponse::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppResponse::Ok(msg) => write!(f, "Ok: {}", msg),
        }
    }
}

impl From<LoadError> for AppResponse {
    fn from(err: LoadError) -> Self {
        AppResponse::LoadError(format!("{} ({})", err, err.reason()))
    }
}

impl From<ConfigError> for AppResponse {
    fn from(err: ConfigError) -> Self {
        AppResponse::ConfigError(err.to_string())
    }
}

impl From<SerdeError> for AppResponse {
    fn from(err: SerdeError) -> Self {
        AppResponse::SerializationError(format!("JSON serialization error: {}", err))
    }
}

impl AppResponse {
    pub fn success(msg: impl Into<String>) -> Self {
        AppResponse::Ok(msg.into())
    }
}
