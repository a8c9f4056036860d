use std::fmt;

use reqwest::{StatusCode, blocking::Response};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use strum_macros::IntoStaticStr;
use thiserror::Error;

/// The record operation a [ClientError] happened during.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
pub enum Operation {
    #[strum(serialize = "creating")]
    Create,
    #[strum(serialize = "retrieving")]
    Retrieve,
    #[strum(serialize = "destroying")]
    Destroy,
}

impl Operation {
    /// Gets the progressive verb for the operation, e.g. `creating`.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    fn decode_verb(&self) -> &'static str {
        match self {
            Operation::Create => "parsing",
            Operation::Retrieve | Operation::Destroy => "decoding",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
#[error("DNSimple API error: {status} - {message}")]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub(crate) fn from_response(resp: Response) -> Self {
        #[derive(Deserialize)]
        struct ErrorResp {
            message: Option<String>,
            errors: Option<JsonValue>,
        }

        let status = resp.status();
        let text = resp
            .text()
            .unwrap_or_else(|e| format!("unable to read response body: {e}"));

        let message = match serde_json::from_str::<ErrorResp>(&text) {
            Ok(ErrorResp {
                message: Some(message),
                ..
            }) => message,
            Ok(ErrorResp {
                errors: Some(errors),
                ..
            }) => flatten_errors(&errors),
            Ok(_) => format!("no error message in {text:?}"),
            Err(e) => format!("unable to get error message from {text:?}: {e}"),
        };

        Self { status, message }
    }

    /// The HTTP status the service responded with.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The reason the service gave for the failure.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Turns `{"name": ["can't be blank"], ...}` into `name: can't be blank; ...`.
fn flatten_errors(errors: &JsonValue) -> String {
    fn reason(value: &JsonValue) -> String {
        match value {
            JsonValue::String(s) => s.clone(),
            JsonValue::Array(items) => items.iter().map(reason).collect::<Vec<_>>().join(", "),
            other => other.to_string(),
        }
    }

    match errors {
        JsonValue::Object(fields) => fields
            .iter()
            .map(|(field, value)| format!("{field}: {}", reason(value)))
            .collect::<Vec<_>>()
            .join("; "),
        other => reason(other),
    }
}

/// Why a request never produced a usable response.
#[derive(Error, Debug)]
pub enum RequestError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),
    #[error("endpoint {0:?} cannot be a base URL")]
    InvalidEndpoint(String),
    #[error("error {operation} record: {source}")]
    Request {
        operation: Operation,
        source: RequestError,
    },
    #[error("error {} record response: {source}", .operation.decode_verb())]
    Decode {
        operation: Operation,
        source: serde_json::Error,
    },
}

impl ClientError {
    /// The operation the error happened during, if it got as far as the service.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            ClientError::Request { operation, .. } | ClientError::Decode { operation, .. } => {
                Some(*operation)
            }
            ClientError::MissingArgument(_) | ClientError::InvalidEndpoint(_) => None,
        }
    }

    /// The error reported by the DNSimple API, if that is what went wrong.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            ClientError::Request {
                source: RequestError::Api(e),
                ..
            } => Some(e),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ClientBuilderError {
    #[error("missing field: {0}")]
    MissingField(String),
    #[error("endpoint {0:?} cannot be a base URL")]
    InvalidEndpoint(String),
    #[error(transparent)]
    UrlParse(#[from] url::ParseError),
}

/// The ttl given when creating a record isn't an integer literal.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("invalid ttl {0:?}")]
pub struct TtlParseError(pub String);
