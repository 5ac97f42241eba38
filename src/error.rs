use rocket::http::{ContentType, Status};
use rocket::response::{self, Responder};
use rocket::{Request, Response};
use serde::Serialize;
use std::io::Cursor;

/// Errors returned by the browse API.
#[derive(Debug)]
pub enum ApiError {
    Database(sqlx::Error),
    NotFound(String),
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::Database(_) => Status::InternalServerError,
            ApiError::NotFound(_) => Status::NotFound,
            ApiError::BadRequest(_) => Status::BadRequest,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ApiError::Database(_) => "DatabaseError",
            ApiError::NotFound(_) => "NotFound",
            ApiError::BadRequest(_) => "BadRequest",
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        let label = self.label();
        let message = match self {
            ApiError::Database(err) => {
                log::error!("database error: {}", err);
                "database error".to_string()
            }
            ApiError::NotFound(msg) => {
                log::debug!("not found: {}", msg);
                msg
            }
            ApiError::BadRequest(msg) => {
                log::debug!("bad request: {}", msg);
                msg
            }
        };

        let json = serde_json::to_string(&ErrorBody {
            error: label,
            message,
        })
        .unwrap_or_else(|_| r#"{"error":"SerializationError","message":"failed to serialize error"}"#.to_string());

        Response::build()
            .status(status)
            .header(ContentType::JSON)
            .sized_body(json.len(), Cursor::new(json))
            .ok()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            _ => ApiError::Database(err),
        }
    }
}
