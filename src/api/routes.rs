//! Request routing for the HTTP API
//!
//! `route` maps a method, path, query and body to a response without any
//! networking, so the whole API surface can be exercised directly.
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | GET | /api/expenses | 200, array newest first |
//! | POST | /api/expenses | 201, the created expense |
//! | DELETE | /api/expenses?id=<uuid> | 204 |

use hyper::{Method, StatusCode};
use serde::Serialize;

use crate::error::ExpenseError;
use crate::models::{ExpenseId, NewExpense};
use crate::services::ExpenseService;
use crate::storage::Storage;

pub const EXPENSES_PATH: &str = "/api/expenses";

/// A response ready to be written to the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: StatusCode,
    /// JSON body; empty for 204
    pub body: String,
}

impl ApiResponse {
    fn json<T: Serialize>(status: StatusCode, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self { status, body },
            Err(e) => Self::error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        }
    }

    fn error(status: StatusCode, message: impl Into<String>) -> Self {
        let body = serde_json::json!({ "error": message.into() }).to_string();
        Self { status, body }
    }

    fn no_content() -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
            body: String::new(),
        }
    }

    fn from_error(err: &ExpenseError) -> Self {
        let status = match err {
            ExpenseError::NotFound { .. } => StatusCode::NOT_FOUND,
            ExpenseError::Validation(_) | ExpenseError::Json(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::error(status, err.to_string())
    }
}

/// Route a single request against the store
pub fn route(
    storage: &Storage,
    user_id: &str,
    method: &Method,
    path: &str,
    query: Option<&str>,
    body: &[u8],
) -> ApiResponse {
    let path = path.trim_end_matches('/');
    if path != EXPENSES_PATH {
        return ApiResponse::error(StatusCode::NOT_FOUND, "Not found");
    }

    let service = ExpenseService::new(storage).with_user_id(user_id);

    match *method {
        Method::GET => match service.list() {
            Ok(expenses) => ApiResponse::json(StatusCode::OK, &expenses),
            Err(e) => ApiResponse::from_error(&e),
        },
        Method::POST => {
            let new: NewExpense = match serde_json::from_slice(body) {
                Ok(new) => new,
                Err(e) => {
                    return ApiResponse::error(
                        StatusCode::BAD_REQUEST,
                        format!("Invalid expense: {}", e),
                    )
                }
            };
            match service.create(new) {
                Ok(expense) => ApiResponse::json(StatusCode::CREATED, &expense),
                Err(e) => ApiResponse::from_error(&e),
            }
        }
        Method::DELETE => {
            let id = match query_id(query) {
                Ok(id) => id,
                Err(message) => return ApiResponse::error(StatusCode::BAD_REQUEST, message),
            };
            match service.delete(id) {
                Ok(_) => ApiResponse::no_content(),
                Err(e) => ApiResponse::from_error(&e),
            }
        }
        _ => ApiResponse::error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed"),
    }
}

/// Extract and parse the `id` query parameter
fn query_id(query: Option<&str>) -> Result<ExpenseId, String> {
    let raw = query
        .into_iter()
        .flat_map(|q| url::form_urlencoded::parse(q.as_bytes()))
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| "Missing id parameter".to_string())?;

    raw.trim()
        .parse::<ExpenseId>()
        .map_err(|_| format!("Invalid id: '{}'", raw))
}
