use std::io::Cursor;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::repository::{EmployeeRepository, RepositoryError};
use super::service::{EmployeeImporter, ImportError};

/// Body accepted by the import endpoint.
#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    pub csv: String,
    #[serde(default)]
    pub initiated_by: Option<Uuid>,
}

/// Router builder exposing the import and listing endpoints.
pub fn employee_router<R>(importer: Arc<EmployeeImporter<R>>) -> Router
where
    R: EmployeeRepository + 'static,
{
    Router::new()
        .route("/api/v1/employees", get(list_handler::<R>))
        .route("/api/v1/employees/import", post(import_handler::<R>))
        .with_state(importer)
}

pub(crate) async fn import_handler<R>(
    State(importer): State<Arc<EmployeeImporter<R>>>,
    Json(request): Json<ImportRequest>,
) -> Response
where
    R: EmployeeRepository + 'static,
{
    let ImportRequest { csv, initiated_by } = request;
    match importer.import_reader(Cursor::new(csv.into_bytes()), initiated_by) {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(ImportError::Decode(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        Err(ImportError::Repository(RepositoryError::Conflict(payroll))) => {
            let payload = json!({
                "error": "payroll number was imported concurrently",
                "payroll_number": payroll,
            });
            (StatusCode::CONFLICT, Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn list_handler<R>(State(importer): State<Arc<EmployeeImporter<R>>>) -> Response
where
    R: EmployeeRepository + 'static,
{
    match importer.employees() {
        Ok(employees) => (StatusCode::OK, Json(employees)).into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
