//! JSON error responses.
//!
//! Every domain error becomes `{"error": <code>, "message": <text>, ...}`
//! with the error's parameters merged in, so clients can act on values such
//! as `available` and `requested` without parsing the message.
//!
//! Storage and internal failures never echo driver text to the client; it is
//! logged instead.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value, json};
use tracing::error;

use labstock_core::catalog::CatalogError;
use labstock_core::export::ExportError;
use labstock_core::lab::LabError;
use labstock_core::requisition::RequisitionError;
use labstock_core::stock::LedgerError;
use labstock_shared::AppError;

/// An error ready to be rendered as a response.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
    params: Map<String, Value>,
    /// Logged, never sent.
    detail: Option<String>,
}

const INTERNAL_MESSAGE: &str = "An internal error occurred";
const CONFLICT_MESSAGE: &str =
    "The operation conflicted with a concurrent update and was rolled back; retry it";

impl ApiError {
    fn new(status: u16, code: &'static str, message: String) -> Self {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let error = Self {
            status,
            code,
            message,
            params: Map::new(),
            detail: None,
        };
        if status.is_server_error() {
            error.redact(INTERNAL_MESSAGE)
        } else {
            error
        }
    }

    /// Replaces the client message, keeping the original for the log.
    fn redact(mut self, public: &str) -> Self {
        let original = std::mem::replace(&mut self.message, public.to_string());
        self.detail.get_or_insert(original);
        self
    }

    fn with_params(mut self, params: Value) -> Self {
        if let Value::Object(map) = params {
            self.params = map;
        }
        self
    }

    /// HTTP status of this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Some(detail) = &self.detail {
            error!(code = self.code, status = %self.status, detail = %detail, "request failed");
        }

        let mut body = self.params;
        body.insert("error".to_string(), Value::from(self.code));
        body.insert("message".to_string(), Value::from(self.message));

        (self.status, Json(Value::Object(body))).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(e: AppError) -> Self {
        Self::new(e.status_code(), e.error_code(), e.to_string())
    }
}

impl From<sea_orm::DbErr> for ApiError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::Database(e.to_string()).into()
    }
}

impl From<ExportError> for ApiError {
    fn from(e: ExportError) -> Self {
        AppError::Internal(e.to_string()).into()
    }
}

impl From<LedgerError> for ApiError {
    fn from(e: LedgerError) -> Self {
        let params = match &e {
            LedgerError::NotFound { kind, id } => json!({ "kind": kind, "id": id }),
            LedgerError::InvalidState { current_status } => {
                json!({ "current_status": current_status })
            }
            LedgerError::InsufficientStock {
                consumable_id,
                name,
                available,
                requested,
            } => json!({
                "consumable_id": consumable_id,
                "name": name,
                "available": available,
                "requested": requested,
            }),
            LedgerError::NotReturnable { consumable_id } => {
                json!({ "consumable_id": consumable_id })
            }
            LedgerError::QuantityMismatch { expected, provided } => {
                json!({ "expected": expected, "provided": provided })
            }
            LedgerError::AlreadyReturned { borrow_id } => json!({ "borrow_id": borrow_id }),
            LedgerError::InvalidQuantity { quantity } => json!({ "quantity": quantity }),
            LedgerError::StorageFailure { retryable, .. } => json!({ "retryable": retryable }),
            LedgerError::InvalidInput(_) => Value::Null,
        };
        let error = Self::new(e.status_code(), e.error_code(), e.to_string()).with_params(params);
        if e.is_retryable() {
            error.redact(CONFLICT_MESSAGE)
        } else {
            error
        }
    }
}

impl From<RequisitionError> for ApiError {
    fn from(e: RequisitionError) -> Self {
        let params = match &e {
            RequisitionError::MissingField(field) => json!({ "field": field }),
            RequisitionError::InvalidQuantity {
                consumable_id,
                quantity,
            } => json!({ "consumable_id": consumable_id, "quantity": quantity }),
            RequisitionError::ConsumableNotFound(id) => json!({ "consumable_id": id }),
            RequisitionError::OrderNotFound(id) => json!({ "order_id": id }),
            RequisitionError::EmptyOrder | RequisitionError::Database(_) => Value::Null,
        };
        Self::new(e.status_code(), e.error_code(), e.to_string()).with_params(params)
    }
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        let params = match &e {
            CatalogError::MissingField(field) => json!({ "field": field }),
            CatalogError::HasOpenBorrows {
                consumable_id,
                open,
            } => json!({ "consumable_id": consumable_id, "open_borrows": open }),
            CatalogError::InPendingOrders {
                consumable_id,
                orders,
            } => json!({ "consumable_id": consumable_id, "pending_orders": orders }),
            _ => Value::Null,
        };
        Self::new(e.status_code(), e.error_code(), e.to_string()).with_params(params)
    }
}

impl From<LabError> for ApiError {
    fn from(e: LabError) -> Self {
        let params = match &e {
            LabError::MissingField(field) => json!({ "field": field }),
            LabError::LabHasAssets { lab_id, assets } => {
                json!({ "lab_id": lab_id, "assets": assets })
            }
            _ => Value::Null,
        };
        Self::new(e.status_code(), e.error_code(), e.to_string()).with_params(params)
    }
}
