//! Source document routes: reads and the pre-posting stock guard.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::AppState;
use folio_core::document::kind::DocumentKind;
use folio_core::document::status::DocumentStatus;
use folio_db::repositories::{DocumentRepository, DocumentWithLines, PostingRepository};

/// Creates the document routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/documents", get(list_documents))
        .route("/documents/{document_id}", get(get_document))
        .route("/documents/{document_id}/stock-check", get(stock_check))
}

/// Query parameters for listing documents.
#[derive(Debug, Deserialize)]
pub struct ListDocumentsQuery {
    /// Filter by document kind.
    pub kind: Option<String>,
    /// Filter by status.
    pub status: Option<String>,
}

/// Response for a document in a listing.
#[derive(Debug, Serialize)]
pub struct DocumentListItem {
    /// Document ID.
    pub id: Uuid,
    /// Document kind.
    pub kind: String,
    /// Human-readable number.
    pub number: String,
    /// Lifecycle status.
    pub status: String,
    /// Document date.
    pub document_date: String,
    /// Gross total.
    pub total: Decimal,
    /// Outstanding amount.
    pub due_amount: Decimal,
}

/// Response for one document with its lines.
#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    /// Document header.
    #[serde(flatten)]
    pub header: DocumentListItem,
    /// Exchange rate into the functional currency.
    pub exchange_rate: Decimal,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Line items.
    pub lines: Vec<DocumentLineResponse>,
}

/// Response for one document line.
#[derive(Debug, Serialize)]
pub struct DocumentLineResponse {
    /// Line ID.
    pub id: Uuid,
    /// Category account the line books against.
    pub category_account_id: Uuid,
    /// Units on the line.
    pub quantity: Decimal,
    /// Price per unit.
    pub unit_price: Decimal,
    /// VAT percentage.
    pub vat_rate: Decimal,
    /// Tracked product, when the line moves stock.
    pub product_id: Option<Uuid>,
}

impl From<DocumentWithLines> for DocumentResponse {
    fn from(value: DocumentWithLines) -> Self {
        let doc = value.document;
        Self {
            header: DocumentListItem {
                id: doc.id,
                kind: kind_name(&doc.kind),
                number: doc.number,
                status: status_name(&doc.status),
                document_date: doc.document_date.to_string(),
                total: doc.total,
                due_amount: doc.due_amount,
            },
            exchange_rate: doc.exchange_rate,
            notes: doc.notes,
            lines: value
                .lines
                .into_iter()
                .map(|line| DocumentLineResponse {
                    id: line.id,
                    category_account_id: line.category_account_id,
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                    vat_rate: line.vat_rate,
                    product_id: line.product_id,
                })
                .collect(),
        }
    }
}

/// GET `/documents` - List documents, optionally narrowed by kind and
/// status.
async fn list_documents(
    State(state): State<AppState>,
    Query(query): Query<ListDocumentsQuery>,
) -> impl IntoResponse {
    let kind = match query.kind.as_deref().map(str::parse::<DocumentKind>) {
        None => None,
        Some(Ok(kind)) => Some(kind.into()),
        Some(Err(_)) => return bad_request("Unknown document kind"),
    };
    let status = match query.status.as_deref().map(str::parse::<DocumentStatus>) {
        None => None,
        Some(Ok(status)) => Some(status.into()),
        Some(Err(_)) => return bad_request("Unknown document status"),
    };

    let repo = DocumentRepository::new((*state.db).clone());
    match repo.list(kind, status).await {
        Ok(documents) => {
            let items: Vec<DocumentListItem> = documents
                .into_iter()
                .map(|doc| DocumentListItem {
                    id: doc.id,
                    kind: kind_name(&doc.kind),
                    number: doc.number,
                    status: status_name(&doc.status),
                    document_date: doc.document_date.to_string(),
                    total: doc.total,
                    due_amount: doc.due_amount,
                })
                .collect();
            (StatusCode::OK, Json(json!({ "documents": items }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list documents");
            internal_error()
        }
    }
}

/// GET `/documents/{document_id}` - Fetch a document with its lines.
async fn get_document(
    State(state): State<AppState>,
    Path(document_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = DocumentRepository::new((*state.db).clone());

    match repo.find_with_lines(document_id).await {
        Ok(Some(document)) => {
            (StatusCode::OK, Json(json!(DocumentResponse::from(document)))).into_response()
        }
        Ok(None) => not_found(),
        Err(e) => {
            error!(error = %e, "Failed to fetch document");
            internal_error()
        }
    }
}

/// GET `/documents/{document_id}/stock-check` - Run the pre-posting stock
/// guard for a trading document.
async fn stock_check(
    State(state): State<AppState>,
    Path(document_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = PostingRepository::new((*state.db).clone());

    match repo.check_stock(document_id).await {
        Ok(check) => (
            StatusCode::OK,
            Json(json!({
                "available": check.available(),
                "tracked_lines": check.tracked_lines,
                "total_on_hand": check.total_on_hand,
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Stock check failed");
            super::postings::posting_error_response(&e)
        }
    }
}

fn kind_name(kind: &folio_db::entities::sea_orm_active_enums::DocumentKind) -> String {
    DocumentKind::from(*kind).as_str().to_owned()
}

fn status_name(status: &folio_db::entities::sea_orm_active_enums::DocumentStatus) -> String {
    DocumentStatus::from(*status).as_str().to_owned()
}

fn bad_request(message: &str) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "invalid_request",
            "message": message
        })),
    )
        .into_response()
}

fn not_found() -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "not_found",
            "message": "Document not found"
        })),
    )
        .into_response()
}

fn internal_error() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": "An error occurred"
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_db::entities::sea_orm_active_enums as db_enums;

    #[test]
    fn test_kind_round_trips_through_query_string() {
        let kind: DocumentKind = "credit_note".parse().unwrap();
        let db_kind: db_enums::DocumentKind = kind.into();
        assert_eq!(kind_name(&db_kind), "credit_note");
    }

    #[test]
    fn test_status_round_trips_through_query_string() {
        let status: DocumentStatus = "partially_paid".parse().unwrap();
        let db_status: db_enums::DocumentStatus = status.into();
        assert_eq!(status_name(&db_status), "partially_paid");
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        assert!("journal".parse::<DocumentKind>().is_err());
    }
}
