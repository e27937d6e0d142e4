//! Journal audit-trail routes (read-only).
//!
//! Journals are never created or edited over HTTP; they exist only as
//! the output of posting and reversal.

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
use folio_core::ledger::ReferenceType;
use folio_db::JournalRepository;
use folio_db::entities::{journal_lines, journals};
use folio_db::repositories::{JournalError, JournalQuery, JournalWithLines};

/// Creates the journal routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/journals", get(list_journals))
        .route("/journals/{journal_id}", get(get_journal))
}

/// Query parameters for listing journals.
#[derive(Debug, Deserialize)]
pub struct ListJournalsQuery {
    /// Filter by source document kind (e.g. `INVOICE`).
    pub reference_type: Option<String>,
    /// Filter by source document id.
    pub reference_id: Option<Uuid>,
    /// Include reversed journals (default false).
    #[serde(default)]
    pub include_reversed: bool,
}

/// Response for a journal header.
#[derive(Debug, Serialize)]
pub struct JournalHeaderResponse {
    /// Journal ID.
    pub id: Uuid,
    /// Source document kind.
    pub reference_type: String,
    /// Source document id.
    pub reference_id: Uuid,
    /// Source document number.
    pub reference_no: String,
    /// Ledger narration.
    pub description: String,
    /// Accounting date.
    pub journal_date: String,
    /// Date of the underlying event.
    pub transaction_date: String,
    /// True when a reversal has cancelled this journal, or when it is a
    /// mirror.
    pub reversed: bool,
}

impl From<journals::Model> for JournalHeaderResponse {
    fn from(model: journals::Model) -> Self {
        Self {
            id: model.id,
            reference_type: ReferenceType::from(model.reference_type).as_str().to_owned(),
            reference_id: model.reference_id,
            reference_no: model.reference_no,
            description: model.description,
            journal_date: model.journal_date.to_string(),
            transaction_date: model.transaction_date.to_string(),
            reversed: model.reversed,
        }
    }
}

/// Response for one journal line.
#[derive(Debug, Serialize)]
pub struct JournalLineResponse {
    /// Line ID.
    pub id: Uuid,
    /// Account the line posts to.
    pub account_id: Uuid,
    /// Debit portion (zero for credit lines).
    pub debit: Decimal,
    /// Credit portion (zero for debit lines).
    pub credit: Decimal,
    /// Exchange rate the posting applied.
    pub exchange_rate: Decimal,
    /// True when a reversal has cancelled this line.
    pub reversed: bool,
}

impl From<journal_lines::Model> for JournalLineResponse {
    fn from(model: journal_lines::Model) -> Self {
        Self {
            id: model.id,
            account_id: model.account_id,
            debit: model.debit,
            credit: model.credit,
            exchange_rate: model.exchange_rate,
            reversed: model.reversed,
        }
    }
}

/// Response for a journal with its lines.
#[derive(Debug, Serialize)]
pub struct JournalResponse {
    /// Journal header.
    #[serde(flatten)]
    pub header: JournalHeaderResponse,
    /// Line items in position order.
    pub lines: Vec<JournalLineResponse>,
}

impl From<JournalWithLines> for JournalResponse {
    fn from(value: JournalWithLines) -> Self {
        Self {
            header: value.journal.into(),
            lines: value.lines.into_iter().map(JournalLineResponse::from).collect(),
        }
    }
}

/// GET `/journals` - List journals, optionally narrowed to one document.
async fn list_journals(
    State(state): State<AppState>,
    Query(query): Query<ListJournalsQuery>,
) -> impl IntoResponse {
    let reference_type = match query
        .reference_type
        .as_deref()
        .map(str::parse::<ReferenceType>)
    {
        None => None,
        Some(Ok(reference_type)) => Some(reference_type.into()),
        Some(Err(_)) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "invalid_request",
                    "message": "Unknown reference type"
                })),
            )
                .into_response();
        }
    };

    let repo = JournalRepository::new((*state.db).clone());
    let filter = JournalQuery {
        reference_type,
        reference_id: query.reference_id,
        include_reversed: query.include_reversed,
    };

    match repo.list(filter).await {
        Ok(journals) => {
            let items: Vec<JournalHeaderResponse> = journals
                .into_iter()
                .map(JournalHeaderResponse::from)
                .collect();
            (StatusCode::OK, Json(json!({ "journals": items }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list journals");
            internal_error()
        }
    }
}

/// GET `/journals/{journal_id}` - Fetch a journal with its lines.
async fn get_journal(
    State(state): State<AppState>,
    Path(journal_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = JournalRepository::new((*state.db).clone());

    match repo.find_by_id(journal_id).await {
        Ok(journal) => {
            (StatusCode::OK, Json(json!(JournalResponse::from(journal)))).into_response()
        }
        Err(JournalError::NotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Journal not found"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to fetch journal");
            internal_error()
        }
    }
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
