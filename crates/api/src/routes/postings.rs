//! Posting and reversal routes.
//!
//! These are the engine's write operations: `post` turns a document into
//! its balanced journal, `reverse` cancels a previous posting. Both are
//! atomic in the repository; the handlers only translate errors into
//! status codes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::AppState;
use folio_core::posting::PostingError;
use folio_db::PostingRepository;
use folio_db::repositories::{DocumentError, PostingRepositoryError};

/// Creates the posting routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/documents/{document_id}/post", post(post_document))
        .route("/documents/{document_id}/reverse", post(reverse_document))
}

/// Request body for posting a document.
#[derive(Debug, Deserialize)]
pub struct PostRequest {
    /// User on whose behalf the journal is posted.
    pub user_id: Uuid,
}

/// Request body for reversing a document.
#[derive(Debug, Deserialize)]
pub struct ReverseRequest {
    /// User performing the reversal.
    pub user_id: Uuid,
    /// Optional comment appended to the document's notes.
    pub comment: Option<String>,
}

/// POST `/documents/{document_id}/post` - Post a document to the ledger.
async fn post_document(
    State(state): State<AppState>,
    Path(document_id): Path<Uuid>,
    Json(payload): Json<PostRequest>,
) -> impl IntoResponse {
    let repo = PostingRepository::new((*state.db).clone());

    match repo.post(document_id, payload.user_id).await {
        Ok(receipt) => {
            info!(%document_id, journal_id = %receipt.journal.id, "document posted");
            (
                StatusCode::OK,
                Json(json!({
                    "document_id": receipt.document_id,
                    "status": folio_core::document::status::DocumentStatus::from(receipt.status).as_str(),
                    "journal_id": receipt.journal.id,
                    "lines_posted": receipt.lines_posted,
                })),
            )
                .into_response()
        }
        Err(e) => posting_error_response(&e),
    }
}

/// POST `/documents/{document_id}/reverse` - Reverse a posted document.
async fn reverse_document(
    State(state): State<AppState>,
    Path(document_id): Path<Uuid>,
    Json(payload): Json<ReverseRequest>,
) -> impl IntoResponse {
    let repo = PostingRepository::new((*state.db).clone());

    match repo
        .reverse(document_id, payload.user_id, payload.comment.as_deref())
        .await
    {
        Ok(receipt) => {
            info!(%document_id, mirror_id = %receipt.mirror.id, "document reversed");
            (
                StatusCode::OK,
                Json(json!({
                    "document_id": receipt.document_id,
                    "status": folio_core::document::status::DocumentStatus::from(receipt.status).as_str(),
                    "mirror_journal_id": receipt.mirror.id,
                    "lines_reversed": receipt.lines_reversed,
                })),
            )
                .into_response()
        }
        Err(e) => posting_error_response(&e),
    }
}

/// Maps a repository error into a JSON error response.
///
/// State-machine violations and cascade damage come back as 409, missing
/// reference data and unbalanced derivations as 422, anything unexpected
/// as 500.
pub(super) fn posting_error_response(err: &PostingRepositoryError) -> axum::response::Response {
    match err {
        PostingRepositoryError::Rejected(posting) => {
            let status = match posting {
                PostingError::AlreadyPosted(_)
                | PostingError::NotPosted(_)
                | PostingError::AlreadyReversed(_)
                | PostingError::CascadeInconsistency(_) => StatusCode::CONFLICT,
                PostingError::MissingReferenceData(_) | PostingError::Unbalanced(_) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
            };
            (
                status,
                Json(json!({
                    "error": posting.code(),
                    "message": posting.to_string()
                })),
            )
                .into_response()
        }
        PostingRepositoryError::Document(DocumentError::NotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "Document not found"
            })),
        )
            .into_response(),
        PostingRepositoryError::Document(
            doc_err @ (DocumentError::Invalid(_)
            | DocumentError::BankTransactionNotFound(_)
            | DocumentError::MissingData(_)),
        ) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": "MISSING_REFERENCE_DATA",
                "message": doc_err.to_string()
            })),
        )
            .into_response(),
        other => {
            error!(error = %other, "Posting operation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred"
                })),
            )
                .into_response()
        }
    }
}
