//! The posting and reversal orchestrators.
//!
//! Everything a posting or reversal touches — the journal, the document
//! status, stock movements, settlement and explanation rows — commits or
//! rolls back as one database transaction. The document row is locked
//! before the status machine is consulted, so two concurrent requests
//! against the same document serialize and the loser sees the winner's
//! status.

use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QuerySelect, Set,
    TransactionTrait,
};
use uuid::Uuid;

use folio_core::document::kind::DocumentKind;
use folio_core::inventory::StockCheck;
use folio_core::inventory::guard::check_stock;
use folio_core::posting::{
    ChartRoles, PostedNotifier, PostingError, PostingService, SourceDocument,
};
use folio_core::reversal::{BankCascade, ReversalService};
use folio_shared::types::{DocumentId, JournalId, UserId};

use crate::entities::documents;
use crate::entities::sea_orm_active_enums::{DocumentStatus, ReferenceType};

use super::document::{self, DocumentError};
use super::{account, bank, inventory, journal};

/// Why a posting or reversal request failed at the repository layer.
#[derive(Debug, thiserror::Error)]
pub enum PostingRepositoryError {
    /// The engine rejected the request; nothing was committed.
    #[error(transparent)]
    Rejected(#[from] PostingError),

    /// The document could not be loaded as a posting source.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Outcome of a successful posting.
#[derive(Debug, Clone)]
pub struct PostedReceipt {
    /// The posted document.
    pub document_id: Uuid,
    /// Status the document advanced to.
    pub status: DocumentStatus,
    /// The journal the posting persisted.
    pub journal: crate::entities::journals::Model,
    /// Number of lines on the journal.
    pub lines_posted: usize,
}

/// Outcome of a successful reversal.
#[derive(Debug, Clone)]
pub struct ReversedReceipt {
    /// The reversed document.
    pub document_id: Uuid,
    /// Status the document wound back to.
    pub status: DocumentStatus,
    /// The mirror journal cancelling the original lines.
    pub mirror: crate::entities::journals::Model,
    /// Number of original lines flagged by this reversal.
    pub lines_reversed: u64,
}

/// Notifier that reports postings through the service's log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNotifier;

impl PostedNotifier for LoggingNotifier {
    fn journal_posted(&self, document: DocumentId, kind: DocumentKind, journal: JournalId) {
        tracing::info!(%document, kind = kind.as_str(), %journal, "journal posted");
    }
}

/// Repository running posting and reversal as single units of work.
#[derive(Clone)]
pub struct PostingRepository {
    db: DatabaseConnection,
    notifier: Arc<dyn PostedNotifier>,
}

impl PostingRepository {
    /// Creates a posting repository that logs posted notifications.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            notifier: Arc::new(LoggingNotifier),
        }
    }

    /// Replaces the posted-notification hook.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn PostedNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Posts a document: derives its balanced journal, persists it, applies
    /// the side effects, and advances the document status, all in one
    /// transaction.
    ///
    /// The notification hook fires after commit and cannot fail the
    /// posting.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyPosted` when the document is at or beyond the posted
    /// state, `MissingReferenceData` when a required chart lookup finds
    /// nothing, and `Unbalanced` when the derived lines do not satisfy the
    /// double-entry rules. Any error rolls the whole unit back.
    pub async fn post(
        &self,
        document_id: Uuid,
        user_id: Uuid,
    ) -> Result<PostedReceipt, PostingRepositoryError> {
        let txn = self.db.begin().await?;

        // The status check and the write that advances it must not let a
        // second poster in between them.
        let document = documents::Entity::find_by_id(document_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .filter(|doc| !doc.deleted)
            .ok_or(DocumentError::NotFound(document_id))?;

        let roles = chart_roles(&txn).await?;
        let source = document::source_from_model(&txn, document.clone(), &roles).await?;
        let plan = PostingService::derive(&source, &roles, UserId::from_uuid(user_id))?;

        let lines_posted = plan.journal.lines().len();
        let journal = journal::insert_journal_on(&txn, &plan.journal, false).await?;

        inventory::apply_stock_effects(&txn, source.id(), &plan.stock_effects).await?;

        if let Some(settlement) = &plan.settlement {
            bank::record_settlement(&txn, source.id(), settlement).await?;
        }

        if let SourceDocument::Reconciliation(recon) = &source {
            bank::record_explanation(
                &txn,
                recon.bank_transaction_id.into_inner(),
                source.id(),
                document.linked_document_id,
                document.amount.unwrap_or(Decimal::ZERO),
            )
            .await?;
        }

        let status: DocumentStatus = plan.new_status.into();
        let mut active: documents::ActiveModel = document.into();
        active.status = Set(status);
        active.updated_at = Set(chrono::Utc::now().into());
        active.update(&txn).await?;

        txn.commit().await?;

        self.notifier
            .journal_posted(source.id(), source.kind(), JournalId::from_uuid(journal.id));

        Ok(PostedReceipt {
            document_id,
            status,
            journal,
            lines_posted,
        })
    }

    /// Reverses a posted document: flags its active lines and journals,
    /// books the mirror journal, winds the status back, and retires the
    /// posting's side effects, all in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `NotPosted` when the document never posted,
    /// `AlreadyReversed` when every line is already flagged, and
    /// `CascadeInconsistency` when a row the cascade expects has gone
    /// missing. Any error rolls the whole unit back.
    pub async fn reverse(
        &self,
        document_id: Uuid,
        user_id: Uuid,
        comment: Option<&str>,
    ) -> Result<ReversedReceipt, PostingRepositoryError> {
        let txn = self.db.begin().await?;

        let document = documents::Entity::find_by_id(document_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .filter(|doc| !doc.deleted)
            .ok_or(DocumentError::NotFound(document_id))?;

        let roles = chart_roles(&txn).await?;
        let source = document::source_from_model(&txn, document.clone(), &roles).await?;

        let reference_type: ReferenceType = source.reference_type().into();
        let posted = journal::posted_lines_on(&txn, reference_type, document_id).await?;

        let plan = ReversalService::plan(
            &source,
            &posted,
            chrono::Utc::now().date_naive(),
            UserId::from_uuid(user_id),
            comment,
        )?;

        let lines_reversed =
            journal::flag_reversed_on(&txn, reference_type, document_id, plan.mark_lines_deleted)
                .await?;
        let mirror = journal::insert_journal_on(&txn, &plan.mirror, true).await?;

        inventory::apply_stock_effects(&txn, source.id(), &plan.stock_effects).await?;

        match plan.bank_cascade {
            BankCascade::RemoveSettlement => bank::remove_settlement(&txn, source.id()).await?,
            BankCascade::Unexplain => bank::unexplain(&txn, source.id()).await?,
            BankCascade::None => {}
        }

        let status: DocumentStatus = plan.reverted_status.into();
        let total = document.total;
        let notes = plan
            .notes_append
            .as_deref()
            .map(|comment| appended_notes(document.notes.as_deref(), comment));

        let mut active: documents::ActiveModel = document.into();
        active.status = Set(status);
        if plan.reset_due_amount {
            active.due_amount = Set(total);
        }
        if let Some(notes) = notes {
            active.notes = Set(Some(notes));
        }
        active.updated_at = Set(chrono::Utc::now().into());
        active.update(&txn).await?;

        txn.commit().await?;

        Ok(ReversedReceipt {
            document_id,
            status,
            mirror,
            lines_reversed,
        })
    }

    /// Runs the pre-posting stock guard for a trading document.
    ///
    /// # Errors
    ///
    /// Returns an error when the document cannot be loaded.
    pub async fn check_stock(
        &self,
        document_id: Uuid,
    ) -> Result<StockCheck, PostingRepositoryError> {
        let roles = chart_roles(&self.db).await?;
        let source = document::load_source_on(&self.db, document_id, &roles).await?;

        let tracked = match &source {
            SourceDocument::Invoice(doc)
            | SourceDocument::CreditNote(doc)
            | SourceDocument::DebitNote(doc) => doc.tracked_lines(),
            _ => Vec::new(),
        };

        let product_ids: Vec<Uuid> = tracked
            .iter()
            .map(|line| line.product_id.into_inner())
            .collect();
        let levels = inventory::stock_levels_on(&self.db, &product_ids).await?;

        Ok(check_stock(&tracked, |product_id| {
            levels.get(&product_id.into_inner()).copied()
        }))
    }
}

/// Resolves the well-known chart accounts inside the unit of work.
///
/// A missing role surfaces as `MissingReferenceData`: the chart is
/// reference data the strategies cannot post without.
async fn chart_roles<C: ConnectionTrait>(conn: &C) -> Result<ChartRoles, PostingRepositoryError> {
    account::chart_roles_on(conn).await.map_err(|err| match err {
        account::AccountError::Database(db_err) => db_err.into(),
        other => PostingError::MissingReferenceData(other.to_string()).into(),
    })
}

/// Joins a reversal comment onto existing notes.
fn appended_notes(existing: Option<&str>, comment: &str) -> String {
    match existing {
        Some(notes) if !notes.is_empty() => format!("{notes}\n{comment}"),
        _ => comment.to_owned(),
    }
}
