//! Journal repository: audit-trail reads and the ledger-side writes the
//! posting orchestrators run inside their transaction.
//!
//! Journals are append-only. The helpers here insert a derived journal
//! with its lines, fetch a document's full posting history, and flip the
//! one-way reversal flags; nothing ever updates an amount or deletes a
//! row.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use folio_core::ledger::{Journal, Side};
use folio_core::reversal::PostedLine;
use folio_shared::types::{AccountId, JournalId, JournalLineId};

use crate::entities::sea_orm_active_enums::ReferenceType;
use crate::entities::{journal_lines, journals};

/// Error types for journal operations.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    /// Journal not found.
    #[error("Journal not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Filters for listing journals.
#[derive(Debug, Clone, Copy, Default)]
pub struct JournalQuery {
    /// Narrow to journals derived from this kind of document.
    pub reference_type: Option<ReferenceType>,
    /// Narrow to journals derived from this document.
    pub reference_id: Option<Uuid>,
    /// When false, reversed journals are filtered out.
    pub include_reversed: bool,
}

/// A journal header together with its lines in position order.
#[derive(Debug, Clone)]
pub struct JournalWithLines {
    /// The journal header.
    pub journal: journals::Model,
    /// Line items in position order.
    pub lines: Vec<journal_lines::Model>,
}

/// Repository for journal reads.
#[derive(Debug, Clone)]
pub struct JournalRepository {
    db: DatabaseConnection,
}

impl JournalRepository {
    /// Creates a new journal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a journal with its lines.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no journal has the id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<JournalWithLines, JournalError> {
        let journal = journals::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(JournalError::NotFound(id))?;
        let lines = lines_of(&self.db, id).await?;
        Ok(JournalWithLines { journal, lines })
    }

    /// Lists journals matching the query, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self, query: JournalQuery) -> Result<Vec<journals::Model>, JournalError> {
        let mut find = journals::Entity::find().filter(journals::Column::Deleted.eq(false));
        if let Some(reference_type) = query.reference_type {
            find = find.filter(journals::Column::ReferenceType.eq(reference_type));
        }
        if let Some(reference_id) = query.reference_id {
            find = find.filter(journals::Column::ReferenceId.eq(reference_id));
        }
        if !query.include_reversed {
            find = find.filter(journals::Column::Reversed.eq(false));
        }
        Ok(find
            .order_by_desc(journals::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    /// The full posting history of a document, mirrors included.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn history_for(
        &self,
        reference_type: ReferenceType,
        reference_id: Uuid,
    ) -> Result<Vec<JournalWithLines>, JournalError> {
        let headers = journals::Entity::find()
            .filter(journals::Column::ReferenceType.eq(reference_type))
            .filter(journals::Column::ReferenceId.eq(reference_id))
            .order_by_asc(journals::Column::CreatedAt)
            .all(&self.db)
            .await?;

        let mut history = Vec::with_capacity(headers.len());
        for journal in headers {
            let lines = lines_of(&self.db, journal.id).await?;
            history.push(JournalWithLines { journal, lines });
        }
        Ok(history)
    }
}

// ============================================================
// TRANSACTION HELPERS (run inside the posting transaction)
// ============================================================

/// Persists a derived journal with its lines.
///
/// Mirror journals are inserted with `reversed` already set so the pair
/// they complete drops out of active ledger views together.
pub(crate) async fn insert_journal_on<C: ConnectionTrait>(
    conn: &C,
    journal: &Journal,
    reversed: bool,
) -> Result<journals::Model, DbErr> {
    let now: sea_orm::prelude::DateTimeWithTimeZone = chrono::Utc::now().into();
    let journal_id = JournalId::new().into_inner();

    let header = journals::ActiveModel {
        id: Set(journal_id),
        reference_type: Set(journal.reference.reference_type.into()),
        reference_id: Set(journal.reference.reference_id.into_inner()),
        reference_no: Set(journal.reference_no.clone()),
        description: Set(journal.description.clone()),
        journal_date: Set(journal.journal_date),
        transaction_date: Set(journal.transaction_date),
        created_by: Set(journal.created_by.into_inner()),
        reversed: Set(reversed),
        deleted: Set(false),
        created_at: Set(now),
    }
    .insert(conn)
    .await?;

    for (position, line) in journal.lines().iter().enumerate() {
        journal_lines::ActiveModel {
            id: Set(JournalLineId::new().into_inner()),
            journal_id: Set(journal_id),
            account_id: Set(line.account_id.into_inner()),
            position: Set(i32::try_from(position).unwrap_or(i32::MAX)),
            debit: Set(line.debit_amount()),
            credit: Set(line.credit_amount()),
            exchange_rate: Set(line.exchange_rate),
            posting_date: Set(line.posting_date),
            memo: Set(line.memo.clone()),
            reversed: Set(reversed),
            deleted: Set(false),
            created_at: Set(now),
        }
        .insert(conn)
        .await?;
    }

    Ok(header)
}

/// Every persisted line referencing a document, as the reversal planner
/// sees them. Mirrors are included; their lines carry the reversal flag
/// from birth, which is what keeps them out of the active set.
pub(crate) async fn posted_lines_on<C: ConnectionTrait>(
    conn: &C,
    reference_type: ReferenceType,
    reference_id: Uuid,
) -> Result<Vec<PostedLine>, DbErr> {
    let rows = journal_lines::Entity::find()
        .inner_join(journals::Entity)
        .filter(journals::Column::ReferenceType.eq(reference_type))
        .filter(journals::Column::ReferenceId.eq(reference_id))
        .order_by_asc(journal_lines::Column::CreatedAt)
        .order_by_asc(journal_lines::Column::Position)
        .all(conn)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let side = if row.debit.is_zero() {
                Side::Credit
            } else {
                Side::Debit
            };
            PostedLine {
                account_id: AccountId::from_uuid(row.account_id),
                side,
                amount: row.debit.max(row.credit),
                exchange_rate: row.exchange_rate,
                reversed: row.reversed,
            }
        })
        .collect())
}

/// Flips the reversal flag on a document's active journals and lines.
///
/// Already-flagged rows are left untouched, so a second pass over the
/// same document is a no-op. When `soft_delete` is set, the rows are
/// additionally marked deleted; expense reversal uses this since the
/// original keeps no posted form to return to.
pub(crate) async fn flag_reversed_on<C: ConnectionTrait>(
    conn: &C,
    reference_type: ReferenceType,
    reference_id: Uuid,
    soft_delete: bool,
) -> Result<u64, DbErr> {
    let headers = journals::Entity::find()
        .filter(journals::Column::ReferenceType.eq(reference_type))
        .filter(journals::Column::ReferenceId.eq(reference_id))
        .filter(journals::Column::Reversed.eq(false))
        .all(conn)
        .await?;

    let mut flagged = 0;
    for journal in headers {
        let journal_id = journal.id;

        let mut lines_update = journal_lines::Entity::update_many()
            .col_expr(journal_lines::Column::Reversed, Expr::value(true))
            .filter(journal_lines::Column::JournalId.eq(journal_id))
            .filter(journal_lines::Column::Reversed.eq(false));
        if soft_delete {
            lines_update = lines_update.col_expr(journal_lines::Column::Deleted, Expr::value(true));
        }
        flagged += lines_update.exec(conn).await?.rows_affected;

        let mut active: journals::ActiveModel = journal.into();
        active.reversed = Set(true);
        if soft_delete {
            active.deleted = Set(true);
        }
        active.update(conn).await?;
    }

    Ok(flagged)
}

/// Fetches a journal's lines in position order.
async fn lines_of<C: ConnectionTrait>(
    conn: &C,
    journal_id: Uuid,
) -> Result<Vec<journal_lines::Model>, DbErr> {
    journal_lines::Entity::find()
        .filter(journal_lines::Column::JournalId.eq(journal_id))
        .order_by_asc(journal_lines::Column::Position)
        .all(conn)
        .await
}
