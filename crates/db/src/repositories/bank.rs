//! Bank transaction repository and the settlement cascades.
//!
//! Posting a bank- or cash-paid expense derives a settlement: a bank
//! transaction, the link row tying it to the expense, and an explanation.
//! Posting a reconciliation explains an imported transaction instead.
//! Reversal tears the same rows down again; the helpers here run inside
//! the posting repository's transaction.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use folio_core::posting::{PostingError, SettlementInstruction};
use folio_shared::types::{BankTransactionId, DocumentId};

use crate::entities::sea_orm_active_enums::DocumentStatus;
use crate::entities::{bank_transactions, documents, transaction_explanations, transaction_links};

use super::posting::PostingRepositoryError;

/// Error types for bank transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum BankError {
    /// Bank transaction not found.
    #[error("Bank transaction not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for recording an imported bank transaction.
#[derive(Debug, Clone)]
pub struct CreateBankTransactionInput {
    /// The bank's own chart account.
    pub account_id: Uuid,
    /// Date the money moved.
    pub transaction_date: NaiveDate,
    /// Positive amount moved.
    pub amount: Decimal,
    /// True when the money left the account.
    pub withdrawal: bool,
    /// Statement narration.
    pub description: Option<String>,
}

/// Repository for bank transaction operations.
#[derive(Debug, Clone)]
pub struct BankRepository {
    db: DatabaseConnection,
}

impl BankRepository {
    /// Creates a new bank repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records an imported bank transaction, unexplained.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(
        &self,
        input: CreateBankTransactionInput,
    ) -> Result<bank_transactions::Model, BankError> {
        let now = chrono::Utc::now().into();
        let model = bank_transactions::ActiveModel {
            id: Set(BankTransactionId::new().into_inner()),
            account_id: Set(input.account_id),
            transaction_date: Set(input.transaction_date),
            amount: Set(input.amount),
            withdrawal: Set(input.withdrawal),
            description: Set(input.description),
            explained: Set(false),
            deleted: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(model.insert(&self.db).await?)
    }

    /// Finds a bank transaction by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<bank_transactions::Model>, BankError> {
        Ok(bank_transactions::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Lists transactions still waiting for an explanation.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_unexplained(
        &self,
        account_id: Option<Uuid>,
    ) -> Result<Vec<bank_transactions::Model>, BankError> {
        let mut query = bank_transactions::Entity::find()
            .filter(bank_transactions::Column::Explained.eq(false))
            .filter(bank_transactions::Column::Deleted.eq(false));
        if let Some(account_id) = account_id {
            query = query.filter(bank_transactions::Column::AccountId.eq(account_id));
        }
        Ok(query
            .order_by_asc(bank_transactions::Column::TransactionDate)
            .all(&self.db)
            .await?)
    }
}

// ============================================================
// CASCADE HELPERS (run inside the posting transaction)
// ============================================================

/// Materializes an expense settlement: bank transaction, link row, and
/// explanation. The derived transaction starts out explained since the
/// expense journal already accounts for it.
pub(crate) async fn record_settlement<C: ConnectionTrait>(
    conn: &C,
    expense_id: DocumentId,
    settlement: &SettlementInstruction,
) -> Result<Uuid, DbErr> {
    let now: sea_orm::prelude::DateTimeWithTimeZone = chrono::Utc::now().into();
    let bank_transaction_id = BankTransactionId::new().into_inner();

    bank_transactions::ActiveModel {
        id: Set(bank_transaction_id),
        account_id: Set(settlement.account_id.into_inner()),
        transaction_date: Set(settlement.date),
        amount: Set(settlement.amount),
        withdrawal: Set(true),
        description: Set(Some(settlement.memo.clone())),
        explained: Set(true),
        deleted: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await?;

    transaction_links::ActiveModel {
        id: Set(Uuid::now_v7()),
        expense_id: Set(expense_id.into_inner()),
        bank_transaction_id: Set(bank_transaction_id),
        created_at: Set(now),
    }
    .insert(conn)
    .await?;

    transaction_explanations::ActiveModel {
        id: Set(Uuid::now_v7()),
        bank_transaction_id: Set(bank_transaction_id),
        document_id: Set(expense_id.into_inner()),
        invoice_id: Set(None),
        amount: Set(settlement.amount),
        created_at: Set(now),
    }
    .insert(conn)
    .await?;

    Ok(bank_transaction_id)
}

/// Tears a settlement down again: deletes the explanation and link and
/// soft-deletes the derived bank transaction.
pub(crate) async fn remove_settlement<C: ConnectionTrait>(
    conn: &C,
    expense_id: DocumentId,
) -> Result<(), PostingRepositoryError> {
    let link = transaction_links::Entity::find()
        .filter(transaction_links::Column::ExpenseId.eq(expense_id.into_inner()))
        .one(conn)
        .await?
        .ok_or_else(|| {
            PostingError::CascadeInconsistency(format!(
                "expense {expense_id} has no settlement link"
            ))
        })?;

    transaction_explanations::Entity::delete_many()
        .filter(
            transaction_explanations::Column::BankTransactionId.eq(link.bank_transaction_id),
        )
        .exec(conn)
        .await?;

    let bank_transaction = bank_transactions::Entity::find_by_id(link.bank_transaction_id)
        .one(conn)
        .await?
        .ok_or_else(|| {
            PostingError::CascadeInconsistency(format!(
                "settlement transaction {} is missing",
                link.bank_transaction_id
            ))
        })?;
    let mut active: bank_transactions::ActiveModel = bank_transaction.into();
    active.explained = Set(false);
    active.deleted = Set(true);
    active.updated_at = Set(chrono::Utc::now().into());
    active.update(conn).await?;

    transaction_links::Entity::delete_by_id(link.id).exec(conn).await?;

    Ok(())
}

/// Explains a bank transaction against a reconciliation document.
///
/// Marks the transaction explained and, for invoice targets, settles the
/// linked invoice's due amount.
pub(crate) async fn record_explanation<C: ConnectionTrait>(
    conn: &C,
    bank_transaction_id: Uuid,
    document_id: DocumentId,
    invoice_id: Option<Uuid>,
    amount: Decimal,
) -> Result<(), PostingRepositoryError> {
    let now: sea_orm::prelude::DateTimeWithTimeZone = chrono::Utc::now().into();

    let bank_transaction = bank_transactions::Entity::find_by_id(bank_transaction_id)
        .one(conn)
        .await?
        .ok_or_else(|| {
            PostingError::CascadeInconsistency(format!(
                "bank transaction {bank_transaction_id} is missing"
            ))
        })?;
    let mut active: bank_transactions::ActiveModel = bank_transaction.into();
    active.explained = Set(true);
    active.updated_at = Set(now);
    active.update(conn).await?;

    transaction_explanations::ActiveModel {
        id: Set(Uuid::now_v7()),
        bank_transaction_id: Set(bank_transaction_id),
        document_id: Set(document_id.into_inner()),
        invoice_id: Set(invoice_id),
        amount: Set(amount),
        created_at: Set(now),
    }
    .insert(conn)
    .await?;

    if let Some(invoice_id) = invoice_id {
        settle_invoice(conn, invoice_id, amount).await?;
    }

    Ok(())
}

/// Removes a reconciliation's explanation and reopens the transaction.
///
/// Invoice targets get their due amount and status restored.
pub(crate) async fn unexplain<C: ConnectionTrait>(
    conn: &C,
    document_id: DocumentId,
) -> Result<(), PostingRepositoryError> {
    let explanations = transaction_explanations::Entity::find()
        .filter(transaction_explanations::Column::DocumentId.eq(document_id.into_inner()))
        .all(conn)
        .await?;
    if explanations.is_empty() {
        return Err(PostingError::CascadeInconsistency(format!(
            "reconciliation {document_id} has no explanation"
        ))
        .into());
    }

    for explanation in explanations {
        let bank_transaction =
            bank_transactions::Entity::find_by_id(explanation.bank_transaction_id)
                .one(conn)
                .await?
                .ok_or_else(|| {
                    PostingError::CascadeInconsistency(format!(
                        "bank transaction {} is missing",
                        explanation.bank_transaction_id
                    ))
                })?;
        let mut active: bank_transactions::ActiveModel = bank_transaction.into();
        active.explained = Set(false);
        active.updated_at = Set(chrono::Utc::now().into());
        active.update(conn).await?;

        if let Some(invoice_id) = explanation.invoice_id {
            unsettle_invoice(conn, invoice_id, explanation.amount).await?;
        }

        transaction_explanations::Entity::delete_by_id(explanation.id)
            .exec(conn)
            .await?;
    }

    Ok(())
}

/// Applies a payment to an invoice's due amount, moving it through
/// `PartiallyPaid` to `Paid`.
async fn settle_invoice<C: ConnectionTrait>(
    conn: &C,
    invoice_id: Uuid,
    amount: Decimal,
) -> Result<(), PostingRepositoryError> {
    let invoice = documents::Entity::find_by_id(invoice_id)
        .one(conn)
        .await?
        .ok_or_else(|| {
            PostingError::CascadeInconsistency(format!("linked invoice {invoice_id} is missing"))
        })?;

    let remaining = invoice.due_amount - amount;
    let (due, status) = if remaining <= Decimal::ZERO {
        (Decimal::ZERO, DocumentStatus::Paid)
    } else {
        (remaining, DocumentStatus::PartiallyPaid)
    };

    let mut active: documents::ActiveModel = invoice.into();
    active.due_amount = Set(due);
    active.status = Set(status);
    active.updated_at = Set(chrono::Utc::now().into());
    active.update(conn).await?;
    Ok(())
}

/// Backs a payment out of an invoice's due amount.
async fn unsettle_invoice<C: ConnectionTrait>(
    conn: &C,
    invoice_id: Uuid,
    amount: Decimal,
) -> Result<(), PostingRepositoryError> {
    let invoice = documents::Entity::find_by_id(invoice_id)
        .one(conn)
        .await?
        .ok_or_else(|| {
            PostingError::CascadeInconsistency(format!("linked invoice {invoice_id} is missing"))
        })?;

    let due = (invoice.due_amount + amount).min(invoice.total);
    let status = if due >= invoice.total {
        DocumentStatus::Posted
    } else {
        DocumentStatus::PartiallyPaid
    };

    let mut active: documents::ActiveModel = invoice.into();
    active.due_amount = Set(due);
    active.status = Set(status);
    active.updated_at = Set(chrono::Utc::now().into());
    active.update(conn).await?;
    Ok(())
}
