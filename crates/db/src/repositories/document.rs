//! Document repository: creation, lookup, and the posting-source loader.
//!
//! The loader turns a stored row back into the snapshot the posting
//! strategies consume, resolving the joins (lines, bank transaction,
//! account class) the strategies are not allowed to do themselves.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use folio_core::money::{rounding, vat};
use folio_core::posting::{
    ChartRoles, ExpenseDocument, ExpensePayment, InventoryRef, OpeningBalanceDocument,
    ReconciliationDocument, ReconciliationTarget, SourceDocument, TradeDocument, TradeLine,
    VatPaymentDocument,
};
use folio_shared::types::{AccountId, BankTransactionId, DocumentId, DocumentLineId, ProductId};

use crate::entities::sea_orm_active_enums::{
    DocumentKind, DocumentStatus, PayMode, ReconTarget, TradeDirection,
};
use crate::entities::{accounts, bank_transactions, document_lines, documents};

use super::account;

/// Error types for document operations.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Document not found or soft-deleted.
    #[error("Document not found: {0}")]
    NotFound(Uuid),

    /// Payload fails a structural rule.
    #[error("Invalid document: {0}")]
    Invalid(String),

    /// Bank transaction the document refers to does not exist.
    #[error("Bank transaction not found: {0}")]
    BankTransactionNotFound(Uuid),

    /// A row the stored document refers to is missing.
    #[error("Missing reference data: {0}")]
    MissingData(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for one trading document line.
#[derive(Debug, Clone)]
pub struct CreateTradeLineInput {
    /// Income or expense category account.
    pub category_account_id: Uuid,
    /// Units on the line.
    pub quantity: Decimal,
    /// Price per unit, document currency.
    pub unit_price: Decimal,
    /// Absolute discount on the line.
    pub discount: Decimal,
    /// VAT percentage.
    pub vat_rate: Decimal,
    /// True when the line amount already contains the VAT.
    pub vat_inclusive: bool,
    /// Absolute excise duty in the line amount.
    pub excise_amount: Decimal,
    /// Tracked product, when the line moves stock.
    pub product_id: Option<Uuid>,
    /// Cost per unit for tracked lines.
    pub unit_cost: Option<Decimal>,
}

/// Input for creating an invoice, credit note, or debit note.
#[derive(Debug, Clone)]
pub struct CreateTradeInput {
    /// Human-readable document number.
    pub number: String,
    /// Customer or supplier facing.
    pub direction: TradeDirection,
    /// The contact's receivable or payable account.
    pub party_account_id: Uuid,
    /// Document date.
    pub issue_date: NaiveDate,
    /// Rate into the functional currency.
    pub exchange_rate: Decimal,
    /// Buyer self-accounts for VAT.
    pub reverse_charge: bool,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Requesting user.
    pub created_by: Uuid,
    /// Line items, at least one.
    pub lines: Vec<CreateTradeLineInput>,
}

/// Input for creating an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    /// Human-readable expense number.
    pub number: String,
    /// Expense date.
    pub date: NaiveDate,
    /// Rate into the functional currency.
    pub exchange_rate: Decimal,
    /// Recorded amount, document currency.
    pub amount: Decimal,
    /// VAT percentage.
    pub vat_rate: Decimal,
    /// True when `amount` already contains the VAT.
    pub vat_inclusive: bool,
    /// Buyer self-accounts for VAT.
    pub reverse_charge: bool,
    /// Category account debited.
    pub category_account_id: Uuid,
    /// Settlement mode.
    pub pay_mode: PayMode,
    /// Bank account the money left; required for bank mode.
    pub paid_from_account_id: Option<Uuid>,
    /// Payee's payable account; required for credit mode.
    pub payee_account_id: Option<Uuid>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Requesting user.
    pub created_by: Uuid,
}

/// Input for creating a bank reconciliation.
#[derive(Debug, Clone)]
pub struct CreateReconciliationInput {
    /// Reference number shown on the journal.
    pub number: String,
    /// The bank transaction being explained.
    pub bank_transaction_id: Uuid,
    /// Amount explained, document currency.
    pub amount: Decimal,
    /// Rate into the functional currency.
    pub exchange_rate: Decimal,
    /// What the transaction is explained against.
    pub target: ReconTarget,
    /// Category account; required for category targets.
    pub target_account_id: Option<Uuid>,
    /// Open invoice; required for invoice targets.
    pub linked_document_id: Option<Uuid>,
    /// Requesting user.
    pub created_by: Uuid,
}

/// Input for creating a VAT settlement.
#[derive(Debug, Clone)]
pub struct CreateVatPaymentInput {
    /// Filing reference number.
    pub number: String,
    /// Settlement date.
    pub date: NaiveDate,
    /// Amount settled, always positive.
    pub amount: Decimal,
    /// True for a refund claimed back from the authority.
    pub reclaim: bool,
    /// Bank account the money moves through.
    pub deposit_account_id: Uuid,
    /// Requesting user.
    pub created_by: Uuid,
}

/// Input for creating an opening balance.
#[derive(Debug, Clone)]
pub struct CreateOpeningBalanceInput {
    /// Reference number shown on the journal.
    pub number: String,
    /// Effective date of the balance.
    pub date: NaiveDate,
    /// Account taking on the balance.
    pub account_id: Uuid,
    /// Offset equity account.
    pub offset_account_id: Uuid,
    /// Balance taken on; negative flips both sides.
    pub amount: Decimal,
    /// Requesting user.
    pub created_by: Uuid,
}

/// A document together with its line items.
#[derive(Debug, Clone)]
pub struct DocumentWithLines {
    /// The document row.
    pub document: documents::Model,
    /// Line items in position order; empty for kinds without lines.
    pub lines: Vec<document_lines::Model>,
}

/// Repository for source document operations.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    db: DatabaseConnection,
}

impl DocumentRepository {
    /// Creates a new document repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an invoice in draft.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` when the payload has no lines.
    pub async fn create_invoice(
        &self,
        input: CreateTradeInput,
    ) -> Result<DocumentWithLines, DocumentError> {
        self.create_trade(DocumentKind::Invoice, input).await
    }

    /// Creates a credit note in draft.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` when the payload has no lines.
    pub async fn create_credit_note(
        &self,
        input: CreateTradeInput,
    ) -> Result<DocumentWithLines, DocumentError> {
        self.create_trade(DocumentKind::CreditNote, input).await
    }

    /// Creates a debit note in draft.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` when the payload has no lines.
    pub async fn create_debit_note(
        &self,
        input: CreateTradeInput,
    ) -> Result<DocumentWithLines, DocumentError> {
        self.create_trade(DocumentKind::DebitNote, input).await
    }

    async fn create_trade(
        &self,
        kind: DocumentKind,
        input: CreateTradeInput,
    ) -> Result<DocumentWithLines, DocumentError> {
        if input.lines.is_empty() {
            return Err(DocumentError::Invalid(
                "a trading document needs at least one line".into(),
            ));
        }
        if input.exchange_rate <= Decimal::ZERO {
            return Err(DocumentError::Invalid("exchange rate must be positive".into()));
        }

        let total = trade_total(&input.lines);
        let now = chrono::Utc::now().into();
        let document_id = DocumentId::new().into_inner();

        let document = documents::ActiveModel {
            id: Set(document_id),
            kind: Set(kind),
            number: Set(input.number),
            status: Set(DocumentStatus::Draft),
            document_date: Set(input.issue_date),
            exchange_rate: Set(input.exchange_rate),
            direction: Set(Some(input.direction)),
            reverse_charge: Set(input.reverse_charge),
            party_account_id: Set(Some(input.party_account_id)),
            total: Set(total),
            due_amount: Set(total),
            notes: Set(input.notes),
            created_by: Set(input.created_by),
            deleted: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..empty_document()
        }
        .insert(&self.db)
        .await?;

        let mut lines = Vec::with_capacity(input.lines.len());
        for (position, line) in input.lines.into_iter().enumerate() {
            let model = document_lines::ActiveModel {
                id: Set(DocumentLineId::new().into_inner()),
                document_id: Set(document_id),
                position: Set(i32::try_from(position).unwrap_or(i32::MAX)),
                category_account_id: Set(line.category_account_id),
                quantity: Set(line.quantity),
                unit_price: Set(line.unit_price),
                discount: Set(line.discount),
                vat_rate: Set(line.vat_rate),
                vat_inclusive: Set(line.vat_inclusive),
                excise_amount: Set(line.excise_amount),
                product_id: Set(line.product_id),
                unit_cost: Set(line.unit_cost),
                created_at: Set(now),
            }
            .insert(&self.db)
            .await?;
            lines.push(model);
        }

        Ok(DocumentWithLines { document, lines })
    }

    /// Creates an expense in draft.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` when the pay mode is missing its account.
    pub async fn create_expense(
        &self,
        input: CreateExpenseInput,
    ) -> Result<documents::Model, DocumentError> {
        match input.pay_mode {
            PayMode::Bank if input.paid_from_account_id.is_none() => {
                return Err(DocumentError::Invalid(
                    "bank-paid expenses need the bank account".into(),
                ));
            }
            PayMode::Credit if input.payee_account_id.is_none() => {
                return Err(DocumentError::Invalid(
                    "credit expenses need the payee account".into(),
                ));
            }
            _ => {}
        }

        let now = chrono::Utc::now().into();
        let document = documents::ActiveModel {
            id: Set(DocumentId::new().into_inner()),
            kind: Set(DocumentKind::Expense),
            number: Set(input.number),
            status: Set(DocumentStatus::Draft),
            document_date: Set(input.date),
            exchange_rate: Set(input.exchange_rate),
            reverse_charge: Set(input.reverse_charge),
            total: Set(rounding::round_money(input.amount)),
            amount: Set(Some(input.amount)),
            vat_rate: Set(Some(input.vat_rate)),
            vat_inclusive: Set(Some(input.vat_inclusive)),
            category_account_id: Set(Some(input.category_account_id)),
            pay_mode: Set(Some(input.pay_mode)),
            paid_from_account_id: Set(input.paid_from_account_id),
            payee_account_id: Set(input.payee_account_id),
            notes: Set(input.notes),
            created_by: Set(input.created_by),
            deleted: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..empty_document()
        }
        .insert(&self.db)
        .await?;
        Ok(document)
    }

    /// Creates a reconciliation in draft, dated from its bank transaction.
    ///
    /// # Errors
    ///
    /// Returns `BankTransactionNotFound` when the transaction does not
    /// exist, and `Invalid` when the target is missing its account or
    /// invoice.
    pub async fn create_reconciliation(
        &self,
        input: CreateReconciliationInput,
    ) -> Result<documents::Model, DocumentError> {
        match input.target {
            ReconTarget::Category if input.target_account_id.is_none() => {
                return Err(DocumentError::Invalid(
                    "category reconciliations need the category account".into(),
                ));
            }
            ReconTarget::CustomerInvoice | ReconTarget::SupplierInvoice
                if input.linked_document_id.is_none() =>
            {
                return Err(DocumentError::Invalid(
                    "invoice reconciliations need the linked invoice".into(),
                ));
            }
            _ => {}
        }

        let bank_transaction =
            bank_transactions::Entity::find_by_id(input.bank_transaction_id)
                .one(&self.db)
                .await?
                .ok_or(DocumentError::BankTransactionNotFound(
                    input.bank_transaction_id,
                ))?;

        let now = chrono::Utc::now().into();
        let document = documents::ActiveModel {
            id: Set(DocumentId::new().into_inner()),
            kind: Set(DocumentKind::Reconciliation),
            number: Set(input.number),
            status: Set(DocumentStatus::Draft),
            document_date: Set(bank_transaction.transaction_date),
            exchange_rate: Set(input.exchange_rate),
            total: Set(rounding::round_money(input.amount)),
            amount: Set(Some(input.amount)),
            bank_transaction_id: Set(Some(input.bank_transaction_id)),
            recon_target: Set(Some(input.target)),
            target_account_id: Set(input.target_account_id),
            linked_document_id: Set(input.linked_document_id),
            created_by: Set(input.created_by),
            deleted: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..empty_document()
        }
        .insert(&self.db)
        .await?;
        Ok(document)
    }

    /// Creates a VAT settlement in draft.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` when the amount is not positive.
    pub async fn create_vat_payment(
        &self,
        input: CreateVatPaymentInput,
    ) -> Result<documents::Model, DocumentError> {
        if input.amount <= Decimal::ZERO {
            return Err(DocumentError::Invalid(
                "a VAT settlement amount must be positive".into(),
            ));
        }

        let now = chrono::Utc::now().into();
        let document = documents::ActiveModel {
            id: Set(DocumentId::new().into_inner()),
            kind: Set(DocumentKind::VatPayment),
            number: Set(input.number),
            status: Set(DocumentStatus::Draft),
            document_date: Set(input.date),
            total: Set(rounding::round_money(input.amount)),
            amount: Set(Some(input.amount)),
            reclaim: Set(Some(input.reclaim)),
            deposit_account_id: Set(Some(input.deposit_account_id)),
            created_by: Set(input.created_by),
            deleted: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..empty_document()
        }
        .insert(&self.db)
        .await?;
        Ok(document)
    }

    /// Creates an opening balance in draft.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create_opening_balance(
        &self,
        input: CreateOpeningBalanceInput,
    ) -> Result<documents::Model, DocumentError> {
        let now = chrono::Utc::now().into();
        let document = documents::ActiveModel {
            id: Set(DocumentId::new().into_inner()),
            kind: Set(DocumentKind::OpeningBalance),
            number: Set(input.number),
            status: Set(DocumentStatus::Draft),
            document_date: Set(input.date),
            total: Set(rounding::round_money(input.amount.abs())),
            amount: Set(Some(input.amount)),
            account_id: Set(Some(input.account_id)),
            offset_account_id: Set(Some(input.offset_account_id)),
            created_by: Set(input.created_by),
            deleted: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..empty_document()
        }
        .insert(&self.db)
        .await?;
        Ok(document)
    }

    /// Finds a document with its lines. Soft-deleted rows stay visible
    /// here; only posting refuses them.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_with_lines(
        &self,
        id: Uuid,
    ) -> Result<Option<DocumentWithLines>, DocumentError> {
        let Some(document) = documents::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let lines = lines_of(&self.db, id).await?;
        Ok(Some(DocumentWithLines { document, lines }))
    }

    /// Lists documents, optionally narrowed by kind and status.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(
        &self,
        kind: Option<DocumentKind>,
        status: Option<DocumentStatus>,
    ) -> Result<Vec<documents::Model>, DocumentError> {
        let mut query =
            documents::Entity::find().filter(documents::Column::Deleted.eq(false));
        if let Some(kind) = kind {
            query = query.filter(documents::Column::Kind.eq(kind));
        }
        if let Some(status) = status {
            query = query.filter(documents::Column::Status.eq(status));
        }
        Ok(query
            .order_by_desc(documents::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    /// Loads a document as the snapshot the posting strategies consume.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for missing or soft-deleted documents and
    /// `MissingData` when a referenced row has gone away.
    pub async fn load_source(&self, id: Uuid) -> Result<SourceDocument, DocumentError> {
        let roles = account::chart_roles_on(&self.db)
            .await
            .map_err(|err| match err {
                account::AccountError::Database(db_err) => DocumentError::Database(db_err),
                other => DocumentError::MissingData(other.to_string()),
            })?;
        load_source_on(&self.db, id, &roles).await
    }
}

// ============================================================
// POSTING-SOURCE LOADER
// ============================================================

/// Loads and maps a document on any connection, including an open
/// transaction.
pub(crate) async fn load_source_on<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
    roles: &ChartRoles,
) -> Result<SourceDocument, DocumentError> {
    let document = documents::Entity::find_by_id(id)
        .one(conn)
        .await?
        .filter(|doc| !doc.deleted)
        .ok_or(DocumentError::NotFound(id))?;
    source_from_model(conn, document, roles).await
}

/// Maps a stored document row into a posting snapshot.
pub(crate) async fn source_from_model<C: ConnectionTrait>(
    conn: &C,
    document: documents::Model,
    roles: &ChartRoles,
) -> Result<SourceDocument, DocumentError> {
    match document.kind {
        DocumentKind::Invoice | DocumentKind::CreditNote | DocumentKind::DebitNote => {
            let kind = document.kind;
            let trade = trade_from_model(conn, document).await?;
            Ok(match kind {
                DocumentKind::Invoice => SourceDocument::Invoice(trade),
                DocumentKind::CreditNote => SourceDocument::CreditNote(trade),
                _ => SourceDocument::DebitNote(trade),
            })
        }
        DocumentKind::Expense => Ok(SourceDocument::Expense(expense_from_model(document)?)),
        DocumentKind::Reconciliation => Ok(SourceDocument::Reconciliation(
            reconciliation_from_model(conn, document).await?,
        )),
        DocumentKind::VatPayment => Ok(SourceDocument::VatPayment(vat_payment_from_model(
            document, roles,
        )?)),
        DocumentKind::OpeningBalance => Ok(SourceDocument::OpeningBalance(
            opening_balance_from_model(conn, document).await?,
        )),
    }
}

async fn trade_from_model<C: ConnectionTrait>(
    conn: &C,
    document: documents::Model,
) -> Result<TradeDocument, DocumentError> {
    let direction = document.direction.ok_or_else(|| {
        DocumentError::MissingData(format!("trade document {} has no direction", document.id))
    })?;
    let party_account_id = document.party_account_id.ok_or_else(|| {
        DocumentError::MissingData(format!(
            "trade document {} has no party account",
            document.id
        ))
    })?;

    let lines = lines_of(conn, document.id).await?;
    let lines = lines
        .into_iter()
        .map(|line| TradeLine {
            category_account_id: AccountId::from_uuid(line.category_account_id),
            quantity: line.quantity,
            unit_price: line.unit_price,
            discount: line.discount,
            vat_rate: line.vat_rate,
            vat_inclusive: line.vat_inclusive,
            excise_amount: line.excise_amount,
            inventory: line.product_id.map(|product_id| InventoryRef {
                product_id: ProductId::from_uuid(product_id),
                unit_cost: line.unit_cost.unwrap_or(Decimal::ZERO),
            }),
        })
        .collect();

    Ok(TradeDocument {
        id: DocumentId::from_uuid(document.id),
        number: document.number,
        status: document.status.into(),
        direction: direction.into(),
        party_account_id: AccountId::from_uuid(party_account_id),
        issue_date: document.document_date,
        exchange_rate: document.exchange_rate,
        reverse_charge: document.reverse_charge,
        lines,
    })
}

fn expense_from_model(document: documents::Model) -> Result<ExpenseDocument, DocumentError> {
    let missing = |what: &str| {
        DocumentError::MissingData(format!("expense {} has no {what}", document.id))
    };
    let pay_mode = document.pay_mode.ok_or_else(|| missing("pay mode"))?;
    let payment = match pay_mode {
        PayMode::Bank => ExpensePayment::Bank {
            account_id: AccountId::from_uuid(
                document.paid_from_account_id.ok_or_else(|| missing("bank account"))?,
            ),
        },
        PayMode::Cash => ExpensePayment::Cash,
        PayMode::Credit => ExpensePayment::Credit {
            payee_account_id: AccountId::from_uuid(
                document.payee_account_id.ok_or_else(|| missing("payee account"))?,
            ),
        },
    };

    Ok(ExpenseDocument {
        id: DocumentId::from_uuid(document.id),
        number: document.number,
        status: document.status.into(),
        date: document.document_date,
        exchange_rate: document.exchange_rate,
        amount: document.amount.ok_or_else(|| missing("amount"))?,
        vat_rate: document.vat_rate.unwrap_or(Decimal::ZERO),
        vat_inclusive: document.vat_inclusive.unwrap_or(false),
        reverse_charge: document.reverse_charge,
        category_account_id: AccountId::from_uuid(
            document.category_account_id.ok_or_else(|| missing("category account"))?,
        ),
        payment,
    })
}

async fn reconciliation_from_model<C: ConnectionTrait>(
    conn: &C,
    document: documents::Model,
) -> Result<ReconciliationDocument, DocumentError> {
    let missing = |what: &str| {
        DocumentError::MissingData(format!("reconciliation {} has no {what}", document.id))
    };
    let bank_transaction_id = document
        .bank_transaction_id
        .ok_or_else(|| missing("bank transaction"))?;
    let bank_transaction = bank_transactions::Entity::find_by_id(bank_transaction_id)
        .one(conn)
        .await?
        .ok_or_else(|| {
            DocumentError::MissingData(format!(
                "bank transaction {bank_transaction_id} has gone away"
            ))
        })?;

    let target = match document.recon_target.ok_or_else(|| missing("target"))? {
        ReconTarget::Category => ReconciliationTarget::Category {
            account_id: AccountId::from_uuid(
                document.target_account_id.ok_or_else(|| missing("category account"))?,
            ),
        },
        ReconTarget::CustomerInvoice => ReconciliationTarget::CustomerInvoice,
        ReconTarget::SupplierInvoice => ReconciliationTarget::SupplierInvoice,
    };

    Ok(ReconciliationDocument {
        id: DocumentId::from_uuid(document.id),
        number: document.number,
        status: document.status.into(),
        bank_transaction_id: BankTransactionId::from_uuid(bank_transaction_id),
        bank_account_id: AccountId::from_uuid(bank_transaction.account_id),
        transaction_date: bank_transaction.transaction_date,
        amount: document.amount.ok_or_else(|| missing("amount"))?,
        exchange_rate: document.exchange_rate,
        is_debit_from_bank: bank_transaction.withdrawal,
        target,
    })
}

fn vat_payment_from_model(
    document: documents::Model,
    roles: &ChartRoles,
) -> Result<VatPaymentDocument, DocumentError> {
    let missing = |what: &str| {
        DocumentError::MissingData(format!("VAT payment {} has no {what}", document.id))
    };
    Ok(VatPaymentDocument {
        id: DocumentId::from_uuid(document.id),
        number: document.number,
        status: document.status.into(),
        date: document.document_date,
        amount: document.amount.ok_or_else(|| missing("amount"))?,
        reclaim: document.reclaim.unwrap_or(false),
        vat_account_id: roles.vat_payable,
        deposit_account_id: AccountId::from_uuid(
            document.deposit_account_id.ok_or_else(|| missing("deposit account"))?,
        ),
    })
}

async fn opening_balance_from_model<C: ConnectionTrait>(
    conn: &C,
    document: documents::Model,
) -> Result<OpeningBalanceDocument, DocumentError> {
    let missing = |what: &str| {
        DocumentError::MissingData(format!("opening balance {} has no {what}", document.id))
    };
    let account_id = document.account_id.ok_or_else(|| missing("account"))?;
    let account = accounts::Entity::find_by_id(account_id)
        .one(conn)
        .await?
        .ok_or_else(|| {
            DocumentError::MissingData(format!("account {account_id} has gone away"))
        })?;

    Ok(OpeningBalanceDocument {
        id: DocumentId::from_uuid(document.id),
        number: document.number,
        status: document.status.into(),
        date: document.document_date,
        account_id: AccountId::from_uuid(account_id),
        account_class: account.class.into(),
        offset_account_id: AccountId::from_uuid(
            document.offset_account_id.ok_or_else(|| missing("offset account"))?,
        ),
        amount: document.amount.ok_or_else(|| missing("amount"))?,
    })
}

/// Fetches a document's lines in position order.
pub(crate) async fn lines_of<C: ConnectionTrait>(
    conn: &C,
    document_id: Uuid,
) -> Result<Vec<document_lines::Model>, DbErr> {
    document_lines::Entity::find()
        .filter(document_lines::Column::DocumentId.eq(document_id))
        .order_by_asc(document_lines::Column::Position)
        .all(conn)
        .await
}

/// Gross total of a trading document in its own currency.
fn trade_total(lines: &[CreateTradeLineInput]) -> Decimal {
    let mut total = Decimal::ZERO;
    for line in lines {
        let value = line.quantity * line.unit_price - line.discount;
        let value = if line.vat_inclusive {
            value
        } else {
            value + vat::on_net(value, line.vat_rate)
        };
        total += value;
    }
    rounding::round_money(total)
}

/// An active model with every nullable column already set to NULL, for
/// the `..` spread in the per-kind constructors.
fn empty_document() -> documents::ActiveModel {
    documents::ActiveModel {
        exchange_rate: Set(Decimal::ONE),
        direction: Set(None),
        reverse_charge: Set(false),
        party_account_id: Set(None),
        total: Set(Decimal::ZERO),
        due_amount: Set(Decimal::ZERO),
        amount: Set(None),
        vat_rate: Set(None),
        vat_inclusive: Set(None),
        category_account_id: Set(None),
        pay_mode: Set(None),
        paid_from_account_id: Set(None),
        payee_account_id: Set(None),
        bank_transaction_id: Set(None),
        recon_target: Set(None),
        target_account_id: Set(None),
        linked_document_id: Set(None),
        reclaim: Set(None),
        deposit_account_id: Set(None),
        account_id: Set(None),
        offset_account_id: Set(None),
        notes: Set(None),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(price: Decimal, vat_rate: Decimal, inclusive: bool) -> CreateTradeLineInput {
        CreateTradeLineInput {
            category_account_id: Uuid::now_v7(),
            quantity: dec!(2),
            unit_price: price,
            discount: dec!(0),
            vat_rate,
            vat_inclusive: inclusive,
            excise_amount: dec!(0),
            product_id: None,
            unit_cost: None,
        }
    }

    #[test]
    fn trade_total_adds_vat_to_exclusive_lines_only() {
        let lines = vec![line(dec!(100.00), dec!(5), false), line(dec!(100.00), dec!(5), true)];
        // 200 + 10 VAT on the exclusive line, 200 flat on the inclusive one.
        assert_eq!(trade_total(&lines), dec!(410.00));
    }

    #[test]
    fn trade_total_subtracts_discounts() {
        let mut discounted = line(dec!(50.00), dec!(0), false);
        discounted.discount = dec!(25.00);
        assert_eq!(trade_total(&[discounted]), dec!(75.00));
    }
}
