//! Initial database migration.
//!
//! Creates the posting schema: enum types, the chart of accounts,
//! products and inventory, bank transactions, source documents, and the
//! journal tables with their double-entry checks.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: CHART OF ACCOUNTS
        // ============================================================
        db.execute_unprepared(ACCOUNTS_SQL).await?;

        // ============================================================
        // PART 3: PRODUCTS & INVENTORY
        // ============================================================
        db.execute_unprepared(PRODUCTS_SQL).await?;
        db.execute_unprepared(INVENTORIES_SQL).await?;

        // ============================================================
        // PART 4: BANK TRANSACTIONS
        // ============================================================
        db.execute_unprepared(BANK_TRANSACTIONS_SQL).await?;

        // ============================================================
        // PART 5: SOURCE DOCUMENTS
        // ============================================================
        db.execute_unprepared(DOCUMENTS_SQL).await?;
        db.execute_unprepared(DOCUMENT_LINES_SQL).await?;

        // ============================================================
        // PART 6: INVENTORY MOVEMENT HISTORY
        // ============================================================
        db.execute_unprepared(INVENTORY_HISTORIES_SQL).await?;

        // ============================================================
        // PART 7: JOURNALS
        // ============================================================
        db.execute_unprepared(JOURNALS_SQL).await?;
        db.execute_unprepared(JOURNAL_LINES_SQL).await?;

        // ============================================================
        // PART 8: SETTLEMENT & EXPLANATION LINKS
        // ============================================================
        db.execute_unprepared(TRANSACTION_EXPLANATIONS_SQL).await?;
        db.execute_unprepared(TRANSACTION_LINKS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Source document kinds
CREATE TYPE document_kind AS ENUM (
    'invoice',
    'expense',
    'credit_note',
    'debit_note',
    'reconciliation',
    'vat_payment',
    'opening_balance'
);

-- Document lifecycle
CREATE TYPE document_status AS ENUM (
    'draft',
    'pending',
    'posted',
    'partially_paid',
    'paid'
);

-- Journal reference stamps. Upper-case storage spelling kept from the
-- books, misspelling included.
CREATE TYPE reference_type AS ENUM (
    'INVOICE',
    'EXPENSE',
    'CREDIT_NOTE',
    'DEBIT_NOTE',
    'TRANSACTION_RECONSILE',
    'TRANSACTION_RECONSILE_INVOICE',
    'VAT_PAYMENT',
    'OPENING_BALANCE'
);

-- Broad account classification
CREATE TYPE account_class AS ENUM (
    'asset',
    'bank',
    'cash',
    'receivable',
    'inventory',
    'liability',
    'payable',
    'equity',
    'income',
    'expense'
);

-- Trading document direction
CREATE TYPE trade_direction AS ENUM ('sales', 'purchase');

-- Expense settlement mode
CREATE TYPE pay_mode AS ENUM ('bank', 'cash', 'credit');

-- Reconciliation target
CREATE TYPE recon_target AS ENUM ('category', 'customer_invoice', 'supplier_invoice');

-- Inventory movement direction
CREATE TYPE movement_flow AS ENUM ('sale', 'purchase', 'return_in', 'return_out');
";

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    code VARCHAR(20) NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    class account_class NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_accounts_class ON accounts(class);
";

const PRODUCTS_SQL: &str = r"
CREATE TABLE products (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    sku VARCHAR(100) UNIQUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const INVENTORIES_SQL: &str = r"
CREATE TABLE inventories (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    product_id UUID NOT NULL UNIQUE REFERENCES products(id) ON DELETE CASCADE,
    stock_on_hand NUMERIC(19, 4) NOT NULL DEFAULT 0,
    quantity_sold NUMERIC(19, 4) NOT NULL DEFAULT 0,
    purchase_quantity NUMERIC(19, 4) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const BANK_TRANSACTIONS_SQL: &str = r"
CREATE TABLE bank_transactions (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    account_id UUID NOT NULL REFERENCES accounts(id),
    transaction_date DATE NOT NULL,
    amount NUMERIC(19, 4) NOT NULL,
    withdrawal BOOLEAN NOT NULL,
    description TEXT,
    explained BOOLEAN NOT NULL DEFAULT false,
    deleted BOOLEAN NOT NULL DEFAULT false,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_bank_amount_positive CHECK (amount > 0)
);

CREATE INDEX idx_bank_txn_account ON bank_transactions(account_id, transaction_date);
CREATE INDEX idx_bank_txn_unexplained ON bank_transactions(account_id) WHERE NOT explained AND NOT deleted;
";

const DOCUMENTS_SQL: &str = r"
CREATE TABLE documents (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    kind document_kind NOT NULL,
    number VARCHAR(100) NOT NULL,
    status document_status NOT NULL DEFAULT 'draft',
    document_date DATE NOT NULL,
    exchange_rate NUMERIC(19, 10) NOT NULL DEFAULT 1,
    direction trade_direction,
    reverse_charge BOOLEAN NOT NULL DEFAULT false,
    party_account_id UUID REFERENCES accounts(id),
    total NUMERIC(19, 4) NOT NULL DEFAULT 0,
    due_amount NUMERIC(19, 4) NOT NULL DEFAULT 0,
    amount NUMERIC(19, 4),
    vat_rate NUMERIC(5, 2),
    vat_inclusive BOOLEAN,
    category_account_id UUID REFERENCES accounts(id),
    pay_mode pay_mode,
    paid_from_account_id UUID REFERENCES accounts(id),
    payee_account_id UUID REFERENCES accounts(id),
    bank_transaction_id UUID REFERENCES bank_transactions(id),
    recon_target recon_target,
    target_account_id UUID REFERENCES accounts(id),
    linked_document_id UUID REFERENCES documents(id),
    reclaim BOOLEAN,
    deposit_account_id UUID REFERENCES accounts(id),
    account_id UUID REFERENCES accounts(id),
    offset_account_id UUID REFERENCES accounts(id),
    notes TEXT,
    created_by UUID NOT NULL,
    deleted BOOLEAN NOT NULL DEFAULT false,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (kind, number),
    CONSTRAINT chk_doc_exchange_rate_positive CHECK (exchange_rate > 0)
);

CREATE INDEX idx_documents_kind_status ON documents(kind, status);
CREATE INDEX idx_documents_bank_txn ON documents(bank_transaction_id) WHERE bank_transaction_id IS NOT NULL;
";

const DOCUMENT_LINES_SQL: &str = r"
CREATE TABLE document_lines (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    document_id UUID NOT NULL REFERENCES documents(id) ON DELETE CASCADE,
    position INTEGER NOT NULL,
    category_account_id UUID NOT NULL REFERENCES accounts(id),
    quantity NUMERIC(19, 4) NOT NULL,
    unit_price NUMERIC(19, 4) NOT NULL,
    discount NUMERIC(19, 4) NOT NULL DEFAULT 0,
    vat_rate NUMERIC(5, 2) NOT NULL DEFAULT 0,
    vat_inclusive BOOLEAN NOT NULL DEFAULT false,
    excise_amount NUMERIC(19, 4) NOT NULL DEFAULT 0,
    product_id UUID REFERENCES products(id),
    unit_cost NUMERIC(19, 4),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (document_id, position),
    CONSTRAINT chk_line_quantity_positive CHECK (quantity > 0),
    CONSTRAINT chk_line_discount_not_negative CHECK (discount >= 0)
);

CREATE INDEX idx_document_lines_document ON document_lines(document_id);
";

const INVENTORY_HISTORIES_SQL: &str = r"
CREATE TABLE inventory_histories (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    inventory_id UUID NOT NULL REFERENCES inventories(id) ON DELETE CASCADE,
    document_id UUID NOT NULL REFERENCES documents(id),
    flow movement_flow NOT NULL,
    quantity NUMERIC(19, 4) NOT NULL,
    unit_cost NUMERIC(19, 4) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_history_quantity_positive CHECK (quantity > 0)
);

CREATE INDEX idx_inv_hist_inventory ON inventory_histories(inventory_id);
CREATE INDEX idx_inv_hist_document ON inventory_histories(document_id);
";

const JOURNALS_SQL: &str = r"
CREATE TABLE journals (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    reference_type reference_type NOT NULL,
    reference_id UUID NOT NULL,
    reference_no VARCHAR(100) NOT NULL,
    description TEXT NOT NULL,
    journal_date DATE NOT NULL,
    transaction_date DATE NOT NULL,
    created_by UUID NOT NULL,
    reversed BOOLEAN NOT NULL DEFAULT false,
    deleted BOOLEAN NOT NULL DEFAULT false,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_journals_reference ON journals(reference_id, reference_type);
CREATE INDEX idx_journals_date ON journals(journal_date);
";

const JOURNAL_LINES_SQL: &str = r"
CREATE TABLE journal_lines (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    journal_id UUID NOT NULL REFERENCES journals(id) ON DELETE CASCADE,
    account_id UUID NOT NULL REFERENCES accounts(id),
    position INTEGER NOT NULL,
    debit NUMERIC(19, 4) NOT NULL DEFAULT 0,
    credit NUMERIC(19, 4) NOT NULL DEFAULT 0,
    exchange_rate NUMERIC(19, 10) NOT NULL DEFAULT 1,
    posting_date DATE NOT NULL,
    memo VARCHAR(500),
    reversed BOOLEAN NOT NULL DEFAULT false,
    deleted BOOLEAN NOT NULL DEFAULT false,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_debit_or_credit CHECK (
        (debit > 0 AND credit = 0) OR (debit = 0 AND credit > 0)
    ),
    CONSTRAINT chk_line_exchange_rate_positive CHECK (exchange_rate > 0)
);

CREATE INDEX idx_journal_lines_journal ON journal_lines(journal_id);
CREATE INDEX idx_journal_lines_account ON journal_lines(account_id, posting_date);
CREATE INDEX idx_journal_lines_active ON journal_lines(account_id) WHERE NOT reversed AND NOT deleted;
";

const TRANSACTION_EXPLANATIONS_SQL: &str = r"
CREATE TABLE transaction_explanations (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    bank_transaction_id UUID NOT NULL REFERENCES bank_transactions(id) ON DELETE CASCADE,
    document_id UUID NOT NULL REFERENCES documents(id),
    invoice_id UUID REFERENCES documents(id),
    amount NUMERIC(19, 4) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_explanations_bank_txn ON transaction_explanations(bank_transaction_id);
CREATE INDEX idx_explanations_document ON transaction_explanations(document_id);
";

const TRANSACTION_LINKS_SQL: &str = r"
CREATE TABLE transaction_links (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    expense_id UUID NOT NULL UNIQUE REFERENCES documents(id) ON DELETE CASCADE,
    bank_transaction_id UUID NOT NULL REFERENCES bank_transactions(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const DROP_ALL_SQL: &str = r"
-- ============================================================
-- DROP ALL: Rollback migration
-- Order matters due to foreign key constraints
-- ============================================================

DROP TABLE IF EXISTS transaction_links CASCADE;
DROP TABLE IF EXISTS transaction_explanations CASCADE;
DROP TABLE IF EXISTS journal_lines CASCADE;
DROP TABLE IF EXISTS journals CASCADE;
DROP TABLE IF EXISTS inventory_histories CASCADE;
DROP TABLE IF EXISTS document_lines CASCADE;
DROP TABLE IF EXISTS documents CASCADE;
DROP TABLE IF EXISTS bank_transactions CASCADE;
DROP TABLE IF EXISTS inventories CASCADE;
DROP TABLE IF EXISTS products CASCADE;
DROP TABLE IF EXISTS accounts CASCADE;

DROP TYPE IF EXISTS movement_flow CASCADE;
DROP TYPE IF EXISTS recon_target CASCADE;
DROP TYPE IF EXISTS pay_mode CASCADE;
DROP TYPE IF EXISTS trade_direction CASCADE;
DROP TYPE IF EXISTS account_class CASCADE;
DROP TYPE IF EXISTS reference_type CASCADE;
DROP TYPE IF EXISTS document_status CASCADE;
DROP TYPE IF EXISTS document_kind CASCADE;
";
