//! Account repository for chart of accounts database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, SqlErr,
};
use uuid::Uuid;

use folio_core::posting::ChartRoles;
use folio_shared::types::AccountId;

use crate::entities::{accounts, sea_orm_active_enums::AccountClass};

/// Codes of the chart accounts the posting strategies post against.
///
/// The seeder creates these rows; posting refuses to run while any of
/// them is missing.
pub mod codes {
    /// Accounts receivable control account.
    pub const ACCOUNTS_RECEIVABLE: &str = "1100";
    /// Stock asset account.
    pub const INVENTORY_ASSET: &str = "1300";
    /// VAT paid on purchases.
    pub const INPUT_VAT: &str = "1400";
    /// Petty cash.
    pub const PETTY_CASH: &str = "1010";
    /// Accounts payable control account.
    pub const ACCOUNTS_PAYABLE: &str = "2100";
    /// VAT collected on sales.
    pub const OUTPUT_VAT: &str = "2200";
    /// Net VAT owed to the tax authority.
    pub const VAT_PAYABLE: &str = "2210";
    /// Excise duty payable.
    pub const EXCISE_DUTY: &str = "2250";
    /// Discounts granted to customers.
    pub const SALES_DISCOUNT: &str = "4900";
    /// Cost of goods sold.
    pub const COST_OF_GOODS_SOLD: &str = "5000";
    /// Discounts received from suppliers.
    pub const PURCHASE_DISCOUNT: &str = "5900";
}

/// The built-in chart rows backing [`codes`], as (code, name, class).
#[must_use]
pub fn built_in_chart() -> Vec<(&'static str, &'static str, AccountClass)> {
    vec![
        (codes::PETTY_CASH, "Petty Cash", AccountClass::Cash),
        (
            codes::ACCOUNTS_RECEIVABLE,
            "Accounts Receivable",
            AccountClass::Receivable,
        ),
        (codes::INVENTORY_ASSET, "Inventory", AccountClass::Inventory),
        (codes::INPUT_VAT, "Input VAT", AccountClass::Asset),
        (
            codes::ACCOUNTS_PAYABLE,
            "Accounts Payable",
            AccountClass::Payable,
        ),
        (codes::OUTPUT_VAT, "Output VAT", AccountClass::Liability),
        (codes::VAT_PAYABLE, "VAT Payable", AccountClass::Liability),
        (codes::EXCISE_DUTY, "Excise Duty", AccountClass::Liability),
        (codes::SALES_DISCOUNT, "Sales Discount", AccountClass::Income),
        (
            codes::COST_OF_GOODS_SOLD,
            "Cost Of Goods Sold",
            AccountClass::Expense,
        ),
        (
            codes::PURCHASE_DISCOUNT,
            "Purchase Discount",
            AccountClass::Expense,
        ),
    ]
}

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Account code already exists.
    #[error("Account code '{0}' already exists")]
    DuplicateCode(String),

    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// A well-known chart account is missing.
    #[error("Chart of accounts is missing the account with code '{0}'")]
    MissingRole(&'static str),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Account code (unique).
    pub code: String,
    /// Account name.
    pub name: String,
    /// Broad classification.
    pub class: AccountClass,
    /// Whether the account is active.
    pub is_active: bool,
}

/// Repository for chart of accounts operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an account.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateCode` when the code is taken.
    pub async fn create(&self, input: CreateAccountInput) -> Result<accounts::Model, AccountError> {
        let existing = accounts::Entity::find()
            .filter(accounts::Column::Code.eq(&input.code))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(AccountError::DuplicateCode(input.code));
        }

        let now = chrono::Utc::now().into();
        let model = accounts::ActiveModel {
            id: Set(AccountId::new().into_inner()),
            code: Set(input.code),
            name: Set(input.name),
            class: Set(input.class),
            is_active: Set(input.is_active),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(model.insert(&self.db).await?)
    }

    /// Finds an account by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<accounts::Model>, AccountError> {
        Ok(accounts::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Finds an account by its code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<accounts::Model>, AccountError> {
        Ok(accounts::Entity::find()
            .filter(accounts::Column::Code.eq(code))
            .one(&self.db)
            .await?)
    }

    /// Lists active accounts ordered by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_active(&self) -> Result<Vec<accounts::Model>, AccountError> {
        Ok(accounts::Entity::find()
            .filter(accounts::Column::IsActive.eq(true))
            .order_by_asc(accounts::Column::Code)
            .all(&self.db)
            .await?)
    }

    /// Resolves the well-known posting accounts from the chart.
    ///
    /// # Errors
    ///
    /// Returns `MissingRole` when any well-known code has no account.
    pub async fn chart_roles(&self) -> Result<ChartRoles, AccountError> {
        chart_roles_on(&self.db).await
    }

    /// Creates any missing built-in chart rows, then resolves the roles.
    ///
    /// Safe to call concurrently; an insert lost to a race falls back to
    /// the surviving row.
    ///
    /// # Errors
    ///
    /// Returns an error if an insert fails for a reason other than the
    /// code already existing.
    pub async fn ensure_built_in_chart(&self) -> Result<ChartRoles, AccountError> {
        for (code, name, class) in built_in_chart() {
            if self.find_by_code(code).await?.is_some() {
                continue;
            }
            let input = CreateAccountInput {
                code: code.to_owned(),
                name: name.to_owned(),
                class,
                is_active: true,
            };
            match self.create(input).await {
                Ok(_) | Err(AccountError::DuplicateCode(_)) => {}
                Err(AccountError::Database(err))
                    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {}
                Err(err) => return Err(err),
            }
        }
        self.chart_roles().await
    }
}

// ============================================================
// HELPERS
// ============================================================

/// Resolves [`ChartRoles`] on any connection, including an open
/// transaction.
pub(crate) async fn chart_roles_on<C: ConnectionTrait>(
    conn: &C,
) -> Result<ChartRoles, AccountError> {
    let wanted = [
        codes::ACCOUNTS_RECEIVABLE,
        codes::ACCOUNTS_PAYABLE,
        codes::OUTPUT_VAT,
        codes::INPUT_VAT,
        codes::EXCISE_DUTY,
        codes::SALES_DISCOUNT,
        codes::PURCHASE_DISCOUNT,
        codes::INVENTORY_ASSET,
        codes::COST_OF_GOODS_SOLD,
        codes::PETTY_CASH,
        codes::VAT_PAYABLE,
    ];
    let rows = accounts::Entity::find()
        .filter(accounts::Column::Code.is_in(wanted))
        .all(conn)
        .await?;

    let find = |code: &'static str| -> Result<AccountId, AccountError> {
        rows.iter()
            .find(|row| row.code == code)
            .map(|row| AccountId::from_uuid(row.id))
            .ok_or(AccountError::MissingRole(code))
    };

    Ok(ChartRoles {
        accounts_receivable: find(codes::ACCOUNTS_RECEIVABLE)?,
        accounts_payable: find(codes::ACCOUNTS_PAYABLE)?,
        output_vat: find(codes::OUTPUT_VAT)?,
        input_vat: find(codes::INPUT_VAT)?,
        excise_duty: find(codes::EXCISE_DUTY)?,
        sales_discount: find(codes::SALES_DISCOUNT)?,
        purchase_discount: find(codes::PURCHASE_DISCOUNT)?,
        inventory_asset: find(codes::INVENTORY_ASSET)?,
        cost_of_goods_sold: find(codes::COST_OF_GOODS_SOLD)?,
        petty_cash: find(codes::PETTY_CASH)?,
        vat_payable: find(codes::VAT_PAYABLE)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_chart_covers_every_role_code() {
        let chart = built_in_chart();
        for code in [
            codes::ACCOUNTS_RECEIVABLE,
            codes::ACCOUNTS_PAYABLE,
            codes::OUTPUT_VAT,
            codes::INPUT_VAT,
            codes::EXCISE_DUTY,
            codes::SALES_DISCOUNT,
            codes::PURCHASE_DISCOUNT,
            codes::INVENTORY_ASSET,
            codes::COST_OF_GOODS_SOLD,
            codes::PETTY_CASH,
            codes::VAT_PAYABLE,
        ] {
            assert!(
                chart.iter().any(|(chart_code, _, _)| *chart_code == code),
                "no built-in row for code {code}"
            );
        }
    }

    #[test]
    fn built_in_codes_are_distinct() {
        let chart = built_in_chart();
        for (index, (code, _, _)) in chart.iter().enumerate() {
            assert!(
                chart[index + 1..].iter().all(|(other, _, _)| other != code),
                "duplicate code {code}"
            );
        }
    }
}
