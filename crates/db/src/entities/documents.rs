//! `SeaORM` Entity for source documents.
//!
//! One table holds every document kind; columns that only apply to one
//! kind are nullable and left NULL for the others.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{
    DocumentKind, DocumentStatus, PayMode, ReconTarget, TradeDirection,
};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub kind: DocumentKind,
    pub number: String,
    pub status: DocumentStatus,
    pub document_date: Date,
    pub exchange_rate: Decimal,
    pub direction: Option<TradeDirection>,
    pub reverse_charge: bool,
    pub party_account_id: Option<Uuid>,
    pub total: Decimal,
    pub due_amount: Decimal,
    pub amount: Option<Decimal>,
    pub vat_rate: Option<Decimal>,
    pub vat_inclusive: Option<bool>,
    pub category_account_id: Option<Uuid>,
    pub pay_mode: Option<PayMode>,
    pub paid_from_account_id: Option<Uuid>,
    pub payee_account_id: Option<Uuid>,
    pub bank_transaction_id: Option<Uuid>,
    pub recon_target: Option<ReconTarget>,
    pub target_account_id: Option<Uuid>,
    pub linked_document_id: Option<Uuid>,
    pub reclaim: Option<bool>,
    pub deposit_account_id: Option<Uuid>,
    pub account_id: Option<Uuid>,
    pub offset_account_id: Option<Uuid>,
    pub notes: Option<String>,
    pub created_by: Uuid,
    pub deleted: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::document_lines::Entity")]
    DocumentLines,
    #[sea_orm(
        belongs_to = "super::bank_transactions::Entity",
        from = "Column::BankTransactionId",
        to = "super::bank_transactions::Column::Id"
    )]
    BankTransactions,
}

impl Related<super::document_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DocumentLines.def()
    }
}

impl Related<super::bank_transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BankTransactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
