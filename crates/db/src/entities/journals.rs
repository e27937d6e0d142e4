//! `SeaORM` Entity for journal headers.
//!
//! The `reversed` and `deleted` flags are one-way and the only mutation a
//! journal ever sees after posting; rows are never physically removed.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ReferenceType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "journals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub reference_type: ReferenceType,
    pub reference_id: Uuid,
    pub reference_no: String,
    pub description: String,
    pub journal_date: Date,
    pub transaction_date: Date,
    pub created_by: Uuid,
    pub reversed: bool,
    pub deleted: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::journal_lines::Entity")]
    JournalLines,
}

impl Related<super::journal_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
