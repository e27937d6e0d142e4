//! Inventory repository and the stock movement cascades.
//!
//! Posting applies the movements a document implies; reversal pulls the
//! same movements back out and deletes their history rows. Both run
//! inside the posting repository's transaction.

use std::collections::HashMap;

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use folio_core::inventory::{MovementFlow, StockEffect};
use folio_core::posting::PostingError;
use folio_shared::types::{DocumentId, InventoryHistoryId, InventoryId, ProductId};

use crate::entities::{inventories, inventory_histories, products};

use super::posting::PostingRepositoryError;

/// Error types for inventory operations.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    /// SKU already exists.
    #[error("SKU '{0}' already exists")]
    DuplicateSku(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a product.
#[derive(Debug, Clone)]
pub struct CreateProductInput {
    /// Product name.
    pub name: String,
    /// Optional unique SKU.
    pub sku: Option<String>,
}

/// Repository for product and inventory operations.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    db: DatabaseConnection,
}

impl InventoryRepository {
    /// Creates a new inventory repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a product. Its inventory record appears with its first
    /// posted purchase.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateSku` when the SKU is taken.
    pub async fn create_product(
        &self,
        input: CreateProductInput,
    ) -> Result<products::Model, InventoryError> {
        if let Some(sku) = &input.sku {
            let existing = products::Entity::find()
                .filter(products::Column::Sku.eq(sku))
                .one(&self.db)
                .await?;
            if existing.is_some() {
                return Err(InventoryError::DuplicateSku(sku.clone()));
            }
        }

        let now = chrono::Utc::now().into();
        let model = products::ActiveModel {
            id: Set(ProductId::new().into_inner()),
            name: Set(input.name),
            sku: Set(input.sku),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(model.insert(&self.db).await?)
    }

    /// Finds a product by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_product(&self, id: Uuid) -> Result<Option<products::Model>, InventoryError> {
        Ok(products::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Finds a product's inventory record, if it has ever been stocked.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_inventory(
        &self,
        product_id: Uuid,
    ) -> Result<Option<inventories::Model>, InventoryError> {
        Ok(inventories::Entity::find()
            .filter(inventories::Column::ProductId.eq(product_id))
            .one(&self.db)
            .await?)
    }

    /// Movement history rows a document wrote, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn history_for_document(
        &self,
        document_id: Uuid,
    ) -> Result<Vec<inventory_histories::Model>, InventoryError> {
        Ok(inventory_histories::Entity::find()
            .filter(inventory_histories::Column::DocumentId.eq(document_id))
            .order_by_desc(inventory_histories::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }
}

// ============================================================
// CASCADE HELPERS (run inside the posting transaction)
// ============================================================

/// Current stock on hand for a set of products. Products with no
/// inventory record are absent from the map.
pub(crate) async fn stock_levels_on<C: ConnectionTrait>(
    conn: &C,
    product_ids: &[Uuid],
) -> Result<HashMap<Uuid, Decimal>, DbErr> {
    if product_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = inventories::Entity::find()
        .filter(inventories::Column::ProductId.is_in(product_ids.iter().copied()))
        .all(conn)
        .await?;
    Ok(rows
        .into_iter()
        .map(|row| (row.product_id, row.stock_on_hand))
        .collect())
}

/// Applies a plan's stock effects in order.
pub(crate) async fn apply_stock_effects<C: ConnectionTrait>(
    conn: &C,
    document_id: DocumentId,
    effects: &[StockEffect],
) -> Result<(), PostingRepositoryError> {
    for effect in effects {
        if effect.undo {
            undo_effect(conn, document_id, effect).await?;
        } else {
            apply_effect(conn, document_id, effect).await?;
        }
    }
    Ok(())
}

/// Records one posting movement: upserts the inventory record, shifts
/// its quantities, and writes the history row.
async fn apply_effect<C: ConnectionTrait>(
    conn: &C,
    document_id: DocumentId,
    effect: &StockEffect,
) -> Result<(), PostingRepositoryError> {
    let now: sea_orm::prelude::DateTimeWithTimeZone = chrono::Utc::now().into();
    let product_id = effect.product_id.into_inner();

    let existing = inventories::Entity::find()
        .filter(inventories::Column::ProductId.eq(product_id))
        .one(conn)
        .await?;
    let inventory = match existing {
        Some(inventory) => inventory,
        None => {
            inventories::ActiveModel {
                id: Set(InventoryId::new().into_inner()),
                product_id: Set(product_id),
                stock_on_hand: Set(Decimal::ZERO),
                quantity_sold: Set(Decimal::ZERO),
                purchase_quantity: Set(Decimal::ZERO),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(conn)
            .await?
        }
    };

    let (sold, purchased) = aggregate_shift(effect);
    let inventory_id = inventory.id;
    let mut active: inventories::ActiveModel = inventory.clone().into();
    active.stock_on_hand = Set(inventory.stock_on_hand + effect.stock_delta());
    active.quantity_sold = Set(inventory.quantity_sold + sold);
    active.purchase_quantity = Set(inventory.purchase_quantity + purchased);
    active.updated_at = Set(now);
    active.update(conn).await?;

    inventory_histories::ActiveModel {
        id: Set(InventoryHistoryId::new().into_inner()),
        inventory_id: Set(inventory_id),
        document_id: Set(document_id.into_inner()),
        flow: Set(effect.flow.into()),
        quantity: Set(effect.quantity),
        unit_cost: Set(effect.unit_cost),
        created_at: Set(now),
    }
    .insert(conn)
    .await?;

    Ok(())
}

/// Unwinds one movement: shifts the quantities back, consumes one of
/// the document's history rows, and drops the inventory record when a
/// purchase reversal leaves it with no history at all.
///
/// Each effect deletes exactly one history row. A document can carry
/// several lines for the same product, in which case the reversal runs
/// this once per line and the rows must be consumed one at a time.
async fn undo_effect<C: ConnectionTrait>(
    conn: &C,
    document_id: DocumentId,
    effect: &StockEffect,
) -> Result<(), PostingRepositoryError> {
    let product_id = effect.product_id.into_inner();
    let inventory = inventories::Entity::find()
        .filter(inventories::Column::ProductId.eq(product_id))
        .one(conn)
        .await?
        .ok_or_else(|| {
            PostingError::CascadeInconsistency(format!(
                "no inventory record for product {product_id}"
            ))
        })?;

    let history = inventory_histories::Entity::find()
        .filter(inventory_histories::Column::InventoryId.eq(inventory.id))
        .filter(inventory_histories::Column::DocumentId.eq(document_id.into_inner()))
        .one(conn)
        .await?
        .ok_or_else(|| {
            PostingError::CascadeInconsistency(format!(
                "no movement history for document {document_id} on product {product_id}"
            ))
        })?;
    history.delete(conn).await?;

    let remaining = inventory_histories::Entity::find()
        .filter(inventory_histories::Column::InventoryId.eq(inventory.id))
        .count(conn)
        .await?;
    if effect.flow == MovementFlow::Purchase && remaining == 0 {
        inventory.delete(conn).await?;
        return Ok(());
    }

    let (sold, purchased) = aggregate_shift(effect);
    let mut active: inventories::ActiveModel = inventory.clone().into();
    active.stock_on_hand = Set(inventory.stock_on_hand + effect.stock_delta());
    active.quantity_sold = Set(inventory.quantity_sold + sold);
    active.purchase_quantity = Set(inventory.purchase_quantity + purchased);
    active.updated_at = Set(chrono::Utc::now().into());
    active.update(conn).await?;

    Ok(())
}

/// Shift to apply to the sold and purchased aggregates for one effect.
fn aggregate_shift(effect: &StockEffect) -> (Decimal, Decimal) {
    let quantity = effect.quantity;
    let (sold, purchased) = match effect.flow {
        MovementFlow::Sale => (quantity, Decimal::ZERO),
        MovementFlow::Purchase => (Decimal::ZERO, quantity),
        MovementFlow::ReturnIn => (-quantity, Decimal::ZERO),
        MovementFlow::ReturnOut => (Decimal::ZERO, -quantity),
    };
    if effect.undo {
        (-sold, -purchased)
    } else {
        (sold, purchased)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn effect(flow: MovementFlow, undo: bool) -> StockEffect {
        StockEffect {
            product_id: ProductId::new(),
            flow,
            quantity: dec!(4),
            unit_cost: dec!(25.00),
            undo,
        }
    }

    #[test]
    fn sales_shift_the_sold_aggregate() {
        assert_eq!(
            aggregate_shift(&effect(MovementFlow::Sale, false)),
            (dec!(4), dec!(0))
        );
        assert_eq!(
            aggregate_shift(&effect(MovementFlow::Sale, true)),
            (dec!(-4), dec!(0))
        );
    }

    #[test]
    fn purchases_shift_the_purchased_aggregate() {
        assert_eq!(
            aggregate_shift(&effect(MovementFlow::Purchase, false)),
            (dec!(0), dec!(4))
        );
        assert_eq!(
            aggregate_shift(&effect(MovementFlow::Purchase, true)),
            (dec!(0), dec!(-4))
        );
    }

    #[test]
    fn returns_shift_against_their_origin() {
        assert_eq!(
            aggregate_shift(&effect(MovementFlow::ReturnIn, false)),
            (dec!(-4), dec!(0))
        );
        assert_eq!(
            aggregate_shift(&effect(MovementFlow::ReturnOut, false)),
            (dec!(0), dec!(-4))
        );
    }
}
