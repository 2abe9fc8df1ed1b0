//! The stock ledger is the only code allowed to mutate
//! `menu_items.quantity_available` and `ingredients.current_stock`.
//!
//! Every delta is applied through a single conditional UPDATE whose guard
//! rejects any result below zero. Because the statement runs on whatever
//! connection the caller provides -- the pool for direct adjustments, a
//! transaction for composed flows -- the guard doubles as commit-time
//! re-validation: a racing writer makes the loser's update match zero rows,
//! and the caller rolls back instead of committing negative stock.

use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use tracing::debug;
use uuid::Uuid;

use crate::{
    entities::{
        ingredient::{self, Entity as IngredientEntity},
        menu_item::{self, Entity as MenuItemEntity},
    },
    errors::ServiceError,
};

/// Applies a signed delta to a menu item's sellable quantity and returns the
/// updated row. Fails with `OutOfStock` if the result would be negative,
/// `NotFound` if the menu item does not exist.
pub async fn apply_menu_item_delta<C: ConnectionTrait>(
    conn: &C,
    menu_item_id: Uuid,
    delta: i32,
) -> Result<menu_item::Model, ServiceError> {
    let mut update = MenuItemEntity::update_many()
        .col_expr(
            menu_item::Column::QuantityAvailable,
            Expr::col(menu_item::Column::QuantityAvailable).add(delta),
        )
        .filter(menu_item::Column::Id.eq(menu_item_id));

    if delta < 0 {
        update = update.filter(menu_item::Column::QuantityAvailable.gte(-delta));
    }

    let result = update.exec(conn).await.map_err(ServiceError::DatabaseError)?;

    if result.rows_affected == 0 {
        return match MenuItemEntity::find_by_id(menu_item_id)
            .one(conn)
            .await
            .map_err(ServiceError::DatabaseError)?
        {
            None => Err(ServiceError::NotFound(format!(
                "Menu item {menu_item_id} not found"
            ))),
            Some(item) => Err(ServiceError::OutOfStock(format!(
                "Menu item '{}' has {} available, cannot remove {}",
                item.name, item.quantity_available, -delta
            ))),
        };
    }

    let updated = MenuItemEntity::find_by_id(menu_item_id)
        .one(conn)
        .await
        .map_err(ServiceError::DatabaseError)?
        .ok_or_else(|| {
            ServiceError::InternalError(format!(
                "Menu item {menu_item_id} vanished after quantity update"
            ))
        })?;

    debug!(
        menu_item_id = %menu_item_id,
        delta,
        new_quantity = updated.quantity_available,
        "Applied menu item quantity delta"
    );

    Ok(updated)
}

/// Applies a signed delta to an ingredient's stock and returns the updated
/// row. Fails with `InsufficientStock` if the result would be negative,
/// `NotFound` if the ingredient does not exist.
pub async fn apply_ingredient_delta<C: ConnectionTrait>(
    conn: &C,
    ingredient_id: Uuid,
    delta: Decimal,
) -> Result<ingredient::Model, ServiceError> {
    let mut update = IngredientEntity::update_many()
        .col_expr(
            ingredient::Column::CurrentStock,
            Expr::col(ingredient::Column::CurrentStock).add(delta),
        )
        .filter(ingredient::Column::Id.eq(ingredient_id));

    if delta < Decimal::ZERO {
        update = update.filter(ingredient::Column::CurrentStock.gte(-delta));
    }

    let result = update.exec(conn).await.map_err(ServiceError::DatabaseError)?;

    if result.rows_affected == 0 {
        return match IngredientEntity::find_by_id(ingredient_id)
            .one(conn)
            .await
            .map_err(ServiceError::DatabaseError)?
        {
            None => Err(ServiceError::NotFound(format!(
                "Ingredient {ingredient_id} not found"
            ))),
            Some(ing) => Err(ServiceError::InsufficientStock(format!(
                "Ingredient '{}' has {} {} in stock, cannot release {}",
                ing.name, ing.current_stock, ing.unit, -delta
            ))),
        };
    }

    let updated = IngredientEntity::find_by_id(ingredient_id)
        .one(conn)
        .await
        .map_err(ServiceError::DatabaseError)?
        .ok_or_else(|| {
            ServiceError::InternalError(format!(
                "Ingredient {ingredient_id} vanished after stock update"
            ))
        })?;

    debug!(
        ingredient_id = %ingredient_id,
        delta = %delta,
        new_stock = %updated.current_stock,
        "Applied ingredient stock delta"
    );

    Ok(updated)
}
