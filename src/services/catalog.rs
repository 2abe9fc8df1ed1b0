use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::DbPool,
    entities::{
        delivery_line_item, ingredient,
        ingredient::Entity as IngredientEntity,
        menu_item,
        menu_item::Entity as MenuItemEntity,
        purchase_order_line, release_line_item, sales_line_item,
    },
    errors::ServiceError,
    events::{Event, EventSender},
    services::stock_ledger,
};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateMenuItemRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    pub price: Decimal,
    pub unit_measure: String,
    #[serde(default)]
    pub quantity_available: i32,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateMenuItemRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    pub price: Decimal,
    pub unit_measure: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateIngredientRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    #[serde(default)]
    pub current_stock: Decimal,
    #[serde(default)]
    pub reorder_point: Decimal,
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub auto_order_qty: Decimal,
    pub unit: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateIngredientRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    pub reorder_point: Decimal,
    pub expiry_date: Option<NaiveDate>,
    pub auto_order_qty: Decimal,
    pub unit: String,
}

/// Owns MenuItem and Ingredient master records and their quantity fields.
/// Quantity mutations go through the stock ledger; everything else here is
/// plain CRUD and reads.
#[derive(Clone)]
pub struct CatalogService {
    db: Arc<DbPool>,
    event_sender: Option<EventSender>,
}

impl CatalogService {
    pub fn new(db: Arc<DbPool>, event_sender: Option<EventSender>) -> Self {
        Self { db, event_sender }
    }

    /// Fetches a menu item, failing with `NotFound` if absent.
    #[instrument(skip(self))]
    pub async fn get_menu_item(&self, id: Uuid) -> Result<menu_item::Model, ServiceError> {
        MenuItemEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound(format!("Menu item {id} not found")))
    }

    /// Fetches an ingredient, failing with `NotFound` if absent.
    #[instrument(skip(self))]
    pub async fn get_ingredient(&self, id: Uuid) -> Result<ingredient::Model, ServiceError> {
        IngredientEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound(format!("Ingredient {id} not found")))
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_menu_item(
        &self,
        request: CreateMenuItemRequest,
    ) -> Result<menu_item::Model, ServiceError> {
        request.validate()?;
        if request.price < Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "Menu item price must not be negative".to_string(),
            ));
        }
        if request.quantity_available < 0 {
            return Err(ServiceError::ValidationError(
                "Quantity available must not be negative".to_string(),
            ));
        }

        let model = menu_item::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(request.name),
            price: Set(request.price),
            unit_measure: Set(request.unit_measure),
            quantity_available: Set(request.quantity_available),
            created_at: Set(Utc::now()),
        };

        let created = model.insert(&*self.db).await.map_err(ServiceError::DatabaseError)?;
        info!(menu_item_id = %created.id, "Menu item created");
        Ok(created)
    }

    /// Updates a menu item's descriptive fields. The quantity field is owned
    /// by the stock ledger and is not touched here.
    #[instrument(skip(self, request), fields(menu_item_id = %id))]
    pub async fn update_menu_item(
        &self,
        id: Uuid,
        request: UpdateMenuItemRequest,
    ) -> Result<menu_item::Model, ServiceError> {
        request.validate()?;
        if request.price < Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "Menu item price must not be negative".to_string(),
            ));
        }

        let existing = self.get_menu_item(id).await?;
        let mut active: menu_item::ActiveModel = existing.into();
        active.name = Set(request.name);
        active.price = Set(request.price);
        active.unit_measure = Set(request.unit_measure);

        active.update(&*self.db).await.map_err(ServiceError::DatabaseError)
    }

    /// Deletes a menu item, refusing with `Conflict` while sales reference it.
    #[instrument(skip(self), fields(menu_item_id = %id))]
    pub async fn delete_menu_item(&self, id: Uuid) -> Result<(), ServiceError> {
        let item = self.get_menu_item(id).await?;

        let references = sales_line_item::Entity::find()
            .filter(sales_line_item::Column::MenuItemId.eq(id))
            .count(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)?;
        if references > 0 {
            return Err(ServiceError::Conflict(format!(
                "Menu item '{}' is referenced by {} sales line item(s)",
                item.name, references
            )));
        }

        MenuItemEntity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)?;
        info!(menu_item_id = %id, "Menu item deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list_menu_items(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<menu_item::Model>, u64), ServiceError> {
        let paginator = MenuItemEntity::find()
            .order_by_asc(menu_item::Column::Name)
            .paginate(&*self.db, per_page.max(1));

        let total = paginator.num_items().await.map_err(ServiceError::DatabaseError)?;
        let items = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(ServiceError::DatabaseError)?;

        Ok((items, total))
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_ingredient(
        &self,
        request: CreateIngredientRequest,
    ) -> Result<ingredient::Model, ServiceError> {
        request.validate()?;
        if request.current_stock < Decimal::ZERO
            || request.reorder_point < Decimal::ZERO
            || request.auto_order_qty < Decimal::ZERO
        {
            return Err(ServiceError::ValidationError(
                "Ingredient quantities must not be negative".to_string(),
            ));
        }

        let model = ingredient::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(request.name),
            current_stock: Set(request.current_stock),
            reorder_point: Set(request.reorder_point),
            expiry_date: Set(request.expiry_date),
            auto_order_qty: Set(request.auto_order_qty),
            unit: Set(request.unit),
            created_at: Set(Utc::now()),
        };

        let created = model.insert(&*self.db).await.map_err(ServiceError::DatabaseError)?;
        info!(ingredient_id = %created.id, "Ingredient created");
        Ok(created)
    }

    /// Updates an ingredient's descriptive fields; `current_stock` stays with
    /// the stock ledger.
    #[instrument(skip(self, request), fields(ingredient_id = %id))]
    pub async fn update_ingredient(
        &self,
        id: Uuid,
        request: UpdateIngredientRequest,
    ) -> Result<ingredient::Model, ServiceError> {
        request.validate()?;
        if request.reorder_point < Decimal::ZERO || request.auto_order_qty < Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "Ingredient quantities must not be negative".to_string(),
            ));
        }

        let existing = self.get_ingredient(id).await?;
        let mut active: ingredient::ActiveModel = existing.into();
        active.name = Set(request.name);
        active.reorder_point = Set(request.reorder_point);
        active.expiry_date = Set(request.expiry_date);
        active.auto_order_qty = Set(request.auto_order_qty);
        active.unit = Set(request.unit);

        active.update(&*self.db).await.map_err(ServiceError::DatabaseError)
    }

    /// Deletes an ingredient, refusing with `Conflict` while purchase,
    /// delivery, or release lines reference it.
    #[instrument(skip(self), fields(ingredient_id = %id))]
    pub async fn delete_ingredient(&self, id: Uuid) -> Result<(), ServiceError> {
        let ing = self.get_ingredient(id).await?;

        let po_refs = purchase_order_line::Entity::find()
            .filter(purchase_order_line::Column::IngredientId.eq(id))
            .count(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)?;
        let delivery_refs = delivery_line_item::Entity::find()
            .filter(delivery_line_item::Column::IngredientId.eq(id))
            .count(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)?;
        let release_refs = release_line_item::Entity::find()
            .filter(release_line_item::Column::IngredientId.eq(id))
            .count(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)?;

        let references = po_refs + delivery_refs + release_refs;
        if references > 0 {
            return Err(ServiceError::Conflict(format!(
                "Ingredient '{}' is referenced by {} transaction line(s)",
                ing.name, references
            )));
        }

        IngredientEntity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)?;
        info!(ingredient_id = %id, "Ingredient deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list_ingredients(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<ingredient::Model>, u64), ServiceError> {
        let paginator = IngredientEntity::find()
            .order_by_asc(ingredient::Column::Name)
            .paginate(&*self.db, per_page.max(1));

        let total = paginator.num_items().await.map_err(ServiceError::DatabaseError)?;
        let items = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(ServiceError::DatabaseError)?;

        Ok((items, total))
    }

    /// Applies a signed delta to a menu item's quantity (manual correction
    /// path). Returns the new quantity.
    #[instrument(skip(self), fields(menu_item_id = %id))]
    pub async fn adjust_menu_item_quantity(
        &self,
        id: Uuid,
        delta: i32,
    ) -> Result<i32, ServiceError> {
        let updated = stock_ledger::apply_menu_item_delta(&*self.db, id, delta).await?;

        if let Some(sender) = &self.event_sender {
            sender
                .send_or_log(Event::MenuItemQuantityAdjusted {
                    menu_item_id: id,
                    delta,
                    new_quantity: updated.quantity_available,
                })
                .await;
        }

        Ok(updated.quantity_available)
    }

    /// Applies a signed delta to an ingredient's stock (manual correction
    /// path). Returns the new stock level.
    #[instrument(skip(self), fields(ingredient_id = %id))]
    pub async fn adjust_ingredient_stock(
        &self,
        id: Uuid,
        delta: Decimal,
    ) -> Result<Decimal, ServiceError> {
        let updated = stock_ledger::apply_ingredient_delta(&*self.db, id, delta).await?;

        if let Some(sender) = &self.event_sender {
            sender
                .send_or_log(Event::IngredientStockAdjusted {
                    ingredient_id: id,
                    delta,
                    new_stock: updated.current_stock,
                })
                .await;
            if updated.current_stock <= updated.reorder_point {
                sender
                    .send_or_log(Event::StockBelowReorderPoint {
                        ingredient_id: id,
                        current_stock: updated.current_stock,
                        reorder_point: updated.reorder_point,
                    })
                    .await;
            }
        }

        Ok(updated.current_stock)
    }

    /// Ingredients at or below their reorder point, ordered by name.
    /// Pure read; two calls with no intervening writes return identical rows.
    #[instrument(skip(self))]
    pub async fn list_low_stock(&self) -> Result<Vec<ingredient::Model>, ServiceError> {
        IngredientEntity::find()
            .filter(
                sea_orm::sea_query::Expr::col(ingredient::Column::CurrentStock)
                    .lte(sea_orm::sea_query::Expr::col(ingredient::Column::ReorderPoint)),
            )
            .order_by_asc(ingredient::Column::Name)
            .all(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)
    }
}
