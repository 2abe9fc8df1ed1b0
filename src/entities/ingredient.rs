use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "ingredients")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    /// Stock on hand. Mutated only through the stock ledger.
    pub current_stock: Decimal,

    /// Threshold at or below which the ingredient is flagged for reordering.
    pub reorder_point: Decimal,

    pub expiry_date: Option<NaiveDate>,

    /// Suggested quantity when auto-generating a purchase order.
    pub auto_order_qty: Decimal,

    /// Unit label ("kg", "L", "pcs").
    pub unit: String,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::purchase_order_line::Entity")]
    PurchaseOrderLines,
    #[sea_orm(has_many = "super::delivery_line_item::Entity")]
    DeliveryLineItems,
    #[sea_orm(has_many = "super::release_line_item::Entity")]
    ReleaseLineItems,
}

impl Related<super::purchase_order_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseOrderLines.def()
    }
}

impl Related<super::delivery_line_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DeliveryLineItems.def()
    }
}

impl Related<super::release_line_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReleaseLineItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
