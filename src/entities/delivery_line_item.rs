use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "delivery_line_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub delivery_receipt_id: Uuid,
    pub ingredient_id: Uuid,

    /// May legitimately be zero to record a short-shipped line.
    pub quantity_received: Decimal,

    pub actual_cost: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::delivery_receipt::Entity",
        from = "Column::DeliveryReceiptId",
        to = "super::delivery_receipt::Column::Id"
    )]
    DeliveryReceipt,
    #[sea_orm(
        belongs_to = "super::ingredient::Entity",
        from = "Column::IngredientId",
        to = "super::ingredient::Column::Id"
    )]
    Ingredient,
}

impl Related<super::delivery_receipt::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DeliveryReceipt.def()
    }
}

impl Related<super::ingredient::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ingredient.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
