use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "menu_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    /// Unit price; never negative.
    pub price: Decimal,

    /// Unit-measure label shown on the menu ("pc", "serving", "cup").
    pub unit_measure: String,

    /// Sellable quantity on hand. Mutated only through the stock ledger.
    pub quantity_available: i32,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sales_line_item::Entity")]
    SalesLineItems,
}

impl Related<super::sales_line_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalesLineItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
