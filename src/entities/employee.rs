use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;
use validator::Validate;

/// Staff role, stored as a string column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum Role {
    Cook,
    Cashier,
    #[strum(serialize = "Inventory Custodian")]
    #[serde(rename = "Inventory Custodian")]
    InventoryCustodian,
    Admin,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    pub role: String,

    #[sea_orm(unique)]
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,

    /// Argon2 PHC-format hash of the employee credential. Never the raw secret.
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sales_transaction::Entity")]
    SalesTransactions,
    #[sea_orm(has_many = "super::release_record::Entity")]
    ReleaseRecords,
}

impl Related<super::sales_transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalesTransactions.def()
    }
}

impl Related<super::release_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReleaseRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn role_round_trips_through_strings() {
        assert_eq!(Role::InventoryCustodian.to_string(), "Inventory Custodian");
        assert_eq!(
            Role::from_str("Inventory Custodian").unwrap(),
            Role::InventoryCustodian
        );
        assert_eq!(Role::from_str("Cashier").unwrap(), Role::Cashier);
        assert!(Role::from_str("Janitor").is_err());
    }
}
