//! Service catalog entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Service category
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ServiceCategory {
    #[sea_orm(string_value = "WASH")]
    Wash,
    #[sea_orm(string_value = "DRY_CLEAN")]
    DryClean,
    #[sea_orm(string_value = "IRON")]
    Iron,
    #[sea_orm(string_value = "WASH_AND_IRON")]
    WashAndIron,
    #[sea_orm(string_value = "SPECIAL_CARE")]
    SpecialCare,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub category: ServiceCategory,
    /// Price per unit in minor units (hundredths)
    pub price_per_unit: i64,
    /// "KG", "PIECE", "LOAD"
    pub unit_type: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
