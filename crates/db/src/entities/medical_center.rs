//! Medical center entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Medical center/department location shown on the locator map. Records
/// are upserted from the external feed keyed by (department, address).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "medical_center")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Full name of the department or center.
    #[sea_orm(indexed)]
    pub department: String,

    /// Comma-separated list of treated diseases.
    #[sea_orm(column_type = "Text")]
    pub treated_diseases: String,

    #[sea_orm(column_type = "Text")]
    pub address: String,

    /// Contact phone numbers.
    #[sea_orm(column_type = "Text")]
    pub phone: String,

    pub lat: f64,

    pub lng: f64,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Model {
    /// The treated diseases split into trimmed entries.
    #[must_use]
    pub fn diseases_list(&self) -> Vec<String> {
        self.treated_diseases
            .split(',')
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(ToString::to_string)
            .collect()
    }
}

impl ActiveModelBehavior for ActiveModel {}
