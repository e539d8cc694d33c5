//! Medical center repository.

use std::sync::Arc;

use crate::entities::{medical_center, MedicalCenter};
use crate::query::like_pattern;
use fundacja_common::{AppError, AppResult};
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

/// Medical center repository for database operations.
#[derive(Clone)]
pub struct MedicalCenterRepository {
    db: Arc<DatabaseConnection>,
}

impl MedicalCenterRepository {
    /// Create a new medical center repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a medical center by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<medical_center::Model>> {
        MedicalCenter::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List centers ordered by department name, with optional filters:
    /// `disease` is a case-insensitive substring on the treated diseases,
    /// `search` a case-insensitive substring on the department name.
    /// No pagination; the map consumes the full set.
    pub async fn list(
        &self,
        disease: Option<&str>,
        search: Option<&str>,
    ) -> AppResult<Vec<medical_center::Model>> {
        let mut query = MedicalCenter::find();

        if let Some(disease) = disease {
            query = query.filter(
                Expr::col((
                    medical_center::Entity,
                    medical_center::Column::TreatedDiseases,
                ))
                .ilike(like_pattern(disease)),
            );
        }

        if let Some(search) = search {
            query = query.filter(
                Expr::col((medical_center::Entity, medical_center::Column::Department))
                    .ilike(like_pattern(search)),
            );
        }

        query
            .order_by_asc(medical_center::Column::Department)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Centers inside a bounding box around (lat, lng). Fixed degree
    /// deltas, not true distance; a known approximation kept from the
    /// original behavior.
    pub async fn near_location(
        &self,
        lat: f64,
        lng: f64,
        lat_range: f64,
        lng_range: f64,
    ) -> AppResult<Vec<medical_center::Model>> {
        MedicalCenter::find()
            .filter(medical_center::Column::Lat.gte(lat - lat_range))
            .filter(medical_center::Column::Lat.lte(lat + lat_range))
            .filter(medical_center::Column::Lng.gte(lng - lng_range))
            .filter(medical_center::Column::Lng.lte(lng + lng_range))
            .order_by_asc(medical_center::Column::Department)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a center by the import natural key (department, address).
    pub async fn find_by_department_address(
        &self,
        department: &str,
        address: &str,
    ) -> AppResult<Option<medical_center::Model>> {
        MedicalCenter::find()
            .filter(medical_center::Column::Department.eq(department))
            .filter(medical_center::Column::Address.eq(address))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new medical center.
    pub async fn create(
        &self,
        model: medical_center::ActiveModel,
    ) -> AppResult<medical_center::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a medical center.
    pub async fn update(
        &self,
        model: medical_center::ActiveModel,
    ) -> AppResult<medical_center::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a medical center.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        MedicalCenter::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_center(id: &str, department: &str, address: &str) -> medical_center::Model {
        medical_center::Model {
            id: id.to_string(),
            department: department.to_string(),
            treated_diseases: "padaczka, migrena".to_string(),
            address: address.to_string(),
            phone: "22 123 45 67".to_string(),
            lat: 52.23,
            lng: 21.01,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_list_unfiltered() {
        let center1 = create_test_center("c1", "Oddzial Neurologii", "Warszawa");
        let center2 = create_test_center("c2", "Poradnia Padaczki", "Krakow");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[center1, center2]])
                .into_connection(),
        );

        let repo = MedicalCenterRepository::new(db);
        let result = repo.list(None, None).await.unwrap();

        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_find_by_department_address() {
        let center = create_test_center("c1", "Oddzial Neurologii", "ul. Testowa 1, Warszawa");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[center]])
                .into_connection(),
        );

        let repo = MedicalCenterRepository::new(db);
        let result = repo
            .find_by_department_address("Oddzial Neurologii", "ul. Testowa 1, Warszawa")
            .await
            .unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().id, "c1");
    }
}
