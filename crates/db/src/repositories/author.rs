//! Author repository.

use std::sync::Arc;

use crate::entities::{author, Author};
use fundacja_common::{AppError, AppResult};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

/// Author repository for database operations.
#[derive(Clone)]
pub struct AuthorRepository {
    db: Arc<DatabaseConnection>,
}

impl AuthorRepository {
    /// Create a new author repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an author by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<author::Model>> {
        Author::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find an author by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<author::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author not found: {id}")))
    }

    /// Find an author by username.
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<author::Model>> {
        Author::find()
            .filter(author::Column::Username.eq(username))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find authors by IDs.
    pub async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<author::Model>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        Author::find()
            .filter(author::Column::Id.is_in(ids.to_vec()))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new author.
    pub async fn create(&self, model: author::ActiveModel) -> AppResult<author::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_find_by_username() {
        let author = author::Model {
            id: "a1".to_string(),
            username: "redakcja".to_string(),
            display_name: Some("Redakcja".to_string()),
            email: "redakcja@example.org".to_string(),
            created_at: Utc::now().into(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[author]])
                .into_connection(),
        );

        let repo = AuthorRepository::new(db);
        let result = repo.find_by_username("redakcja").await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().id, "a1");
    }
}
