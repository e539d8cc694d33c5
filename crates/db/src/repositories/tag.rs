//! Tag repository.

use std::sync::Arc;

use crate::entities::{post, post_tag, tag, PostTag, Tag};
use fundacja_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    Order, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};

#[derive(Debug, FromQueryResult)]
struct TagPostCount {
    tag_id: String,
    post_count: i64,
}

/// Tag repository for database operations.
#[derive(Clone)]
pub struct TagRepository {
    db: Arc<DatabaseConnection>,
}

impl TagRepository {
    /// Create a new tag repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a tag by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<tag::Model>> {
        Tag::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a tag by slug.
    pub async fn find_by_slug(&self, slug: &str) -> AppResult<Option<tag::Model>> {
        Tag::find()
            .filter(tag::Column::Slug.eq(slug))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a tag by slug, returning an error if not found.
    pub async fn get_by_slug(&self, slug: &str) -> AppResult<tag::Model> {
        self.find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::TagNotFound(slug.to_string()))
    }

    /// Find tags by IDs.
    pub async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<tag::Model>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        Tag::find()
            .filter(tag::Column::Id.is_in(ids.to_vec()))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List all tags, alphabetical by name.
    pub async fn list_ordered(&self) -> AppResult<Vec<tag::Model>> {
        Tag::find()
            .order_by_asc(tag::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Published-post counts grouped by tag ID.
    pub async fn published_counts(&self) -> AppResult<Vec<(String, i64)>> {
        let rows = PostTag::find()
            .select_only()
            .column(post_tag::Column::TagId)
            .column_as(post_tag::Column::PostId.count(), "post_count")
            .join(JoinType::InnerJoin, post_tag::Relation::Post.def())
            .filter(post::Column::Published.eq(true))
            .group_by(post_tag::Column::TagId)
            .into_model::<TagPostCount>()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|row| (row.tag_id, row.post_count))
            .collect())
    }

    /// Most-used tags by published-post count, as (tag, count) pairs.
    pub async fn popular(&self, limit: u64) -> AppResult<Vec<(tag::Model, i64)>> {
        let counts = PostTag::find()
            .select_only()
            .column(post_tag::Column::TagId)
            .column_as(post_tag::Column::PostId.count(), "post_count")
            .join(JoinType::InnerJoin, post_tag::Relation::Post.def())
            .filter(post::Column::Published.eq(true))
            .group_by(post_tag::Column::TagId)
            .order_by(post_tag::Column::PostId.count(), Order::Desc)
            .limit(limit)
            .into_model::<TagPostCount>()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let ids: Vec<String> = counts.iter().map(|row| row.tag_id.clone()).collect();
        let tags = self.find_by_ids(&ids).await?;

        // Preserve the count ordering from the grouped query.
        Ok(counts
            .into_iter()
            .filter_map(|row| {
                tags.iter()
                    .find(|t| t.id == row.tag_id)
                    .cloned()
                    .map(|t| (t, row.post_count))
            })
            .collect())
    }

    /// Create a new tag.
    pub async fn create(&self, model: tag::ActiveModel) -> AppResult<tag::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a tag. Join rows cascade; posts are untouched.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Tag::delete_by_id(id)
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
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_tag(id: &str, name: &str, slug: &str) -> tag::Model {
        tag::Model {
            id: id.to_string(),
            name: name.to_string(),
            slug: slug.to_string(),
        }
    }

    #[tokio::test]
    async fn test_get_by_slug() {
        let tag = create_test_tag("t1", "Padaczka", "padaczka");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[tag]])
                .into_connection(),
        );

        let repo = TagRepository::new(db);
        let result = repo.get_by_slug("padaczka").await.unwrap();

        assert_eq!(result.name, "Padaczka");
    }

    #[tokio::test]
    async fn test_popular_preserves_count_order() {
        let counts: Vec<(String, i64)> = vec![("t2".to_string(), 9), ("t1".to_string(), 4)];
        let tag1 = create_test_tag("t1", "Migrena", "migrena");
        let tag2 = create_test_tag("t2", "Udar", "udar");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([counts
                    .iter()
                    .map(|(id, count)| {
                        maplit::btreemap! {
                            "tag_id" => sea_orm::Value::from(id.clone()),
                            "post_count" => sea_orm::Value::from(*count),
                        }
                    })
                    .collect::<Vec<_>>()])
                .append_query_results([[tag1, tag2]])
                .into_connection(),
        );

        let repo = TagRepository::new(db);
        let result = repo.popular(10).await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].0.id, "t2");
        assert_eq!(result[0].1, 9);
        assert_eq!(result[1].0.id, "t1");
    }
}
