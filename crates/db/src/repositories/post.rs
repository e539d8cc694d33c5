//! Post repository.

use std::sync::Arc;

use crate::entities::{category, post, post_tag, tag, Post, PostTag, Tag};
use crate::query::PostQuery;
use fundacja_common::{AppError, AppResult};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};

#[derive(Debug, FromQueryResult)]
struct CategoryPostCount {
    category_id: String,
    post_count: i64,
}

/// Post repository for database operations.
#[derive(Clone)]
pub struct PostRepository {
    db: Arc<DatabaseConnection>,
}

impl PostRepository {
    /// Create a new post repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a post by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<post::Model>> {
        Post::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a post by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<post::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::PostNotFound(id.to_string()))
    }

    /// Find a post by slug.
    pub async fn find_by_slug(&self, slug: &str) -> AppResult<Option<post::Model>> {
        Post::find()
            .filter(post::Column::Slug.eq(slug))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a published post by its canonical URL pair
    /// `/{category_slug}/{post_slug}`.
    pub async fn find_published_by_slugs(
        &self,
        category_slug: &str,
        post_slug: &str,
    ) -> AppResult<Option<post::Model>> {
        Post::find()
            .join(JoinType::InnerJoin, post::Relation::Category.def())
            .filter(category::Column::Slug.eq(category_slug))
            .filter(post::Column::Slug.eq(post_slug))
            .filter(post::Column::Published.eq(true))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Materialize a query description into an ordered list of posts.
    pub async fn list(&self, query: &PostQuery) -> AppResult<Vec<post::Model>> {
        query
            .select()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count the rows a query description matches, ignoring limit/offset.
    pub async fn count(&self, query: &PostQuery) -> AppResult<u64> {
        query
            .select()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Search published posts by title first; fall back to content matches
    /// only when no title matches exist. The two sets are never merged.
    ///
    /// Returns the matches and whether the content fallback produced them.
    pub async fn search_title_first(
        &self,
        query: &str,
    ) -> AppResult<(Vec<post::Model>, bool)> {
        let title_matches = self
            .list(&PostQuery::new().published().title_contains(query))
            .await?;
        if !title_matches.is_empty() {
            return Ok((title_matches, false));
        }

        let content_matches = self
            .list(&PostQuery::new().published().content_contains(query))
            .await?;
        let fallback_used = !content_matches.is_empty();
        Ok((content_matches, fallback_used))
    }

    /// Sample up to `limit` published posts uniformly at random, excluding
    /// one post. Intentionally non-deterministic across calls; never
    /// cached or seeded.
    pub async fn related_sample(
        &self,
        exclude_id: &str,
        limit: u64,
    ) -> AppResult<Vec<post::Model>> {
        Post::find()
            .filter(post::Column::Published.eq(true))
            .filter(post::Column::Id.ne(exclude_id))
            .order_by(Expr::cust("RANDOM()"), Order::Asc)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new post.
    pub async fn create(&self, model: post::ActiveModel) -> AppResult<post::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a post.
    pub async fn update(&self, model: post::ActiveModel) -> AppResult<post::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a post. Gallery images and tag associations cascade.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Post::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Replace a post's tag associations.
    pub async fn set_tags(&self, post_id: &str, tag_ids: &[String]) -> AppResult<()> {
        PostTag::delete_many()
            .filter(post_tag::Column::PostId.eq(post_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if tag_ids.is_empty() {
            return Ok(());
        }

        let rows = tag_ids.iter().map(|tag_id| post_tag::ActiveModel {
            post_id: Set(post_id.to_string()),
            tag_id: Set(tag_id.clone()),
        });
        PostTag::insert_many(rows)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Tags attached to a post, alphabetical.
    pub async fn tags_for_post(&self, post_id: &str) -> AppResult<Vec<tag::Model>> {
        Tag::find()
            .join(JoinType::InnerJoin, tag::Relation::PostTags.def())
            .filter(post_tag::Column::PostId.eq(post_id))
            .order_by_asc(tag::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Tags attached to any of the given posts, as (`post_id`, tag) pairs.
    pub async fn tags_for_posts(
        &self,
        post_ids: &[String],
    ) -> AppResult<Vec<(String, tag::Model)>> {
        if post_ids.is_empty() {
            return Ok(vec![]);
        }

        let join_rows = PostTag::find()
            .filter(post_tag::Column::PostId.is_in(post_ids.to_vec()))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if join_rows.is_empty() {
            return Ok(vec![]);
        }

        let tag_ids: Vec<String> = join_rows
            .iter()
            .map(|row| row.tag_id.clone())
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect();
        let tags = Tag::find()
            .filter(tag::Column::Id.is_in(tag_ids))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(join_rows
            .into_iter()
            .filter_map(|row| {
                tags.iter()
                    .find(|t| t.id == row.tag_id)
                    .cloned()
                    .map(|t| (row.post_id, t))
            })
            .collect())
    }

    /// Count posts referencing a category (published or not). Used for
    /// delete protection.
    pub async fn count_by_category(&self, category_id: &str) -> AppResult<u64> {
        Post::find()
            .filter(post::Column::CategoryId.eq(category_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count posts referencing an author. Used for delete protection.
    pub async fn count_by_author(&self, author_id: &str) -> AppResult<u64> {
        Post::find()
            .filter(post::Column::AuthorId.eq(author_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Published-post counts grouped by category ID.
    pub async fn published_count_by_category(&self) -> AppResult<Vec<(String, i64)>> {
        let rows = Post::find()
            .select_only()
            .column(post::Column::CategoryId)
            .column_as(post::Column::Id.count(), "post_count")
            .filter(post::Column::Published.eq(true))
            .group_by(post::Column::CategoryId)
            .into_model::<CategoryPostCount>()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|row| (row.category_id, row.post_count))
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_post(id: &str, title: &str, published: bool) -> post::Model {
        post::Model {
            id: id.to_string(),
            title: title.to_string(),
            slug: title.to_lowercase().replace(' ', "-"),
            created_at: Utc::now().into(),
            published,
            excerpt: "excerpt".to_string(),
            hero_image: None,
            hero_video_url: None,
            content: "content".to_string(),
            category_id: "cat1".to_string(),
            author_id: "author1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_find_by_id_found() {
        let post = create_test_post("post1", "Padaczka", true);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[post.clone()]])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let result = repo.find_by_id("post1").await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().title, "Padaczka");
    }

    #[tokio::test]
    async fn test_get_by_id_not_found_returns_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<post::Model>::new()])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let result = repo.get_by_id("nonexistent").await;

        assert!(result.is_err());
        match result {
            Err(AppError::PostNotFound(id)) => assert_eq!(id, "nonexistent"),
            _ => panic!("Expected PostNotFound error"),
        }
    }

    #[tokio::test]
    async fn test_search_title_first_prefers_title_matches() {
        let title_match = create_test_post("post1", "Epilepsy guide", true);

        // Only one query result queued: the title query must satisfy the
        // call without touching the content query.
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[title_match.clone()]])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let (results, fallback_used) = repo.search_title_first("epilepsy").await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "post1");
        assert!(!fallback_used);
    }

    #[tokio::test]
    async fn test_search_title_first_falls_back_to_content() {
        let content_match = create_test_post("post2", "Brain health", true);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<post::Model>::new(), vec![content_match]])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let (results, fallback_used) = repo.search_title_first("epilepsy").await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "post2");
        assert!(fallback_used);
    }

    #[tokio::test]
    async fn test_search_title_first_no_matches_at_all() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<post::Model>::new(), Vec::<post::Model>::new()])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let (results, fallback_used) = repo.search_title_first("epilepsy").await.unwrap();

        assert!(results.is_empty());
        assert!(!fallback_used);
    }

    #[tokio::test]
    async fn test_list_published() {
        let post1 = create_test_post("post1", "First", true);
        let post2 = create_test_post("post2", "Second", true);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[post1, post2]])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let result = repo.list(&PostQuery::new().published()).await.unwrap();

        assert_eq!(result.len(), 2);
    }
}
