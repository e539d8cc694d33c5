//! Tag service.

use fundacja_common::{slug_or_derive, AppError, AppResult, IdGenerator};
use fundacja_db::entities::tag;
use fundacja_db::repositories::{
    AuthorRepository, CategoryRepository, PostRepository, TagRepository,
};
use fundacja_db::PostQuery;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use super::post::{hydrate_posts, PostSummary, TagResponse};

/// Maximum tag name length in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Tag listing entry with its published-post count.
#[derive(Debug, Clone, Serialize)]
pub struct TagWithCount {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub post_count: i64,
}

/// A tag together with its published posts.
#[derive(Debug, Clone, Serialize)]
pub struct TagPosts {
    pub tag: TagResponse,
    pub posts: Vec<PostSummary>,
}

/// Input for creating a tag.
#[derive(Debug, Deserialize)]
pub struct CreateTagInput {
    pub name: String,
    /// Explicit slug, preserved verbatim. Derived from the name when
    /// absent or empty.
    #[serde(default)]
    pub slug: Option<String>,
}

/// Tag service for business logic.
#[derive(Clone)]
pub struct TagService {
    tag_repo: TagRepository,
    post_repo: PostRepository,
    category_repo: CategoryRepository,
    author_repo: AuthorRepository,
    id_gen: IdGenerator,
}

impl TagService {
    /// Create a new tag service.
    #[must_use]
    pub const fn new(
        tag_repo: TagRepository,
        post_repo: PostRepository,
        category_repo: CategoryRepository,
        author_repo: AuthorRepository,
    ) -> Self {
        Self {
            tag_repo,
            post_repo,
            category_repo,
            author_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// All tags, alphabetical, each with its published-post count.
    pub async fn list_with_counts(&self) -> AppResult<Vec<TagWithCount>> {
        let tags = self.tag_repo.list_ordered().await?;
        let counts = self.tag_repo.published_counts().await?;

        Ok(tags
            .into_iter()
            .map(|t| {
                let post_count = counts
                    .iter()
                    .find(|(id, _)| *id == t.id)
                    .map_or(0, |(_, count)| *count);
                TagWithCount {
                    id: t.id,
                    name: t.name,
                    slug: t.slug,
                    post_count,
                }
            })
            .collect())
    }

    /// Most-used tags by published-post count.
    pub async fn popular(&self, limit: u64) -> AppResult<Vec<TagWithCount>> {
        let tags = self.tag_repo.popular(limit).await?;
        Ok(tags
            .into_iter()
            .map(|(t, post_count)| TagWithCount {
                id: t.id,
                name: t.name,
                slug: t.slug,
                post_count,
            })
            .collect())
    }

    /// A tag's published posts, newest first.
    pub async fn posts_for(&self, slug: &str) -> AppResult<TagPosts> {
        let tag = self.tag_repo.get_by_slug(slug).await?;

        let posts = self
            .post_repo
            .list(&PostQuery::new().published().by_tag(slug))
            .await?;
        let posts = hydrate_posts(
            &self.post_repo,
            &self.category_repo,
            &self.author_repo,
            posts,
        )
        .await?;

        Ok(TagPosts {
            tag: tag.into(),
            posts,
        })
    }

    /// Create a new tag.
    pub async fn create(&self, input: CreateTagInput) -> AppResult<tag::Model> {
        if input.name.is_empty() || input.name.len() > MAX_NAME_LEN {
            return Err(AppError::Validation(format!(
                "Name must be between 1 and {MAX_NAME_LEN} characters"
            )));
        }

        let slug = slug_or_derive(input.slug.as_deref(), &input.name);
        if slug.is_empty() {
            return Err(AppError::Validation(
                "A slug could not be derived from the name".to_string(),
            ));
        }

        let model = tag::ActiveModel {
            id: Set(self.id_gen.generate()),
            name: Set(input.name),
            slug: Set(slug),
        };

        self.tag_repo.create(model).await
    }

    /// Delete a tag. Posts keep existing; only the associations go.
    pub async fn delete(&self, slug: &str) -> AppResult<()> {
        let tag = self.tag_repo.get_by_slug(slug).await?;
        self.tag_repo.delete(&tag.id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn service(db: Arc<sea_orm::DatabaseConnection>) -> TagService {
        TagService::new(
            TagRepository::new(db.clone()),
            PostRepository::new(db.clone()),
            CategoryRepository::new(db.clone()),
            AuthorRepository::new(db),
        )
    }

    #[tokio::test]
    async fn test_create_derives_slug() {
        let created = tag::Model {
            id: "t1".to_string(),
            name: "Udar mozgu".to_string(),
            slug: "udar-mozgu".to_string(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[created]])
                .into_connection(),
        );

        let result = service(db)
            .create(CreateTagInput {
                name: "Udar mozgu".to_string(),
                slug: None,
            })
            .await
            .unwrap();

        assert_eq!(result.slug, "udar-mozgu");
    }

    #[tokio::test]
    async fn test_posts_for_unknown_tag() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<tag::Model>::new()])
                .into_connection(),
        );

        let result = service(db).posts_for("missing").await;

        assert!(matches!(result, Err(AppError::TagNotFound(_))));
    }
}
