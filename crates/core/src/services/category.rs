//! Category service.

use fundacja_common::{slug_or_derive, AppError, AppResult, IdGenerator};
use fundacja_db::entities::category;
use fundacja_db::repositories::{AuthorRepository, CategoryRepository, PostRepository};
use fundacja_db::PostQuery;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use super::post::{hydrate_posts, CategoryResponse, PostSummary};

/// Posts per page on a category detail page.
pub const CATEGORY_PAGE_SIZE: u64 = 3;

/// Maximum category name length in characters.
pub const MAX_NAME_LEN: usize = 200;

/// Category listing entry with its published-post count.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryWithCount {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub default_image: Option<String>,
    pub post_count: i64,
}

/// One page of a category's published posts.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryPage {
    pub category: CategoryResponse,
    pub posts: Vec<PostSummary>,
    pub page: u64,
    pub total_posts: u64,
    pub total_pages: u64,
}

/// Input for creating a category.
#[derive(Debug, Deserialize)]
pub struct CreateCategoryInput {
    pub name: String,
    /// Explicit slug, preserved verbatim. Derived from the name when
    /// absent or empty.
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub default_image: Option<String>,
}

/// Input for updating a category. The slug is stable once set.
#[derive(Debug, Deserialize)]
pub struct UpdateCategoryInput {
    pub name: Option<String>,
    pub default_image: Option<Option<String>>,
}

/// Category service for business logic.
#[derive(Clone)]
pub struct CategoryService {
    category_repo: CategoryRepository,
    post_repo: PostRepository,
    author_repo: AuthorRepository,
    id_gen: IdGenerator,
}

impl CategoryService {
    /// Create a new category service.
    #[must_use]
    pub const fn new(
        category_repo: CategoryRepository,
        post_repo: PostRepository,
        author_repo: AuthorRepository,
    ) -> Self {
        Self {
            category_repo,
            post_repo,
            author_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// All categories, alphabetical, each with its published-post count.
    pub async fn list_with_counts(&self) -> AppResult<Vec<CategoryWithCount>> {
        let categories = self.category_repo.list_ordered().await?;
        let counts = self.post_repo.published_count_by_category().await?;

        Ok(categories
            .into_iter()
            .map(|c| {
                let post_count = counts
                    .iter()
                    .find(|(id, _)| *id == c.id)
                    .map_or(0, |(_, count)| *count);
                CategoryWithCount {
                    id: c.id,
                    name: c.name,
                    slug: c.slug,
                    default_image: c.default_image,
                    post_count,
                }
            })
            .collect())
    }

    /// One page of a category's published posts, newest first.
    /// Pages are 1-based; out-of-range pages return an empty post list.
    pub async fn page(&self, slug: &str, page: u64) -> AppResult<CategoryPage> {
        let category = self.category_repo.get_by_slug(slug).await?;

        let base = PostQuery::new().published().by_category(slug);
        let total_posts = self.post_repo.count(&base).await?;

        let page = page.max(1);
        let posts = self
            .post_repo
            .list(
                &base
                    .limit(CATEGORY_PAGE_SIZE)
                    .offset((page - 1) * CATEGORY_PAGE_SIZE),
            )
            .await?;
        let posts = hydrate_posts(
            &self.post_repo,
            &self.category_repo,
            &self.author_repo,
            posts,
        )
        .await?;

        Ok(CategoryPage {
            category: category.into(),
            posts,
            page,
            total_posts,
            total_pages: total_posts.div_ceil(CATEGORY_PAGE_SIZE),
        })
    }

    /// Create a new category.
    pub async fn create(&self, input: CreateCategoryInput) -> AppResult<category::Model> {
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

        let model = category::ActiveModel {
            id: Set(self.id_gen.generate()),
            name: Set(input.name),
            slug: Set(slug),
            default_image: Set(input.default_image),
        };

        self.category_repo.create(model).await
    }

    /// Update a category. The slug stays as created.
    pub async fn update(
        &self,
        slug: &str,
        input: UpdateCategoryInput,
    ) -> AppResult<category::Model> {
        let category = self.category_repo.get_by_slug(slug).await?;
        let mut active: category::ActiveModel = category.into();

        if let Some(name) = input.name {
            if name.is_empty() || name.len() > MAX_NAME_LEN {
                return Err(AppError::Validation(format!(
                    "Name must be between 1 and {MAX_NAME_LEN} characters"
                )));
            }
            active.name = Set(name);
        }

        if let Some(default_image) = input.default_image {
            active.default_image = Set(default_image);
        }

        self.category_repo.update(active).await
    }

    /// Delete a category. Blocked while posts still reference it.
    pub async fn delete(&self, slug: &str) -> AppResult<()> {
        let category = self.category_repo.get_by_slug(slug).await?;

        let referencing = self.post_repo.count_by_category(&category.id).await?;
        if referencing > 0 {
            return Err(AppError::ReferenceProtected(format!(
                "Category '{}' is referenced by {referencing} post(s)",
                category.name
            )));
        }

        self.category_repo.delete(&category.id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn service(db: Arc<sea_orm::DatabaseConnection>) -> CategoryService {
        CategoryService::new(
            CategoryRepository::new(db.clone()),
            PostRepository::new(db.clone()),
            AuthorRepository::new(db),
        )
    }

    fn test_category(id: &str, name: &str, slug: &str) -> category::Model {
        category::Model {
            id: id.to_string(),
            name: name.to_string(),
            slug: slug.to_string(),
            default_image: None,
        }
    }

    #[tokio::test]
    async fn test_delete_blocked_while_referenced() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_category("cat1", "Neurologia", "neurologia")]])
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::from(3i64),
                }]])
                .into_connection(),
        );

        let result = service(db).delete("neurologia").await;

        assert!(matches!(result, Err(AppError::ReferenceProtected(_))));
    }

    #[tokio::test]
    async fn test_delete_allowed_when_unreferenced() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_category("cat1", "Neurologia", "neurologia")]])
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::from(0i64),
                }]])
                .append_exec_results([sea_orm::MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let result = service(db).delete("neurologia").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_derives_slug() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_category("cat1", "Choroby rzadkie", "choroby-rzadkie")]])
                .into_connection(),
        );

        let result = service(db)
            .create(CreateCategoryInput {
                name: "Choroby rzadkie".to_string(),
                slug: None,
                default_image: None,
            })
            .await
            .unwrap();

        assert_eq!(result.slug, "choroby-rzadkie");
    }

    #[tokio::test]
    async fn test_list_with_counts_defaults_to_zero() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[
                    test_category("cat1", "Neurologia", "neurologia"),
                    test_category("cat2", "Profilaktyka", "profilaktyka"),
                ]])
                .append_query_results([[maplit::btreemap! {
                    "category_id" => sea_orm::Value::from("cat1".to_string()),
                    "post_count" => sea_orm::Value::from(7i64),
                }]])
                .into_connection(),
        );

        let result = service(db).list_with_counts().await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].post_count, 7);
        assert_eq!(result[1].post_count, 0);
    }
}
