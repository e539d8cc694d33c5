//! Post service and listing views.

use std::collections::BTreeSet;

use fundacja_common::{slug_or_derive, AppError, AppResult, IdGenerator};
use fundacja_db::entities::{author, category, gallery_image, post, tag};
use fundacja_db::repositories::{
    AuthorRepository, CategoryRepository, GalleryImageRepository, PostRepository,
};
use fundacja_db::PostQuery;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::hero::{resolve_hero_media, HeroMedia};

/// Maximum excerpt length in characters.
pub const MAX_EXCERPT_LEN: usize = 500;

/// Maximum title length in characters.
pub const MAX_TITLE_LEN: usize = 300;

/// Number of randomly sampled related posts on a detail page.
pub const RELATED_POSTS_LIMIT: u64 = 6;

/// Category fields exposed on listings.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub default_image: Option<String>,
}

impl From<category::Model> for CategoryResponse {
    fn from(c: category::Model) -> Self {
        Self {
            id: c.id,
            name: c.name,
            slug: c.slug,
            default_image: c.default_image,
        }
    }
}

/// Author fields exposed on listings.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorResponse {
    pub id: String,
    pub username: String,
    pub display_name: Option<String>,
    pub email: String,
}

impl From<author::Model> for AuthorResponse {
    fn from(a: author::Model) -> Self {
        Self {
            id: a.id,
            username: a.username,
            display_name: a.display_name,
            email: a.email,
        }
    }
}

/// Tag fields exposed on listings.
#[derive(Debug, Clone, Serialize)]
pub struct TagResponse {
    pub id: String,
    pub name: String,
    pub slug: String,
}

impl From<tag::Model> for TagResponse {
    fn from(t: tag::Model) -> Self {
        Self {
            id: t.id,
            name: t.name,
            slug: t.slug,
        }
    }
}

/// Gallery image fields exposed on the detail page.
#[derive(Debug, Clone, Serialize)]
pub struct GalleryImageResponse {
    pub id: String,
    pub image: String,
    pub caption: Option<String>,
    pub position: i32,
    pub uploaded_at: String,
}

impl From<gallery_image::Model> for GalleryImageResponse {
    fn from(g: gallery_image::Model) -> Self {
        Self {
            id: g.id,
            image: g.image,
            caption: g.caption,
            position: g.position,
            uploaded_at: g.uploaded_at.to_rfc3339(),
        }
    }
}

/// Simplified post view used by every listing surface.
#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub created_at: String,
    pub published: bool,
    /// The hero image doubles as the listing thumbnail.
    pub thumbnail_image: Option<String>,
    pub excerpt: String,
    pub category: CategoryResponse,
    pub author: AuthorResponse,
    pub tags: Vec<TagResponse>,
    /// Canonical URL: `/{category.slug}/{post.slug}`.
    pub url: String,
}

/// Full post view for the detail page.
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub created_at: String,
    pub published: bool,
    pub thumbnail_image: Option<String>,
    pub excerpt: String,
    pub hero_image: Option<String>,
    pub hero_video_url: Option<String>,
    pub hero_media: Option<HeroMedia>,
    pub content: String,
    pub category: CategoryResponse,
    pub author: AuthorResponse,
    pub tags: Vec<TagResponse>,
    pub related_posts: Vec<PostSummary>,
    pub gallery_images: Vec<GalleryImageResponse>,
    pub url: String,
}

/// Input for creating a post.
#[derive(Debug, Deserialize)]
pub struct CreatePostInput {
    pub title: String,
    /// Explicit slug, preserved verbatim. Derived from the title when
    /// absent or empty.
    #[serde(default)]
    pub slug: Option<String>,
    pub excerpt: String,
    #[serde(default)]
    pub hero_image: Option<String>,
    #[serde(default)]
    pub hero_video_url: Option<String>,
    pub content: String,
    pub category_id: String,
    pub author_id: String,
    #[serde(default)]
    pub tag_ids: Vec<String>,
    #[serde(default)]
    pub published: bool,
}

/// Input for updating a post. The slug is stable once set and cannot be
/// changed here.
#[derive(Debug, Deserialize)]
pub struct UpdatePostInput {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub hero_image: Option<Option<String>>,
    pub hero_video_url: Option<Option<String>>,
    pub content: Option<String>,
    pub category_id: Option<String>,
    pub published: Option<bool>,
    pub tag_ids: Option<Vec<String>>,
}

/// Join posts with their categories, authors and tags into listing views,
/// preserving the input order. Posts whose category or author row is
/// missing are dropped with a warning.
pub async fn hydrate_posts(
    post_repo: &PostRepository,
    category_repo: &CategoryRepository,
    author_repo: &AuthorRepository,
    posts: Vec<post::Model>,
) -> AppResult<Vec<PostSummary>> {
    if posts.is_empty() {
        return Ok(vec![]);
    }

    let post_ids: Vec<String> = posts.iter().map(|p| p.id.clone()).collect();
    let tag_pairs = post_repo.tags_for_posts(&post_ids).await?;

    let category_ids: Vec<String> = posts
        .iter()
        .map(|p| p.category_id.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let categories = category_repo.find_by_ids(&category_ids).await?;

    let author_ids: Vec<String> = posts
        .iter()
        .map(|p| p.author_id.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let authors = author_repo.find_by_ids(&author_ids).await?;

    let summaries = posts
        .into_iter()
        .filter_map(|p| {
            let Some(category) = categories.iter().find(|c| c.id == p.category_id) else {
                tracing::warn!(post_id = %p.id, category_id = %p.category_id, "Post references missing category");
                return None;
            };
            let Some(author) = authors.iter().find(|a| a.id == p.author_id) else {
                tracing::warn!(post_id = %p.id, author_id = %p.author_id, "Post references missing author");
                return None;
            };

            let tags: Vec<TagResponse> = tag_pairs
                .iter()
                .filter(|(post_id, _)| *post_id == p.id)
                .map(|(_, t)| t.clone().into())
                .collect();

            Some(PostSummary {
                url: p.url(&category.slug),
                id: p.id,
                title: p.title,
                slug: p.slug,
                created_at: p.created_at.to_rfc3339(),
                published: p.published,
                thumbnail_image: p.hero_image,
                excerpt: p.excerpt,
                category: category.clone().into(),
                author: author.clone().into(),
                tags,
            })
        })
        .collect();

    Ok(summaries)
}

/// Post service for business logic.
#[derive(Clone)]
pub struct PostService {
    post_repo: PostRepository,
    category_repo: CategoryRepository,
    author_repo: AuthorRepository,
    gallery_repo: GalleryImageRepository,
    id_gen: IdGenerator,
}

impl PostService {
    /// Create a new post service.
    #[must_use]
    pub const fn new(
        post_repo: PostRepository,
        category_repo: CategoryRepository,
        author_repo: AuthorRepository,
        gallery_repo: GalleryImageRepository,
    ) -> Self {
        Self {
            post_repo,
            category_repo,
            author_repo,
            gallery_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Materialize a query description into hydrated listing views.
    pub async fn list(&self, query: &PostQuery) -> AppResult<Vec<PostSummary>> {
        let posts = self.post_repo.list(query).await?;
        hydrate_posts(
            &self.post_repo,
            &self.category_repo,
            &self.author_repo,
            posts,
        )
        .await
    }

    /// Full detail view for the canonical URL pair
    /// `/{category_slug}/{post_slug}`. Only published posts resolve.
    pub async fn detail(&self, category_slug: &str, post_slug: &str) -> AppResult<PostDetail> {
        let post = self
            .post_repo
            .find_published_by_slugs(category_slug, post_slug)
            .await?
            .ok_or_else(|| AppError::PostNotFound(format!("{category_slug}/{post_slug}")))?;

        let category = self.category_repo.get_by_id(&post.category_id).await?;
        let author = self.author_repo.get_by_id(&post.author_id).await?;
        let tags = self.post_repo.tags_for_post(&post.id).await?;
        let gallery = self.gallery_repo.list_for_post(&post.id).await?;

        // Freshly sampled on every request.
        let related = self
            .post_repo
            .related_sample(&post.id, RELATED_POSTS_LIMIT)
            .await?;
        let related_posts = hydrate_posts(
            &self.post_repo,
            &self.category_repo,
            &self.author_repo,
            related,
        )
        .await?;

        let hero_media = resolve_hero_media(&post, &category);

        Ok(PostDetail {
            url: post.url(&category.slug),
            id: post.id,
            title: post.title,
            slug: post.slug,
            created_at: post.created_at.to_rfc3339(),
            published: post.published,
            thumbnail_image: post.hero_image.clone(),
            excerpt: post.excerpt,
            hero_image: post.hero_image,
            hero_video_url: post.hero_video_url,
            hero_media,
            content: post.content,
            category: category.into(),
            author: author.into(),
            tags: tags.into_iter().map(Into::into).collect(),
            related_posts,
            gallery_images: gallery.into_iter().map(Into::into).collect(),
        })
    }

    /// Create a new post.
    pub async fn create(&self, input: CreatePostInput) -> AppResult<post::Model> {
        if input.title.is_empty() || input.title.len() > MAX_TITLE_LEN {
            return Err(AppError::Validation(format!(
                "Title must be between 1 and {MAX_TITLE_LEN} characters"
            )));
        }
        if input.excerpt.len() > MAX_EXCERPT_LEN {
            return Err(AppError::Validation(format!(
                "Excerpt must be at most {MAX_EXCERPT_LEN} characters"
            )));
        }

        // An explicit slug is preserved verbatim; otherwise derive one
        // from the title.
        let slug = slug_or_derive(input.slug.as_deref(), &input.title);
        if slug.is_empty() {
            return Err(AppError::Validation(
                "A slug could not be derived from the title".to_string(),
            ));
        }

        // Both references are delete-protected; verify them up front so a
        // bad ID surfaces as not-found rather than a constraint error.
        let _ = self.category_repo.get_by_id(&input.category_id).await?;
        let _ = self.author_repo.get_by_id(&input.author_id).await?;

        let model = post::ActiveModel {
            id: Set(self.id_gen.generate()),
            title: Set(input.title),
            slug: Set(slug),
            created_at: Set(chrono::Utc::now().into()),
            published: Set(input.published),
            excerpt: Set(input.excerpt),
            hero_image: Set(input.hero_image),
            hero_video_url: Set(input.hero_video_url),
            content: Set(input.content),
            category_id: Set(input.category_id),
            author_id: Set(input.author_id),
        };

        let created = self.post_repo.create(model).await?;

        if !input.tag_ids.is_empty() {
            self.post_repo.set_tags(&created.id, &input.tag_ids).await?;
        }

        Ok(created)
    }

    /// Update a post, addressed by its slug. The slug stays as created.
    pub async fn update(&self, slug: &str, input: UpdatePostInput) -> AppResult<post::Model> {
        let post = self
            .post_repo
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::PostNotFound(slug.to_string()))?;
        let mut active: post::ActiveModel = post.into();

        if let Some(title) = input.title {
            if title.is_empty() || title.len() > MAX_TITLE_LEN {
                return Err(AppError::Validation(format!(
                    "Title must be between 1 and {MAX_TITLE_LEN} characters"
                )));
            }
            active.title = Set(title);
        }

        if let Some(excerpt) = input.excerpt {
            if excerpt.len() > MAX_EXCERPT_LEN {
                return Err(AppError::Validation(format!(
                    "Excerpt must be at most {MAX_EXCERPT_LEN} characters"
                )));
            }
            active.excerpt = Set(excerpt);
        }

        if let Some(hero_image) = input.hero_image {
            active.hero_image = Set(hero_image);
        }

        if let Some(hero_video_url) = input.hero_video_url {
            active.hero_video_url = Set(hero_video_url);
        }

        if let Some(content) = input.content {
            active.content = Set(content);
        }

        if let Some(category_id) = input.category_id {
            let _ = self.category_repo.get_by_id(&category_id).await?;
            active.category_id = Set(category_id);
        }

        if let Some(published) = input.published {
            active.published = Set(published);
        }

        let updated = self.post_repo.update(active).await?;

        if let Some(tag_ids) = input.tag_ids {
            self.post_repo.set_tags(&updated.id, &tag_ids).await?;
        }

        Ok(updated)
    }

    /// Delete a post, addressed by its slug. Gallery images and tag
    /// associations cascade.
    pub async fn delete(&self, slug: &str) -> AppResult<()> {
        let post = self
            .post_repo
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::PostNotFound(slug.to_string()))?;
        self.post_repo.delete(&post.id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn repos(
        db: Arc<sea_orm::DatabaseConnection>,
    ) -> (
        PostRepository,
        CategoryRepository,
        AuthorRepository,
        GalleryImageRepository,
    ) {
        (
            PostRepository::new(db.clone()),
            CategoryRepository::new(db.clone()),
            AuthorRepository::new(db.clone()),
            GalleryImageRepository::new(db),
        )
    }

    fn test_category() -> category::Model {
        category::Model {
            id: "cat1".to_string(),
            name: "Neurologia".to_string(),
            slug: "neurologia".to_string(),
            default_image: None,
        }
    }

    fn test_author() -> author::Model {
        author::Model {
            id: "author1".to_string(),
            username: "redakcja".to_string(),
            display_name: None,
            email: "redakcja@example.org".to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn test_post(id: &str, slug: &str) -> post::Model {
        post::Model {
            id: id.to_string(),
            title: "Padaczka u doroslych".to_string(),
            slug: slug.to_string(),
            created_at: Utc::now().into(),
            published: true,
            excerpt: "excerpt".to_string(),
            hero_image: None,
            hero_video_url: None,
            content: "content".to_string(),
            category_id: "cat1".to_string(),
            author_id: "author1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_derives_slug_when_absent() {
        let created = test_post("p1", "padaczka-u-doroslych");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_category()]])
                .append_query_results([[test_author()]])
                .append_query_results([[created]])
                .into_connection(),
        );
        let (posts, categories, authors, gallery) = repos(db);
        let service = PostService::new(posts, categories, authors, gallery);

        let result = service
            .create(CreatePostInput {
                title: "Padaczka u doroslych".to_string(),
                slug: None,
                excerpt: "excerpt".to_string(),
                hero_image: None,
                hero_video_url: None,
                content: "content".to_string(),
                category_id: "cat1".to_string(),
                author_id: "author1".to_string(),
                tag_ids: vec![],
                published: true,
            })
            .await
            .unwrap();

        assert_eq!(result.slug, "padaczka-u-doroslych");
    }

    #[tokio::test]
    async fn test_create_preserves_explicit_slug() {
        let mut created = test_post("p1", "custom-slug");
        created.title = "A completely different title".to_string();

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_category()]])
                .append_query_results([[test_author()]])
                .append_query_results([[created]])
                .into_connection(),
        );
        let (posts, categories, authors, gallery) = repos(db);
        let service = PostService::new(posts, categories, authors, gallery);

        let result = service
            .create(CreatePostInput {
                title: "A completely different title".to_string(),
                slug: Some("custom-slug".to_string()),
                excerpt: "excerpt".to_string(),
                hero_image: None,
                hero_video_url: None,
                content: "content".to_string(),
                category_id: "cat1".to_string(),
                author_id: "author1".to_string(),
                tag_ids: vec![],
                published: false,
            })
            .await
            .unwrap();

        assert_eq!(result.slug, "custom-slug");
    }

    #[tokio::test]
    async fn test_create_rejects_overlong_excerpt() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let (posts, categories, authors, gallery) = repos(db);
        let service = PostService::new(posts, categories, authors, gallery);

        let result = service
            .create(CreatePostInput {
                title: "Title".to_string(),
                slug: None,
                excerpt: "x".repeat(MAX_EXCERPT_LEN + 1),
                hero_image: None,
                hero_video_url: None,
                content: "content".to_string(),
                category_id: "cat1".to_string(),
                author_id: "author1".to_string(),
                tag_ids: vec![],
                published: false,
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_category() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<category::Model>::new()])
                .into_connection(),
        );
        let (posts, categories, authors, gallery) = repos(db);
        let service = PostService::new(posts, categories, authors, gallery);

        let result = service
            .create(CreatePostInput {
                title: "Title".to_string(),
                slug: None,
                excerpt: "excerpt".to_string(),
                hero_image: None,
                hero_video_url: None,
                content: "content".to_string(),
                category_id: "missing".to_string(),
                author_id: "author1".to_string(),
                tag_ids: vec![],
                published: false,
            })
            .await;

        assert!(matches!(result, Err(AppError::CategoryNotFound(_))));
    }

    #[tokio::test]
    async fn test_detail_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<post::Model>::new()])
                .into_connection(),
        );
        let (posts, categories, authors, gallery) = repos(db);
        let service = PostService::new(posts, categories, authors, gallery);

        let result = service.detail("neurologia", "missing").await;

        assert!(matches!(result, Err(AppError::PostNotFound(_))));
    }
}
