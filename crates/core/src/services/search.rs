//! Search service.

use fundacja_common::AppResult;
use fundacja_db::repositories::{AuthorRepository, CategoryRepository, PostRepository};
use fundacja_db::PostQuery;
use serde::{Deserialize, Serialize};

use super::post::{hydrate_posts, PostSummary};

/// Which fields a search runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Title first, then content when no title matches.
    #[default]
    TitleContent,
    /// Substring match on tag names.
    Tags,
}

/// Result of a search page request.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub query: String,
    pub results: Vec<PostSummary>,
    /// False for an empty or whitespace-only query; no query runs then.
    pub search_performed: bool,
    /// True only when title search found nothing and the results came
    /// from the content fallback.
    pub fallback_used: bool,
}

/// Search service for the search page.
#[derive(Clone)]
pub struct SearchService {
    post_repo: PostRepository,
    category_repo: CategoryRepository,
    author_repo: AuthorRepository,
}

impl SearchService {
    /// Create a new search service.
    #[must_use]
    pub const fn new(
        post_repo: PostRepository,
        category_repo: CategoryRepository,
        author_repo: AuthorRepository,
    ) -> Self {
        Self {
            post_repo,
            category_repo,
            author_repo,
        }
    }

    /// Run a search over published posts, newest first.
    ///
    /// In [`SearchMode::TitleContent`] the title matches win outright;
    /// content matches are only consulted when no title matches exist,
    /// and the two sets are never merged.
    pub async fn search(&self, query: &str, mode: SearchMode) -> AppResult<SearchOutcome> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Ok(SearchOutcome {
                query: String::new(),
                results: vec![],
                search_performed: false,
                fallback_used: false,
            });
        }

        let (posts, fallback_used) = match mode {
            SearchMode::TitleContent => self.post_repo.search_title_first(trimmed).await?,
            SearchMode::Tags => {
                let posts = self
                    .post_repo
                    .list(&PostQuery::new().published().tag_name_contains(trimmed))
                    .await?;
                (posts, false)
            }
        };

        let results = hydrate_posts(
            &self.post_repo,
            &self.category_repo,
            &self.author_repo,
            posts,
        )
        .await?;

        Ok(SearchOutcome {
            query: trimmed.to_string(),
            results,
            search_performed: true,
            fallback_used,
        })
    }
}
