//! Composable post query descriptions.
//!
//! A [`PostQuery`] is an immutable description of a listing query. Builder
//! methods return a new description; nothing touches the database until a
//! repository materializes the description with [`PostQuery::select`].
//! Ordering is always newest-first (creation timestamp descending).

use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Select,
};

use crate::entities::{category, post, post_tag, tag, Post};

/// Escape `LIKE` wildcards and wrap the query in `%...%`.
pub(crate) fn like_pattern(query: &str) -> String {
    format!("%{}%", query.replace('%', "\\%").replace('_', "\\_"))
}

/// Immutable description of a post listing query.
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    published_only: bool,
    category_slug: Option<String>,
    tag_slug: Option<String>,
    tag_slugs: Option<Vec<String>>,
    title_query: Option<String>,
    content_query: Option<String>,
    search_query: Option<String>,
    tag_name_query: Option<String>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl PostQuery {
    /// Start an empty description matching every post.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to published posts.
    #[must_use]
    pub fn published(mut self) -> Self {
        self.published_only = true;
        self
    }

    /// Restrict to posts in the category with the given slug.
    #[must_use]
    pub fn by_category(mut self, slug: impl Into<String>) -> Self {
        self.category_slug = Some(slug.into());
        self
    }

    /// Restrict to posts carrying the tag with the given slug.
    #[must_use]
    pub fn by_tag(mut self, slug: impl Into<String>) -> Self {
        self.tag_slug = Some(slug.into());
        self
    }

    /// Restrict to posts carrying any of the given tag slugs,
    /// de-duplicated.
    #[must_use]
    pub fn by_tags_list(mut self, slugs: Vec<String>) -> Self {
        self.tag_slugs = Some(slugs);
        self
    }

    /// Case-insensitive substring match on title OR content.
    #[must_use]
    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }

    /// Case-insensitive substring match on the title only.
    #[must_use]
    pub fn title_contains(mut self, query: impl Into<String>) -> Self {
        self.title_query = Some(query.into());
        self
    }

    /// Case-insensitive substring match on the content only.
    #[must_use]
    pub fn content_contains(mut self, query: impl Into<String>) -> Self {
        self.content_query = Some(query.into());
        self
    }

    /// Case-insensitive substring match on tag names, de-duplicated.
    #[must_use]
    pub fn tag_name_contains(mut self, query: impl Into<String>) -> Self {
        self.tag_name_query = Some(query.into());
        self
    }

    /// Truncate the result to `limit` rows.
    #[must_use]
    pub const fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skip the first `offset` rows.
    #[must_use]
    pub const fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Published posts, newest first, truncated to `limit`.
    #[must_use]
    pub fn featured(limit: u64) -> Self {
        Self::new().published().limit(limit)
    }

    /// Materialize the description into a sea-orm select.
    ///
    /// Joins are only added for the predicates that need them; tag
    /// predicates that can multiply rows add `DISTINCT`.
    #[must_use]
    pub fn select(&self) -> Select<Post> {
        let mut query = Post::find();

        if self.published_only {
            query = query.filter(post::Column::Published.eq(true));
        }

        if let Some(slug) = &self.category_slug {
            query = query
                .join(JoinType::InnerJoin, post::Relation::Category.def())
                .filter(category::Column::Slug.eq(slug.clone()));
        }

        let needs_tag_join =
            self.tag_slug.is_some() || self.tag_slugs.is_some() || self.tag_name_query.is_some();
        if needs_tag_join {
            query = query
                .join(JoinType::InnerJoin, post::Relation::PostTags.def())
                .join(JoinType::InnerJoin, post_tag::Relation::Tag.def());
        }

        if let Some(slug) = &self.tag_slug {
            query = query.filter(tag::Column::Slug.eq(slug.clone()));
        }

        if let Some(slugs) = &self.tag_slugs {
            query = query
                .filter(tag::Column::Slug.is_in(slugs.clone()))
                .distinct();
        }

        if let Some(name_query) = &self.tag_name_query {
            query = query
                .filter(Expr::col((tag::Entity, tag::Column::Name)).ilike(like_pattern(name_query)))
                .distinct();
        }

        if let Some(title_query) = &self.title_query {
            query = query
                .filter(Expr::col((post::Entity, post::Column::Title)).ilike(like_pattern(title_query)));
        }

        if let Some(content_query) = &self.content_query {
            query = query.filter(
                Expr::col((post::Entity, post::Column::Content)).ilike(like_pattern(content_query)),
            );
        }

        if let Some(search_query) = &self.search_query {
            query = query.filter(
                Condition::any()
                    .add(
                        Expr::col((post::Entity, post::Column::Title))
                            .ilike(like_pattern(search_query)),
                    )
                    .add(
                        Expr::col((post::Entity, post::Column::Content))
                            .ilike(like_pattern(search_query)),
                    ),
            );
        }

        query = query.order_by_desc(post::Column::CreatedAt);

        if let Some(limit) = self.limit {
            query = query.limit(limit);
        }
        if let Some(offset) = self.offset {
            query = query.offset(offset);
        }

        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    fn sql(query: &PostQuery) -> String {
        query.select().build(DbBackend::Postgres).to_string()
    }

    #[test]
    fn test_builder_returns_new_descriptions() {
        let base = PostQuery::new().published();
        let filtered = base.clone().by_category("neurologia");

        // The base description is unaffected by further chaining.
        assert!(!sql(&base).contains("INNER JOIN"));
        assert!(sql(&filtered).contains(r#""category"."slug""#));
    }

    #[test]
    fn test_published_filter() {
        let query = PostQuery::new().published();
        assert!(sql(&query).contains(r#""post"."published" = TRUE"#));
    }

    #[test]
    fn test_ordering_is_newest_first() {
        let query = PostQuery::new();
        assert!(sql(&query).contains(r#"ORDER BY "post"."created_at" DESC"#));
    }

    #[test]
    fn test_search_matches_title_or_content() {
        let query = PostQuery::new().search("epilepsy");
        let sql = sql(&query);
        assert!(sql.contains("ILIKE"));
        assert!(sql.contains(r#""post"."title""#));
        assert!(sql.contains(r#""post"."content""#));
        assert!(sql.contains("OR"));
    }

    #[test]
    fn test_tags_list_is_deduplicated() {
        let query =
            PostQuery::new().by_tags_list(vec!["udar".to_string(), "migrena".to_string()]);
        let sql = sql(&query);
        assert!(sql.contains("DISTINCT"));
        assert!(sql.contains(r#""tag"."slug" IN"#));
    }

    #[test]
    fn test_like_wildcards_are_escaped() {
        let query = PostQuery::new().title_contains("100%_sure");
        assert!(sql(&query).contains("100\\%\\_sure"));
    }

    #[test]
    fn test_featured_is_published_with_limit() {
        let query = PostQuery::featured(6);
        let sql = sql(&query);
        assert!(sql.contains(r#""post"."published" = TRUE"#));
        assert!(sql.contains("LIMIT 6"));
    }
}

#[cfg(test)]
mod zzdebug_tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};
    #[test]
    fn zz_print() {
        let query = PostQuery::new().title_contains("100%_sure");
        let s = query.select().build(DbBackend::Postgres).to_string();
        println!("SQL: {}", s);
    }
}
