//! Home page listing composition.

use std::ops::Range;

use fundacja_common::AppResult;
use fundacja_db::entities::banner::{self, BannerPosition};
use fundacja_db::repositories::{
    AuthorRepository, BannerRepository, CategoryRepository, PostRepository,
};
use fundacja_db::PostQuery;
use serde::Serialize;

use super::post::{hydrate_posts, PostSummary};

/// Featured band: the first six posts.
pub const FEATURED_BAND: Range<usize> = 0..6;

/// Newest band: the five posts after the featured band.
pub const NEWEST_BAND: Range<usize> = 6..11;

/// Grid band: twelve posts starting one index before the newest band
/// ends. The post at index 10 appears in both the newest and grid bands.
pub const GRID_BAND: Range<usize> = 10..22;

/// The three display bands sliced out of one ordered sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bands<T> {
    pub featured: Vec<T>,
    pub newest: Vec<T>,
    pub grid: Vec<T>,
}

/// Slice an ordered sequence into the home page bands by fixed index
/// ranges. Ranges are clamped to the sequence length; short sequences
/// produce short or empty bands.
pub fn slice_bands<T: Clone>(sequence: &[T]) -> Bands<T> {
    let band = |range: Range<usize>| {
        let start = range.start.min(sequence.len());
        let end = range.end.min(sequence.len());
        sequence[start..end].to_vec()
    };

    Bands {
        featured: band(FEATURED_BAND),
        newest: band(NEWEST_BAND),
        grid: band(GRID_BAND),
    }
}

/// Composed home page context.
#[derive(Debug, Clone, Serialize)]
pub struct HomeListing {
    pub featured_posts: Vec<PostSummary>,
    pub newest_posts: Vec<PostSummary>,
    pub all_posts: Vec<PostSummary>,
    pub banner_1: Option<banner::Model>,
    pub banner_2: Option<banner::Model>,
    pub banner_3: Option<banner::Model>,
}

/// Listing service composing the home page.
#[derive(Clone)]
pub struct ListingService {
    post_repo: PostRepository,
    category_repo: CategoryRepository,
    author_repo: AuthorRepository,
    banner_repo: BannerRepository,
}

impl ListingService {
    /// Create a new listing service.
    #[must_use]
    pub const fn new(
        post_repo: PostRepository,
        category_repo: CategoryRepository,
        author_repo: AuthorRepository,
        banner_repo: BannerRepository,
    ) -> Self {
        Self {
            post_repo,
            category_repo,
            author_repo,
            banner_repo,
        }
    }

    /// Compose the home page: one materialized published newest-first
    /// sequence sliced into bands, plus the active banner per slot.
    pub async fn compose_home(&self) -> AppResult<HomeListing> {
        let posts = self
            .post_repo
            .list(&PostQuery::new().published().limit(GRID_BAND.end as u64))
            .await?;
        let summaries = hydrate_posts(
            &self.post_repo,
            &self.category_repo,
            &self.author_repo,
            posts,
        )
        .await?;

        let bands = slice_bands(&summaries);

        let banner_1 = self
            .banner_repo
            .active_for_position(BannerPosition::HomeBanner1)
            .await?;
        let banner_2 = self
            .banner_repo
            .active_for_position(BannerPosition::HomeBanner2)
            .await?;
        let banner_3 = self
            .banner_repo
            .active_for_position(BannerPosition::HomeBanner3)
            .await?;

        Ok(HomeListing {
            featured_posts: bands.featured,
            newest_posts: bands.newest,
            all_posts: bands.grid,
            banner_1,
            banner_2,
            banner_3,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands_with_twenty_five_posts() {
        let sequence: Vec<usize> = (0..25).collect();
        let bands = slice_bands(&sequence);

        assert_eq!(bands.featured, (0..6).collect::<Vec<_>>());
        assert_eq!(bands.newest, (6..11).collect::<Vec<_>>());
        assert_eq!(bands.grid, (10..22).collect::<Vec<_>>());
    }

    #[test]
    fn test_index_ten_is_in_both_newest_and_grid() {
        let sequence: Vec<usize> = (0..25).collect();
        let bands = slice_bands(&sequence);

        assert!(bands.newest.contains(&10));
        assert!(bands.grid.contains(&10));
    }

    #[test]
    fn test_short_sequence_clamps_bands() {
        let sequence: Vec<usize> = (0..8).collect();
        let bands = slice_bands(&sequence);

        assert_eq!(bands.featured.len(), 6);
        assert_eq!(bands.newest, vec![6, 7]);
        assert!(bands.grid.is_empty());
    }

    #[test]
    fn test_empty_sequence() {
        let bands = slice_bands::<usize>(&[]);

        assert!(bands.featured.is_empty());
        assert!(bands.newest.is_empty());
        assert!(bands.grid.is_empty());
    }
}
