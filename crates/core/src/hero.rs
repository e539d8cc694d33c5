//! Hero media resolution.

use fundacja_db::entities::{category, post};
use serde::Serialize;

/// The single display medium representing a post in listings and its
/// detail header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HeroMedia {
    /// An embedded video.
    Video {
        /// Video URL.
        url: String,
    },
    /// A static image.
    Image {
        /// Image URL.
        url: String,
    },
}

/// Resolve the hero medium for a post. Pure function of the post and its
/// category; no side effects.
///
/// Priority, first match wins:
/// 1. the post's hero video URL,
/// 2. the post's hero image,
/// 3. the category's default image,
/// 4. nothing.
///
/// Empty strings count as unset.
#[must_use]
pub fn resolve_hero_media(
    post: &post::Model,
    category: &category::Model,
) -> Option<HeroMedia> {
    if let Some(url) = non_empty(post.hero_video_url.as_deref()) {
        return Some(HeroMedia::Video { url });
    }
    if let Some(url) = non_empty(post.hero_image.as_deref()) {
        return Some(HeroMedia::Image { url });
    }
    if let Some(url) = non_empty(category.default_image.as_deref()) {
        return Some(HeroMedia::Image { url });
    }
    None
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_category(default_image: Option<&str>) -> category::Model {
        category::Model {
            id: "cat1".to_string(),
            name: "Neurologia".to_string(),
            slug: "neurologia".to_string(),
            default_image: default_image.map(ToString::to_string),
        }
    }

    fn test_post(hero_image: Option<&str>, hero_video_url: Option<&str>) -> post::Model {
        post::Model {
            id: "post1".to_string(),
            title: "Padaczka".to_string(),
            slug: "padaczka".to_string(),
            created_at: Utc::now().into(),
            published: true,
            excerpt: "excerpt".to_string(),
            hero_image: hero_image.map(ToString::to_string),
            hero_video_url: hero_video_url.map(ToString::to_string),
            content: "content".to_string(),
            category_id: "cat1".to_string(),
            author_id: "author1".to_string(),
        }
    }

    #[test]
    fn test_video_wins_over_everything() {
        let post = test_post(Some("posts/hero.jpg"), Some("https://youtu.be/abc"));
        let category = test_category(Some("categories/default.jpg"));

        assert_eq!(
            resolve_hero_media(&post, &category),
            Some(HeroMedia::Video {
                url: "https://youtu.be/abc".to_string()
            })
        );
    }

    #[test]
    fn test_hero_image_wins_over_category_default() {
        let post = test_post(Some("posts/hero.jpg"), None);
        let category = test_category(Some("categories/default.jpg"));

        assert_eq!(
            resolve_hero_media(&post, &category),
            Some(HeroMedia::Image {
                url: "posts/hero.jpg".to_string()
            })
        );
    }

    #[test]
    fn test_category_default_as_fallback() {
        let post = test_post(None, None);
        let category = test_category(Some("categories/default.jpg"));

        assert_eq!(
            resolve_hero_media(&post, &category),
            Some(HeroMedia::Image {
                url: "categories/default.jpg".to_string()
            })
        );
    }

    #[test]
    fn test_none_when_nothing_is_set() {
        let post = test_post(None, None);
        let category = test_category(None);

        assert_eq!(resolve_hero_media(&post, &category), None);
    }

    #[test]
    fn test_empty_strings_count_as_unset() {
        let post = test_post(Some(""), Some(""));
        let category = test_category(Some("categories/default.jpg"));

        assert_eq!(
            resolve_hero_media(&post, &category),
            Some(HeroMedia::Image {
                url: "categories/default.jpg".to_string()
            })
        );
    }

    #[test]
    fn test_serializes_as_type_and_url() {
        let media = HeroMedia::Video {
            url: "https://youtu.be/abc".to_string(),
        };
        let json = serde_json::to_value(&media).unwrap();
        assert_eq!(json["type"], "video");
        assert_eq!(json["url"], "https://youtu.be/abc");
    }
}
