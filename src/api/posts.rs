use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::PostDefaults;

/// A post as the server returns it. Held only for the lifetime of one
/// request/response cycle; nothing is cached.
#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub media: Option<Media>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(rename = "_count", default)]
    pub count: Counts,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Media {
    pub url: String,
    #[serde(default)]
    pub alt: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Author {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Counts {
    #[serde(default)]
    pub reactions: u32,
    #[serde(default)]
    pub comments: u32,
}

impl Post {
    /// The second tag carries the location by convention; anything else
    /// reads as "Unknown".
    pub fn location(&self) -> &str {
        self.tags.get(1).map(String::as_str).unwrap_or("Unknown")
    }

    pub fn author_name(&self) -> &str {
        self.author.as_ref().map(|a| a.name.as_str()).unwrap_or("?")
    }
}

/// Paged list envelope: `GET /social/posts` returns the posts plus paging
/// metadata.
#[derive(Debug, Deserialize)]
pub struct ListResponse {
    pub data: Vec<Post>,
    #[serde(default)]
    pub meta: PageMeta,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageMeta {
    pub is_last_page: bool,
    pub current_page: Option<u32>,
    pub next_page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct SingleResponse {
    pub data: Post,
}

/// User-supplied fields for a new or updated post. Empty or whitespace-only
/// values count as absent and are replaced by the configured fallbacks
/// before the request is built, so the server never sees a missing field.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: Option<String>,
    pub image: Option<String>,
    pub location: Option<String>,
    pub text: Option<String>,
}

impl PostDraft {
    /// Request payload with every absent field substituted. Tags are always
    /// the feed tag followed by the location. `created` is stamped on
    /// creation only; updates leave it out.
    pub fn payload(
        &self,
        defaults: &PostDefaults,
        tag: &str,
        created: Option<DateTime<Utc>>,
    ) -> Value {
        let title = field(&self.title, &defaults.title);
        let body = field(&self.text, &defaults.body);
        let location = field(&self.location, &defaults.location);
        let image = field(&self.image, &defaults.image);

        let mut payload = json!({
            "title": title,
            "body": body,
            "tags": [tag, location],
            "media": { "url": image, "alt": title },
        });
        if let Some(created) = created {
            payload["created"] = json!(created.to_rfc3339());
        }
        payload
    }
}

fn field(value: &Option<String>, fallback: &str) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_with_tags(tags: &[&str]) -> Post {
        serde_json::from_value(json!({
            "id": 1,
            "title": "Tulip season",
            "tags": tags,
        }))
        .unwrap()
    }

    #[test]
    fn location_is_the_second_tag() {
        let post = post_with_tags(&["petal-parlour", "Paris"]);
        assert_eq!(post.location(), "Paris");
    }

    #[test]
    fn single_tag_reads_as_unknown_location() {
        let post = post_with_tags(&["petal-parlour"]);
        assert_eq!(post.location(), "Unknown");
    }

    #[test]
    fn deserializes_a_full_post() {
        let post: Post = serde_json::from_value(json!({
            "id": 42,
            "title": "Tulip season",
            "body": "The market is open.",
            "tags": ["petal-parlour", "Amsterdam"],
            "media": { "url": "https://img.example/tulips.png", "alt": "tulips" },
            "created": "2024-11-02T09:30:00.000Z",
            "author": { "name": "maren" },
            "_count": { "reactions": 5, "comments": 2 }
        }))
        .unwrap();

        assert_eq!(post.id, 42);
        assert_eq!(post.author_name(), "maren");
        assert_eq!(post.count.reactions, 5);
        assert_eq!(post.count.comments, 2);
        assert!(post.created.is_some());
    }

    #[test]
    fn deserializes_a_sparse_post() {
        let post: Post = serde_json::from_value(json!({
            "id": 7,
            "title": "Untitled Post",
        }))
        .unwrap();

        assert!(post.tags.is_empty());
        assert!(post.media.is_none());
        assert_eq!(post.author_name(), "?");
        assert_eq!(post.count.reactions, 0);
    }

    #[test]
    fn list_meta_defaults_to_not_last() {
        let list: ListResponse = serde_json::from_value(json!({ "data": [] })).unwrap();
        assert!(!list.meta.is_last_page);
    }

    #[test]
    fn empty_draft_substitutes_every_fallback() {
        let payload = PostDraft::default().payload(&PostDefaults::default(), "petal-parlour", None);

        assert_eq!(payload["title"], "Untitled Post");
        assert_eq!(payload["body"], "No content");
        assert_eq!(payload["tags"], json!(["petal-parlour", "Unknown"]));
        assert_eq!(payload["media"]["url"], "public/default-image.png");
        assert_eq!(payload["media"]["alt"], "Untitled Post");
        assert!(payload.get("created").is_none());
    }

    #[test]
    fn blank_strings_count_as_absent() {
        let draft = PostDraft {
            title: Some("  ".into()),
            ..Default::default()
        };
        let payload = draft.payload(&PostDefaults::default(), "petal-parlour", None);
        assert_eq!(payload["title"], "Untitled Post");
    }

    #[test]
    fn supplied_fields_pass_through() {
        let draft = PostDraft {
            title: Some("Tulip season".into()),
            image: Some("https://img.example/tulips.png".into()),
            location: Some("Amsterdam".into()),
            text: Some("The market is open.".into()),
        };
        let payload = draft.payload(&PostDefaults::default(), "petal-parlour", None);

        assert_eq!(payload["title"], "Tulip season");
        assert_eq!(payload["body"], "The market is open.");
        assert_eq!(payload["tags"], json!(["petal-parlour", "Amsterdam"]));
        assert_eq!(payload["media"]["url"], "https://img.example/tulips.png");
        assert_eq!(payload["media"]["alt"], "Tulip season");
    }

    #[test]
    fn created_stamp_is_rfc3339() {
        let created = "2024-11-02T09:30:00Z".parse::<DateTime<Utc>>().unwrap();
        let payload =
            PostDraft::default().payload(&PostDefaults::default(), "petal-parlour", Some(created));
        assert_eq!(payload["created"], "2024-11-02T09:30:00+00:00");
    }
}
