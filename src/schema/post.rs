use serde::{Deserialize, Deserializer};

use super::Shape;

/// Body of `POST /api/v1/blog`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatePostInput {
    pub title: String,
    pub content: String,
}

impl Shape for CreatePostInput {
    const NAME: &'static str = "create post";
}

/// Body of `PUT /api/v1/blog`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdatePostInput {
    pub id: i32,
    #[serde(default, deserialize_with = "present_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present_string")]
    pub content: Option<String>,
}

impl Shape for UpdatePostInput {
    const NAME: &'static str = "update post";
}

// Optional fields may be omitted but not sent as null
fn present_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::schema::{safe_parse, safe_parse_value, CreatePostInput, UpdatePostInput};

    #[test]
    fn create_requires_title_and_content() {
        let ok: CreatePostInput =
            safe_parse_value(json!({"title": "Hello", "content": "World"})).unwrap();
        assert_eq!(ok.title, "Hello");
        assert_eq!(ok.content, "World");

        assert!(safe_parse_value::<CreatePostInput>(json!({"title": "Hello"})).is_err());
        assert!(safe_parse_value::<CreatePostInput>(json!({"content": "World"})).is_err());
        assert!(safe_parse_value::<CreatePostInput>(json!({"title": 1, "content": "x"})).is_err());
    }

    #[test]
    fn create_ignores_caller_supplied_author() {
        let ok: CreatePostInput = safe_parse_value(json!({
            "title": "t",
            "content": "c",
            "authorId": 99
        }))
        .unwrap();
        assert_eq!(ok, CreatePostInput { title: "t".into(), content: "c".into() });
    }

    #[test]
    fn empty_strings_are_valid_text() {
        assert!(safe_parse_value::<CreatePostInput>(json!({"title": "", "content": ""})).is_ok());
    }

    #[test]
    fn update_requires_integer_id() {
        let ok: UpdatePostInput = safe_parse_value(json!({"id": 3, "title": "New"})).unwrap();
        assert_eq!(ok.id, 3);
        assert_eq!(ok.title.as_deref(), Some("New"));
        assert_eq!(ok.content, None);

        assert!(safe_parse_value::<UpdatePostInput>(json!({"title": "New"})).is_err());
        assert!(safe_parse_value::<UpdatePostInput>(json!({"id": "3", "title": "New"})).is_err());
        assert!(safe_parse_value::<UpdatePostInput>(json!({"id": 1.5})).is_err());
    }

    #[test]
    fn update_rejects_null_fields() {
        assert!(safe_parse_value::<UpdatePostInput>(json!({"id": 1, "title": null})).is_err());
        assert!(safe_parse_value::<UpdatePostInput>(json!({"id": 1, "content": 5})).is_err());
    }

    #[test]
    fn non_object_bodies_fail() {
        assert!(safe_parse::<CreatePostInput>(b"not json").is_err());
        assert!(safe_parse::<CreatePostInput>(b"").is_err());
        let failure = safe_parse::<CreatePostInput>(br#"["t", "c"]"#).unwrap_err();
        assert_eq!(failure.shape, "create post");
        assert_eq!(failure.reason, "expected a JSON object");
    }
}
