//! The page entity.
//!
//! A page (also called a note) is the only persisted entity in Folio. It is an open record: every
//! known field is always present in the JSON shape, records written by older versions that lack
//! the relationship fields (or hold `null` in them) load with the documented defaults, and fields
//! Folio does not know about are carried through every rewrite untouched.
//!
//! ## Relationships
//!
//! `parentId` and `children` are advisory. Nothing checks that the referenced pages exist, and
//! nothing keeps the two sides in sync.
//!
//! ## Timestamps
//!
//! Timestamps are stored as ISO-8601 UTC strings with millisecond precision
//! (`2024-05-01T09:30:00.123Z`). Every mutator refreshes `updatedAt`, and `updatedAt` is strictly
//! increasing for a given page even when the clock has not moved since the previous mutation.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use folio_uuid::PageId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::constants::{DEFAULT_TITLE, NEW_PAGE_TITLE};
use crate::{PageError, PageResult};

/// A single page in the collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub children: Vec<String>,
    #[serde(with = "iso_millis", default = "now")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[serde(with = "iso_millis", default = "now")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub archived: bool,
    /// Fields written by other tools, kept as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

const KNOWN_FIELDS: [&str; 9] = [
    "id",
    "title",
    "content",
    "parentId",
    "children",
    "createdAt",
    "updatedAt",
    "tags",
    "archived",
];

/// Outcome of [`Page::validate`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Validation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl Page {
    /// Creates a page with both timestamps set to now and no relationships.
    pub fn new(id: PageId, title: impl Into<String>, content: impl Into<String>) -> Self {
        let ts = now();
        Self {
            id: id.into_string(),
            title: title.into(),
            content: content.into(),
            parent_id: None,
            children: Vec::new(),
            created_at: ts,
            updated_at: ts,
            tags: Vec::new(),
            archived: false,
            extra: Map::new(),
        }
    }

    /// A blank page as started from the editor's "new page" action.
    pub fn new_empty(id: PageId) -> Self {
        Self::new(id, NEW_PAGE_TITLE, "")
    }

    /// Checks the type shape of a raw JSON record.
    ///
    /// Only types are checked: title and content must be strings, `parentId` must be a string
    /// when set, `children` and `tags` must be lists of strings, and timestamps must parse.
    /// Missing or `null` fields are fine because they take defaults on load.
    pub fn validate(record: &Value) -> Validation {
        let mut errors = Vec::new();

        let Some(obj) = record.as_object() else {
            return Validation {
                is_valid: false,
                errors: vec!["record must be a JSON object".into()],
            };
        };

        let present = |key: &str| obj.get(key).filter(|v| !v.is_null());

        match obj.get("id") {
            Some(Value::String(_)) => {}
            _ => errors.push("id must be a string".into()),
        }

        for key in ["title", "content", "parentId"] {
            if present(key).is_some_and(|v| !v.is_string()) {
                errors.push(format!("{key} must be a string"));
            }
        }

        for key in ["children", "tags"] {
            match present(key) {
                None => {}
                Some(Value::Array(items)) => {
                    if items.iter().any(|item| !item.is_string()) {
                        errors.push(format!("{key} must only contain strings"));
                    }
                }
                Some(_) => errors.push(format!("{key} must be an array")),
            }
        }

        for key in ["createdAt", "updatedAt"] {
            match present(key) {
                None => {}
                Some(Value::String(s)) if DateTime::parse_from_rfc3339(s).is_ok() => {}
                Some(_) => errors.push(format!("{key} must be an ISO-8601 timestamp")),
            }
        }

        if present("archived").is_some_and(|v| !v.is_boolean()) {
            errors.push("archived must be a boolean".into());
        }

        Validation {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Builds a page from a raw JSON record, applying the field defaults.
    ///
    /// # Errors
    ///
    /// Returns `PageError::InvalidRecord` with every shape error found by [`Page::validate`].
    pub fn from_record(record: Value) -> PageResult<Self> {
        let validation = Self::validate(&record);
        if !validation.is_valid {
            return Err(PageError::InvalidRecord(validation.errors));
        }
        // An explicit null in a known field means "unset"; unknown fields keep their nulls.
        let record = match record {
            Value::Object(obj) => Value::Object(
                obj.into_iter()
                    .filter(|(k, v)| !(v.is_null() && KNOWN_FIELDS.contains(&k.as_str())))
                    .collect(),
            ),
            other => other,
        };
        serde_json::from_value(record).map_err(PageError::Deserialization)
    }

    /// Merges an update into the page.
    ///
    /// An empty or missing title keeps the previous title. A supplied content always replaces the
    /// previous content, including with the empty string. `updatedAt` is always refreshed.
    pub fn apply_update(&mut self, title: Option<String>, content: Option<String>) {
        if let Some(title) = title.filter(|t| !t.is_empty()) {
            self.title = title;
        }
        if let Some(content) = content {
            self.content = content;
        }
        self.touch();
    }

    /// Adds a child id. Returns `false` (and leaves `updatedAt` alone) if it was already present.
    pub fn add_child(&mut self, child_id: impl Into<String>) -> bool {
        if !push_unique(&mut self.children, child_id.into()) {
            return false;
        }
        self.touch();
        true
    }

    /// Removes a child id. Always refreshes `updatedAt`, even when the id was absent.
    pub fn remove_child(&mut self, child_id: &str) -> bool {
        let removed = remove_value(&mut self.children, child_id);
        self.touch();
        removed
    }

    /// Adds a tag. Returns `false` (and leaves `updatedAt` alone) if it was already present.
    pub fn add_tag(&mut self, tag: impl Into<String>) -> bool {
        if !push_unique(&mut self.tags, tag.into()) {
            return false;
        }
        self.touch();
        true
    }

    /// Removes a tag. Always refreshes `updatedAt`, even when the tag was absent.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let removed = remove_value(&mut self.tags, tag);
        self.touch();
        removed
    }

    pub fn set_parent(&mut self, parent_id: Option<String>) {
        self.parent_id = parent_id;
        self.touch();
    }

    pub fn archive(&mut self) {
        self.archived = true;
        self.touch();
    }

    pub fn unarchive(&mut self) {
        self.archived = false;
        self.touch();
    }

    /// Refreshes `updatedAt` to the current time.
    pub fn touch(&mut self) {
        let ts = now();
        self.updated_at = if ts > self.updated_at {
            ts
        } else {
            self.updated_at + Duration::milliseconds(1)
        };
    }
}

fn push_unique(list: &mut Vec<String>, value: String) -> bool {
    if list.contains(&value) {
        return false;
    }
    list.push(value);
    true
}

fn remove_value(list: &mut Vec<String>, value: &str) -> bool {
    let before = list.len();
    list.retain(|item| item != value);
    list.len() != before
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
