//! Forum query and view types

use crate::decode::DecoderFormat;
use crate::pagination::{ListingQuery, PageSize};
use crate::types::Record;
use std::fmt;

/// Default projection for category listings
pub const CATEGORY_FIELDS: &[&str] = &["name", "type", "path", "categoryKey"];

/// Projection used to print post details
pub const POST_DETAIL_FIELDS: &[&str] = &[
    "postKey",
    "parentKey",
    "typeLabel",
    "posted",
    "active",
    "title",
    "postStatus",
    "author.userKey",
    "author.name",
    "author.handle",
    "author.role",
    "author.label",
    "category.name",
    "replyCount",
    "likeCount",
    "viewCount",
    "followCount",
    "url",
];

/// Projection used when exporting post text
pub const POST_TEXT_FIELDS: &[&str] = &[
    "postKey",
    "title",
    "textPlain",
    "category.name",
    "posted",
    "author.name",
];

/// How post bodies are rendered by the server (`textFormat`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextFormat {
    /// Plain text cut at 100 characters
    #[default]
    PlainTruncate100,
    /// Full plain text
    Plain,
    /// Server-side HTML
    Html,
}

impl TextFormat {
    /// Value of the `textFormat` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            TextFormat::PlainTruncate100 => "plain-truncate-100",
            TextFormat::Plain => "plain",
            TextFormat::Html => "html",
        }
    }
}

impl fmt::Display for TextFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of a `GET /categories` listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryQuery {
    /// Projected fields
    pub fields: Vec<String>,
    /// Response format
    pub format: DecoderFormat,
    /// Records per request
    pub page_size: PageSize,
}

impl Default for CategoryQuery {
    fn default() -> Self {
        Self {
            fields: CATEGORY_FIELDS.iter().map(ToString::to_string).collect(),
            format: DecoderFormat::Csv,
            page_size: PageSize::MAX,
        }
    }
}

impl CategoryQuery {
    /// Create a query with the default projection
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the response format
    #[must_use]
    pub fn with_format(mut self, format: DecoderFormat) -> Self {
        self.format = format;
        self
    }

    /// Replace the projection
    #[must_use]
    pub fn with_fields<S: AsRef<str>>(mut self, fields: &[S]) -> Self {
        self.fields = fields.iter().map(|f| f.as_ref().to_string()).collect();
        self
    }

    /// Set the page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Build the listing query (the output format is added by the fetcher)
    pub fn to_listing(&self) -> ListingQuery {
        let query = ListingQuery::new("categories");
        if self.fields.is_empty() {
            query
        } else {
            query.param("fields", self.fields.join(","))
        }
    }
}

/// Parameters of a `GET /posts` listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    /// Category key passed as `categoryLink`
    pub category: Option<String>,
    /// Projected fields
    pub fields: Vec<String>,
    /// Sort key; `posted` returns the most recent first
    pub sort: Option<String>,
    /// Rendering of post text
    pub text_format: Option<TextFormat>,
    /// Include posts from unlisted categories
    pub include_unlisted_categories: Option<bool>,
    /// Include posts from closed categories
    pub include_closed_categories: Option<bool>,
    /// Response format
    pub format: DecoderFormat,
    /// Records per request
    pub page_size: PageSize,
}

impl Default for PostQuery {
    fn default() -> Self {
        Self {
            category: None,
            fields: POST_DETAIL_FIELDS.iter().map(ToString::to_string).collect(),
            sort: Some("posted".to_string()),
            text_format: Some(TextFormat::PlainTruncate100),
            include_unlisted_categories: None,
            include_closed_categories: None,
            format: DecoderFormat::Csv,
            page_size: PageSize::MAX,
        }
    }
}

impl PostQuery {
    /// Posts of one category with the detail projection
    pub fn details(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            include_unlisted_categories: Some(false),
            include_closed_categories: Some(false),
            ..Self::default()
        }
    }

    /// Posts of one category with the text projection
    pub fn text(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            fields: POST_TEXT_FIELDS.iter().map(ToString::to_string).collect(),
            ..Self::default()
        }
    }

    /// Replace the projection
    #[must_use]
    pub fn with_fields<S: AsRef<str>>(mut self, fields: &[S]) -> Self {
        self.fields = fields.iter().map(|f| f.as_ref().to_string()).collect();
        self
    }

    /// Set the response format
    #[must_use]
    pub fn with_format(mut self, format: DecoderFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set how post text is rendered
    #[must_use]
    pub fn with_text_format(mut self, text_format: TextFormat) -> Self {
        self.text_format = Some(text_format);
        self
    }

    /// Build the listing query
    pub fn to_listing(&self) -> ListingQuery {
        let fields = (!self.fields.is_empty()).then(|| self.fields.join(","));

        ListingQuery::new("posts")
            .param_opt("categoryLink", self.category.as_deref())
            .param_opt("fields", fields)
            .param_opt("sort", self.sort.as_deref())
            .param_opt("textFormat", self.text_format)
            .param_opt("includeUnlistedCategories", self.include_unlisted_categories)
            .param_opt("includeClosedCategories", self.include_closed_categories)
    }
}

/// A category as listed by `GET /categories`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Display name
    pub name: String,
    /// Category type (forum, ideas, ...)
    pub kind: String,
    /// Hierarchical path
    pub path: String,
    /// Stable key, used as `categoryLink` when listing posts
    pub key: Option<String>,
}

impl Category {
    /// Read a category out of a record; absent fields become `N/A`
    pub fn from_record(record: &Record) -> Self {
        Self {
            name: record.get_or("name", "N/A").to_string(),
            kind: record.get_or("type", "N/A").to_string(),
            path: record.get_or("path", "N/A").to_string(),
            key: record
                .get("categoryKey")
                .filter(|k| !k.trim().is_empty())
                .map(ToString::to_string),
        }
    }
}

impl From<&Record> for Category {
    fn from(record: &Record) -> Self {
        Self::from_record(record)
    }
}
