//! Blog posts published on the public site

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Category assigned to new posts when none is chosen
pub const DEFAULT_CATEGORY: &str = "Genel";

/// Publication status of a post
///
/// The backend owns the value; names it introduces later are kept verbatim
/// in [`BlogStatus::Other`] instead of failing the whole listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum BlogStatus {
    /// Not visible on the site
    #[default]
    Draft,
    /// Live
    Published,
    /// Withdrawn
    Archived,
    /// Any other backend value
    Other(String),
}

impl BlogStatus {
    /// Wire name
    pub fn as_str(&self) -> &str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
            Self::Other(raw) => raw,
        }
    }

    /// Parse a wire name, ignoring case and surrounding whitespace
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "draft" => Self::Draft,
            "published" => Self::Published,
            "archived" => Self::Archived,
            _ => Self::Other(trimmed.to_string()),
        }
    }
}

impl fmt::Display for BlogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for BlogStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BlogStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map_or_else(Self::default, |raw| Self::parse(&raw)))
    }
}

/// A blog post as listed in the admin area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    /// Post ID
    pub id: i64,
    /// Title
    pub title: String,
    /// SEO description, also used as the excerpt
    #[serde(default)]
    pub meta_description: Option<String>,
    /// HTML body
    #[serde(default)]
    pub content: Option<String>,
    /// Category
    #[serde(default)]
    pub category: Option<String>,
    /// Tags
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    /// Cover image URL
    #[serde(default)]
    pub cover_image: Option<String>,
    /// URL slug
    #[serde(default)]
    pub slug: Option<String>,
    /// Publication time
    #[serde(default, with = "crate::types::timestamp::option")]
    pub published_at: Option<DateTime<Utc>>,
    /// Creation time
    #[serde(with = "crate::types::timestamp")]
    pub created_at: DateTime<Utc>,
    /// Last update time
    #[serde(default, with = "crate::types::timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Author name
    #[serde(default)]
    pub author: Option<String>,
    /// Number of likes
    #[serde(default)]
    pub like_count: Option<u64>,
    /// Publication status
    #[serde(default)]
    pub status: BlogStatus,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Create/update form for a blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostInput {
    /// Title
    pub title: String,
    /// SEO description
    pub meta_description: String,
    /// HTML body
    pub content: String,
    /// Category
    pub category: String,
    /// Tags
    pub tags: Vec<String>,
    /// Cover image URL
    pub cover_image: String,
    /// URL slug, derived from the title when blank
    pub slug: String,
    /// Publication status
    pub status: BlogStatus,
}

impl Default for BlogPostInput {
    fn default() -> Self {
        Self {
            title: String::new(),
            meta_description: String::new(),
            content: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            tags: Vec::new(),
            cover_image: String::new(),
            slug: String::new(),
            status: BlogStatus::Draft,
        }
    }
}

impl BlogPostInput {
    /// Check the form and fill derived fields
    ///
    /// Tags are trimmed and de-duplicated in order, and a blank slug is
    /// derived from the title.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the title is blank.
    pub fn normalized(mut self) -> crate::Result<Self> {
        if self.title.trim().is_empty() {
            return Err(crate::Error::validation("title", "is required"));
        }

        let mut tags: Vec<String> = Vec::with_capacity(self.tags.len());
        for tag in self.tags.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
            if !tags.iter().any(|seen| seen == tag) {
                tags.push(tag.to_string());
            }
        }
        self.tags = tags;

        self.slug = if self.slug.trim().is_empty() {
            slugify(&self.title)
        } else {
            slugify(&self.slug)
        };

        if self.category.trim().is_empty() {
            self.category = DEFAULT_CATEGORY.to_string();
        }
        Ok(self)
    }
}

impl From<&BlogPost> for BlogPostInput {
    fn from(post: &BlogPost) -> Self {
        Self {
            title: post.title.clone(),
            meta_description: post.meta_description.clone().unwrap_or_default(),
            content: post.content.clone().unwrap_or_default(),
            category: post
                .category
                .clone()
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            tags: post.tags.clone(),
            cover_image: post.cover_image.clone().unwrap_or_default(),
            slug: post.slug.clone().unwrap_or_default(),
            status: post.status.clone(),
        }
    }
}

/// Turn free text into a URL slug
///
/// Lowercases, folds Turkish letters to ASCII, drops every other symbol and
/// joins words with single hyphens.
pub fn slugify(text: &str) -> String {
    let folded: String = text
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'ğ' => 'g',
            'ü' => 'u',
            'ş' => 's',
            'ı' => 'i',
            'ö' => 'o',
            'ç' => 'c',
            other => other,
        })
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-')
        .collect();

    let mut slug = String::with_capacity(folded.len());
    for c in folded.chars() {
        let c = if c.is_whitespace() { '-' } else { c };
        if c == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(c);
    }
    slug.trim_matches('-').to_string()
}
