//! Knowledge base domain model.
//!
//! # Invariants
//! - `tags` never contains empty strings or duplicates (case-sensitive).
//! - `url`, when non-empty, passes `is_valid_url`.

use crate::model::id::RecordId;
use crate::model::validation::{validate_optional_url, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Knowledge entry category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum KnowledgeCategory {
    #[default]
    Work,
    Personal,
    #[serde(rename = "Self-Development")]
    SelfDevelopment,
    Entertainment,
    Technology,
    Health,
    Finance,
    Travel,
    Other,
}

impl KnowledgeCategory {
    /// Categories in form order; the first one is the default.
    pub const ALL: [KnowledgeCategory; 9] = [
        Self::Work,
        Self::Personal,
        Self::SelfDevelopment,
        Self::Entertainment,
        Self::Technology,
        Self::Health,
        Self::Finance,
        Self::Travel,
        Self::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::Personal => "Personal",
            Self::SelfDevelopment => "Self-Development",
            Self::Entertainment => "Entertainment",
            Self::Technology => "Technology",
            Self::Health => "Health",
            Self::Finance => "Finance",
            Self::Travel => "Travel",
            Self::Other => "Other",
        }
    }

    /// Parses a display label; `None` for unknown labels.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value.trim())
    }
}

impl Display for KnowledgeCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted knowledge record, stored under `knowledge:<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Knowledge {
    pub id: RecordId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub category: KnowledgeCategory,
}

impl Knowledge {
    /// Builds a record from `draft` under an existing id.
    pub fn from_draft(id: RecordId, draft: KnowledgeDraft) -> Self {
        let mut knowledge = Self {
            id,
            title: draft.title,
            summary: draft.summary,
            url: draft.url.trim().to_string(),
            tags: Vec::new(),
            category: draft.category,
        };
        knowledge.insert_tags(draft.tags);
        knowledge
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_optional_url(&self.url)
    }

    /// Adds tags from comma-separated input; returns how many were new.
    pub fn add_tags(&mut self, input: &str) -> usize {
        let fresh = parse_tag_input(&self.tags, input);
        let added = fresh.len();
        self.tags.extend(fresh);
        added
    }

    /// Removes one tag by exact match; returns whether it was present.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|current| current != tag);
        before != self.tags.len()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|current| current == tag)
    }

    fn insert_tags(&mut self, tags: Vec<String>) {
        for tag in tags {
            let tag = tag.trim();
            if !tag.is_empty() && !self.has_tag(tag) {
                self.tags.push(tag.to_string());
            }
        }
    }
}

/// Input for creating or fully replacing a knowledge entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeDraft {
    pub title: String,
    pub summary: String,
    pub url: String,
    pub tags: Vec<String>,
    pub category: KnowledgeCategory,
}

impl KnowledgeDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_category(mut self, category: KnowledgeCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Splits comma-separated tag input into tags not yet in `existing`.
///
/// Tags are trimmed; empty pieces and duplicates (against `existing` and
/// within `input`) are dropped, first occurrence wins.
pub fn parse_tag_input(existing: &[String], input: &str) -> Vec<String> {
    let mut fresh: Vec<String> = Vec::new();
    for piece in input.split(',') {
        let tag = piece.trim();
        if tag.is_empty()
            || existing.iter().any(|current| current == tag)
            || fresh.iter().any(|current| current == tag)
        {
            continue;
        }
        fresh.push(tag.to_string());
    }
    fresh
}
