//! Knowledge list filtering, facets and category previews.

use crate::model::knowledge::{Knowledge, KnowledgeCategory};

/// Tag dropdown selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TagFilter {
    #[default]
    All,
    Tag(String),
}

/// Category dropdown selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(KnowledgeCategory),
}

/// Three independent predicates; the default matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeFilter {
    /// Case-insensitive substring of the title.
    pub search: String,
    /// Exact, case-sensitive tag membership.
    pub tag: TagFilter,
    pub category: CategoryFilter,
}

impl KnowledgeFilter {
    pub fn matches(&self, knowledge: &Knowledge) -> bool {
        let matches_search = knowledge
            .title
            .to_lowercase()
            .contains(&self.search.to_lowercase());
        let matches_tag = match &self.tag {
            TagFilter::All => true,
            TagFilter::Tag(tag) => knowledge.has_tag(tag),
        };
        let matches_category = match self.category {
            CategoryFilter::All => true,
            CategoryFilter::Category(category) => knowledge.category == category,
        };
        matches_search && matches_tag && matches_category
    }
}

/// Keeps entries matching `filter`, preserving input order.
pub fn filter_knowledge(entries: Vec<Knowledge>, filter: &KnowledgeFilter) -> Vec<Knowledge> {
    entries
        .into_iter()
        .filter(|knowledge| filter.matches(knowledge))
        .collect()
}

/// Distinct tags across `entries` in first-seen order.
pub fn all_tags(entries: &[Knowledge]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in entries.iter().flat_map(|knowledge| knowledge.tags.iter()) {
        if !tag.is_empty() && !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }
    tags
}

/// Distinct categories in use, in first-seen order.
pub fn all_categories(entries: &[Knowledge]) -> Vec<KnowledgeCategory> {
    let mut categories = Vec::new();
    for knowledge in entries {
        if !categories.contains(&knowledge.category) {
            categories.push(knowledge.category);
        }
    }
    categories
}

/// Groups entries per category for preview cards.
///
/// Every category appears once, in `KnowledgeCategory::ALL` order, even
/// when it has no entries.
pub fn group_by_category(entries: &[Knowledge]) -> Vec<(KnowledgeCategory, Vec<&Knowledge>)> {
    KnowledgeCategory::ALL
        .into_iter()
        .map(|category| {
            let items = entries
                .iter()
                .filter(|knowledge| knowledge.category == category)
                .collect();
            (category, items)
        })
        .collect()
}
