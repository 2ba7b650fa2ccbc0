//! Topic tree model
//!
//! A topic with children is a category node; a topic without children is a
//! lesson leaf. The tree is immutable once built.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Curriculum category a topic belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Introduction to the discipline
    Intro,
    /// Sources of legal rulings
    Sources,
    /// Rules for interpreting texts
    Rules,
    /// Ijtihad and taqlid
    Ijtihad,
}

/// A navigable curriculum node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// Unique identifier across the whole tree
    pub id: String,
    /// Display title
    pub title: String,
    /// One-line description, also sent to the lesson generator
    pub description: String,
    /// Category this topic belongs to
    pub category: Category,
    /// Child topics (empty for lesson leaves)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Topic>,
}

impl Topic {
    /// Create a lesson leaf
    pub fn leaf(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            category,
            children: Vec::new(),
        }
    }

    /// Attach children, turning this topic into a category node
    pub fn with_children(mut self, children: Vec<Topic>) -> Self {
        self.children = children;
        self
    }

    /// Whether this is a lesson leaf
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Problems found when validating a curriculum
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CurriculumError {
    #[error("curriculum has no lesson topics")]
    Empty,

    #[error("duplicate topic id: {0}")]
    DuplicateId(String),
}

/// The full topic tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Curriculum {
    /// Top-level topics, in display order
    pub categories: Vec<Topic>,
}

impl Curriculum {
    /// Build a curriculum from its top-level topics
    pub fn new(categories: Vec<Topic>) -> Self {
        Self { categories }
    }

    /// Check that ids are unique and at least one lesson exists
    pub fn validate(&self) -> Result<(), CurriculumError> {
        let mut seen = HashSet::new();
        let mut stack: Vec<&Topic> = self.categories.iter().collect();
        while let Some(topic) = stack.pop() {
            if !seen.insert(topic.id.as_str()) {
                return Err(CurriculumError::DuplicateId(topic.id.clone()));
            }
            stack.extend(topic.children.iter());
        }

        if self.first_leaf().is_none() {
            return Err(CurriculumError::Empty);
        }
        Ok(())
    }

    /// Find a topic anywhere in the tree
    pub fn find(&self, id: &str) -> Option<&Topic> {
        fn walk<'a>(topics: &'a [Topic], id: &str) -> Option<&'a Topic> {
            topics.iter().find_map(|t| if t.id == id { Some(t) } else { walk(&t.children, id) })
        }
        walk(&self.categories, id)
    }

    /// First lesson under the first category, with that category
    pub fn first_leaf(&self) -> Option<(&Topic, &Topic)> {
        self.categories.iter().find_map(|category| {
            category.children.iter().find(|t| t.is_leaf()).map(|leaf| (category, leaf))
        })
    }

    /// All lesson leaves in display order
    pub fn leaves(&self) -> Vec<&Topic> {
        fn collect<'a>(topics: &'a [Topic], out: &mut Vec<&'a Topic>) {
            for topic in topics {
                if topic.is_leaf() {
                    out.push(topic);
                } else {
                    collect(&topic.children, out);
                }
            }
        }
        let mut out = Vec::new();
        for category in &self.categories {
            collect(&category.children, &mut out);
        }
        out
    }
}
