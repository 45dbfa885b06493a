//! Forum sections and section lookup

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A message-board section as seen by the navigation bar
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    #[serde(default)]
    pub parent: Option<ParentSection>,
    #[serde(default)]
    pub actions: SectionActions,
}

/// Parent of a section, with its sibling sub sections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentSection {
    pub title: String,
    #[serde(default)]
    pub sub_sections: Vec<SubSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubSection {
    pub title: String,
    #[serde(default)]
    pub href: Option<String>,
}

/// Actions the current user may take on a section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionActions {
    #[serde(default)]
    pub subscribe: bool,
    #[serde(default, rename = "add-thread", alias = "add_thread")]
    pub add_thread: bool,
}

/// Turn a URL slug back into a section title (`my-section` -> `my section`)
pub fn slug_to_text(slug: &str) -> String {
    slug.replace('-', " ")
}

/// Turn a title or path into its slug form (`my section` -> `my-section`)
pub fn text_to_slug(text: &str) -> String {
    text.replace(' ', "-")
}

/// Anything that can resolve a section by title
pub trait SectionSource {
    fn find(&self, title: &str) -> Option<Section>;
}

impl<F> SectionSource for F
where
    F: Fn(&str) -> Option<Section>,
{
    fn find(&self, title: &str) -> Option<Section> {
        self(title)
    }
}

/// In-memory section lookup, loadable from TOML
///
/// ```toml
/// [[sections]]
/// title = "rust async"
/// actions = { subscribe = true, add-thread = true }
/// parent = { title = "rust", sub_sections = [{ title = "rust async" }] }
/// ```
#[derive(Debug, Clone, Default)]
pub struct SectionDirectory {
    by_title: HashMap<String, Section>,
}

#[derive(Deserialize)]
struct DirectoryFile {
    #[serde(default)]
    sections: Vec<Section>,
}

impl SectionDirectory {
    pub fn new(sections: impl IntoIterator<Item = Section>) -> Self {
        Self {
            by_title: sections
                .into_iter()
                .map(|s| (s.title.to_lowercase(), s))
                .collect(),
        }
    }

    /// Parse a directory from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        let file: DirectoryFile = toml::from_str(text)?;
        Ok(Self::new(file.sections))
    }

    pub fn len(&self) -> usize {
        self.by_title.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_title.is_empty()
    }
}

impl SectionSource for SectionDirectory {
    /// Case-insensitive title match
    fn find(&self, title: &str) -> Option<Section> {
        self.by_title.get(&title.to_lowercase()).cloned()
    }
}
