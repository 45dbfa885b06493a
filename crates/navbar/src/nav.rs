//! Navigation state derived from the current section

use crate::error::Result;
use crate::filter::SortFilter;
use crate::section::{slug_to_text, text_to_slug, Section, SectionSource, SubSection};
use serde::Serialize;
use tracing::debug;

/// Localization key for the "all sub sections" entry
pub const ALL_LABEL_KEY: &str = "all";

/// Login endpoint used when asking a question requires signing in first
pub const LOGIN_PATH: &str = "/c/portal/login";

/// Callbacks supplied by the screen that owns the navigation bar
pub trait NavbarEvents {
    fn filter_changed(&self, filter: SortFilter);
    fn section_changed(&self, section: Option<&Section>);
}

/// Session facts that affect navigation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavContext {
    /// Anonymous users must sign in before asking a question
    pub redirect_to_login: bool,
    pub signed_in: bool,
}

/// Where the "ask question" button leads
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NewQuestionTarget {
    /// Full-page redirect to the login screen, returning to the new-question form
    Login { url: String },
    /// In-app navigation to the new-question form
    Navigate { path: String },
}

/// Label shown next to the parent title
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BreadcrumbLabel {
    /// Section is the parent itself; show the `all` key
    All,
    Section(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub parent_title: String,
    pub label: BreadcrumbLabel,
}

/// Navigation bar state for one section route
#[derive(Debug, Clone)]
pub struct NavigationBar {
    /// Section title as it appears in the route (slug form)
    section_slug: String,
    section: Option<Section>,
    context: NavContext,
}

impl NavigationBar {
    pub fn new(section_slug: impl Into<String>, section: Option<Section>, context: NavContext) -> Self {
        Self {
            section_slug: section_slug.into(),
            section,
            context,
        }
    }

    /// Look up the routed section and notify the owner of the result
    pub fn resolve(
        section_slug: impl Into<String>,
        source: &impl SectionSource,
        context: NavContext,
        events: &dyn NavbarEvents,
    ) -> Self {
        let section_slug = section_slug.into();
        let section = source.find(&slug_to_text(&section_slug));
        debug!(
            "Resolved section '{}': {}",
            section_slug,
            if section.is_some() { "found" } else { "missing" }
        );

        events.section_changed(section.as_ref());
        Self::new(section_slug, section, context)
    }

    pub fn section(&self) -> Option<&Section> {
        self.section.as_ref()
    }

    pub fn section_slug(&self) -> &str {
        &self.section_slug
    }

    /// Siblings listed in the section dropdown
    pub fn sub_sections(&self) -> &[SubSection] {
        self.section
            .as_ref()
            .and_then(|s| s.parent.as_ref())
            .map(|p| p.sub_sections.as_slice())
            .unwrap_or(&[])
    }

    /// The dropdown only appears when there are siblings to list
    pub fn show_dropdown(&self) -> bool {
        !self.sub_sections().is_empty()
    }

    pub fn breadcrumb(&self) -> Option<Breadcrumb> {
        let section = self.section.as_ref()?;
        let parent = section.parent.as_ref()?;

        let label = if section.title == parent.title {
            BreadcrumbLabel::All
        } else {
            BreadcrumbLabel::Section(section.title.clone())
        };

        Some(Breadcrumb {
            parent_title: parent.title.clone(),
            label,
        })
    }

    /// Link for the "all" entry: the parent section, else the routed one
    pub fn all_link(&self) -> String {
        let target = self
            .section
            .as_ref()
            .and_then(|s| s.parent.as_ref())
            .map(|p| p.title.as_str())
            .unwrap_or(&self.section_slug);
        text_to_slug(&format!("/questions/{}", target))
    }

    pub fn sub_section_link(&self, sub_section: &SubSection) -> String {
        text_to_slug(&format!("/questions/{}", sub_section.title))
    }

    pub fn show_subscribe(&self) -> bool {
        self.section.as_ref().is_some_and(|s| s.actions.subscribe)
    }

    pub fn show_ask_question(&self) -> bool {
        self.context.redirect_to_login
            || self.section.as_ref().is_some_and(|s| s.actions.add_thread)
    }

    /// Resolve the "ask question" button
    ///
    /// `base_url` is the current page path without origin or fragment; the
    /// login flow returns there and the in-app router takes the fragment.
    pub fn new_question_target(&self, base_url: &str) -> NewQuestionTarget {
        if self.context.redirect_to_login && !self.context.signed_in {
            NewQuestionTarget::Login {
                url: format!(
                    "{}?redirect={}#/questions/{}/new",
                    LOGIN_PATH, base_url, self.section_slug
                ),
            }
        } else {
            NewQuestionTarget::Navigate {
                path: text_to_slug(&format!("/questions/{}/new", self.section_slug)),
            }
        }
    }

    /// Parse a dropdown value and forward it to the owner
    pub fn select_filter(&self, value: &str, events: &dyn NavbarEvents) -> Result<SortFilter> {
        let filter: SortFilter = value.parse()?;
        debug!("Filter changed to {}", filter);
        events.filter_changed(filter);
        Ok(filter)
    }
}
