//! Headless model of the questions navigation bar
//!
//! This crate provides:
//! - Sort/filter options for the question list
//! - Section lookup, breadcrumb and link derivation
//! - "Ask question" target computation (direct or via login)
//! - A debounced search box with a loading indicator
//!
//! Nothing here renders or translates: labels are localization keys and
//! links are path strings for the host to use.

pub mod error;
pub mod filter;
pub mod nav;
pub mod search;
pub mod section;

// Re-exports
pub use error::{NavbarError, Result};
pub use filter::{FilterOption, SortFilter};
pub use nav::{Breadcrumb, BreadcrumbLabel, NavContext, NavigationBar, NavbarEvents, NewQuestionTarget};
pub use search::{SearchBar, SearchDone, SearchHandler, DEFAULT_SEARCH_DELAY_MS};
pub use section::{ParentSection, Section, SectionActions, SectionDirectory, SectionSource, SubSection};
