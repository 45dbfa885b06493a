//! Show navigation bar state for a section

use crate::system_config::{self, validate_base_url};
use anyhow::{Context, Result};
use navbar::{
    BreadcrumbLabel, NavContext, NavbarEvents, NavigationBar, NewQuestionTarget, Section,
    SectionDirectory, SortFilter,
};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

pub struct NavArgs {
    pub section: String,
    pub sections: Option<PathBuf>,
    pub signed_in: bool,
    pub redirect_to_login: bool,
    pub filter: Option<String>,
    /// Overrides `navigation.base_url` from config
    pub base_url: Option<String>,
    pub json: bool,
}

/// Events are only logged; the CLI has no list to refresh
struct LogEvents;

impl NavbarEvents for LogEvents {
    fn filter_changed(&self, filter: SortFilter) {
        info!("Filter changed: {}", filter);
    }

    fn section_changed(&self, section: Option<&Section>) {
        match section {
            Some(section) => info!("Section changed: {}", section.title),
            None => info!("Section changed: unknown"),
        }
    }
}

#[derive(Serialize)]
struct NavReport {
    section: String,
    resolved: bool,
    parent: Option<String>,
    label: Option<BreadcrumbLabel>,
    all_link: String,
    sub_sections: Vec<String>,
    filter: SortFilter,
    show_subscribe: bool,
    show_ask_question: bool,
    ask_question: NewQuestionTarget,
}

fn load_directory(path: Option<&PathBuf>) -> Result<SectionDirectory> {
    let Some(path) = path else {
        return Ok(SectionDirectory::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read sections file {}", path.display()))?;
    SectionDirectory::from_toml(&text)
        .with_context(|| format!("Failed to parse sections file {}", path.display()))
}

fn build_report(args: &NavArgs) -> Result<NavReport> {
    let config = system_config::load()?;
    let directory = load_directory(args.sections.as_ref())?;

    let context = NavContext {
        redirect_to_login: args.redirect_to_login || config.navigation.redirect_to_login,
        signed_in: args.signed_in,
    };
    let nav = NavigationBar::resolve(&args.section, &directory, context, &LogEvents);

    let filter = match &args.filter {
        Some(value) => nav.select_filter(value, &LogEvents)?,
        None => config.navigation.default_filter,
    };

    let base_url = args
        .base_url
        .as_deref()
        .unwrap_or(&config.navigation.base_url);
    validate_base_url(base_url).context("Invalid --base-url")?;

    let breadcrumb = nav.breadcrumb();
    Ok(NavReport {
        section: args.section.clone(),
        resolved: nav.section().is_some(),
        parent: breadcrumb.as_ref().map(|b| b.parent_title.clone()),
        label: breadcrumb.map(|b| b.label),
        all_link: nav.all_link(),
        sub_sections: nav
            .sub_sections()
            .iter()
            .map(|s| nav.sub_section_link(s))
            .collect(),
        filter,
        show_subscribe: nav.show_subscribe(),
        show_ask_question: nav.show_ask_question(),
        ask_question: nav.new_question_target(base_url),
    })
}

pub async fn run(args: NavArgs) -> Result<()> {
    let report = build_report(&args)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} {}", "Section:".bold(), report.section.cyan());
    if !report.resolved {
        println!("  {}", "(not found in sections file)".dimmed());
    }
    if let (Some(parent), Some(label)) = (&report.parent, &report.label) {
        let label = match label {
            BreadcrumbLabel::All => "all".to_string(),
            BreadcrumbLabel::Section(title) => title.clone(),
        };
        println!("  {}: {}", parent, label);
    }
    println!("  {} {}", "all:".dimmed(), report.all_link);
    for link in &report.sub_sections {
        println!("  {} {}", "-".dimmed(), link);
    }
    println!("{} {}", "Filter:".bold(), report.filter);
    println!("{} {}", "Subscribe:".bold(), yes_no(report.show_subscribe));
    if report.show_ask_question {
        match &report.ask_question {
            NewQuestionTarget::Login { url } => {
                println!("{} login via {}", "Ask question:".bold(), url.yellow())
            }
            NewQuestionTarget::Navigate { path } => {
                println!("{} {}", "Ask question:".bold(), path.green())
            }
        }
    } else {
        println!("{} {}", "Ask question:".bold(), "hidden".dimmed());
    }

    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
