use crate::error::{PrecinctError, Result};
use crate::types::ElectionEntry;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::debug;

static OPTION_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("option[value]").expect("option selector is valid"));

static VIEW_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/elections/view/(\d+)/").expect("view link pattern is valid"));

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// The "Similar results" list of one election page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumpList {
    pub entries: Vec<ElectionEntry>,
    pub selected: u64,
}

impl JumpList {
    pub fn ids(&self) -> Vec<u64> {
        self.entries.iter().map(|entry| entry.id).collect()
    }

    pub fn label_of(&self, id: u64) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.label.as_str())
    }

    pub fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// The entry after `id`, without wrapping. An unlisted `id` restarts at the
    /// first entry.
    pub fn next_after(&self, id: u64) -> Option<u64> {
        match self.entries.iter().position(|entry| entry.id == id) {
            Some(index) => self.entries.get(index + 1).map(|entry| entry.id),
            None => self.entries.first().map(|entry| entry.id),
        }
    }
}

/// Parses the jump list page fetched for `current_id`.
///
/// Entries come from the `<option>` elements in document order; pages without
/// options fall back to `/elections/view/{id}/` links, de-duplicated.
pub fn parse_jump_list(html: &str, current_id: u64) -> Result<JumpList> {
    let (entries, marked) = parse_options(html);
    let entries = if entries.is_empty() {
        parse_view_links(html)
    } else {
        entries
    };

    let first = entries.first().map(|entry| entry.id).ok_or(PrecinctError::EmptyJumpList {
        election_id: current_id,
    })?;

    let selected = match marked {
        Some(id) => id,
        None if entries.iter().any(|entry| entry.id == current_id) => current_id,
        None => first,
    };
    debug!(entries = entries.len(), selected, "Parsed jump list");

    Ok(JumpList { entries, selected })
}

fn parse_options(html: &str) -> (Vec<ElectionEntry>, Option<u64>) {
    let document = Html::parse_document(html);
    let mut entries = Vec::new();
    let mut selected = None;

    for option in document.select(&OPTION_SELECTOR) {
        let Some(id) = option
            .value()
            .attr("value")
            .filter(|v| !v.is_empty() && v.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|v| v.parse::<u64>().ok())
        else {
            continue;
        };
        let raw_label = option.text().collect::<String>();
        let label = WHITESPACE_RUN.replace_all(raw_label.trim(), " ").into_owned();
        if option.value().attr("selected").is_some() {
            selected = Some(id);
        }
        entries.push(ElectionEntry { id, label });
    }

    (entries, selected)
}

fn parse_view_links(html: &str) -> Vec<ElectionEntry> {
    let mut seen = HashSet::new();
    VIEW_LINK
        .captures_iter(html)
        .filter_map(|caps| caps[1].parse::<u64>().ok())
        .filter(|id| seen.insert(*id))
        .map(|id| ElectionEntry {
            id,
            label: String::new(),
        })
        .collect()
}
