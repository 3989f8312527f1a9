use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;

use tempfile::tempdir;
use va_precincts::app::collect_results_use_case::CollectResultsUseCase;
use va_precincts::app::ports::{HttpClientPort, HttpGetResult};
use va_precincts::config::ElectionsConfig;
use va_precincts::error::{PrecinctError, Result};

const BASE: &str = "https://elections.test";

/// Serves canned pages by URL and records every request.
struct FakeSite {
    pages: HashMap<String, HttpGetResult>,
    requests: RefCell<Vec<String>>,
}

impl FakeSite {
    fn new() -> Self {
        Self {
            pages: HashMap::new(),
            requests: RefCell::new(Vec::new()),
        }
    }

    fn jump_list(mut self, id: u64, options: &[(u64, &str)], selected: Option<u64>) -> Self {
        let body: String = options
            .iter()
            .map(|(value, label)| {
                let marker = if Some(*value) == selected { " selected" } else { "" };
                format!("<option value=\"{value}\"{marker}>{label}</option>\n")
            })
            .collect();
        self.pages.insert(
            format!("{BASE}/elections/jump_list/{id}/"),
            page("text/html; charset=utf-8", &format!("<select>{body}</select>"), None),
        );
        self
    }

    fn csv(mut self, id: u64, body: &str) -> Self {
        self.pages.insert(
            format!("{BASE}/elections/download/{id}/precincts_include:1/"),
            page(
                "text/csv",
                body,
                Some(r#"attachment; filename="Virginia_Elections_Database__Precincts.csv""#),
            ),
        );
        self
    }

    fn html_download(mut self, id: u64) -> Self {
        self.pages.insert(
            format!("{BASE}/elections/download/{id}/precincts_include:1/"),
            page("text/html", "<html>Sign in</html>", None),
        );
        self
    }

    fn downloads(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .filter(|url| url.contains("/download/"))
            .cloned()
            .collect()
    }
}

impl HttpClientPort for FakeSite {
    fn get(&self, url: &str) -> Result<HttpGetResult> {
        self.requests.borrow_mut().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| PrecinctError::HttpStatus {
                status: 404,
                url: url.to_string(),
            })
    }
}

fn page(content_type: &str, body: &str, disposition: Option<&str>) -> HttpGetResult {
    HttpGetResult {
        status: 200,
        bytes: body.as_bytes().to_vec(),
        content_type: content_type.to_string(),
        content_disposition: disposition.map(str::to_string),
    }
}

fn config(output_dir: &std::path::Path, needed: usize) -> ElectionsConfig {
    ElectionsConfig {
        base_url: BASE.to_string(),
        start_election_id: 100,
        output_dir: output_dir.to_path_buf(),
        needed,
        delay_ms: 0,
        ..ElectionsConfig::default()
    }
}

const LIST: &[(u64, &str)] = &[
    (100, "President/General/2024"),
    (90, "Governor/General/2021"),
    (80, "President/General/2020"),
    (70, "President/General/2016"),
];

#[test]
fn test_keeps_only_matching_labels() {
    let dir = tempdir().unwrap();
    let site = FakeSite::new()
        .jump_list(100, LIST, Some(100))
        .csv(100, "County,Precinct\nAccomack,101\n")
        .csv(80, "2020 data")
        .csv(70, "2016 data");

    let report = CollectResultsUseCase::new(&site, config(dir.path(), 2))
        .run()
        .unwrap();

    let ids: Vec<_> = report.kept.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![100, 80]);
    assert!(report.is_complete());
    assert_eq!(report.considered, 3);
    assert!(site.downloads().iter().all(|url| !url.contains("/90/")));

    let first = dir.path().join("VA_President_General_2024_precincts.csv");
    assert_eq!(report.kept[0].path, first);
    assert_eq!(
        fs::read_to_string(first).unwrap(),
        "County,Precinct\nAccomack,101\n"
    );
}

#[test]
fn test_stops_at_end_of_list() {
    let dir = tempdir().unwrap();
    let site = FakeSite::new()
        .jump_list(100, LIST, Some(100))
        .csv(100, "a")
        .csv(80, "b")
        .csv(70, "c");

    let report = CollectResultsUseCase::new(&site, config(dir.path(), 10))
        .run()
        .unwrap();

    assert_eq!(report.kept.len(), 3);
    assert_eq!(report.considered, 4);
    assert!(!report.is_complete());
}

#[test]
fn test_html_download_is_skipped() {
    let dir = tempdir().unwrap();
    let site = FakeSite::new()
        .jump_list(100, LIST, Some(100))
        .html_download(100)
        .csv(80, "b")
        .csv(70, "c");

    let report = CollectResultsUseCase::new(&site, config(dir.path(), 2))
        .run()
        .unwrap();

    let ids: Vec<_> = report.kept.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![80, 70]);
    assert!(!dir
        .path()
        .join("VA_President_General_2024_precincts.csv")
        .exists());
}

#[test]
fn test_starts_from_selected_entry() {
    let dir = tempdir().unwrap();
    let site = FakeSite::new()
        .jump_list(100, LIST, Some(80))
        .csv(80, "b")
        .csv(70, "c");

    let report = CollectResultsUseCase::new(&site, config(dir.path(), 2))
        .run()
        .unwrap();

    let ids: Vec<_> = report.kept.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![80, 70]);
}

#[test]
fn test_no_filter_keeps_everything() {
    let dir = tempdir().unwrap();
    let site = FakeSite::new()
        .jump_list(100, LIST, Some(100))
        .csv(100, "a")
        .csv(90, "governor");

    let mut cfg = config(dir.path(), 2);
    cfg.label_filter = None;
    let report = CollectResultsUseCase::new(&site, cfg).run().unwrap();

    let ids: Vec<_> = report.kept.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![100, 90]);
    assert!(dir
        .path()
        .join("VA_Governor_General_2021_precincts.csv")
        .exists());
}

#[test]
fn test_missing_start_list_is_an_error() {
    let dir = tempdir().unwrap();
    let site = FakeSite::new();
    let result = CollectResultsUseCase::new(&site, config(dir.path(), 1)).run();
    assert!(matches!(
        result,
        Err(PrecinctError::HttpStatus { status: 404, .. })
    ));
}
