use crate::app::ports::{HttpClientPort, HttpGetResult};
use crate::config::ElectionsConfig;
use crate::error::{PrecinctError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

static DISPOSITION_FILENAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"filename="?(?P<name>[^";]+)"?"#).expect("filename pattern is valid")
});

const DEFAULT_EXTENSION: &str = ".csv";

/// `President/General/2024` becomes `VA_President_General_2024_precincts.csv`,
/// keeping the extension the server announces when it names the file.
pub fn file_name_for(label: &str, content_disposition: Option<&str>) -> String {
    let normalized_label = label.replace(['/', ' '], "_");
    let extension = content_disposition
        .and_then(server_extension)
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
    format!("VA_{normalized_label}_precincts{extension}")
}

fn server_extension(content_disposition: &str) -> Option<String> {
    let caps = DISPOSITION_FILENAME.captures(content_disposition)?;
    let name = caps.name("name")?.as_str().trim();
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!(".{ext}"))
}

fn ensure_not_html(election_id: u64, resp: &HttpGetResult) -> Result<()> {
    if resp.content_type.to_ascii_lowercase().contains("text/html") {
        return Err(PrecinctError::UnexpectedContent {
            election_id,
            content_type: resp.content_type.clone(),
        });
    }
    Ok(())
}

/// Downloads one election's precinct CSV into `outdir` and returns the path.
pub fn download_precinct_csv<H: HttpClientPort>(
    http: &H,
    config: &ElectionsConfig,
    election_id: u64,
    label: &str,
    outdir: &Path,
) -> Result<PathBuf> {
    let url = config.download_url(election_id);
    let resp = http.get(&url)?;
    ensure_not_html(election_id, &resp)?;

    fs::create_dir_all(outdir)?;
    let path = outdir.join(file_name_for(label, resp.content_disposition.as_deref()));
    fs::write(&path, &resp.bytes)?;
    info!(election_id, path = %path.display(), bytes = resp.bytes.len(), "Saved precinct CSV");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_from_label() {
        assert_eq!(
            file_name_for("President/General/2024", None),
            "VA_President_General_2024_precincts.csv"
        );
        assert_eq!(
            file_name_for("President/General Special/2020", None),
            "VA_President_General_Special_2020_precincts.csv"
        );
    }

    #[test]
    fn test_file_name_keeps_server_extension() {
        assert_eq!(
            file_name_for(
                "President/General/2016",
                Some(r#"attachment; filename="Virginia_Elections_Database.txt""#)
            ),
            "VA_President_General_2016_precincts.txt"
        );
        assert_eq!(
            file_name_for("X", Some("attachment; filename=results.csv; size=10")),
            "VA_X_precincts.csv"
        );
        assert_eq!(
            file_name_for("X", Some(r#"attachment; filename="noext""#)),
            "VA_X_precincts.csv"
        );
    }

    #[test]
    fn test_html_response_rejected() {
        let resp = HttpGetResult {
            status: 200,
            bytes: b"<html>login</html>".to_vec(),
            content_type: "Text/HTML; charset=utf-8".into(),
            content_disposition: None,
        };
        assert!(matches!(
            ensure_not_html(5, &resp),
            Err(PrecinctError::UnexpectedContent { election_id: 5, .. })
        ));
    }
}
