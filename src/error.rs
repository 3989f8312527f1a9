use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrecinctError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Cannot detect spreadsheet format for '{name}'")]
    UnsupportedFormat { name: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not find a 'Precinct No' header within the first {scanned} rows")]
    HeaderNotFound { scanned: usize },

    #[error("No similar results found for election {election_id}")]
    EmptyJumpList { election_id: u64 },

    #[error("Download for election {election_id} returned {content_type}, not CSV")]
    UnexpectedContent {
        election_id: u64,
        content_type: String,
    },
}

pub type Result<T> = std::result::Result<T, PrecinctError>;
