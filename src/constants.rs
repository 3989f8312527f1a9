//! Site and layout constants shared by the collector and the converter.

// Historical elections site
pub const ELECTIONS_BASE_URL: &str = "https://historical.elections.virginia.gov";
pub const DOWNLOAD_PATH_TEMPLATE: &str = "/elections/download/{eid}/precincts_include:1/";
pub const JUMP_LIST_PATH_TEMPLATE: &str = "/elections/jump_list/{eid}/";

// 2024 President/General
pub const DEFAULT_START_ELECTION_ID: u64 = 167946;

// Registration by locality only goes back to 2012, so four presidential generals.
pub const DEFAULT_NEEDED_ELECTIONS: usize = 4;
pub const DEFAULT_LABEL_FILTER: &str = "President/General";
pub const DEFAULT_ELECTIONS_OUTPUT_DIR: &str = "data_collection/precinct_election_results";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible) VA precinct fetcher";
pub const DEFAULT_DELAY_MS: u64 = 600;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 1200;

// Registration workbook
pub const DEFAULT_REGISTRATION_INPUT: &str = "data_collection/registrant_counts/2012.xls";
pub const DEFAULT_REGISTRATION_OUTPUT: &str = "data_collection/registrant_counts/2012.csv";
pub const DEFAULT_MAX_HEADER_SCAN_ROWS: usize = 60;
pub const DEFAULT_PREVIEW_ROWS: usize = 10;

/// Matches the header cell of the precinct number column.
pub const PRECINCT_NO_HEADER_PATTERN: &str = r"(?i)\bprecinct\s*(?:no\b\.?|number\b|#)";

// Layout contract with the 2012 registration report: name, active and inactive
// counts sit at fixed offsets to the right of the precinct number column.
// A different report layout is not detected and yields wrong columns.
pub const NAME_COLUMN_OFFSET: usize = 1;
pub const ACTIVE_COLUMN_OFFSET: usize = 5;
pub const INACTIVE_COLUMN_OFFSET: usize = 6;

// Output table
pub const PRECINCT_NO_COLUMN: &str = "Precinct No.";
pub const PRECINCT_NAME_COLUMN: &str = "Precinct Name";
pub const ACTIVE_COLUMN: &str = "Active";
pub const INACTIVE_COLUMN: &str = "Inactive";
pub const OUTPUT_COLUMNS: [&str; 4] = [
    PRECINCT_NO_COLUMN,
    PRECINCT_NAME_COLUMN,
    ACTIVE_COLUMN,
    INACTIVE_COLUMN,
];

pub const CONFIG_PATH_ENV: &str = "VA_PRECINCTS_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
