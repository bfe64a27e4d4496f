// src/config/consts.rs

// Net config
pub const HOME: &str = "http://dfr.jstor.org/";
pub const USER_AGENT: &str = concat!("dfr_scrape/", env!("CARGO_PKG_VERSION"));

// Navigation labels (link text on the site)
pub const LANGUAGE_SECTION: &str = "Language";
pub const ENGLISH_LINK: &str = "English";
pub const DISCIPLINE_SECTION: &str = "Discipline";
pub const YEAR_SECTION: &str = "Year of Publication";

// Search form
pub const TERM_FIELD: &str = "qv0";
pub const RANGE_FIELD: &str = "qf0";
pub const DEFAULT_SEARCH_RANGE: &str = "text";
pub const START_YEAR_FIELD: &str = "sy";
pub const END_YEAR_FIELD: &str = "ey";

// Export
pub const DEFAULT_FORMAT: &str = "csv";
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_DUMP_DIR: &str = "dump";

pub const DISCIPLINES: &[&str] = &[
    "Sociology",
    "Political Science",
    "Economics",
    "Anthropology",
    "History",
    "Public Policy & Administration",
    "General Science",
    "Biological Sciences",
    "Business",
    "Mathematics",
    "Statistics",
    "Language & Literature",
    "Philosophy",
];
