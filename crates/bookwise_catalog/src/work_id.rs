//! Open Library work ID validation.

use regex::Regex;
use std::sync::LazyLock;

static WORK_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^OL[0-9]+W$").expect("valid work ID pattern"));

/// Whether a string is a well-formed Open Library work ID (e.g. "OL45883W").
pub fn is_valid_work_id(work_id: &str) -> bool {
    WORK_ID_PATTERN.is_match(work_id)
}
