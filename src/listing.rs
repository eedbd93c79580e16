use serde::Serialize;

/// Shown in the binary column for a line that produced no word.
pub const SYNTAX_ERROR: &str = "SYNTAX ERROR";

/// One diagnostic row per non-blank source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingRow {
    pub seq: usize,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expanded: Option<String>,
    pub binary: Option<String>,
    pub hex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ListingRow {
    pub fn is_ok(&self) -> bool {
        self.hex.is_some()
    }
}

pub fn header() -> String {
    format!(
        "{:<4}| {:<21}| {:<17}| {}\n{}",
        "SEQ",
        "Source",
        "Binary",
        "Hex",
        "----|----------------------|------------------|-----"
    )
}

pub fn fmt_row(row: &ListingRow) -> String {
    match (&row.binary, &row.hex) {
        (Some(bin), Some(hex)) => format!("{:<4}| {:<21}| {} | {}", row.seq, row.source, bin, hex),
        _ => format!("{:<4}| {:<21}| {}", row.seq, row.source, SYNTAX_ERROR),
    }
}

pub fn fmt_row_json(row: &ListingRow) -> serde_json::Result<String> {
    serde_json::to_string(row)
}
