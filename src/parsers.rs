use chrono::NaiveDate;
use csv::ReaderBuilder;

// ---------------------------------------------------------------------------
// Tokenizer — raw report text to header + positional rows
// ---------------------------------------------------------------------------

/// One data row of a report, cells aligned with the header by position.
#[derive(Debug, Clone)]
pub struct RawRow {
    /// 1-indexed line in the source file (the header line counts).
    pub line: u64,
    pub cells: Vec<String>,
}

impl RawRow {
    /// Trimmed cell at a resolved column, or "" when the column is absent.
    pub fn cell(&self, col: Option<usize>) -> &str {
        col.and_then(|i| self.cells.get(i))
            .map(|c| c.trim())
            .unwrap_or("")
    }
}

#[derive(Debug)]
pub struct Tokenized {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
    pub errors: Vec<String>,
}

/// Split raw CSV text into a header row and data rows. The first non-empty
/// line is the header; rows whose cell count disagrees with it are reported
/// and skipped, never aborting the batch. An input with no header at all is
/// the caller's problem (`headers` comes back empty).
pub fn tokenize(text: &str) -> Tokenized {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut headers: Vec<String> = Vec::new();
    let mut rows = Vec::new();
    let mut errors = Vec::new();

    for result in rdr.records() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                errors.push(format!("malformed row at line {line}"));
                continue;
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        if headers.is_empty() {
            headers = record.iter().map(|f| f.trim().to_string()).collect();
            continue;
        }
        if record.len() != headers.len() {
            errors.push(format!("malformed row at line {line}"));
            continue;
        }
        rows.push(RawRow {
            line,
            cells: record.iter().map(|f| f.to_string()).collect(),
        });
    }

    Tokenized {
        headers,
        rows,
        errors,
    }
}

// ---------------------------------------------------------------------------
// Value parsers
// ---------------------------------------------------------------------------

const DATE_FORMATS: &[&str] = &[
    "%m/%d/%Y",
    "%m/%d/%y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m-%d-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
];

/// Parse a cell into a calendar date. `None` means "no date here", an
/// expected state for optional columns rather than a fault.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(d);
        }
    }
    // Some exports append a time ("1/10/2025 2:30 PM"); retry on the date part.
    let first = raw.split_whitespace().next().unwrap_or("");
    if first != raw {
        for fmt in DATE_FORMATS {
            if let Ok(d) = NaiveDate::parse_from_str(first, fmt) {
                return Some(d);
            }
        }
    }
    None
}

/// Parse a monetary cell into integer cents. Currency symbols, thousands
/// separators, and parenthesized negatives are tolerated. `None` for empty
/// or unparseable input; `Some(0)` is a real zero, distinct from unspecified.
pub fn parse_cents(raw: &str) -> Option<i64> {
    let s = raw.replace([',', '"', '$', ' '], "");
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Some(inner) = s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        return to_cents(inner).map(|c| -c);
    }
    to_cents(s)
}

fn to_cents(s: &str) -> Option<i64> {
    let value: f64 = s.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some((value * 100.0).round() as i64)
}
