use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Alias table — canonical field names to accepted header spellings
// ---------------------------------------------------------------------------

/// Accepted header aliases per canonical field. This is versioned
/// configuration, not code: when a platform renames its export columns,
/// only this table changes. A partial `aliases.json` in the data directory
/// overrides individual fields and falls back to these defaults for the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AliasTable {
    pub project_name: Vec<String>,
    pub lead_source: Vec<String>,
    pub lead_detail: Vec<String>,
    pub service_type: Vec<String>,
    pub date_inquired: Vec<String>,
    pub date_booked: Vec<String>,
    pub project_date: Vec<String>,
    pub total_amount: Vec<String>,
    pub notes: Vec<String>,
}

fn aliases(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for AliasTable {
    fn default() -> Self {
        AliasTable {
            project_name: aliases(&["project name", "project", "event name", "client name"]),
            lead_source: aliases(&["lead source", "source", "referral"]),
            lead_detail: aliases(&["source detail", "source other", "other source", "tell us more"]),
            service_type: aliases(&["service type", "service", "event type", "package"]),
            date_inquired: aliases(&[
                "lead created",
                "date inquired",
                "inquiry date",
                "inquired",
                "created date",
                "date created",
            ]),
            date_booked: aliases(&["booked date", "date booked", "booking date"]),
            project_date: aliases(&["project date", "event date", "session date", "wedding date"]),
            total_amount: aliases(&[
                "total project value",
                "total value",
                "total amount",
                "project value",
                "amount",
                "revenue",
                "price",
            ]),
            notes: aliases(&["notes", "comments"]),
        }
    }
}

// ---------------------------------------------------------------------------
// Column inference
// ---------------------------------------------------------------------------

/// Case-insensitive substring match between aliases and headers. The first
/// header containing any alias wins, so results are deterministic for a
/// fixed header order.
pub fn find_column(headers: &[String], aliases: &[String]) -> Option<usize> {
    for (i, header) in headers.iter().enumerate() {
        let header = header.to_lowercase();
        for alias in aliases {
            if header.contains(&alias.to_lowercase()) {
                return Some(i);
            }
        }
    }
    None
}

/// Resolved column index per canonical field. Computed once per import;
/// `None` means the report does not carry that field and every consumer
/// treats its value as "not provided".
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    pub project_name: Option<usize>,
    pub lead_source: Option<usize>,
    pub lead_detail: Option<usize>,
    pub service_type: Option<usize>,
    pub date_inquired: Option<usize>,
    pub date_booked: Option<usize>,
    pub project_date: Option<usize>,
    pub total_amount: Option<usize>,
    pub notes: Option<usize>,
}

impl ColumnMap {
    pub fn resolve(headers: &[String], table: &AliasTable) -> Self {
        ColumnMap {
            project_name: find_column(headers, &table.project_name),
            lead_source: find_column(headers, &table.lead_source),
            lead_detail: find_column(headers, &table.lead_detail),
            service_type: find_column(headers, &table.service_type),
            date_inquired: find_column(headers, &table.date_inquired),
            date_booked: find_column(headers, &table.date_booked),
            project_date: find_column(headers, &table.project_date),
            total_amount: find_column(headers, &table.total_amount),
            notes: find_column(headers, &table.notes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_find_column_case_insensitive_substring() {
        let h = headers(&["Project Name", "LEAD CREATED DATE", "Total Project Value"]);
        let table = AliasTable::default();
        assert_eq!(find_column(&h, &table.project_name), Some(0));
        assert_eq!(find_column(&h, &table.date_inquired), Some(1));
        assert_eq!(find_column(&h, &table.total_amount), Some(2));
    }

    #[test]
    fn test_find_column_first_header_wins() {
        let h = headers(&["Booked Date", "Date Booked (old)"]);
        let table = AliasTable::default();
        assert_eq!(find_column(&h, &table.date_booked), Some(0));
    }

    #[test]
    fn test_find_column_no_match() {
        let h = headers(&["Foo", "Bar"]);
        let table = AliasTable::default();
        assert_eq!(find_column(&h, &table.lead_source), None);
    }

    #[test]
    fn test_resolve_platform_export_headers() {
        let h = headers(&[
            "Project Name",
            "Lead Created Date",
            "Booked Date",
            "Total Project Value",
            "Lead Source",
        ]);
        let map = ColumnMap::resolve(&h, &AliasTable::default());
        assert_eq!(map.project_name, Some(0));
        assert_eq!(map.date_inquired, Some(1));
        assert_eq!(map.date_booked, Some(2));
        assert_eq!(map.total_amount, Some(3));
        assert_eq!(map.lead_source, Some(4));
        assert_eq!(map.service_type, None);
        assert_eq!(map.notes, None);
    }

    #[test]
    fn test_alias_table_partial_json_merges_with_defaults() {
        let table: AliasTable =
            serde_json::from_str(r#"{"project_name": ["gig name"]}"#).unwrap();
        assert_eq!(table.project_name, vec!["gig name"]);
        // Untouched fields keep the built-in defaults.
        assert!(!table.date_inquired.is_empty());
        assert!(!table.lead_source.is_empty());
    }
}
