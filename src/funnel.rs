use std::collections::BTreeMap;

use chrono::Datelike;

use crate::columns::ColumnMap;
use crate::models::FunnelMonth;
use crate::parsers::{parse_cents, parse_date, RawRow};

// ---------------------------------------------------------------------------
// Funnel aggregation — monthly inquiry/close rollups with YTD totals
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Bucket {
    inquiries: u32,
    closes: u32,
    booked_cents: i64,
}

/// Bucket every row with a parseable inquiry date by (year, month) of that
/// date, independent of whether the row became a booking. A row with a
/// parseable booked date additionally counts as a close, attributed to the
/// inquiry month where the lead originated rather than the booking month.
pub fn aggregate(rows: &[RawRow], map: &ColumnMap) -> Vec<FunnelMonth> {
    let mut buckets: BTreeMap<(i32, u32), Bucket> = BTreeMap::new();
    for row in rows {
        let Some(inquired) = parse_date(row.cell(map.date_inquired)) else {
            continue;
        };
        let bucket = buckets
            .entry((inquired.year(), inquired.month()))
            .or_default();
        bucket.inquiries += 1;
        if parse_date(row.cell(map.date_booked)).is_some() {
            bucket.closes += 1;
            bucket.booked_cents += parse_cents(row.cell(map.total_amount)).unwrap_or(0);
        }
    }

    let mut series: Vec<FunnelMonth> = buckets
        .into_iter()
        .map(|((year, month), b)| FunnelMonth {
            year,
            month,
            inquiries: b.inquiries,
            closes: b.closes,
            booked_cents: b.booked_cents,
            inquiries_ytd: 0,
            booked_ytd_cents: 0,
        })
        .collect();
    recompute_ytd(&mut series);
    series
}

/// Forward scan over a (year, month)-sorted series: each month's YTD is the
/// previous month's YTD when the year matches, else zero, plus the month's
/// own counts. Never computed during the row pass, where bucket order is
/// not yet chronological.
pub fn recompute_ytd(series: &mut [FunnelMonth]) {
    let mut ytd_year = None;
    let mut inquiries_ytd = 0u32;
    let mut booked_ytd_cents = 0i64;
    for m in series {
        if ytd_year != Some(m.year) {
            ytd_year = Some(m.year);
            inquiries_ytd = 0;
            booked_ytd_cents = 0;
        }
        inquiries_ytd += m.inquiries;
        booked_ytd_cents += m.booked_cents;
        m.inquiries_ytd = inquiries_ytd;
        m.booked_ytd_cents = booked_ytd_cents;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::AliasTable;

    fn map_for(headers: &[&str]) -> ColumnMap {
        let headers: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
        ColumnMap::resolve(&headers, &AliasTable::default())
    }

    fn row(line: u64, cells: &[&str]) -> RawRow {
        RawRow {
            line,
            cells: cells.iter().map(|s| s.to_string()).collect(),
        }
    }

    const HEADERS: &[&str] = &[
        "Project Name",
        "Lead Created Date",
        "Booked Date",
        "Total Project Value",
        "Lead Source",
    ];

    #[test]
    fn test_single_month_funnel_rollup() {
        let map = map_for(HEADERS);
        let rows = vec![
            row(2, &["A", "2025-01-10", "2025-02-01", "$5,000.00", "Instagram"]),
            row(3, &["B", "2025-01-20", "", "0", ""]),
        ];
        let series = aggregate(&rows, &map);
        assert_eq!(series.len(), 1);
        let m = &series[0];
        assert_eq!((m.year, m.month), (2025, 1));
        assert_eq!(m.inquiries, 2);
        assert_eq!(m.closes, 1);
        assert_eq!(m.booked_cents, 500000);
        assert_eq!(m.inquiries_ytd, 2);
        assert_eq!(m.booked_ytd_cents, 500000);
    }

    #[test]
    fn test_buckets_sorted_even_when_rows_are_not() {
        let map = map_for(HEADERS);
        let rows = vec![
            row(2, &["A", "3/05/2025", "", "", ""]),
            row(3, &["B", "1/10/2025", "", "", ""]),
            row(4, &["C", "11/20/2024", "", "", ""]),
        ];
        let series = aggregate(&rows, &map);
        let keys: Vec<(i32, u32)> = series.iter().map(|m| (m.year, m.month)).collect();
        assert_eq!(keys, vec![(2024, 11), (2025, 1), (2025, 3)]);
    }

    #[test]
    fn test_ytd_accumulates_and_resets_at_year_boundary() {
        let map = map_for(HEADERS);
        let rows = vec![
            row(2, &["A", "11/01/2024", "11/15/2024", "$100.00", ""]),
            row(3, &["B", "12/01/2024", "", "", ""]),
            row(4, &["C", "12/05/2024", "12/20/2024", "$50.00", ""]),
            row(5, &["D", "1/10/2025", "1/15/2025", "$25.00", ""]),
        ];
        let series = aggregate(&rows, &map);
        assert_eq!(series.len(), 3);

        assert_eq!(series[0].inquiries_ytd, 1);
        assert_eq!(series[0].booked_ytd_cents, 10000);
        assert_eq!(series[1].inquiries_ytd, 3);
        assert_eq!(series[1].booked_ytd_cents, 15000);
        // New year: YTD restarts at the month's own values.
        assert_eq!(series[2].inquiries_ytd, 1);
        assert_eq!(series[2].booked_ytd_cents, 2500);

        // Monotonic within a year.
        for pair in series.windows(2) {
            if pair[0].year == pair[1].year {
                assert!(pair[1].inquiries_ytd >= pair[0].inquiries_ytd);
                assert!(pair[1].booked_ytd_cents >= pair[0].booked_ytd_cents);
            }
        }
    }

    #[test]
    fn test_close_attributed_to_inquiry_month() {
        let map = map_for(HEADERS);
        let rows = vec![row(2, &["A", "1/10/2025", "4/01/2025", "$900.00", ""])];
        let series = aggregate(&rows, &map);
        assert_eq!(series.len(), 1);
        assert_eq!((series[0].year, series[0].month), (2025, 1));
        assert_eq!(series[0].closes, 1);
        assert_eq!(series[0].booked_cents, 90000);
    }

    #[test]
    fn test_rows_without_inquiry_date_are_ignored() {
        let map = map_for(HEADERS);
        let rows = vec![
            row(2, &["A", "", "2/01/2025", "$500.00", ""]),
            row(3, &["B", "not a date", "", "", ""]),
        ];
        assert!(aggregate(&rows, &map).is_empty());
    }

    #[test]
    fn test_bucketed_revenue_matches_summed_cents() {
        let map = map_for(HEADERS);
        let rows = vec![
            row(2, &["A", "1/01/2025", "1/02/2025", "$0.10", ""]),
            row(3, &["B", "2/01/2025", "2/02/2025", "$0.20", ""]),
            row(4, &["C", "2/15/2025", "2/20/2025", "$1,000.01", ""]),
            row(5, &["D", "3/01/2025", "", "$999.99", ""]),
        ];
        let series = aggregate(&rows, &map);
        let bucketed: i64 = series.iter().map(|m| m.booked_cents).sum();
        // Exactly the closed rows' parsed cents, no float drift.
        assert_eq!(bucketed, 10 + 20 + 100001);
        assert_eq!(series.last().unwrap().booked_ytd_cents, bucketed);
    }
}
