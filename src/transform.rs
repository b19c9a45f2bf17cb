use crate::columns::ColumnMap;
use crate::models::{Booking, BookingStatus, ReportKind};
use crate::parsers::{parse_cents, parse_date, RawRow};
use crate::resolver::EntityResolver;

// ---------------------------------------------------------------------------
// Record transformer — one report row to (at most) one booking
// ---------------------------------------------------------------------------

/// Turns raw rows into booking records. A parseable inquiry date is the
/// precondition for a row producing anything at all; everything else
/// degrades gracefully (missing amount becomes $0, missing entity names
/// fall back to the catalog). Data-quality problems land in `warnings` and
/// the row is dropped, never the batch.
pub struct Transformer<'a> {
    map: &'a ColumnMap,
    kind: ReportKind,
    owner: String,
    booking_seq: u64,
    pub warnings: Vec<String>,
}

impl<'a> Transformer<'a> {
    pub fn new(map: &'a ColumnMap, kind: ReportKind, owner: &str, booking_seq: u64) -> Self {
        Transformer {
            map,
            kind,
            owner: owner.to_string(),
            booking_seq,
            warnings: Vec::new(),
        }
    }

    pub fn transform(&mut self, row: &RawRow, resolver: &mut EntityResolver) -> Option<Booking> {
        let Some(date_inquired) = parse_date(row.cell(self.map.date_inquired)) else {
            self.warnings
                .push(format!("Row {}: Skipping row with no inquiry date", row.line));
            return None;
        };

        // Entities are resolved in both modes; funnel exports still grow
        // the lead-source catalog.
        let service_type_id = resolver.service_type_id(row.cell(self.map.service_type));
        let source_name = self.lead_source_name(row);
        let lead_source_id = resolver.lead_source_id(source_name.as_deref().unwrap_or(""));

        if self.kind == ReportKind::FunnelOnly {
            return None;
        }

        let project_name = row.cell(self.map.project_name);
        if project_name.is_empty() {
            self.warnings
                .push(format!("Row {}: Skipping row with no project name", row.line));
            return None;
        }

        let date_booked = parse_date(row.cell(self.map.date_booked));
        let status = if date_booked.is_some() {
            BookingStatus::Booked
        } else {
            BookingStatus::Inquiry
        };
        let booked_revenue_cents = parse_cents(row.cell(self.map.total_amount)).unwrap_or(0);
        let notes = match row.cell(self.map.notes) {
            "" => None,
            n => Some(n.to_string()),
        };

        let id = format!("bkg-{}", self.booking_seq);
        self.booking_seq += 1;
        Some(Booking {
            id,
            project_name: project_name.to_string(),
            service_type_id,
            lead_source_id,
            date_inquired: Some(date_inquired),
            date_booked,
            project_date: parse_date(row.cell(self.map.project_date)),
            booked_revenue_cents,
            status,
            notes,
            owner: self.owner.clone(),
        })
    }

    /// The source platform splits some lead sources across two columns
    /// ("Lead Source" plus a free-text detail). When both are present the
    /// names are concatenated, which can mint near-duplicate entities for
    /// rows differing only in punctuation. Flagged, not normalized.
    fn lead_source_name(&mut self, row: &RawRow) -> Option<String> {
        let source = row.cell(self.map.lead_source);
        let detail = row.cell(self.map.lead_detail);
        match (source.is_empty(), detail.is_empty()) {
            (false, false) => {
                let combined = format!("{source} - {detail}");
                self.warnings.push(format!(
                    "Row {}: Ambiguous lead source '{combined}' (combined from two columns)",
                    row.line
                ));
                Some(combined)
            }
            (false, true) => Some(source.to_string()),
            (true, false) => Some(detail.to_string()),
            (true, true) => None,
        }
    }
}
