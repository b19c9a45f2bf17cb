use std::panic::{self, AssertUnwindSafe};

use crate::columns::{AliasTable, ColumnMap};
use crate::funnel;
use crate::models::{Booking, FunnelMonth, LeadSource, ReportKind, ServiceType};
use crate::parsers::tokenize;
use crate::resolver::EntityResolver;
use crate::transform::Transformer;

// ---------------------------------------------------------------------------
// import_report — the whole pipeline, one report at a time
// ---------------------------------------------------------------------------

pub struct ImportOptions {
    pub kind: ReportKind,
    /// Opaque owner identifier, stamped on created bookings and echoed on
    /// the result. Never interpreted.
    pub owner: String,
    /// First numeric suffix for minted booking ids, so the caller can keep
    /// ids unique across successive imports.
    pub booking_seq: u64,
}

impl Default for ImportOptions {
    fn default() -> Self {
        ImportOptions {
            kind: ReportKind::FunnelOnly,
            owner: String::new(),
            booking_seq: 1,
        }
    }
}

/// Everything one import produces. The catalogs are supersets of the seeds
/// the caller passed in; the seeds themselves are never touched.
pub struct ImportResult {
    pub bookings: Vec<Booking>,
    pub funnel: Vec<FunnelMonth>,
    pub service_types: Vec<ServiceType>,
    pub lead_sources: Vec<LeadSource>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub owner: String,
}

/// Run the import pipeline over raw report text: tokenize, infer columns
/// once from the header, transform rows, aggregate the funnel. Best-effort
/// throughout; every fault short of a missing header row is scoped to the
/// row that caused it and reported in `errors`/`warnings`.
pub fn import_report(
    text: &str,
    service_types: &[ServiceType],
    lead_sources: &[LeadSource],
    aliases: &AliasTable,
    opts: &ImportOptions,
) -> ImportResult {
    let tokenized = tokenize(text);
    if tokenized.headers.is_empty() {
        return ImportResult {
            bookings: Vec::new(),
            funnel: Vec::new(),
            service_types: service_types.to_vec(),
            lead_sources: lead_sources.to_vec(),
            errors: vec!["no header row found in report".to_string()],
            warnings: Vec::new(),
            owner: opts.owner.clone(),
        };
    }

    let map = ColumnMap::resolve(&tokenized.headers, aliases);
    let mut resolver = EntityResolver::new(service_types, lead_sources);
    let mut transformer = Transformer::new(&map, opts.kind, &opts.owner, opts.booking_seq);
    let mut errors = tokenized.errors;
    let mut bookings = Vec::new();

    for row in &tokenized.rows {
        // One bad row must never take down the batch.
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            transformer.transform(row, &mut resolver)
        }));
        match outcome {
            Ok(Some(booking)) => bookings.push(booking),
            Ok(None) => {}
            Err(_) => errors.push(format!("Row {}: failed to process row", row.line)),
        }
    }

    // The funnel sees every row, including ones the transformer skipped.
    let funnel = funnel::aggregate(&tokenized.rows, &map);
    let (service_types, lead_sources) = resolver.into_catalogs();

    ImportResult {
        bookings,
        funnel,
        service_types,
        lead_sources,
        errors,
        warnings: transformer.warnings,
        owner: opts.owner.clone(),
    }
}
