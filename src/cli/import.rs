use std::path::PathBuf;

use colored::Colorize;

use crate::error::{LeadlineError, Result};
use crate::importer::{import_report, ImportOptions};
use crate::models::ReportKind;
use crate::settings::{get_data_dir, load_settings};
use crate::store::{file_checksum, ImportLogEntry, Store};

pub fn run(file: &str, kind: &str, owner: Option<&str>, force: bool) -> Result<()> {
    let kind = ReportKind::from_key(kind)
        .ok_or_else(|| LeadlineError::UnknownReportKind(kind.to_string()))?;
    let file_path = PathBuf::from(file);
    let store = Store::open(&get_data_dir());

    let checksum = file_checksum(&file_path)?;
    if !force && store.already_imported(&checksum) {
        println!("This file has already been imported (duplicate checksum). Use --force to re-import.");
        return Ok(());
    }

    let text = std::fs::read_to_string(&file_path)?;
    let owner = owner
        .map(str::to_string)
        .unwrap_or_else(|| load_settings().default_owner);
    let service_types = store.load_service_types();
    let lead_sources = store.load_lead_sources();
    let aliases = store.load_alias_table();
    let opts = ImportOptions {
        kind,
        owner,
        booking_seq: store.next_booking_seq(),
    };

    let result = import_report(&text, &service_types, &lead_sources, &aliases, &opts);

    let new_services = result.service_types.len() - service_types.len();
    let new_sources = result.lead_sources.len() - lead_sources.len();
    let inquiries: u32 = result.funnel.iter().map(|m| m.inquiries).sum();

    store.save_service_types(&result.service_types)?;
    store.save_lead_sources(&result.lead_sources)?;
    if !result.bookings.is_empty() {
        store.append_bookings(&result.bookings)?;
    }
    store.merge_funnel(&result.funnel)?;
    store.record_import(ImportLogEntry {
        filename: file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_string(),
        checksum,
        kind: kind.key().to_string(),
        rows: inquiries as usize,
    })?;

    println!("{} — {}", kind.name(), file_path.display());
    println!(
        "{inquiries} inquiries across {} months, {} bookings created",
        result.funnel.len(),
        result.bookings.len()
    );
    if new_services > 0 || new_sources > 0 {
        println!("New entities: {new_services} service types, {new_sources} lead sources");
    }
    for w in &result.warnings {
        println!("{} {w}", "warning:".yellow());
    }
    for e in &result.errors {
        println!("{} {e}", "error:".red());
    }

    Ok(())
}
