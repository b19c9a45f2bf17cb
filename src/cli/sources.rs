use comfy_table::{Cell, Table};

use crate::error::{LeadlineError, Result};
use crate::models::LeadSource;
use crate::settings::get_data_dir;
use crate::store::Store;

pub fn add(name: &str, description: Option<&str>) -> Result<()> {
    let store = Store::open(&get_data_dir());
    let mut items = store.load_lead_sources();
    if items.iter().any(|s| s.name.to_lowercase() == name.to_lowercase()) {
        return Err(LeadlineError::DuplicateEntity(name.to_string()));
    }

    let mut n = 1;
    let id = loop {
        let candidate = format!("src-{n}");
        if !items.iter().any(|s| s.id == candidate) {
            break candidate;
        }
        n += 1;
    };
    items.push(LeadSource {
        id,
        name: name.to_string(),
        description: description.unwrap_or_default().to_string(),
        is_custom: true,
    });
    store.save_lead_sources(&items)?;
    println!("Added lead source: {name}");
    Ok(())
}

pub fn list() -> Result<()> {
    let store = Store::open(&get_data_dir());
    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Description", "Custom"]);
    for s in store.load_lead_sources() {
        table.add_row(vec![
            Cell::new(s.id),
            Cell::new(s.name),
            Cell::new(s.description),
            Cell::new(if s.is_custom { "yes" } else { "" }),
        ]);
    }
    println!("Lead Sources\n{table}");
    Ok(())
}
