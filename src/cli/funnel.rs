use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::fmt::money;
use crate::settings::get_data_dir;
use crate::store::Store;

const MONTH_NAMES: &[&str] = &[
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

pub fn run(year: Option<i32>) -> Result<()> {
    let store = Store::open(&get_data_dir());
    let mut months = store.load_funnel();
    if let Some(y) = year {
        months.retain(|m| m.year == y);
    }
    if months.is_empty() {
        println!("No funnel data yet. Run `leadline import <report.csv>` first.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Month",
        "Inquiries",
        "Closes",
        "Booked",
        "Inquiries YTD",
        "Booked YTD",
    ]);
    for m in &months {
        let name = MONTH_NAMES
            .get((m.month as usize).wrapping_sub(1))
            .unwrap_or(&"?");
        table.add_row(vec![
            Cell::new(format!("{name} {}", m.year)),
            Cell::new(m.inquiries),
            Cell::new(m.closes),
            Cell::new(money(m.booked_cents)),
            Cell::new(m.inquiries_ytd),
            Cell::new(money(m.booked_ytd_cents)),
        ]);
    }

    let inquiries: u32 = months.iter().map(|m| m.inquiries).sum();
    let closes: u32 = months.iter().map(|m| m.closes).sum();
    let booked: i64 = months.iter().map(|m| m.booked_cents).sum();

    println!("{}\n{table}", "Sales Funnel".green().bold());
    println!("{inquiries} inquiries, {closes} closes, {} booked", money(booked));
    Ok(())
}
