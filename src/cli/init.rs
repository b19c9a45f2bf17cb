use std::path::Path;

use crate::error::Result;
use crate::settings::{load_settings, save_settings, shellexpand_path};
use crate::store::Store;

pub fn run(data_dir: Option<String>) -> Result<()> {
    let mut settings = load_settings();
    if let Some(dir) = data_dir {
        settings.data_dir = shellexpand_path(&dir);
    }

    let store = Store::open(Path::new(&settings.data_dir));
    store.init()?;
    save_settings(&settings)?;

    println!("Data directory: {}", settings.data_dir);
    println!("Ready. Import a report with `leadline import <report.csv>`.");
    Ok(())
}
