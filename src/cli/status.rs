use crate::error::Result;
use crate::settings::{get_data_dir, load_settings};
use crate::store::Store;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let data_dir = get_data_dir();

    println!("Owner:      {}", if settings.default_owner.is_empty() { "(not set)" } else { &settings.default_owner });
    println!("Data dir:   {}", data_dir.display());

    let store = Store::open(&data_dir);
    if store.exists() {
        println!();
        println!("Service types:  {}", store.load_service_types().len());
        println!("Lead sources:   {}", store.load_lead_sources().len());
        println!("Bookings:       {}", store.load_bookings().len());
        println!("Funnel months:  {}", store.load_funnel().len());
        println!("Imports:        {}", store.import_log().len());
    } else {
        println!();
        println!("Data directory not found. Run `leadline init` to set up.");
    }

    Ok(())
}
