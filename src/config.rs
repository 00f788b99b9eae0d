//! Support for library configuration options

use std::sync::{Arc, Mutex};
use once_cell::sync::Lazy;

/// Part of the ProdID string that describes the organization (example of a ProdID string: `-//ABC Corporation//My Product//EN`).
/// Feel free to override it when initing this library.
pub static ORG_NAME: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("AyeCal".to_string())));

/// Part of the ProdID string that describes the product name (example of a ProdID string: `-//ABC Corporation//My Product//EN`).
/// Feel free to override it when initing this library.
pub static PRODUCT_NAME: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("AyeCal".to_string())));

/// Override both parts of the ProdID used by calendars created from now on.
///
/// Calendars that already exist keep the ProdID they were created with.
pub fn set_product_id_parts(org_name: &str, product_name: &str) {
    set_part(&ORG_NAME, org_name);
    set_part(&PRODUCT_NAME, product_name);
}

pub(crate) fn read_part(part: &Lazy<Arc<Mutex<String>>>) -> String {
    match part.lock() {
        Ok(value) => value.clone(),
        // the value is never left half-written, even if a writer panicked
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

fn set_part(part: &Lazy<Arc<Mutex<String>>>, new_value: &str) {
    let mut value = match part.lock() {
        Ok(value) => value,
        Err(poisoned) => poisoned.into_inner(),
    };
    *value = new_value.to_string();
}
