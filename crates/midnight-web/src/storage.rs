use midnight_core::WishLedger;
use web_sys as web;

const WISHES_KEY: &str = "wishes-ledger";
const USER_NAME_KEY: &str = "current-user-name";

fn local_storage() -> Option<web::Storage> {
    web::window()?.local_storage().ok().flatten()
}

/// Restore the ledger and remembered user name. Absent or unreadable storage
/// yields an empty ledger.
pub fn load_ledger() -> WishLedger {
    let storage = match local_storage() {
        Some(s) => s,
        None => return WishLedger::default(),
    };
    let mut ledger = match storage.get_item(WISHES_KEY).ok().flatten() {
        Some(json) => WishLedger::from_json(&json),
        None => WishLedger::default(),
    };
    ledger.set_user_name(storage.get_item(USER_NAME_KEY).ok().flatten());
    log::info!("loaded {} wishes from storage", ledger.len());
    ledger
}

/// Persist the full serialized ledger plus the current user name. Write
/// failures (quota, private mode) are swallowed.
pub fn save_ledger(ledger: &WishLedger) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(WISHES_KEY, &ledger.to_json());
        if let Some(name) = ledger.user_name() {
            let _ = storage.set_item(USER_NAME_KEY, name);
        }
    }
}
