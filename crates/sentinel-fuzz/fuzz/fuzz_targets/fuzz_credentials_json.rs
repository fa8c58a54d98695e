#![no_main]

use libfuzzer_sys::fuzz_target;
use oauth_token_server::config::Credentials;
use oauth_token_server::oauth::CredentialStore;

fuzz_target!(|data: &[u8]| {
    if let Ok(creds) = serde_json::from_slice::<Credentials>(data) {
        let store = CredentialStore::new(&creds);
        let _ = store.verify_user("", "");
        let _ = store.verify_client("", "");
    }
});
