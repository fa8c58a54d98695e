#![no_main]

use libfuzzer_sys::fuzz_target;
use oauth_token_server::oauth::grant::PasswordGrant;
use oauth_token_server::oauth::types::TokenRequest;

fuzz_target!(|data: &[u8]| {
    // Decode arbitrary bytes as a form body, then require every field
    if let Ok(req) = serde_urlencoded::from_bytes::<TokenRequest>(data) {
        let _ = PasswordGrant::try_from(req);
    }
});
