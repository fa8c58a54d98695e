#![no_main]

use libfuzzer_sys::fuzz_target;
use oauth_token_server::oauth::resource::parse_bearer;

fuzz_target!(|data: &[u8]| {
    if let Ok(header) = std::str::from_utf8(data) {
        if let Some(token) = parse_bearer(header) {
            assert!(!token.is_empty());
        }
    }
});
