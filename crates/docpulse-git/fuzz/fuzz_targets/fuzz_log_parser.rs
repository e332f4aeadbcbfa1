#![no_main]

use docpulse_git::parser::parse_log_page;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        let parsed = parse_log_page(raw);
        assert!(parsed.commits.len() <= parsed.headers);
        assert!(parsed.commits.iter().all(|c| !c.files.is_empty()));
    }
});
