// Demo input for trying the tool out.
//
// A handful of URLs chosen to land in each kind of result: reachable,
// an HTTP error code, an unresolvable host, and a cell that isn't a URL.

use super::{Table, URL_COLUMN};

const SAMPLE_URLS: &[(&str, &str)] = &[
    ("Rust", "https://www.rust-lang.org"),
    ("Example", "https://example.com"),
    ("Crates", "https://crates.io"),
    ("Missing page", "https://example.com/this-page-does-not-exist"),
    ("Server error", "https://httpbin.org/status/500"),
    ("Bad host", "https://nonexistent-domain.invalid"),
    ("Not a URL", "not a url"),
];

pub fn sample_table() -> Table {
    Table {
        headers: vec!["Name".to_string(), URL_COLUMN.to_string()],
        records: SAMPLE_URLS
            .iter()
            .map(|(name, url)| vec![name.to_string(), url.to_string()])
            .collect(),
    }
}
