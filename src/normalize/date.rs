use once_cell::sync::Lazy;
use regex::Regex;

/// `YYYY-MM-DD` anchored at the start; anything may follow (times, offsets).
/// ASCII digits only, `\d` would also accept other Unicode digit classes.
static DATE_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}").expect("date prefix pattern is valid")
});

/// Date detection is purely lexical; `2024-13-45` still counts.
pub fn looks_like_date(s: &str) -> bool {
    DATE_PREFIX.is_match(s)
}
