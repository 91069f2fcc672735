//! Names: field keys → interface names, and field keys → property keys.

/// PascalCase a key: every run of characters outside `[A-Za-z0-9]` is a word
/// break, each word gets an uppercase first letter and a lowercase rest.
///
/// `"my tool"` → `MyTool`, `"user_ID"` → `UserId`, `"a-b"` and `"a_b"` both → `AB`.
/// Returns an empty string when the key has no alphanumerics at all.
pub fn type_name(key: &str) -> String {
    key.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(word.len());
            out.push(first.to_ascii_uppercase());
            out.push_str(&chars.as_str().to_ascii_lowercase());
            out
        }
        None => String::new(),
    }
}

/// `type_name`, made usable as a TypeScript identifier: an empty name becomes
/// `fallback` and a name starting with a digit gets a leading underscore.
pub fn type_name_or(key: &str, fallback: &str) -> String {
    let name = type_name(key);
    match name.chars().next() {
        None => fallback.to_string(),
        Some(c) if c.is_ascii_digit() => format!("_{name}"),
        Some(_) => name,
    }
}

/// Property key as written inside an interface body. Keys that are not plain
/// identifiers are emitted as string literals.
pub fn property_key(key: &str) -> String {
    if is_identifier(key) {
        key.to_string()
    } else {
        quote(key)
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
