//! Name canonicalization and DOCTYPE declaration helpers.

/// Characters allowed in a public identifier.
const PUBLIC_ID_CHARS: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789-'()+,./:=?;!*#@$_%";

/// Turn arbitrary tag or attribute text into a well-formed name.
///
/// Letters and `_` are kept. Digits, `-` and `.` are kept, behind a `_`
/// when they would start the name or the part after the colon. Only the
/// first `:` survives (as `_` when `translate_colons` is set). Everything
/// else is dropped. A name that ends up empty or ending in `:` gets a
/// trailing `_`.
///
/// # Example
/// ```
/// use slurry_html::parser::names::make_name;
///
/// assert_eq!(make_name("DIV", false), "DIV");
/// assert_eq!(make_name("1st", false), "_1st");
/// assert_eq!(make_name("svg:rect", true), "svg_rect");
/// assert_eq!(make_name("\"", false), "_");
/// ```
#[must_use]
pub fn make_name(raw: &str, translate_colons: bool) -> String {
    let mut name = String::with_capacity(raw.len() + 2);
    let mut seen_colon = false;
    let mut start = true;
    for c in raw.chars() {
        if c.is_alphabetic() || c == '_' {
            start = false;
            name.push(c);
        } else if c.is_numeric() || c == '-' || c == '.' {
            if start {
                name.push('_');
            }
            start = false;
            name.push(c);
        } else if c == ':' && !seen_colon {
            seen_colon = true;
            if start {
                name.push('_');
            }
            start = true;
            name.push(if translate_colons { '_' } else { ':' });
        }
    }
    if name.is_empty() || name.ends_with(':') {
        name.push('_');
    }
    name
}

/// Split a declaration into whitespace-separated words, keeping quoted
/// phrases (quotes included) together. A backslash before a quote stops
/// it from opening or closing a phrase.
#[must_use]
pub fn split_declaration(text: &str) -> Vec<&str> {
    let text = text.trim();
    let mut words = Vec::new();
    let mut start: Option<usize> = None;
    let mut single = false;
    let mut double = false;
    let mut last = '\0';
    for (index, c) in text.char_indices() {
        if !double && c == '\'' && last != '\\' {
            single = !single;
            if start.is_none() {
                start = Some(index);
            }
        } else if !single && c == '"' && last != '\\' {
            double = !double;
            if start.is_none() {
                start = Some(index);
            }
        } else if !single && !double {
            if c.is_whitespace() {
                if let Some(begin) = start.take() {
                    words.push(&text[begin..index]);
                }
            } else if start.is_none() {
                start = Some(index);
            }
        }
        last = c;
    }
    if let Some(begin) = start {
        words.push(&text[begin..]);
    }
    words
}

/// Strip one pair of matching surrounding quotes.
#[must_use]
pub fn trim_quotes(value: &str) -> &str {
    for quote in ['\'', '"'] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// Replace each run of characters not allowed in a public identifier with
/// a single space, and trim the result.
#[must_use]
pub fn clean_public_id(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());
    let mut suppress_space = true;
    for c in raw.chars() {
        if PUBLIC_ID_CHARS.contains(c) {
            cleaned.push(c);
            suppress_space = false;
        } else if !suppress_space {
            cleaned.push(' ');
            suppress_space = true;
        }
    }
    cleaned.trim_end().to_string()
}
