//! Identifier derivation: JSON keys → Rust field identifiers and type names.
use once_cell::sync::Lazy;
use regex::Regex;

// ------------------------------ Inflection -------------------------------- //

/// Words that are their own singular.
const UNCOUNTABLE: &[&str] = &[
    "equipment", "information", "rice", "money", "species", "series", "fish", "sheep",
    "jeans", "police", "news", "metadata",
];

/// (plural, singular), matched against the trailing word.
const IRREGULAR: &[(&str, &str)] = &[
    ("people", "person"),
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("sexes", "sex"),
    ("moves", "move"),
    ("zombies", "zombie"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("geese", "goose"),
];

/// Ordered suffix rules; first match wins, so specific rules come first.
static SINGULAR_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"(?i)(database)s$", "${1}"),
        (r"(?i)(quiz)zes$", "${1}"),
        (r"(?i)(matr)ices$", "${1}ix"),
        (r"(?i)(vert|ind)ices$", "${1}ex"),
        (r"(?i)^(ox)en", "${1}"),
        (r"(?i)(alias|status)(es)?$", "${1}"),
        (r"(?i)(octop|vir)(us|i)$", "${1}us"),
        (r"(?i)^(a)x[ie]s$", "${1}xis"),
        (r"(?i)(cris|test)(is|es)$", "${1}is"),
        (r"(?i)(shoe)s$", "${1}"),
        (r"(?i)(o)es$", "${1}"),
        (r"(?i)(bus)(es)?$", "${1}"),
        (r"(?i)^(m|l)ice$", "${1}ouse"),
        (r"(?i)(x|ch|ss|sh)es$", "${1}"),
        (r"(?i)(m)ovies$", "${1}ovie"),
        (r"(?i)(s)eries$", "${1}eries"),
        (r"(?i)([^aeiouy]|qu)ies$", "${1}y"),
        (r"(?i)([lr])ves$", "${1}f"),
        (r"(?i)(tive)s$", "${1}"),
        (r"(?i)(hive)s$", "${1}"),
        (r"(?i)([^f])ves$", "${1}fe"),
        (r"(?i)(^analy)(sis|ses)$", "${1}sis"),
        (r"(?i)((a)naly|(b)a|(d)iagno|(p)arenthe|(p)rogno|(s)ynop|(t)he)(sis|ses)$", "${1}sis"),
        (r"(?i)([ti])a$", "${1}um"),
        (r"(?i)(n)ews$", "${1}ews"),
        (r"(?i)(ss)$", "${1}"),
        (r"(?i)(us)$", "${1}"),
        (r"(?i)s$", ""),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), replacement))
    .collect()
});

/// Singular form of a (possibly camelCase or snake_case) key. Only the
/// trailing word is inflected: `bidPrices` → `bidPrice`.
pub fn singularize(key: &str) -> String {
    let start = last_word_start(key);
    let (head, word) = key.split_at(start);
    let lower = word.to_lowercase();

    if word.is_empty() || UNCOUNTABLE.contains(&lower.as_str()) {
        return key.to_string();
    }
    if let Some((_, singular)) = IRREGULAR.iter().find(|(plural, _)| *plural == lower) {
        return format!("{head}{}", match_case(word, singular));
    }
    for (rule, replacement) in SINGULAR_RULES.iter() {
        if rule.is_match(word) {
            return format!("{head}{}", rule.replace(word, *replacement));
        }
    }
    key.to_string()
}

// Byte offset where the last word of `key` begins.
fn last_word_start(key: &str) -> usize {
    let mut start = 0;
    let mut prev: Option<char> = None;
    for (i, ch) in key.char_indices() {
        match prev {
            Some(p) if !p.is_alphanumeric() && ch.is_alphanumeric() => start = i,
            Some(p) if p.is_lowercase() && ch.is_uppercase() => start = i,
            _ => {}
        }
        prev = Some(ch);
    }
    start
}

fn match_case(original: &str, replacement: &str) -> String {
    if original.chars().next().is_some_and(char::is_uppercase) {
        capitalize(replacement)
    } else {
        replacement.to_string()
    }
}

// ------------------------------ Casing ------------------------------------ //

static ACRONYM_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").unwrap());
static WORD_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z\d])([A-Z])").unwrap());
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Lowercase words of `key`, split on case changes and any non-alphanumeric run.
/// `HTTPResponse-code` → `["http", "response", "code"]`.
pub fn words(key: &str) -> Vec<String> {
    let split = ACRONYM_BOUNDARY.replace_all(key, "${1}_${2}");
    let split = WORD_BOUNDARY.replace_all(&split, "${1}_${2}");
    let lower = split.to_lowercase();
    NON_WORD
        .split(&lower)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ------------------------------ Identifiers ------------------------------- //

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "static", "struct", "trait", "true", "type", "unsafe",
    "use", "where", "while", "abstract", "become", "box", "do", "final", "macro", "override",
    "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Keywords that cannot be written as raw identifiers.
const NON_RAW_KEYWORDS: &[&str] = &["crate", "self", "super", "Self"];

/// Names the generated code already refers to, so a record must not take them.
const RESERVED_TYPE_NAMES: &[&str] = &[
    "String", "Vec", "Option", "Box", "Result", "Value", "Self", "Serialize", "Deserialize",
    "Debug",
];

/// snake_case field identifier for a JSON key: `bidPrice` → `bid_price`,
/// `type` → `r#type`, `1d` → `_1d`.
pub fn field_ident(key: &str) -> String {
    let snake = words(key).join("_");
    if snake.is_empty() {
        return "field".to_string();
    }
    if snake.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("_{snake}");
    }
    if NON_RAW_KEYWORDS.contains(&snake.as_str()) {
        return format!("{snake}_");
    }
    if KEYWORDS.contains(&snake.as_str()) {
        return format!("r#{snake}");
    }
    snake
}

/// Type name for a JSON key: singular, one capital per word.
/// `asks` → `Ask`, `bid_prices` → `BidPrice`.
pub fn type_name(key: &str) -> String {
    let name: String = words(&singularize(key)).iter().map(|w| capitalize(w)).collect();
    if name.is_empty() {
        return "Type".to_string();
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("Type{name}");
    }
    if RESERVED_TYPE_NAMES.contains(&name.as_str()) {
        return format!("{name}Type");
    }
    name
}

/// Type name for a user-supplied root name. Valid identifiers are kept as
/// written (no singularizing); anything else is recased like a key.
pub fn root_type_name(raw: &str) -> String {
    let is_ident = raw.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
        && raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && raw != "_";
    if is_ident && !KEYWORDS.contains(&raw) && !NON_RAW_KEYWORDS.contains(&raw) {
        return raw.to_string();
    }
    let name: String = words(raw).iter().map(|w| capitalize(w)).collect();
    if name.is_empty() {
        return "Type".to_string();
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("Type{name}");
    }
    if NON_RAW_KEYWORDS.contains(&name.as_str()) {
        return format!("{name}Type");
    }
    name
}

/// The key serde's `rename_all = "camelCase"` derives for a snake_case field.
pub fn serde_camel_case(ident: &str) -> String {
    let ident = ident.strip_prefix("r#").unwrap_or(ident);
    let mut pascal = String::with_capacity(ident.len());
    let mut capitalize_next = true;
    for ch in ident.chars() {
        if ch == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            pascal.extend(ch.to_uppercase());
            capitalize_next = false;
        } else {
            pascal.push(ch);
        }
    }
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
