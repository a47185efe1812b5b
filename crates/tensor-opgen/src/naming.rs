use std::{
  collections::{BTreeSet, HashSet},
  sync::LazyLock,
};

use any_ascii::any_ascii;
use inflections::Inflect;
use proc_macro2::{Ident, Span};
use regex::Regex;

static FORBIDDEN_IDENTIFIERS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn", "for", "if", "impl", "in",
    "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "async", "await", "dyn", "try", "abstract", "become", "box", "do",
    "final", "macro", "override", "priv", "typeof", "unsized", "virtual", "yield", "gen", "self", "Self",
  ]
  .into_iter()
  .collect()
});

static RESERVED_PASCAL_CASE: LazyLock<HashSet<&str>> = LazyLock::new(|| ["Self"].into_iter().collect());

static INVALID_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").expect("bad regex"));
static MULTI_UNDERSCORE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").expect("bad regex"));
static DIGIT_TO_UPPER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d)([A-Z])").expect("bad regex"));

/// Transliterates to ASCII, replaces invalid characters with underscores,
/// collapses consecutive underscores, and trims leading/trailing underscores.
fn sanitize(input: &str) -> String {
  if input.is_empty() {
    return String::new();
  }

  let ascii = any_ascii(input);
  let replaced = INVALID_CHARS_RE.replace_all(&ascii, "_");
  let collapsed = MULTI_UNDERSCORE_RE.replace_all(&replaced, "_");

  collapsed.trim_matches('_').to_string()
}

/// Converts an argument name into a `snake_case` field name.
///
/// Keywords get a raw prefix (`where` → `r#where`). Keywords that cannot be
/// raw (`self`, `crate`, `super`) get a trailing underscore instead. A leading
/// digit is prefixed with `_`, and an empty result becomes `arg`.
pub(crate) fn to_rust_field_name(name: &str) -> String {
  let mut ident = sanitize(name).to_snake_case();

  if ident.is_empty() {
    return "arg".to_string();
  }

  if matches!(ident.as_str(), "self" | "crate" | "super") {
    ident.push('_');
    return ident;
  }

  if FORBIDDEN_IDENTIFIERS.contains(ident.as_str()) {
    return format!("r#{ident}");
  }

  if ident.starts_with(|c: char| c.is_ascii_digit()) {
    ident.insert(0, '_');
  }

  ident
}

/// Converts an operator or schema name into a `PascalCase` type name.
///
/// Digits followed by a capital start a new word (`conv2dDx` → `Conv2dDx`).
/// `Self` cannot be a raw identifier, so reserved names get a `T` suffix; a
/// leading digit is prefixed with `T`.
pub(crate) fn to_rust_type_name(name: &str) -> String {
  let sanitized = sanitize(name);
  let preprocessed = DIGIT_TO_UPPER_RE.replace_all(&sanitized, "${1}_${2}");

  let mut ident = preprocessed.to_snake_case().to_pascal_case();

  if ident.is_empty() {
    return "Unnamed".to_string();
  }

  if RESERVED_PASCAL_CASE.contains(ident.as_str()) {
    ident.push('T');
    return ident;
  }

  if ident.starts_with(|c: char| c.is_ascii_digit()) {
    ident.insert(0, 'T');
  }

  ident
}

/// Appends the smallest numeric suffix (starting at 2) that makes `base_name`
/// absent from `used_names`.
pub(crate) fn ensure_unique(base_name: &str, used_names: &BTreeSet<String>) -> String {
  if !used_names.contains(base_name) {
    return base_name.to_string();
  }
  let mut i = 2;
  loop {
    let new_name = format!("{base_name}{i}");
    if !used_names.contains(&new_name) {
      return new_name;
    }
    i += 1;
  }
}

/// Builds an [`Ident`], honouring a `r#` prefix produced by the converters
/// above.
pub(crate) fn ident(name: &str) -> Ident {
  match name.strip_prefix("r#") {
    Some(raw) => Ident::new_raw(raw, Span::call_site()),
    None => Ident::new(name, Span::call_site()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_field_names() {
    assert_eq!(to_rust_field_name("x_or_w"), "x_or_w");
    assert_eq!(to_rust_field_name("running-mean"), "running_mean");
    assert_eq!(to_rust_field_name("where"), "r#where");
    assert_eq!(to_rust_field_name("type"), "r#type");
    assert_eq!(to_rust_field_name("self"), "self_");
    assert_eq!(to_rust_field_name("crate"), "crate_");
    assert_eq!(to_rust_field_name("1x"), "_1x");
    assert_eq!(to_rust_field_name("!!"), "arg");
  }

  #[test]
  fn test_type_names() {
    assert_eq!(to_rust_type_name("conv2d"), "Conv2d");
    assert_eq!(to_rust_type_name("max_pool2d_dx"), "MaxPool2dDx");
    assert_eq!(to_rust_type_name("batch_norm_train_dxwb"), "BatchNormTrainDxwb");
    assert_eq!(to_rust_type_name("log_softmax"), "LogSoftmax");
    assert_eq!(to_rust_type_name("123op"), "T123op");
    assert_eq!(to_rust_type_name(""), "Unnamed");
  }

  #[test]
  fn test_type_names_reserved() {
    assert_eq!(to_rust_type_name("self"), "SelfT");
    assert_eq!(to_rust_type_name("copy"), "Copy");
    assert_eq!(to_rust_type_name("mod"), "Mod");
  }

  #[test]
  fn test_ensure_unique() {
    let used: BTreeSet<String> = ["FooBar", "FooBar2"].into_iter().map(String::from).collect();
    assert_eq!(ensure_unique("Relu", &used), "Relu");
    assert_eq!(ensure_unique("FooBar", &used), "FooBar3");
  }

  #[test]
  fn test_ident_raw() {
    assert_eq!(ident("r#where").to_string(), "r#where");
    assert_eq!(ident("relu").to_string(), "relu");
  }
}
