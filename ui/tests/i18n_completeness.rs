//! Translation completeness.
//!
//! - every `t!("key")` literal in `src/` exists in the fallback (en-US)
//! - every locale folder defines every fallback key, once
//!
//! The FTL parsing is a line heuristic: `id = ...` at the start of a line
//! is a message; comments, terms and attributes are skipped.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

const FTL_FILENAME: &str = "mathyou-ui.ftl";
const FALLBACK: &str = "en-US";

fn crate_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn valid_key_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '-')
}

/// Message ids in definition order, duplicates included.
fn ftl_keys(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('-'))
        .filter_map(|line| {
            let (id, _) = line.split_once('=')?;
            let id = id.trim();
            (!id.is_empty() && id.chars().all(valid_key_char)).then(|| id.to_string())
        })
        .collect()
}

fn read_locale(locale: &str) -> String {
    let path = crate_root().join("i18n").join(locale).join(FTL_FILENAME);
    fs::read_to_string(&path).unwrap_or_else(|err| panic!("cannot read {path:?}: {err}"))
}

fn locale_dirs() -> Vec<String> {
    let mut dirs: Vec<String> = fs::read_dir(crate_root().join("i18n"))
        .expect("i18n directory exists")
        .flatten()
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| name.contains('-'))
        .collect();
    dirs.sort();
    dirs
}

/// Literal first arguments of `t!(` calls under `root`.
fn referenced_keys(root: &Path) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    let mut stack = vec![root.to_path_buf()];

    while let Some(path) = stack.pop() {
        if path.is_dir() {
            for entry in fs::read_dir(&path).into_iter().flatten().flatten() {
                stack.push(entry.path());
            }
            continue;
        }
        if path.extension().and_then(|s| s.to_str()) != Some("rs") {
            continue;
        }
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };
        for (index, needle) in content.match_indices("t!(\"") {
            let rest = &content[index + needle.len()..];
            if let Some(end) = rest.find('"') {
                let key = &rest[..end];
                if !key.is_empty() && key.chars().all(valid_key_char) {
                    found.insert(key.to_string());
                }
            }
        }
    }
    found
}

#[test]
fn fallback_defines_every_referenced_key() {
    let fallback: BTreeSet<String> = ftl_keys(&read_locale(FALLBACK)).into_iter().collect();
    let referenced = referenced_keys(&crate_root().join("src"));
    assert!(!referenced.is_empty(), "no t!() calls found under src/");

    let missing: Vec<_> = referenced.difference(&fallback).cloned().collect();
    assert!(
        missing.is_empty(),
        "keys used in source but missing from {FALLBACK}:\n  {}",
        missing.join("\n  ")
    );
}

#[test]
fn every_locale_has_every_fallback_key() {
    let fallback: BTreeSet<String> = ftl_keys(&read_locale(FALLBACK)).into_iter().collect();
    let locales = locale_dirs();
    assert!(locales.iter().any(|l| l == "es-ES"), "es-ES locale missing");

    let mut failures: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for locale in locales.iter().filter(|l| l.as_str() != FALLBACK) {
        let keys: BTreeSet<String> = ftl_keys(&read_locale(locale)).into_iter().collect();
        let missing: Vec<_> = fallback.difference(&keys).cloned().collect();
        if !missing.is_empty() {
            failures.insert(locale.clone(), missing);
        }
    }

    assert!(
        failures.is_empty(),
        "locales missing translations: {failures:#?}\nHint: copy the keys from {FALLBACK}, then translate."
    );
}

#[test]
fn no_locale_defines_a_key_twice() {
    for locale in locale_dirs() {
        let mut seen = BTreeSet::new();
        let dups: Vec<_> = ftl_keys(&read_locale(&locale))
            .into_iter()
            .filter(|key| !seen.insert(key.clone()))
            .collect();
        assert!(dups.is_empty(), "{locale} defines {dups:?} more than once");
    }
}
