//! Host-page configuration.
//!
//! The server-rendered page describes the discipline on the mount element:
//!
//! ```html
//! <div id="main"
//!      data-discipline-id="linear-algebra"
//!      data-discipline-name="Linear Algebra"
//!      data-concepts='[{"id":"dot-product","label":"Dot Product"}]'
//!      data-problems='{"dot-product":["dot_1","dot_2"]}'
//!      data-authenticated="false"></div>
//! ```
//!
//! Natively the same keys come from `MATHYOU_*` environment variables
//! (`data-discipline-id` becomes `MATHYOU_DISCIPLINE_ID`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::navigation::ConceptId;
use super::platform;

const DEFAULT_NATIVE_API_BASE: &str = "http://127.0.0.1:5000";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("mount element `{0}` not found")]
    MountMissing(String),
    #[error("required attribute `{0}` is missing")]
    Missing(&'static str),
    #[error("attribute `{attr}` is not valid JSON: {source}")]
    Json {
        attr: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// One entry of the concept navigation menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptLink {
    pub id: ConceptId,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HostConfig {
    pub discipline_id: String,
    pub discipline_name: String,
    pub concepts: Vec<ConceptLink>,
    /// Practice question ids per concept identifier.
    pub problems: BTreeMap<String, Vec<String>>,
    pub authenticated: bool,
}

impl HostConfig {
    /// Builds the configuration from an attribute lookup (`data-*` names).
    pub fn from_attributes(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let discipline_id = get("data-discipline-id")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("data-discipline-id"))?;
        let discipline_name = get("data-discipline-name")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| discipline_id.clone());
        let concepts = parse_json_attr(&get, "data-concepts")?.unwrap_or_default();
        let problems = parse_json_attr(&get, "data-problems")?.unwrap_or_default();
        let authenticated = get("data-authenticated")
            .map(|v| matches!(v.trim(), "true" | "1" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            discipline_id,
            discipline_name,
            concepts,
            problems,
            authenticated,
        })
    }

    /// Reads the configuration for the element with DOM id `mount_id`.
    pub fn from_mount(mount_id: &str) -> Result<Self, ConfigError> {
        #[cfg(target_arch = "wasm32")]
        {
            let element = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id(mount_id))
                .ok_or_else(|| ConfigError::MountMissing(mount_id.to_string()))?;
            Self::from_attributes(|name| element.get_attribute(name))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            tracing::debug!(mount_id, "reading host config from environment");
            Self::from_attributes(|name| std::env::var(env_key(name)).ok())
        }
    }
}

fn parse_json_attr<T: for<'de> Deserialize<'de>>(
    get: &impl Fn(&str) -> Option<String>,
    attr: &'static str,
) -> Result<Option<T>, ConfigError> {
    match get(attr) {
        Some(raw) if !raw.trim().is_empty() => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| ConfigError::Json { attr, source }),
        _ => Ok(None),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn env_key(attr: &str) -> String {
    let name = attr.strip_prefix("data-").unwrap_or(attr);
    format!("MATHYOU_{}", name.replace('-', "_").to_ascii_uppercase())
}

/// Where the backend lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    /// Same origin in the browser; `MATHYOU_API_BASE` (or a local default)
    /// elsewhere.
    pub fn detect() -> Self {
        let base_url = platform::page_origin()
            .or_else(|| std::env::var("MATHYOU_API_BASE").ok())
            .unwrap_or_else(|| DEFAULT_NATIVE_API_BASE.to_string());
        tracing::info!(platform = ?platform::Platform::current(), %base_url, "backend location");
        Self { base_url }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn attrs(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn parses_full_mount_attributes() {
        let config = HostConfig::from_attributes(attrs(&[
            ("data-discipline-id", "linear-algebra"),
            ("data-discipline-name", "Linear Algebra"),
            (
                "data-concepts",
                r#"[{"id":"dot-product","label":"Dot Product"}]"#,
            ),
            ("data-problems", r#"{"dot-product":["dot_1","dot_2"]}"#),
            ("data-authenticated", "true"),
        ]))
        .unwrap();

        assert_eq!(config.discipline_id, "linear-algebra");
        assert_eq!(config.discipline_name, "Linear Algebra");
        assert_eq!(config.concepts[0].id, ConceptId::new("dot-product"));
        assert_eq!(config.problems["dot-product"], vec!["dot_1", "dot_2"]);
        assert!(config.authenticated);
    }

    #[test]
    fn name_falls_back_to_id_and_lists_default_empty() {
        let config =
            HostConfig::from_attributes(attrs(&[("data-discipline-id", "trigonometry")])).unwrap();
        assert_eq!(config.discipline_name, "trigonometry");
        assert!(config.concepts.is_empty());
        assert!(config.problems.is_empty());
        assert!(!config.authenticated);
    }

    #[test]
    fn missing_discipline_is_an_error() {
        let err = HostConfig::from_attributes(attrs(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("data-discipline-id")));
    }

    #[test]
    fn malformed_json_names_the_attribute() {
        let err = HostConfig::from_attributes(attrs(&[
            ("data-discipline-id", "calculus"),
            ("data-problems", "{not json"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Json { attr: "data-problems", .. }));
    }

    #[test]
    fn env_keys_are_upper_snake() {
        assert_eq!(env_key("data-discipline-id"), "MATHYOU_DISCIPLINE_ID");
    }
}
