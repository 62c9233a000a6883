//! Engine and reader configuration that downstream crates can serialize/deserialize.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Check the ascending-tag invariant when building a sequence from literal tags.
    pub verify_sorted: bool,

    /// Upper bound on the rows the materializer reserves up front from a cursor's size hint.
    pub max_reserve_rows: usize,

    /// Delimited-text reader settings.
    pub tsv: TsvConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            verify_sorted: true,
            max_reserve_rows: 1 << 20,
            tsv: TsvConfig::default(),
        }
    }
}

/// Settings for reading delimited-text records into a sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TsvConfig {
    /// Field delimiter (a single ASCII byte).
    pub delimiter: u8,

    /// Lines skipped before the first record. When `has_headers` is set the
    /// first of these names the columns.
    pub header_lines: usize,

    /// Whether the first skipped line carries column names used for
    /// deserializing named fields.
    pub has_headers: bool,

    /// Accept records whose field count differs from the header.
    pub flexible: bool,
}

impl Default for TsvConfig {
    fn default() -> Self {
        Self {
            delimiter: b'\t',
            header_lines: 1,
            has_headers: true,
            flexible: false,
        }
    }
}

impl EngineConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `TAGSEQ_VERIFY_SORTED`: `true`/`false`
    /// - `TAGSEQ_MAX_RESERVE_ROWS`: reservation cap in rows
    /// - `TAGSEQ_TSV_DELIMITER`: single-character delimiter (`\t` accepted)
    /// - `TAGSEQ_TSV_HEADER_LINES`: header lines to skip
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("TAGSEQ_VERIFY_SORTED") {
            if let Ok(v) = s.parse::<bool>() {
                cfg.verify_sorted = v;
            }
        }

        if let Ok(s) = std::env::var("TAGSEQ_MAX_RESERVE_ROWS") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.max_reserve_rows = v;
            }
        }

        if let Ok(s) = std::env::var("TAGSEQ_TSV_DELIMITER") {
            if let Ok(v) = parse_delimiter(&s) {
                cfg.tsv.delimiter = v;
            }
        }

        if let Ok(s) = std::env::var("TAGSEQ_TSV_HEADER_LINES") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.tsv.header_lines = v;
                cfg.tsv.has_headers = v > 0;
            }
        }

        cfg
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Overlay a JSON document on this config. Fields the document names
    /// replace the current ones; nested objects merge field by field.
    pub fn overlay_json(&self, s: &str) -> Result<Self> {
        let mut base = serde_json::to_value(self)?;
        let patch: serde_json::Value = serde_json::from_str(s)?;
        merge_json(&mut base, patch);
        let cfg: Self = serde_json::from_value(base)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tsv.has_headers && self.tsv.header_lines == 0 {
            return Err(Error::Config(
                "has_headers requires at least one header line".into(),
            ));
        }
        if !self.tsv.delimiter.is_ascii() {
            return Err(Error::Config(format!(
                "delimiter must be ASCII, got byte {}",
                self.tsv.delimiter
            )));
        }
        Ok(())
    }
}

fn merge_json(base: &mut serde_json::Value, patch: serde_json::Value) {
    match (base, patch) {
        (serde_json::Value::Object(base), serde_json::Value::Object(patch)) => {
            for (key, value) in patch {
                match base.get_mut(&key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Parse a delimiter given on the command line or in the environment.
pub fn parse_delimiter(s: &str) -> Result<u8> {
    match s {
        "\\t" | "tab" => Ok(b'\t'),
        _ => {
            let bytes = s.as_bytes();
            if bytes.len() == 1 && bytes[0].is_ascii() {
                Ok(bytes[0])
            } else {
                Err(Error::Config(format!(
                    "delimiter must be a single ASCII character, got '{}'",
                    s
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let cfg = EngineConfig::from_json(r#"{"verify_sorted": false}"#).unwrap();
        assert!(!cfg.verify_sorted);
        assert_eq!(cfg.max_reserve_rows, EngineConfig::default().max_reserve_rows);
        assert_eq!(cfg.tsv.delimiter, b'\t');
    }

    #[test]
    fn json_rejects_headers_without_header_lines() {
        let err = EngineConfig::from_json(r#"{"tsv": {"header_lines": 0}}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn overlay_keeps_fields_the_document_omits() {
        let base = EngineConfig {
            max_reserve_rows: 64,
            tsv: TsvConfig {
                delimiter: b',',
                ..Default::default()
            },
            ..Default::default()
        };

        let cfg = base
            .overlay_json(r#"{"verify_sorted": false, "tsv": {"flexible": true}}"#)
            .unwrap();

        assert!(!cfg.verify_sorted);
        assert_eq!(cfg.max_reserve_rows, 64);
        assert_eq!(cfg.tsv.delimiter, b',');
        assert!(cfg.tsv.flexible);
    }

    #[test]
    fn overlay_rejects_bad_documents() {
        let base = EngineConfig::default();
        assert!(matches!(base.overlay_json("{not json"), Err(Error::Config(_))));
        assert!(matches!(
            base.overlay_json(r#"{"tsv": {"header_lines": 0}}"#),
            Err(Error::Config(_))
        ));
    }

    // The only test in this crate that touches these variables, so it does
    // not race with the others.
    #[test]
    fn env_overrides_and_fallbacks() {
        const VARS: [&str; 4] = [
            "TAGSEQ_VERIFY_SORTED",
            "TAGSEQ_MAX_RESERVE_ROWS",
            "TAGSEQ_TSV_DELIMITER",
            "TAGSEQ_TSV_HEADER_LINES",
        ];

        std::env::set_var("TAGSEQ_VERIFY_SORTED", "false");
        std::env::set_var("TAGSEQ_MAX_RESERVE_ROWS", "4096");
        std::env::set_var("TAGSEQ_TSV_DELIMITER", ",");
        std::env::set_var("TAGSEQ_TSV_HEADER_LINES", "0");
        let cfg = EngineConfig::from_env();
        assert!(!cfg.verify_sorted);
        assert_eq!(cfg.max_reserve_rows, 4096);
        assert_eq!(cfg.tsv.delimiter, b',');
        assert_eq!(cfg.tsv.header_lines, 0);
        assert!(!cfg.tsv.has_headers);

        std::env::set_var("TAGSEQ_TSV_DELIMITER", "\\t");
        std::env::set_var("TAGSEQ_TSV_HEADER_LINES", "3");
        let cfg = EngineConfig::from_env();
        assert_eq!(cfg.tsv.delimiter, b'\t');
        assert_eq!(cfg.tsv.header_lines, 3);
        assert!(cfg.tsv.has_headers);

        std::env::set_var("TAGSEQ_VERIFY_SORTED", "maybe");
        std::env::set_var("TAGSEQ_MAX_RESERVE_ROWS", "lots");
        std::env::set_var("TAGSEQ_TSV_DELIMITER", "::");
        std::env::set_var("TAGSEQ_TSV_HEADER_LINES", "-1");
        assert_eq!(EngineConfig::from_env(), EngineConfig::default());

        for var in VARS {
            std::env::remove_var(var);
        }
        assert_eq!(EngineConfig::from_env(), EngineConfig::default());
    }

    #[test]
    fn delimiter_parsing() {
        assert_eq!(parse_delimiter("\\t").unwrap(), b'\t');
        assert_eq!(parse_delimiter(",").unwrap(), b',');
        assert!(parse_delimiter("::").is_err());
    }
}
