//! CT log list (log_list.json).
//!
//! JSON shape:
//! {
//!   "operators": [
//!     { "name": "Example Org" }           // position is the operator's index
//!   ],
//!   "logs": [
//!     {
//!       "description": "Test Log",
//!       "key": "MFkwEw...",               // base64 public key, opaque here
//!       "url": "ct.example.com/log1",     // no scheme; also the log's id
//!       "operated_by": [0]                // indices into "operators"
//!     }
//!   ]
//! }
//!
//! Any other fields in published lists (log_id, maximum_merge_delay, ...) are
//! ignored.

use crate::Result;
use crate::diagnostics;

use anyhow::{Context, anyhow};
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::io::Read;

#[derive(Debug, Clone, Deserialize)]
pub struct LogList {
    pub logs: Vec<Log>,
    pub operators: Vec<Operator>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub url: String,
    pub description: String,
    pub key: String,
    pub operated_by: Vec<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Operator {
    pub name: String,
}

impl LogList {
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .with_context(|| diagnostics::error_message("parse log list JSON"))
    }

    /// Logs whose url already starts with a scheme such as `https://`.
    ///
    /// Rendering prepends `https://` unconditionally, so these end up with a
    /// doubled scheme in the output.
    pub fn scheme_prefixed_urls(&self) -> Result<Vec<&Log>> {
        const SCHEME_RE: &str = r#"^[A-Za-z][A-Za-z0-9+.\-]*://"#;
        let re = Regex::new(SCHEME_RE)?;

        Ok(self.logs.iter().filter(|log| re.is_match(&log.url)).collect())
    }
}

impl Log {
    /// Resolve `operated_by` indices to operator names, keeping their order.
    pub fn operator_names<'a>(&self, operators: &'a [Operator]) -> Result<Vec<&'a str>> {
        self.operated_by
            .iter()
            .map(|&i| {
                operators.get(i).map(|op| op.name.as_str()).ok_or_else(|| {
                    anyhow!(diagnostics::error_message(format!(
                        "log {} is operated_by index {}, but only {} operators are listed",
                        self.url,
                        i,
                        operators.len()
                    )))
                })
            })
            .collect()
    }
}

/// Read and parse a log list. `-` reads from stdin.
pub fn load_log_list(path: &str) -> Result<LogList> {
    let text = if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .with_context(|| diagnostics::error_message("read log list from stdin"))?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| diagnostics::error_message(format!("read log list file {}", path)))?
    };

    let list = LogList::from_json_str(&text).with_context(|| format!("in {}", path))?;
    tracing::debug!(
        logs = list.logs.len(),
        operators = list.operators.len(),
        "loaded log list from {}",
        path
    );
    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "operators": [
            {"name": "Google", "id": 0},
            {"name": "Example, Inc.", "id": 1}
        ],
        "logs": [
            {
                "description": "Google 'Pilot' log",
                "key": "MFkwEwYHKoZIzj0CAQYIKoZIzj0DAQcDQgAEfahLEimAoz2t01p3uMziiLOl",
                "url": "ct.googleapis.com/pilot/",
                "maximum_merge_delay": 86400,
                "operated_by": [0]
            },
            {
                "description": "Shared log",
                "key": "ABC123",
                "url": "ct.example.com/shared",
                "operated_by": [1, 0]
            }
        ]
    }"#;

    #[test]
    fn parses_published_shape_and_ignores_extra_fields() {
        let list = LogList::from_json_str(SAMPLE).unwrap();
        assert_eq!(list.logs.len(), 2);
        assert_eq!(list.operators.len(), 2);
        assert_eq!(list.logs[0].url, "ct.googleapis.com/pilot/");
        assert_eq!(list.logs[1].operated_by, vec![1, 0]);
        assert_eq!(list.operators[1].name, "Example, Inc.");
    }

    #[test]
    fn missing_field_is_an_error() {
        let text = r#"{"logs":[{"url":"a","description":"b","operated_by":[]}],"operators":[]}"#;
        let err = LogList::from_json_str(text).unwrap_err();
        assert!(format!("{:#}", err).contains("key"), "{:#}", err);
    }

    #[test]
    fn operator_names_follow_operated_by_order() {
        let list = LogList::from_json_str(SAMPLE).unwrap();
        let names = list.logs[1].operator_names(&list.operators).unwrap();
        assert_eq!(names, vec!["Example, Inc.", "Google"]);
    }

    #[test]
    fn out_of_range_operator_index_names_the_log() {
        let list = LogList::from_json_str(SAMPLE).unwrap();
        let mut log = list.logs[0].clone();
        log.operated_by = vec![0, 7];
        let err = log.operator_names(&list.operators).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("ct.googleapis.com/pilot/"), "{}", msg);
        assert!(msg.contains("index 7"), "{}", msg);
    }

    #[test]
    fn detects_scheme_prefixed_urls_only() {
        let text = r#"{
            "operators": [{"name": "Op"}],
            "logs": [
                {"url": "https://ct.example.com/a", "description": "a", "key": "k", "operated_by": [0]},
                {"url": "ct.example.com/b", "description": "b", "key": "k", "operated_by": [0]},
                {"url": "ct.example.com/https://c", "description": "c", "key": "k", "operated_by": [0]}
            ]
        }"#;
        let list = LogList::from_json_str(text).unwrap();
        let flagged: Vec<&str> = list
            .scheme_prefixed_urls()
            .unwrap()
            .into_iter()
            .map(|log| log.description.as_str())
            .collect();
        assert_eq!(flagged, vec!["a"]);
    }

    #[test]
    fn loads_from_file_and_reports_path_on_failure() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let list = load_log_list(&path).unwrap();
        assert_eq!(list.logs.len(), 2);

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        let missing = missing.to_str().unwrap();
        let err = load_log_list(missing).unwrap_err();
        assert!(format!("{:#}", err).contains("absent.json"), "{:#}", err);
    }
}
