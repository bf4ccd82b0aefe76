//! Host-invoked mode
//!
//! Arguments arrive as a JSON object in an environment variable and the
//! outcome is a single JSON object on stdout, following the result shape
//! Ansible expects from a module.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::output::{output_target, write_report, written_message};
use crate::pipeline::split_namespaces;

pub const DEFAULT_ARGS_ENV: &str = "ANSIBLE_MODULE_ARGS";

/// Arguments accepted in host-invoked mode
///
/// Keys other than `namespaces` and `output` are ignored, so the host is
/// free to pass its own bookkeeping keys alongside.
#[derive(Debug, Default, Deserialize)]
pub struct ModuleArgs {
    #[serde(default)]
    pub namespaces: Option<NamespaceArg>,

    #[serde(default)]
    pub output: Option<PathBuf>,
}

/// Namespace filter given either as a list or as a comma-separated string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum NamespaceArg {
    List(Vec<String>),
    Csv(String),
}

impl ModuleArgs {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("Module arguments are not a valid JSON object")
    }

    /// Read arguments from the environment variable `var`
    pub fn from_env(var: &str) -> Result<Self> {
        let raw = env::var(var)
            .with_context(|| format!("Module arguments variable {} is not set", var))?;
        Self::from_json(&raw)
    }

    /// The namespace filter, or `None` when every namespace is wanted
    pub fn namespace_filter(&self) -> Option<Vec<String>> {
        let namespaces = match self.namespaces.as_ref()? {
            NamespaceArg::List(list) => list.clone(),
            NamespaceArg::Csv(csv) => split_namespaces(csv),
        };
        (!namespaces.is_empty()).then_some(namespaces)
    }
}

/// Result object printed on stdout
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct ModuleResult {
    pub changed: bool,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub failed: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<String>,
}

impl ModuleResult {
    pub fn written(path: &Path) -> Self {
        Self {
            changed: true,
            msg: Some(written_message(path)),
            ..Self::default()
        }
    }

    pub fn report(html: String) -> Self {
        Self {
            changed: false,
            report: Some(html),
            ..Self::default()
        }
    }

    pub fn failed(err: &anyhow::Error) -> Self {
        Self {
            failed: true,
            msg: Some(format!("{:#}", err)),
            ..Self::default()
        }
    }

    pub fn to_json(&self) -> String {
        // A struct of bools and strings always serializes
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"failed": true, "msg": "failed to serialize module result"}"#.to_string()
        })
    }
}

/// Deliver the rendered report: to `output` when given, inline otherwise
pub fn finish(html: String, output: Option<&Path>) -> Result<ModuleResult> {
    match output_target(output) {
        Some(path) => {
            write_report(path, &html)?;
            Ok(ModuleResult::written(path))
        }
        None => Ok(ModuleResult::report(html)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const HTML: &str = "<!DOCTYPE html>\n<html lang=\"en\"><body></body></html>";

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("ocreport-{}-{}.html", std::process::id(), name))
    }

    #[test]
    fn test_args_list() {
        let args =
            ModuleArgs::from_json(r#"{"namespaces": ["dev", "prod"], "output": "/tmp/r.html"}"#)
                .unwrap();
        assert_eq!(
            args.namespace_filter(),
            Some(vec!["dev".to_string(), "prod".to_string()])
        );
        assert_eq!(args.output, Some(PathBuf::from("/tmp/r.html")));
    }

    #[test]
    fn test_args_csv_and_extra_keys() {
        let args = ModuleArgs::from_json(
            r#"{"namespaces": "dev, prod", "_ansible_check_mode": false}"#,
        )
        .unwrap();
        assert_eq!(
            args.namespace_filter(),
            Some(vec!["dev".to_string(), "prod".to_string()])
        );
        assert!(args.output.is_none());
    }

    #[test]
    fn test_args_empty_means_all() {
        assert!(ModuleArgs::from_json("{}").unwrap().namespace_filter().is_none());
        assert!(
            ModuleArgs::from_json(r#"{"namespaces": [], "output": null}"#)
                .unwrap()
                .namespace_filter()
                .is_none()
        );
    }

    #[test]
    fn test_args_invalid_json() {
        assert!(ModuleArgs::from_json("namespaces=dev").is_err());
        assert!(ModuleArgs::from_env("OCREPORT_TEST_UNSET_MODULE_ARGS").is_err());
    }

    #[test]
    fn test_inline_report_result() {
        let result = finish(HTML.to_string(), None).unwrap();
        assert!(!result.changed);
        let report = result.report.as_deref().unwrap();
        assert!(report.starts_with("<!DOCTYPE html>"));
        assert!(report.ends_with("</html>"));

        let json: serde_json::Value = serde_json::from_str(&result.to_json()).unwrap();
        assert_eq!(json["changed"], false);
        assert_eq!(json["report"], HTML);
        assert!(json.get("msg").is_none());
        assert!(json.get("failed").is_none());
    }

    #[test]
    fn test_empty_output_is_inline() {
        let args = ModuleArgs::from_json(r#"{"output": ""}"#).unwrap();
        let result = finish(HTML.to_string(), args.output.as_deref()).unwrap();

        assert!(!result.changed);
        assert!(!result.failed);
        assert_eq!(result.report.as_deref(), Some(HTML));
        assert!(result.msg.is_none());
    }

    #[test]
    fn test_written_report_result() {
        let path = temp_path("written");
        let result = finish(HTML.to_string(), Some(path.as_path())).unwrap();

        assert!(result.changed);
        assert_eq!(result.msg, Some(format!("Report written to {}", path.display())));
        assert!(result.report.is_none());
        assert_eq!(fs::read_to_string(&path).unwrap(), HTML);

        let json: serde_json::Value = serde_json::from_str(&result.to_json()).unwrap();
        assert_eq!(json["changed"], true);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_unwritable_output_is_error() {
        let path = Path::new("/nonexistent-dir/ocreport/report.html");
        assert!(finish(HTML.to_string(), Some(path)).is_err());
    }

    #[test]
    fn test_failed_result() {
        let err = anyhow::anyhow!("exit status: 1").context("Failed to list namespaces");
        let json: serde_json::Value =
            serde_json::from_str(&ModuleResult::failed(&err).to_json()).unwrap();
        assert_eq!(json["failed"], true);
        assert_eq!(json["changed"], false);
        assert_eq!(json["msg"], "Failed to list namespaces: exit status: 1");
    }
}
