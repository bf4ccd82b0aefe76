use std::fmt::Write;

use chrono::{DateTime, Local};

use ocreport_types::{DeploymentConfigSummary, NamespaceReport, PodSummary, ReportData};

pub const DEFAULT_STYLESHEET_URL: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/css/bootstrap.min.css";

pub const DEFAULT_TITLE: &str = "OpenShift Namespace Report";

const GENERATED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const TABLE_CLASS: &str = "table table-striped table-bordered";

/// Presentation settings for a report
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportOptions {
    pub title: String,
    pub stylesheet_url: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            stylesheet_url: DEFAULT_STYLESHEET_URL.to_string(),
        }
    }
}

/// Render the report document
///
/// `generated_at` is embedded verbatim, so the same data and timestamp
/// always produce the same bytes.
pub fn render_report(
    data: &ReportData,
    options: &ReportOptions,
    generated_at: DateTime<Local>,
) -> String {
    let title = html_escape(&options.title);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <link rel="stylesheet" href="{stylesheet}">
</head>
<body>
<div class="container my-4">
  <h1 class="mb-4">{title}</h1>
  <p>Generated: {generated}</p>
{namespaces}</div></body></html>"#,
        title = title,
        stylesheet = html_escape(&options.stylesheet_url),
        generated = generated_at.format(GENERATED_FORMAT),
        namespaces = data
            .namespaces
            .iter()
            .map(render_namespace)
            .collect::<String>(),
    )
}

fn render_namespace(ns: &NamespaceReport) -> String {
    format!(
        "<h2 class=\"mt-4\">{name}</h2>\n{dcs}{pods}",
        name = html_escape(&ns.name),
        dcs = render_deployment_configs(&ns.deployment_configs),
        pods = render_pods(&ns.pods),
    )
}

fn render_deployment_configs(dcs: &[DeploymentConfigSummary]) -> String {
    let rows = dcs.iter().fold(String::new(), |mut out, dc| {
        let _ = write!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            html_escape(&dc.name),
            dc.replicas,
            html_escape(&dc.age)
        );
        out
    });
    render_table("DeploymentConfigs", ["Name", "Replicas", "Age"], &rows)
}

fn render_pods(pods: &[PodSummary]) -> String {
    let rows = pods.iter().fold(String::new(), |mut out, pod| {
        let _ = write!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            html_escape(&pod.name),
            pod.status,
            html_escape(&pod.age)
        );
        out
    });
    render_table("Pods", ["Name", "Status", "Age"], &rows)
}

fn render_table(heading: &str, columns: [&str; 3], rows: &str) -> String {
    let header: String = columns
        .iter()
        .map(|c| format!("<th>{}</th>", c))
        .collect();
    format!(
        "<h4>{heading}</h4>\n<table class=\"{TABLE_CLASS}\">\
         <thead><tr>{header}</tr></thead><tbody>{rows}</tbody></table>\n"
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
