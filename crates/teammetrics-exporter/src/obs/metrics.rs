//! Metric family registry and Prometheus text rendering.
//!
//! Families are registered once at startup; a duplicate or malformed family
//! is a registration error and the exporter refuses to start. Every family
//! is rendered as a gauge, records grouped under their family header in
//! registration order.

use std::collections::HashMap;
use std::fmt::Write;

use teammetrics_core::error::{Result, TeamMetricsError};

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

/// `[a-zA-Z_:][a-zA-Z0-9_:]*` for metric names, no `:` for labels.
fn valid_name(name: &str, allow_colon: bool) -> bool {
    let mut chars = name.chars();
    let ok = |c: char| c.is_ascii_alphanumeric() || c == '_' || (allow_colon && c == ':');
    match chars.next() {
        Some(c) if !c.is_ascii_digit() && ok(c) => chars.all(ok),
        _ => false,
    }
}

/// Static description of one metric family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricFamily {
    pub name: &'static str,
    pub help: &'static str,
    pub labels: &'static [&'static str],
}

/// One sample: label values in the family's label order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricRecord {
    pub family: &'static str,
    pub labels: Vec<String>,
    pub value: u64,
}

impl MetricRecord {
    pub fn new(family: &MetricFamily, labels: Vec<String>, value: u64) -> Self {
        Self {
            family: family.name,
            labels,
            value,
        }
    }

    /// Label value by name, looked up through the family schema.
    pub fn label<'a>(&'a self, family: &MetricFamily, name: &str) -> Option<&'a str> {
        let idx = family.labels.iter().position(|l| *l == name)?;
        self.labels.get(idx).map(String::as_str)
    }
}

#[derive(Debug, Default)]
pub struct FamilyRegistry {
    families: Vec<MetricFamily>,
}

impl FamilyRegistry {
    pub fn register(&mut self, family: MetricFamily) -> Result<()> {
        if !valid_name(family.name, true) {
            return Err(TeamMetricsError::Registration(format!(
                "invalid metric name: {:?}",
                family.name
            )));
        }
        if let Some(bad) = family.labels.iter().find(|l| !valid_name(l, false) || l.starts_with("__")) {
            return Err(TeamMetricsError::Registration(format!(
                "{}: invalid label name: {bad:?}",
                family.name
            )));
        }
        if self.families.iter().any(|f| f.name == family.name) {
            return Err(TeamMetricsError::Registration(format!(
                "duplicate metric family: {}",
                family.name
            )));
        }
        self.families.push(family);
        Ok(())
    }

    pub fn families(&self) -> &[MetricFamily] {
        &self.families
    }

    /// Render in Prometheus text exposition format.
    /// Records of unregistered families are skipped.
    pub fn render(&self, records: &[MetricRecord]) -> String {
        let mut by_family: HashMap<&str, Vec<&MetricRecord>> = HashMap::new();
        for r in records {
            by_family.entry(r.family).or_default().push(r);
        }

        let mut out = String::new();
        for f in &self.families {
            let _ = writeln!(out, "# HELP {} {}", f.name, escape_help(f.help));
            let _ = writeln!(out, "# TYPE {} gauge", f.name);
            let Some(rows) = by_family.get(f.name) else { continue };
            for r in rows {
                let label_str = f
                    .labels
                    .iter()
                    .zip(&r.labels)
                    .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
                    .collect::<Vec<_>>()
                    .join(",");
                let _ = writeln!(out, "{}{{{}}} {}", f.name, label_str, r.value);
            }
        }
        out
    }
}
