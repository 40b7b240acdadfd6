//! Prometheus text exposition format (0.0.4).

use std::fmt::Write;

use crate::model::{LabelSet, MetricType};

/// `Content-Type` of a text-format scrape response.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Escape a label value (`\`, `"`, newline).
pub fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

/// Render a sample value. Finite values use the shortest round-trip form.
pub fn format_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v == f64::INFINITY {
        "+Inf".to_string()
    } else if v == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        v.to_string()
    }
}

/// `# HELP` and `# TYPE` lines for one family.
pub fn write_family_header(out: &mut String, name: &str, help: &str, ty: MetricType) {
    let _ = writeln!(out, "# HELP {} {}", name, escape_help(help));
    let _ = writeln!(out, "# TYPE {} {}", name, ty.as_str());
}

/// One `name{k="v",...} value` line; braces are omitted for empty label sets.
pub fn write_sample(out: &mut String, name: &str, labels: &LabelSet, value: f64) {
    if labels.is_empty() {
        let _ = writeln!(out, "{} {}", name, format_value(value));
        return;
    }
    let label_str = labels
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",");
    let _ = writeln!(out, "{}{{{}}} {}", name, label_str, format_value(value));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_with_and_without_labels() {
        let mut out = String::new();
        write_sample(&mut out, "up", &LabelSet::default(), 1.0);
        write_sample(
            &mut out,
            "queue_depth",
            &LabelSet::new([("queue", "a\"b"), ("env", "prod")]),
            10.5,
        );
        assert_eq!(
            out,
            "up 1\nqueue_depth{env=\"prod\",queue=\"a\\\"b\"} 10.5\n"
        );
    }

    #[test]
    fn special_values() {
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(f64::INFINITY), "+Inf");
        assert_eq!(format_value(f64::NEG_INFINITY), "-Inf");
        assert_eq!(format_value(f64::NAN), "NaN");
    }

    #[test]
    fn header_lines() {
        let mut out = String::new();
        write_family_header(&mut out, "req_total", "req_total", MetricType::Counter);
        assert_eq!(out, "# HELP req_total req_total\n# TYPE req_total counter\n");
    }
}
