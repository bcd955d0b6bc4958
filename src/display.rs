// src/display.rs
//! Plain-text rendering of a [`View`] for the terminal.

use std::fmt::Write;

use crate::session::{Panel, ResultTab, Severity, View};
use crate::types::ResultReport;

pub fn render_text(view: &View) -> String {
    let mut out = String::new();

    if let Some(notification) = &view.notification {
        let icon = match notification.severity {
            Severity::Success => "✅",
            Severity::Warning => "⚠️ ",
            Severity::Error => "❌",
        };
        let _ = writeln!(out, "{} {}", icon, notification.message);
        out.push('\n');
    }

    match &view.panel {
        Panel::Upload { staged_file } => {
            let _ = writeln!(out, "📄 Upload your resume");
            match staged_file {
                Some(name) => {
                    let _ = writeln!(out, "   Selected: {}", name);
                }
                None => {
                    let _ = writeln!(out, "   Run `jobfit upload <file>` to save a resume.");
                }
            }
        }
        Panel::Match => {
            if view.loading {
                let _ = writeln!(out, "⏳ Analyzing your resume against the job description...");
            } else {
                let _ = writeln!(out, "🎯 Resume saved. Ready to match.");
                let _ = writeln!(
                    out,
                    "   Run `jobfit match --url <job page>` or pipe the job description into `jobfit match`."
                );
            }
        }
        Panel::Results { report, tabs } => {
            let _ = writeln!(out, "ATS Match Score: {}/100", report.score);
            let _ = writeln!(out, "{}", report.explanation);
            out.push('\n');

            let header = tabs
                .iter()
                .map(|t| {
                    if t.active {
                        format!("[{}]", t.tab.title())
                    } else {
                        t.tab.title().to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(" | ");
            let _ = writeln!(out, "{}", header);
            let _ = writeln!(out, "{}", "-".repeat(header.chars().count()));

            if let Some(active) = view.active_tab() {
                render_tab(&mut out, report, active);
            }
        }
    }

    out
}

fn render_tab(out: &mut String, report: &ResultReport, tab: ResultTab) {
    match tab {
        ResultTab::Strengths => bullet_list(out, &report.strengths),
        ResultTab::Keywords => {
            let _ = writeln!(out, "Matched: {}", report.matched_keywords.join(", "));
            let _ = writeln!(out, "Missing: {}", report.missing_keywords.join(", "));
        }
        ResultTab::Gaps => bullet_list(out, &report.gaps),
        ResultTab::Suggestions => bullet_list(out, &report.suggestions),
        ResultTab::Verdict => {
            let _ = writeln!(out, "{}", report.verdict);
        }
    }
}

fn bullet_list(out: &mut String, items: &[String]) {
    if items.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for item in items {
        let _ = writeln!(out, "  • {}", item);
    }
}
