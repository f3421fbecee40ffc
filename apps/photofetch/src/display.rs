//! Output rendering and formatting

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use photofetch_harness::{CaseOutcome, HarnessReport};
use std::io;
use std::time::Duration;

/// Output renderer for harness reports
#[derive(Clone, Debug)]
pub struct OutputRenderer {
    /// Use JSON output format
    json_output: bool,
    colors: bool,
}

impl OutputRenderer {
    pub fn new(json_output: bool, colors: bool) -> Self {
        Self {
            json_output,
            colors,
        }
    }

    /// Render a finished run
    pub fn render_report(&self, report: &HarnessReport) -> io::Result<()> {
        if self.json_output {
            let json = serde_json::to_string_pretty(&report_to_json(report))
                .map_err(io::Error::other)?;
            println!("{json}");
        } else {
            println!("{}", self.report_table(report));
            println!(
                "{} passed, {} failed in {}",
                report.passed(),
                report.failed(),
                format_duration(report.elapsed)
            );
        }
        Ok(())
    }

    fn report_table(&self, report: &HarnessReport) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if !self.colors {
            table.force_no_tty();
        }

        table.set_header(vec![
            Cell::new("Case").add_attribute(Attribute::Bold),
            Cell::new("Result").add_attribute(Attribute::Bold),
            Cell::new("Time").add_attribute(Attribute::Bold),
            Cell::new("Details").add_attribute(Attribute::Bold),
        ]);

        for result in &report.results {
            let (status, details) = match &result.outcome {
                CaseOutcome::Passed { .. } => (Cell::new("PASS").fg(Color::Green), String::new()),
                CaseOutcome::Failed { error, .. } => {
                    let label = if error.is_timeout() { "TIMEOUT" } else { "FAIL" };
                    (Cell::new(label).fg(Color::Red), error.to_string())
                }
            };

            table.add_row(vec![
                Cell::new(&result.case.name),
                status,
                Cell::new(format_duration(result.outcome.elapsed())),
                Cell::new(details),
            ]);
        }

        table
    }
}

fn report_to_json(report: &HarnessReport) -> serde_json::Value {
    let cases: Vec<_> = report
        .results
        .iter()
        .map(|result| {
            let error = result.outcome.error();
            serde_json::json!({
                "name": result.case.name,
                "url": result.case.url,
                "passed": result.outcome.is_passed(),
                "timed_out": error.is_some_and(photofetch_errors::HarnessError::is_timeout),
                "elapsed_ms": millis(result.outcome.elapsed()),
                "error": error.map(ToString::to_string),
            })
        })
        .collect();

    serde_json::json!({
        "passed": report.passed(),
        "failed": report.failed(),
        "elapsed_ms": millis(report.elapsed),
        "cases": cases,
    })
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn format_duration(duration: Duration) -> String {
    if duration < Duration::from_secs(1) {
        format!("{}ms", duration.as_millis())
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}
