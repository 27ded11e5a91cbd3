use anyhow::Result;
use guext_core::RunReport;
use serde_json::json;
use std::io::{self, Write};
use std::path::Path;

pub(crate) fn print_summary(report: &RunReport) {
    for root in &report.roots {
        println!(
            "  {}: {} file(s), {} directive(s) -> {} ({} line(s))",
            root.root.display(),
            root.files,
            root.directives,
            root.aggregate.path.display(),
            root.aggregate.lines
        );
    }
    println!(
        "Moved {} directive(s) from {} file(s) in {} project(s) ({} ms)",
        report.total_directives(),
        report.total_files(),
        report.roots.len(),
        report.time_ms
    );
    if report.workspace.isolated {
        println!(
            "Results are in the isolated copy: {}",
            report.workspace.path.display()
        );
    }
}

pub(crate) fn print_json_report(report: &RunReport) -> Result<()> {
    print_stdout(&json!({ "status": "ok", "report": report }))
}

pub(crate) fn print_json_no_projects(target: &Path) -> Result<()> {
    print_stdout(&json!({ "status": "no_project_roots", "target": target }))
}

pub(crate) fn print_json_error(err: &anyhow::Error) -> Result<()> {
    print_stdout(&json!({ "status": "error", "message": format!("{err:#}") }))
}

fn print_stdout(value: &serde_json::Value) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
