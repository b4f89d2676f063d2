use std::path::{Path, PathBuf};

use chrono::Local;
use clap::Args;
use procrastination_core::{render_report, write_report};

use super::{CmdResult, Session};

#[derive(Args)]
pub struct ReportArgs {
    /// Directory for the report file (overrides report.output_dir)
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Print only, do not write a report file
    #[arg(long)]
    no_save: bool,
}

pub fn run(args: ReportArgs, data: Option<&Path>) -> CmdResult {
    let mut session = Session::open(data)?;
    let had_metrics = session.ctx.metrics().is_some();
    let now = Local::now().naive_local();

    let text = render_report(&mut session.ctx, now);
    println!("{text}");

    if session.config.report.save_to_file && !args.no_save {
        let dir = args
            .output_dir
            .unwrap_or_else(|| session.config.report_dir());
        let path = write_report(&dir, &session.ctx.student().nim, &text, now)?;
        println!("\nReport saved to {}", path.display());
    }

    if !had_metrics && session.ctx.metrics().is_some() {
        session.save()?;
    }
    Ok(())
}
