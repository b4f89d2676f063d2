use std::path::Path;

use clap::Subcommand;

use super::{print_json, CmdResult, Session};

#[derive(Subcommand)]
pub enum AnalyzeAction {
    /// Time spent per category and productivity per period of the day
    Time,
    /// Compute the procrastination index and store it
    Score,
    /// Chart data: daily productivity, task status, hours per period
    Overview,
}

pub fn run(action: AnalyzeAction, data: Option<&Path>) -> CmdResult {
    let mut session = Session::open(data)?;

    match action {
        AnalyzeAction::Time => print_json(&session.ctx.analyze_time()?)?,
        AnalyzeAction::Score => {
            let metrics = session.ctx.recompute()?.clone();
            session.save()?;
            print_json(&metrics)?;
        }
        AnalyzeAction::Overview => print_json(&session.ctx.overview()?)?,
    }
    Ok(())
}
