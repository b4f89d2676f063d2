use std::path::Path;

use clap::Args;
use serde::Serialize;

use procrastination_core::RiskPrediction;

use super::{print_json, today, CmdResult, Session};

#[derive(Args)]
pub struct PredictArgs {
    /// Deadline of the new task (YYYY-MM-DD)
    #[arg(long, required_unless_present = "open")]
    deadline: Option<String>,
    /// Difficulty 1-10
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(1..=10))]
    difficulty: u8,
    /// Predict every recorded task that is not completed yet
    #[arg(long, conflicts_with = "deadline")]
    open: bool,
}

#[derive(Serialize)]
struct TaskPrediction {
    task_id: u64,
    #[serde(flatten)]
    prediction: RiskPrediction,
}

pub fn run(args: PredictArgs, data: Option<&Path>) -> CmdResult {
    let mut session = Session::open(data)?;
    let had_metrics = session.ctx.metrics().is_some();

    if args.open {
        let predictions: Vec<TaskPrediction> = session
            .ctx
            .predict_open_tasks(today())?
            .into_iter()
            .map(|(task_id, prediction)| TaskPrediction {
                task_id,
                prediction,
            })
            .collect();
        print_json(&predictions)?;
    } else if let Some(deadline) = args.deadline {
        let prediction = session
            .ctx
            .predict_risk(&deadline, args.difficulty, today())?;
        print_json(&prediction)?;
    }

    // Scoring on demand fills the cache; keep it.
    if !had_metrics && session.ctx.metrics().is_some() {
        session.save()?;
    }
    Ok(())
}
