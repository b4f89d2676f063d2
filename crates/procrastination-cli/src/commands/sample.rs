use std::path::Path;

use clap::Args;
use procrastination_core::SampleGenerator;

use super::{today, CmdResult, Session};

#[derive(Args)]
pub struct SampleArgs {
    /// RNG seed (default: sample.seed from config)
    #[arg(long, conflicts_with = "random")]
    seed: Option<u64>,
    /// Use a random seed
    #[arg(long)]
    random: bool,
    /// Number of activities (default: sample.activity_count)
    #[arg(long)]
    activities: Option<usize>,
    /// Number of tasks (default: sample.task_count)
    #[arg(long)]
    tasks: Option<usize>,
}

/// Replace all records with generated sample data.
pub fn run(args: SampleArgs, data: Option<&Path>) -> CmdResult {
    let mut session = Session::open(data)?;
    let sample = &session.config.sample;

    let seed = if args.random {
        None
    } else {
        Some(args.seed.unwrap_or(sample.seed))
    };
    let generator = SampleGenerator::new(seed).with_counts(
        args.activities.unwrap_or(sample.activity_count),
        args.tasks.unwrap_or(sample.task_count),
    );

    let store = generator.generate(today());
    let (activities, tasks) = (store.list_activities().len(), store.list_tasks().len());
    session.ctx.replace_records(store);
    session.save()?;

    println!("Sample data generated:");
    println!("  - {activities} activities");
    println!("  - {tasks} tasks");
    Ok(())
}
