//! Task management commands for CLI.

use std::path::Path;

use clap::Subcommand;
use procrastination_core::{parse_date, Task, TaskStatus};

use super::{print_json, today, CmdResult, Session};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Record a new task
    Add {
        /// Course name
        #[arg(long)]
        course: String,
        /// Task description
        #[arg(long)]
        description: String,
        /// Deadline (YYYY-MM-DD)
        #[arg(long)]
        deadline: String,
        /// Date the task was assigned (YYYY-MM-DD, default: today)
        #[arg(long)]
        assigned: Option<String>,
        /// Status: pending, in_progress, done or late (default: pending)
        #[arg(long, default_value = "pending")]
        status: String,
        /// Completion date (YYYY-MM-DD), required for done tasks
        #[arg(long)]
        completed: Option<String>,
        /// Difficulty 1-10 (default: 3)
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=10))]
        difficulty: u8,
        /// Estimated hours (default: 5)
        #[arg(long, default_value_t = 5.0)]
        estimate: f64,
        /// Hours actually spent
        #[arg(long)]
        actual: Option<f64>,
    },
    /// List tasks
    List {
        /// Filter by status
        #[arg(long)]
        status: Option<String>,
    },
}

pub fn run(action: TaskAction, data: Option<&Path>) -> CmdResult {
    let mut session = Session::open(data)?;

    match action {
        TaskAction::Add {
            course,
            description,
            deadline,
            assigned,
            status,
            completed,
            difficulty,
            estimate,
            actual,
        } => {
            let status: TaskStatus = status.parse()?;
            let deadline = parse_date(&deadline)?;
            let assigned = match assigned {
                Some(date) => parse_date(&date)?,
                None => today(),
            };

            let id = session.ctx.store().next_task_id()?;
            let mut task = Task::new(id, course, description, deadline, assigned)
                .with_status(status)
                .with_difficulty(difficulty)
                .with_estimated_hours(estimate);
            if let Some(completed) = completed {
                task = task.with_date_completed(parse_date(&completed)?);
            }
            if let Some(actual) = actual {
                task = task.with_actual_hours(actual);
            }

            session.ctx.add_task(task.clone())?;
            session.save()?;
            println!("Task added: {id}");
            print_json(&task)?;
        }
        TaskAction::List { status } => {
            let status: Option<TaskStatus> = status.map(|s| s.parse()).transpose()?;
            let filtered: Vec<&Task> = session
                .ctx
                .store()
                .list_tasks()
                .iter()
                .filter(|t| status.map_or(true, |s| t.status == s))
                .collect();
            print_json(&filtered)?;
        }
    }
    Ok(())
}
