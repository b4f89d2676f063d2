//! Activity logging commands for CLI.

use std::path::Path;

use clap::Subcommand;
use procrastination_core::records::parse_start_time;
use procrastination_core::{parse_date, Activity, ActivityCategory};

use super::{print_json, today, CmdResult, Session};

#[derive(Subcommand)]
pub enum ActivityAction {
    /// Log a new activity
    Add {
        /// Category: study, assignment, rest, entertainment or other
        #[arg(long)]
        category: String,
        /// What was done
        #[arg(long)]
        description: String,
        /// Duration in hours
        #[arg(long)]
        hours: f64,
        /// Date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Start time (HH:MM)
        #[arg(long)]
        start: String,
        /// Difficulty 1-10 (default: 1)
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=10))]
        difficulty: u8,
        /// Productivity 1-10 (default: 3)
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=10))]
        productivity: u8,
        /// Deadline this activity works towards (YYYY-MM-DD)
        #[arg(long)]
        deadline: Option<String>,
    },
    /// List logged activities
    List {
        /// Filter by category
        #[arg(long)]
        category: Option<String>,
    },
}

pub fn run(action: ActivityAction, data: Option<&Path>) -> CmdResult {
    let mut session = Session::open(data)?;

    match action {
        ActivityAction::Add {
            category,
            description,
            hours,
            date,
            start,
            difficulty,
            productivity,
            deadline,
        } => {
            let category: ActivityCategory = category.parse()?;
            let date = match date {
                Some(date) => parse_date(&date)?,
                None => today(),
            };
            parse_start_time(&start)?;

            let id = session.ctx.store().next_activity_id()?;
            let mut activity = Activity::new(id, category, description, hours, date, start.trim())
                .with_difficulty(difficulty)
                .with_productivity(productivity);
            if let Some(deadline) = deadline {
                activity = activity.with_related_deadline(parse_date(&deadline)?);
            }

            session.ctx.add_activity(activity.clone())?;
            session.save()?;
            println!("Activity added: {id}");
            print_json(&activity)?;
        }
        ActivityAction::List { category } => {
            let category: Option<ActivityCategory> = category.map(|c| c.parse()).transpose()?;
            let filtered: Vec<&Activity> = session
                .ctx
                .store()
                .list_activities()
                .iter()
                .filter(|a| category.map_or(true, |c| a.category == c))
                .collect();
            print_json(&filtered)?;
        }
    }
    Ok(())
}
