use std::path::Path;

use clap::Subcommand;
use procrastination_core::Student;

use super::{print_json, CmdResult, Session};

#[derive(Subcommand)]
pub enum StudentAction {
    /// Set the student the data belongs to
    Set {
        /// Full name
        name: String,
        /// Student identification number
        nim: String,
    },
    /// Show the current student
    Show,
}

pub fn run(action: StudentAction, data: Option<&Path>) -> CmdResult {
    let mut session = Session::open(data)?;

    match action {
        StudentAction::Set { name, nim } => {
            session.ctx.set_student(Student::new(name.trim(), nim.trim()));
            session.save()?;
            println!("ok");
        }
        StudentAction::Show => print_json(session.ctx.student())?,
    }
    Ok(())
}
