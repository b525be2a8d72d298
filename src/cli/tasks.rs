//! 任务子命令实现

use std::io::Write;

use chrono::NaiveDate;

use super::Commands;
use crate::date::{format_due_date, is_overdue, parse_due_date, to_due_date};
use crate::error::{Result, TaskError};
use crate::operations::tasks::TaskService;
use crate::storage::tasks::Task;

/// 执行一个非交互子命令，结果写入 `out`
pub fn execute(
    command: &Commands,
    service: &mut TaskService,
    today: NaiveDate,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        // 由 main 负责启动 TUI
        Commands::Tui => Ok(()),
        Commands::List { pending } => {
            let tasks: Vec<&Task> = service
                .tasks()
                .iter()
                .filter(|t| !*pending || !t.is_completed)
                .collect();
            if tasks.is_empty() {
                writeln!(out, "No tasks.")?;
            }
            for task in tasks {
                writeln!(out, "{}", format_task_line(task, today))?;
            }
            Ok(())
        }
        Commands::Add { name, due } => {
            let due_date = to_due_date(parse_due_date(due, today)?);
            let task = service.add_task(name, due_date)?.into_persisted()?;
            writeln!(out, "Added {}", format_task_line(&task, today))?;
            Ok(())
        }
        Commands::Edit { id, name, due } => {
            if name.is_none() && due.is_none() {
                return Err(TaskError::validation(
                    "nothing to edit, pass --name and/or --due",
                ));
            }
            let current = service.get(*id).ok_or(TaskError::NotFound(*id))?;
            let new_name = name.clone().unwrap_or_else(|| current.name.clone());
            let new_due = match due {
                Some(text) => to_due_date(parse_due_date(text, today)?),
                None => current.due_date,
            };

            service.edit_task(*id, &new_name, new_due)?.into_persisted()?;
            if let Some(task) = service.get(*id) {
                writeln!(out, "Updated {}", format_task_line(task, today))?;
            }
            Ok(())
        }
        Commands::Toggle { id } => {
            let completed = service.toggle_complete(*id)?.into_persisted()?;
            let state = if completed { "completed" } else { "not completed" };
            writeln!(out, "Task {} marked {}", id, state)?;
            Ok(())
        }
        Commands::Rm { id } => {
            if service.delete_task(*id).into_persisted()? {
                writeln!(out, "Deleted task {}", id)?;
            } else {
                writeln!(out, "No task {}, nothing deleted", id)?;
            }
            Ok(())
        }
        Commands::Clear => {
            let removed = service.delete_completed().into_persisted()?;
            writeln!(out, "Deleted {} completed task(s)", removed)?;
            Ok(())
        }
    }
}

/// "  3  [x] 15/01/2024  Pay rent"
fn format_task_line(task: &Task, today: NaiveDate) -> String {
    let check = if task.is_completed { "[x]" } else { "[ ]" };
    let overdue = if is_overdue(task, today) { " (overdue)" } else { "" };
    format!(
        "{:>3}  {} {}  {}{}",
        task.id,
        check,
        format_due_date(&task.due_date),
        task.name,
        overdue
    )
}
