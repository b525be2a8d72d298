//! CLI 模块

pub mod tasks;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "duelist")]
#[command(version)]
#[command(about = "A task list with due dates, in your terminal")]
pub struct Cli {
    /// Data directory (defaults to ~/.duelist)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Open the interactive task list (default)
    Tui,
    /// Print all tasks in creation order
    List {
        /// Only show tasks that are not completed
        #[arg(long)]
        pending: bool,
    },
    /// Add a task
    Add {
        /// Task name
        name: String,
        /// Due date: dd/mm/yyyy, yyyy-mm-dd, today or tomorrow
        #[arg(short, long, default_value = "today")]
        due: String,
    },
    /// Change the name and/or due date of a task
    Edit {
        /// Task ID
        id: u64,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New due date
        #[arg(short, long)]
        due: Option<String>,
    },
    /// Mark a task completed, or not completed again
    Toggle {
        /// Task ID
        id: u64,
    },
    /// Delete a task
    Rm {
        /// Task ID
        id: u64,
    },
    /// Delete all completed tasks
    Clear,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_opens_tui() {
        let cli = Cli::try_parse_from(["duelist"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.data_dir.is_none());
    }

    #[test]
    fn test_parse_add_with_default_due() {
        let cli = Cli::try_parse_from(["duelist", "add", "Buy milk"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Add {
                name: "Buy milk".to_string(),
                due: "today".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_edit_and_global_data_dir() {
        let cli = Cli::try_parse_from([
            "duelist", "edit", "3", "--due", "15/01/2024", "--data-dir", "/tmp/x",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
        assert_eq!(
            cli.command,
            Some(Commands::Edit {
                id: 3,
                name: None,
                due: Some("15/01/2024".to_string()),
            })
        );
    }

    #[test]
    fn test_rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["duelist", "rm", "abc"]).is_err());
    }
}
