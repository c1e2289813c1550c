//! Command-line surface for TaskFlow.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// TaskFlow - tasks, projects and boards from the terminal.
#[derive(Parser, Debug)]
#[command(name = "taskflow")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Use a throwaway in-memory database
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create an account and sign in.
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
        /// Display name (defaults to the username)
        #[arg(short = 'n', long, default_value = "")]
        name: String,
    },

    /// Sign in with email or username.
    Login {
        identifier: String,
        #[arg(short, long)]
        password: String,
    },

    /// Sign out.
    Logout,

    /// Show the signed-in user.
    Whoami,

    /// Task management.
    #[command(subcommand)]
    Task(TaskCommand),

    /// Project management.
    #[command(subcommand)]
    Project(ProjectCommand),

    /// Task statistics, overdue and recent tasks.
    Dashboard {
        #[arg(long)]
        json: bool,
    },

    /// Tasks grouped into status columns.
    Board,

    /// Show version information.
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum TaskCommand {
    /// Create a task.
    Add {
        #[arg(short, long)]
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Due date as YYYY-MM-DD
        #[arg(long)]
        due: String,
        /// low, medium, high or urgent
        #[arg(short, long, default_value = "medium")]
        priority: String,
        #[arg(long)]
        project: Option<String>,
    },

    /// List tasks with optional filters.
    List {
        /// not_started, in_progress or completed
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        project: Option<String>,
        /// dueDate, priority, status or title
        #[arg(long)]
        sort: Option<String>,
        /// asc or desc
        #[arg(long)]
        order: Option<String>,
        #[arg(long)]
        json: bool,
    },

    /// Change fields of a task. Unset fields stay unchanged.
    Update {
        id: String,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(long)]
        due: Option<String>,
        #[arg(short, long)]
        priority: Option<String>,
        #[arg(short, long)]
        status: Option<String>,
        #[arg(long)]
        project: Option<String>,
    },

    /// Delete a task.
    Delete { id: String },

    /// Find tasks by title or description.
    Search { query: String },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ProjectCommand {
    /// Create a project.
    Add {
        #[arg(short, long)]
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// List projects with task counts.
    List,

    /// Rename or describe a project.
    Update {
        id: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete a project. Its tasks are kept.
    Delete { id: String },
}
