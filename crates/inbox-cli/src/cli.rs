use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "inbox",
    version,
    about = "Work through assistant-generated email tasks from the terminal.",
    after_help = "Examples:\n  \
                  inbox tasks list\n  \
                  inbox tasks act 64f1c2 \"Mark as Done\"\n  \
                  inbox --user demo1 spam list\n  \
                  inbox settings toggle spam"
)]
pub struct Cli {
    /// Act as this user (remembered for later runs in dev mode)
    #[arg(long, value_name = "USER_ID", global = true)]
    pub user: Option<String>,

    /// Override the backend base URL
    #[arg(long, value_name = "URL", global = true)]
    pub api_base: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// List tasks and act on them
    #[command(subcommand)]
    Tasks(TasksCommand),
    /// Review emails flagged as spam
    #[command(subcommand)]
    Spam(SpamCommand),
    /// Show or change assistant settings
    #[command(subcommand)]
    Settings(SettingsCommand),
    /// Webhook security administration
    #[command(subcommand)]
    Admin(AdminCommand),
    /// Manage the demo identity
    #[command(subcommand)]
    User(UserCommand),
}

#[derive(Args, Debug, Clone)]
pub struct ListingArgs {
    /// Status filter passed to the backend (defaults to the configured one)
    #[arg(long, value_name = "STATUS")]
    pub status: Option<String>,

    /// Include tasks derived from spam
    #[arg(long)]
    pub spam: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum TasksCommand {
    /// Fetch and show the task list
    List {
        #[command(flatten)]
        listing: ListingArgs,

        /// Skip the network and show the cached list read-only
        #[arg(long)]
        offline: bool,
    },
    /// Confirm an action on a task
    Act {
        #[arg(value_name = "TASK_ID")]
        task_id: String,

        #[arg(value_name = "ACTION")]
        action: String,

        #[command(flatten)]
        listing: ListingArgs,
    },
    /// Show the status an action label maps to
    Classify {
        #[arg(value_name = "ACTION")]
        action: String,
    },
    /// Show the last cached task list
    Cached,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SpamCommand {
    /// Show flagged emails
    List,
    /// Mark an email as not spam
    NotSpam {
        #[arg(value_name = "EMAIL_ID")]
        email_id: String,
    },
    /// Archive a spam email
    Archive {
        #[arg(value_name = "EMAIL_ID")]
        email_id: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum SettingsCommand {
    /// Show current settings and the assistant mailbox address
    Show,
    /// Flip one setting (spam, categorization, low-priority)
    Toggle {
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Explain how to forward mail to the assistant
    Forwarding,
}

#[derive(Subcommand, Debug, Clone)]
pub enum AdminCommand {
    /// Show webhook security settings
    Show,
    /// Allow webhook calls from an IP address
    AddIp {
        #[arg(value_name = "IP")]
        ip: String,
    },
    /// Stop allowing an IP address
    RemoveIp {
        #[arg(value_name = "IP")]
        ip: String,
    },
    /// Generate and save a new API key
    RotateKey,
    /// Enable or disable webhook security
    SetActive {
        #[arg(value_name = "BOOL", action = clap::ArgAction::Set)]
        active: bool,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum UserCommand {
    /// Show the active user
    Show,
    /// Remember a demo user
    Set {
        #[arg(value_name = "USER_ID")]
        user_id: String,
    },
    /// Forget the remembered user
    Clear,
    /// List the demo users
    Demo,
}
