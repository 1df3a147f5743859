use clap::Subcommand;
use clap_complete::Shell;

pub mod init;
pub mod list;
pub mod plan;
pub mod run;
pub mod show;

/// Closed table of subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a task and its dependencies
    Run {
        /// Task to run
        task: String,
    },

    /// List tasks in the configuration
    #[command(visible_alias = "ls")]
    List,

    /// Show task details
    Show {
        /// Task to show
        task: String,
    },

    /// Print the waves a task would run in, without running anything
    Plan {
        /// Task to plan
        task: String,
    },

    /// Create an example wrkit.yaml
    Init,

    /// Print version
    Version,

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        shell: Shell,
    },
}
