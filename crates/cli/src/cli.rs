use crate::commands::Commands;
use clap::{Args, Parser};
use std::collections::BTreeMap;
use std::path::PathBuf;
use wrkit_config::ConfigLoader;
use wrkit_core::constants::DEFAULT_CONFIG_FILENAME;
use wrkit_task::RunOptions;

#[derive(Parser)]
#[command(name = "wrkit")]
#[command(about = "wrkit: a small make-like task runner driven by YAML files")]
#[command(
    long_about = "wrkit: a small make-like task runner driven by YAML files.\n\n\
    `wrkit <task>` runs a task and its dependencies; subcommands list, show and \
    plan tasks or create an example wrkit.yaml."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Task to run when no subcommand is given
    pub task: Option<String>,
}

/// Flags accepted by every subcommand
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// wrkit YAML configuration file
    #[arg(short = 'f', long = "file", global = true, default_value = DEFAULT_CONFIG_FILENAME)]
    pub file: PathBuf,

    /// Ignore the global ~/.wrkit.master.yaml and use only the local file
    #[arg(long, global = true)]
    pub no_master: bool,

    /// Print what would be done without executing
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Variables to pass to templates (KEY=VALUE). Can be repeated.
    #[arg(short = 'V', long = "var", value_name = "KEY=VALUE", global = true)]
    pub vars: Vec<String>,

    /// Maximum number of parallel tasks running at once (0 = no limit)
    #[arg(short = 'c', long, global = true, default_value_t = 0)]
    pub concurrency: usize,
}

impl GlobalArgs {
    pub fn loader(&self) -> ConfigLoader {
        ConfigLoader::new()
            .file(&self.file)
            .no_master(self.no_master)
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            dry_run: self.dry_run,
            verbose: self.verbose,
            variables: parse_vars(&self.vars),
            max_parallel: self.concurrency,
        }
    }
}

/// `KEY=VALUE` pairs; a missing `=` gives an empty value, empty entries are ignored
pub fn parse_vars(raw: &[String]) -> BTreeMap<String, String> {
    raw.iter()
        .filter(|s| !s.is_empty())
        .map(|s| match s.split_once('=') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (s.clone(), String::new()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vars() {
        let vars = parse_vars(&[
            "NAME=cli".to_string(),
            "EMPTY".to_string(),
            String::new(),
            "URL=a=b".to_string(),
        ]);
        assert_eq!(vars.len(), 3);
        assert_eq!(vars["NAME"], "cli");
        assert_eq!(vars["EMPTY"], "");
        assert_eq!(vars["URL"], "a=b");
    }

    #[test]
    fn test_bare_task_and_globals() {
        let cli = Cli::try_parse_from(["wrkit", "--dry-run", "-V", "A=1", "build"]).unwrap();
        assert_eq!(cli.task.as_deref(), Some("build"));
        assert!(cli.command.is_none());
        assert!(cli.global.dry_run);
        assert_eq!(cli.global.run_options().variables["A"], "1");
    }

    #[test]
    fn test_globals_after_subcommand() {
        let cli = Cli::try_parse_from(["wrkit", "run", "build", "-v", "-c", "2"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Run { ref task }) if task == "build"));
        assert!(cli.global.verbose);
        assert_eq!(cli.global.run_options().max_parallel, 2);
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
