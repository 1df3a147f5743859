use clap::Parser;

mod cli;
mod commands;
mod completion;
mod execute;
mod logging;

use cli::Cli;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();

    logging::init(cli.global.verbose)?;

    match (cli.command, cli.task) {
        (Some(command), _) => command.execute(&cli.global).await,
        // `wrkit <task>` runs the task without typing `run`
        (None, Some(task)) => commands::run::execute(&cli.global, &task).await,
        (None, None) => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            Ok(())
        }
    }
}
