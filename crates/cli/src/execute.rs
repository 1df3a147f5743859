use crate::cli::GlobalArgs;
use crate::commands::{self, Commands};

impl Commands {
    pub async fn execute(self, global: &GlobalArgs) -> eyre::Result<()> {
        match self {
            Commands::Run { task } => commands::run::execute(global, &task).await,
            Commands::List => commands::list::execute(global),
            Commands::Show { task } => commands::show::execute(global, &task),
            Commands::Plan { task } => commands::plan::execute(global, &task),
            Commands::Init => commands::init::execute(global),
            Commands::Version => {
                println!("wrkit {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
            Commands::Completion { shell } => {
                crate::completion::generate_completion(shell);
                Ok(())
            }
        }
    }
}
