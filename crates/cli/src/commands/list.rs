use crate::cli::GlobalArgs;

/// One line per task, sorted by name
pub fn execute(global: &GlobalArgs) -> eyre::Result<()> {
    let config = global.loader().load()?;
    for (name, task) in config.tasks() {
        let desc = task
            .desc
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or("-");
        println!("{name:<20} {desc}");
    }
    Ok(())
}
