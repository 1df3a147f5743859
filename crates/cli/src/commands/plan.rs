use crate::cli::GlobalArgs;
use wrkit_task::TaskGraph;

/// Print the waves of `task`, one line per wave
pub fn execute(global: &GlobalArgs, task: &str) -> eyre::Result<()> {
    let task_set = global.loader().load()?.into_task_set();
    let graph = TaskGraph::build(task_set.tasks)?;

    for (index, wave) in graph.waves(task)?.iter().enumerate() {
        println!("wave {}: {}", index + 1, wave.join(", "));
    }
    Ok(())
}
