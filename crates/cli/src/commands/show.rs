use crate::cli::GlobalArgs;
use wrkit_core::Error;

pub fn execute(global: &GlobalArgs, name: &str) -> eyre::Result<()> {
    let config = global.loader().load()?;
    let task = config.task(name).ok_or_else(|| Error::task_not_found(name))?;

    println!("name: {name}");
    println!("desc: {}", task.desc.as_deref().unwrap_or_default());
    println!("dir:  {}", task.dir.as_deref().unwrap_or_default());
    if !task.deps.is_empty() {
        println!("deps: {}", task.deps.join(", "));
    }
    if !task.cmds.as_slice().is_empty() {
        println!("cmds:");
        for command in task.cmds.as_slice() {
            println!("  - {command}");
        }
    }
    if !task.env.is_empty() {
        println!("env:");
        for (key, value) in &task.env {
            println!("  {key}={value}");
        }
    }
    println!("parallel: {}", task.parallel);
    if !task.post.is_empty() {
        println!("post:");
        for hook in &task.post {
            let when = if hook.when.is_empty() { "success" } else { &hook.when };
            println!("  - {} (when: {when})", hook.task);
        }
    }
    Ok(())
}
