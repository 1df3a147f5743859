use crate::cli::GlobalArgs;
use wrkit_config::EXAMPLE_DOCUMENT;
use wrkit_core::Error;

/// Write the example document to the configuration path; never overwrites
pub fn execute(global: &GlobalArgs) -> eyre::Result<()> {
    let path = &global.file;
    if path.exists() {
        return Err(Error::configuration(format!("{} already exists", path.display())).into());
    }

    std::fs::write(path, EXAMPLE_DOCUMENT).map_err(|e| Error::file_system(path, "write", e))?;
    println!("created {}", path.display());
    Ok(())
}
