/// Constants used throughout the wrkit codebase
// Document file names
pub const DEFAULT_CONFIG_FILENAME: &str = "wrkit.yaml";
pub const MASTER_CONFIG_FILENAME: &str = ".wrkit.master.yaml";

// Environment variable names
pub const WRKIT_LOG_VAR: &str = "WRKIT_LOG";

// Shell used to interpret command lines
pub const DEFAULT_SHELL: &str = "sh";
