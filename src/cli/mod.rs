pub mod artifacts;
pub mod calculate;
pub mod calibrate;
pub mod project;
pub mod render;

use crate::config::ConfigTable;
use crate::Result;

/// Print the effective coefficient table as TOML
pub fn dump_config(config: &ConfigTable) -> Result<()> {
    print!("{}", config.to_toml_string()?);
    Ok(())
}
