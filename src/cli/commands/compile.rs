//! `compile`: build `.qm` files from the local `.ts` files.

use crate::cli::RuntimeConfig;
use crate::config::load_parameters;
use crate::error::Result;
use crate::translation::compile_strings;

pub async fn run(config: &RuntimeConfig) -> Result<()> {
    let parameters = load_parameters(config.rootdir())?;

    for qm_file in compile_strings(&parameters).await? {
        log::info!("Compiled {}", qm_file.display());
    }

    Ok(())
}
