//! `push`: extract source strings and upload them to Transifex.

use crate::cli::RuntimeConfig;
use crate::cli::args::PushArgs;
use crate::client::Client;
use crate::config::load_parameters;
use crate::error::Result;
use crate::translation::{Translation, update_strings};

pub async fn run(args: &PushArgs, config: &RuntimeConfig) -> Result<()> {
    let parameters = load_parameters(config.rootdir())?;

    let client = Client::connect(&parameters.organization, &args.token.transifex_token).await?;
    let translation = Translation::new(&parameters, &client, true).await?;

    update_strings(&parameters).await?;

    if args.dry_run {
        config
            .output()
            .warn("Not pushing to transifex because it is a dry-run")?;
    } else {
        translation.push().await?;
    }

    Ok(())
}
