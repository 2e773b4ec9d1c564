//! `pull`: download translations, optionally compiling them.

use crate::cli::RuntimeConfig;
use crate::cli::args::PullArgs;
use crate::client::Client;
use crate::config::load_parameters;
use crate::error::Result;
use crate::translation::{Translation, compile_strings};

pub async fn run(args: &PullArgs, config: &RuntimeConfig) -> Result<()> {
    let parameters = load_parameters(config.rootdir())?;

    let languages = if args.lang.is_empty() {
        &parameters.selected_languages
    } else {
        &args.lang
    };

    let client = Client::connect(&parameters.organization, &args.token.transifex_token).await?;
    let translation = Translation::new(&parameters, &client, false).await?;

    let written = translation.pull(languages).await?;
    log::info!("Pulled {} translation files", written.len());

    if args.compile {
        compile_strings(&parameters).await?;
    }

    Ok(())
}
