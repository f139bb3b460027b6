use color_eyre::Result;

use token_console::{config, domain, infra};

mod action;
mod app;
mod cli;
mod components;
mod errors;
mod logging;
mod tui;

#[tokio::main]
async fn main() -> Result<()> {
    errors::install_hooks()?;

    let args = cli::Args::parse_args();

    if let Some(ref data_dir) = args.data_dir {
        // SAFETY: This is called at program startup before any other threads exist
        unsafe {
            std::env::set_var("TOKEN_CONSOLE_DATA", data_dir);
        }
    }

    logging::init()?;

    let config = config::Config::load()?.with_overrides(&args.overrides());
    let mut app = app::App::new(config, &args)?;

    app.run().await?;

    Ok(())
}
