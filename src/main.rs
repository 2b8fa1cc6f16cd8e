use clap::Parser;
use multiclip::{
    app::App,
    cli::Cli,
    clipboard::{self, SystemClipboard},
    config::Config,
    context::AppContext,
    logging,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();
    let mut config = Config::load(&args.config);
    config.apply_cli(&args);

    // The terminal is not taken over yet, so a broken log file can still be reported here.
    if let Some(path) = config.log_file_path()
        && let Err(e) = logging::init(&path)
    {
        eprintln!("multiclip: logging disabled, {}: {}", path.display(), e);
    }

    if let Some(path) = config.get_path() {
        info!("Using config file {}", path);
    }
    if let Some(error) = config.parse_error() {
        warn!("Ignoring invalid config file: {}", error);
    }

    let (clipboard, clipboard_error) = match SystemClipboard::spawn() {
        Ok(system) => (Some(clipboard::shared(system)), None),
        Err(e) => {
            warn!("Clipboard monitoring disabled: {}", e);
            (None, Some(e.to_string()))
        }
    };

    let context = AppContext::new(config, clipboard);
    let terminal = ratatui::init();
    let result = App::new(context, clipboard_error).run(terminal).await;

    ratatui::restore();
    result
}
