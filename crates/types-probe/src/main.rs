use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;
use types_probe::config::REGISTRY_ENV;
use types_probe::navigation::location_pathname;
use types_probe::{
    InMemoryPage, NavigationEvent, NavigationWatcher, PageElement, Presenter, ProbeConfig,
    ProbeError, RenderReport, TypeSupportResolver,
};

/// Reports whether npm packages ship TypeScript declarations.
#[derive(Parser, Debug)]
#[command(name = "types-probe", version)]
struct Cli {
    /// Package page URLs or paths (e.g. /package/react), visited in order
    #[arg(required = true)]
    locations: Vec<String>,

    /// Registry metadata endpoint
    #[arg(long, env = REGISTRY_ENV)]
    registry: Option<String>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the rendered HTML element instead of plain text
    #[arg(long)]
    html: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> types_probe::Result<()> {
    let config = ProbeConfig::load(cli.config.as_deref())?.with_registry_override(cli.registry);

    let resolver = Arc::new(TypeSupportResolver::new(config.registry.client()?));
    let page = Arc::new(Mutex::new(InMemoryPage::with_anchor(
        &config.presentation.anchor_selector,
        vec![PageElement::new(None, "<div></div>")],
    )));
    let mut handle =
        NavigationWatcher::new(resolver, Presenter::new(config.presentation), page).start();

    for (index, location) in cli.locations.iter().enumerate() {
        let pathname = location_pathname(location);
        let event = if index == 0 {
            NavigationEvent::Load(pathname)
        } else {
            NavigationEvent::PushState(pathname)
        };
        handle.navigate(event);

        let report = handle
            .next_report()
            .await
            .ok_or_else(|| ProbeError::WatcherStopped(location.clone()))?;
        match report {
            RenderReport::Rendered { annotation, .. } => {
                if cli.html {
                    println!("{}", annotation.to_html());
                } else {
                    println!("{}", annotation.to_text());
                }
            }
            RenderReport::Failed { error, .. } => {
                handle.stop().await;
                return Err(error.into());
            }
            RenderReport::Discarded { .. } => {}
        }
    }

    handle.stop().await;
    Ok(())
}
