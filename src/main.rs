//! ampview - Live Current Readout
//!
//! Connects to the sample stream and shows each reading on the configured display.

use ampview::config::{BackendKind, Config, Overrides};
use ampview::display::{DisplaySurface, LogPanel, TerminalPanel};
use ampview::stream::SocketIoSource;
use ampview::{Application, PipelinePolicy, SampleRenderer};
use anyhow::{Context, Result};
use clap::{value_parser, Arg, Command};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let matches = Command::new("ampview")
        .version(ampview::VERSION)
        .about("Live current readout for a Socket.IO sample stream")
        .long_about(
            "ampview subscribes to periodic current samples pushed over Socket.IO and keeps the \
             latest one on a small display, scaled to nA, µA, mA or A.",
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("PATH")
                .help("Configuration file (default: <config dir>/ampview/config.toml)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("host")
                .long("host")
                .value_name("HOST")
                .help("Socket.IO server host"),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .short('p')
                .value_name("PORT")
                .help("Socket.IO server port")
                .value_parser(value_parser!(u16)),
        )
        .arg(
            Arg::new("namespace")
                .long("namespace")
                .value_name("PATH")
                .help("Namespace carrying the samples, e.g. /periodic-samples"),
        )
        .arg(
            Arg::new("event")
                .long("event")
                .value_name("NAME")
                .help("Event name of a sample"),
        )
        .arg(
            Arg::new("backend")
                .long("backend")
                .short('b')
                .value_name("BACKEND")
                .help("Display backend")
                .value_parser(["terminal", "log"]),
        )
        .get_matches();

    let mut config = Config::discover(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))
        .context("loading configuration")?;
    let backend = matches
        .get_one::<String>("backend")
        .map(|name| BackendKind::parse(name))
        .transpose()?;
    config.apply_overrides(Overrides {
        host: matches.get_one::<String>("host").cloned(),
        port: matches.get_one::<u16>("port").copied(),
        namespace: matches.get_one::<String>("namespace").cloned(),
        event: matches.get_one::<String>("event").cloned(),
        backend,
    });
    config.validate().context("invalid configuration")?;

    // The terminal panel shares the tty with stderr, so keep the default log level quiet there.
    let default_level = match config.display.backend {
        BackendKind::Terminal => "warn",
        BackendKind::Log => "info",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let size = config.display.size();
    let surface: Box<dyn DisplaySurface> = match config.display.backend {
        BackendKind::Terminal => {
            Box::new(TerminalPanel::stdout(size).context("opening terminal panel")?)
        }
        BackendKind::Log => Box::new(LogPanel::new(size)),
    };
    let renderer = SampleRenderer::with_anchor(
        surface,
        config.display.text_style()?,
        config.display.anchor_point(),
    );

    let source = SocketIoSource::connect(&config.stream).await?;
    let mut app = Application::new(
        Box::new(source),
        renderer,
        PipelinePolicy::from(&config.stream),
    );

    app.run_until(async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            log::error!("Cannot listen for Ctrl-C: {err}");
            std::future::pending::<()>().await;
        }
    })
    .await?;

    Ok(())
}
