pub(crate) mod app;
pub(crate) mod cli;
pub(crate) mod config;
pub(crate) mod effects;
pub(crate) mod input;
pub(crate) mod locale;
pub(crate) mod logging;
pub(crate) mod picker;
pub(crate) mod ui;

use std::fs::File;
use std::io::{self, Write};
use std::sync::mpsc;

use anyhow::Context;
use compressor_engine::{ArtifactStore, EngineHandle, JsonLinesBridge, TranscodeSettings};
use engine_logging::engine_info;

use app::{Session, SessionSummary};
use cli::Cli;
use effects::EffectRunner;
use input::Input;
use locale::PageRequest;
use ui::render::Renderer;

/// Runs one page lifetime: mount, process drops, tear down.
pub fn run_app(cli: Cli) -> anyhow::Result<SessionSummary> {
    let config = config::load_config(cli.config.as_deref())?.with_overrides(&cli);
    logging::initialize(config.log, &config.log_file, cli.verbose);

    let mut request = PageRequest::parse(&cli.page_url, &config.default_locale)?;
    if let Some(locale) = &cli.locale {
        request.locale = locale.clone();
    }
    if let Some(component_id) = &cli.component_id {
        request.component_id = Some(component_id.clone());
    }
    let catalog = locale::load_catalog(&request.locale, config.messages_dir.as_deref())
        .with_context(|| format!("page for locale {:?}", request.locale))?;
    engine_info!(
        "Page mounted: locale={} componentId={:?}",
        request.locale,
        request.component_id
    );

    let engine = EngineHandle::new(TranscodeSettings {
        ffmpeg_path: config.ffmpeg_path.clone(),
        scratch_dir: config.scratch_dir.clone(),
    });
    let outbound: Box<dyn Write + Send> = match &cli.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("opening message output {path:?}"))?,
        ),
        None => Box::new(io::stdout()),
    };
    let runner = EffectRunner::new(
        engine,
        JsonLinesBridge::new(outbound),
        ArtifactStore::new(config.artifact_dir.clone()),
    );
    let screen: Box<dyn Write> = if cli.quiet {
        Box::new(io::sink())
    } else {
        Box::new(io::stderr())
    };
    let session = Session::new(request.component_id, runner, Renderer::new(catalog), screen);

    let (input_tx, input_rx) = mpsc::channel();
    if cli.interactive {
        input::spawn_stdin_reader(input_tx);
    } else {
        for file in cli.files {
            let _ = input_tx.send(Input::Drop(vec![file]));
        }
        let _ = input_tx.send(Input::Quit);
    }

    Ok(session.run(input_rx))
}
