// SPDX-License-Identifier: MPL-2.0
use geolens::application::port::MapRenderer;
use geolens::application::session::Session;
use geolens::config::{self, Config};
use geolens::domain::map_view::RenderFrame;
use geolens::domain::selection::SelectionError;
use geolens::domain::tagging::UploadedImage;
use geolens::error::{Error, Result};
use geolens::payload::UploadResult;
use serde_json::json;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const HELP: &str = "\
Resolve a photo's location from a processing result and print the map view

USAGE:
  geolens [OPTIONS] <PAYLOAD>

ARGS:
  <PAYLOAD>              Upload-result JSON file, or '-' for stdin

OPTIONS:
  --image <FILE>         Image the payload belongs to (enables tagging output)
  --select <RANK>        Select the candidate with this 1-based rank
  --config <FILE>        Read settings from FILE instead of the default location
  --log-level <LEVEL>    Log filter (error, warn, info, debug, trace)
  -h, --help             Print help
";

struct Args {
    payload: PathBuf,
    image: Option<PathBuf>,
    select: Option<usize>,
    config: Option<PathBuf>,
    log_level: Option<String>,
}

fn parse_args() -> std::result::Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }
    Ok(Some(Args {
        image: args.opt_value_from_str("--image")?,
        select: args.opt_value_from_str("--select")?,
        config: args.opt_value_from_str("--config")?,
        log_level: args.opt_value_from_str("--log-level")?,
        payload: args.free_from_str()?,
    }))
}

/// Collects painted frames so they can be printed once the run is done.
#[derive(Default)]
struct FrameLog {
    frames: Vec<RenderFrame>,
}

impl MapRenderer for FrameLog {
    fn render(&mut self, frame: &RenderFrame) {
        self.frames.push(frame.clone());
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install logger: {e}");
    }
}

fn load_config(path: Option<&Path>) -> Config {
    let loaded = match path {
        Some(path) => config::load_from_path(path),
        None => config::load(),
    };
    loaded.unwrap_or_else(|e| {
        eprintln!("using default settings: {e}");
        Config::default()
    })
}

fn read_payload(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

fn read_image(path: Option<&Path>) -> Result<Option<UploadedImage>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| Error::Io(format!("not a file: {}", path.display())))?;
    Ok(Some(UploadedImage::new(file_name, std::fs::read(path)?)))
}

fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_deref());
    init_tracing(args.log_level.as_deref().unwrap_or(config.log_level()));

    let result = UploadResult::from_json(&read_payload(&args.payload)?)?;
    let image = read_image(args.image.as_deref())?;
    let tag_output = image.is_some();

    let mut session = Session::new(config.map_settings());
    let token =
        session.begin_upload(image.unwrap_or_else(|| UploadedImage::new("upload", Vec::new())));
    session.apply_result(token, &result);

    let mut map = FrameLog::default();
    session.sync_map(&mut map);

    if let Some(rank) = args.select {
        let target = rank
            .checked_sub(1)
            .and_then(|index| session.location_set().candidates().get(index))
            .map(|candidate| candidate.to_ref())
            .ok_or_else(|| SelectionError::UnknownCandidate {
                name: format!("#{rank}"),
            })?;
        session.select_location(&target)?;
        session.sync_map(&mut map);
    }

    let tagging = if tag_output {
        match session.tagging_request() {
            Ok(request) => json!(request),
            Err(e) => {
                tracing::info!("no tagging request: {e}");
                serde_json::Value::Null
            }
        }
    } else {
        serde_json::Value::Null
    };

    let output = json!({
        "message": session.message(),
        "selection": session.selection(),
        "frames": map.frames,
        "tagging": tagging,
    });
    println!("{output:#}");
    Ok(())
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("error: {e}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
