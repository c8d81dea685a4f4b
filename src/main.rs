//! `boxboard-replay`: run a scripted annotation session against an image.
//!
//! ```sh
//! boxboard-replay photo.jpg session.json > annotations.json
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `boxboard=info`).

use anyhow::{Context, Result, bail};
use boxboard::{CanvasImage, ReplayScript};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("boxboard=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let mut args = std::env::args_os().skip(1);
    let (Some(image_path), Some(script_path)) = (args.next(), args.next()) else {
        bail!("usage: boxboard-replay <image> <script.json>");
    };
    let image_path = PathBuf::from(image_path);
    let script_path = PathBuf::from(script_path);

    let image = image::open(&image_path).with_context(|| format!("cannot decode image {}", image_path.display()))?;
    let json = std::fs::read_to_string(&script_path)
        .with_context(|| format!("cannot read script {}", script_path.display()))?;
    let script = ReplayScript::from_json_str(&json).context("invalid replay script")?;

    info!(
        image = %image_path.display(),
        events = script.events.len(),
        "replaying session"
    );
    let outcome = script.run(CanvasImage::from(image)).context("replay failed")?;

    let out = serde_json::to_string_pretty(&outcome).context("cannot serialize outcome")?;
    println!("{out}");
    Ok(())
}
