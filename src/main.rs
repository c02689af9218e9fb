//! camview: capture camera frames, preprocess and display them, and
//! measure the capture rate. Press `q` to quit, `s` to save the
//! currently displayed frame.

use clap::Parser;
use log::{error, info};

use camview::capture::CameraCapture;
use camview::cli::Args;
use camview::config::{FileConfig, RunConfig};
use camview::display::Window;
use camview::run;

fn main() {
    let args = Args::parse();

    // Explicit logger construction, info level unless RUST_LOG says otherwise
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    if let Err(e) = run_capture(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run_capture(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let file_config = FileConfig::load(args.config.as_deref())?;
    let config = RunConfig::resolve(args, &file_config)?;

    info!(
        "starting capture: camera {}, output '{}'",
        config.camera_id,
        config.output_directory.display()
    );

    let mut source = CameraCapture::open(config.camera_id)?;
    let mut window = Window::open()?;
    run::run(&config, &mut source, &mut window)?;
    Ok(())
}
