//! Hand gesture application for pinch-driven window control.

use anyhow::Result;
use clap::Parser;
use hand_gesture_control::app::{GestureApp, ObservationSource};
use hand_gesture_control::config::Config;
use log::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Trace file of recorded observations (reads stdin when omitted)
    #[arg(short, long)]
    trace: Option<String>,

    /// Log window commands instead of executing them
    #[arg(long)]
    dry_run: bool,

    /// Minimum confidence to start following a hand
    #[arg(long)]
    detection_confidence: Option<f64>,

    /// Minimum confidence to keep following a hand
    #[arg(long)]
    tracking_confidence: Option<f64>,

    /// Mirror observations horizontally
    #[arg(long)]
    invert_x: bool,

    /// Mirror observations vertically
    #[arg(long)]
    invert_y: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Hand Gesture Window Control");

    // Load configuration if provided
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    // Apply command line overrides
    if let Some(confidence) = args.detection_confidence {
        config.tracker.detection_confidence = confidence;
    }
    if let Some(confidence) = args.tracking_confidence {
        config.tracker.tracking_confidence = confidence;
    }
    if args.invert_x {
        config.tracker.invert_x = true;
    }
    if args.invert_y {
        config.tracker.invert_y = true;
    }
    if args.dry_run {
        config.control.dry_run = true;
    }
    config.validate()?;

    let source = if let Some(trace_path) = args.trace {
        ObservationSource::File(trace_path)
    } else {
        ObservationSource::Stdin
    };

    // Create and run application
    let mut app = GestureApp::new(config, source)?;
    app.run()?;

    Ok(())
}
