//! Main application module for hand gesture window control.

use crate::{
    config::Config,
    controller::GestureController,
    error::{Error, Result},
    tracker::{HandSelector, HandTracker, JsonlTracker},
    window_control::{LoggingWindowControl, WindowControl, X11WindowControl},
};
use log::{info, warn};
use std::thread;
use std::time::{Duration, Instant};

/// Observation source type
#[derive(Debug, Clone)]
pub enum ObservationSource {
    /// Detector process streaming observations to stdin
    Stdin,
    /// Recorded observation trace file
    File(String),
}

/// Main application struct
pub struct GestureApp {
    config: Config,
    tracker: Box<dyn HandTracker>,
    selector: HandSelector,
    controller: GestureController,
}

impl GestureApp {
    /// Create a new hand gesture control application
    pub fn new(config: Config, source: ObservationSource) -> Result<Self> {
        info!("Initializing Hand Gesture Control application");

        // Initialize the observation stream
        let tracker: Box<dyn HandTracker> = match &source {
            ObservationSource::Stdin => {
                info!("Reading hand observations from stdin");
                Box::new(JsonlTracker::from_stdin())
            }
            ObservationSource::File(path) => {
                info!("Reading hand observations from trace file: {}", path);
                Box::new(JsonlTracker::from_path(path)?)
            }
        };

        // Initialize window control, falling back to a logging stub when no
        // display is reachable
        let window_control: Box<dyn WindowControl> = if config.control.dry_run {
            info!("Dry run: window commands will be logged, not executed");
            Box::new(LoggingWindowControl::new())
        } else {
            match X11WindowControl::new() {
                Ok(control) => {
                    info!("X11 window control initialized");
                    Box::new(control)
                }
                Err(e) => {
                    warn!("Failed to initialize window control: {}", e);
                    Box::new(LoggingWindowControl::new())
                }
            }
        };

        let selector = HandSelector::new(config.tracker.clone());
        let controller = GestureController::new(window_control, config.session.armed_timeout());

        Ok(Self {
            config,
            tracker,
            selector,
            controller,
        })
    }

    /// Run the main application loop
    pub fn run(&mut self) -> Result<()> {
        info!("Starting main application loop");

        let poll_interval = self.config.session.poll_interval();
        let mut frame_count: u64 = 0;
        let mut command_count: u64 = 0;
        let start_time = Instant::now();

        info!("Entering main loop");
        loop {
            // Read the next observation from the tracker
            let observation = match self.tracker.next_observation() {
                Ok(Some(observation)) => observation,
                Ok(None) => {
                    info!("End of observation stream reached");
                    break;
                }
                Err(Error::Tracker(e)) => {
                    warn!("Skipping unreadable observation: {}", e);
                    continue;
                }
                Err(e) => return Err(e),
            };

            frame_count += 1;

            // Select the hand to follow and advance the gesture session
            let invert_x = self.config.tracker.invert_x;
            let invert_y = self.config.tracker.invert_y;
            let hand = self
                .selector
                .select(&observation)
                .map(|tracked| tracked.pose.mirrored(invert_x, invert_y));
            let outcome = self.controller.process_frame(hand.as_ref(), Instant::now());
            if outcome.command.is_some() {
                command_count += 1;
            }

            if poll_interval > Duration::ZERO {
                thread::sleep(poll_interval);
            }
        }

        info!(
            "Processed {} frames and dispatched {} window commands in {:.1}s",
            frame_count,
            command_count,
            start_time.elapsed().as_secs_f64()
        );
        info!("Application shutting down");
        Ok(())
    }
}
