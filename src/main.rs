//! Replays recorded hand-landmark sessions through the gesture controller.

use anyhow::Result;
use clap::{Parser, Subcommand};
use hand_gesture_control::{
    app::{write_demo_recording, AppConfig, GestureApp},
    config::Config,
    debouncer::AppMode,
};
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a recorded session and print the emitted events
    Run {
        /// Recording to replay (YAML)
        #[arg(short, long)]
        recording: PathBuf,

        /// Path to configuration file (YAML format)
        #[arg(short = 'C', long)]
        config: Option<PathBuf>,

        /// Capture rate override
        #[arg(long)]
        fps: Option<u32>,

        /// Initial mode (scattered, tree-shape)
        #[arg(long)]
        initial_mode: Option<AppMode>,

        /// Disable one-finger and two-finger tracking
        #[arg(long)]
        no_finger_tracking: bool,
    },
    /// Write a synthetic demo recording
    Demo {
        /// Output file
        #[arg(short, long, default_value = "demo-recording.yaml")]
        output: PathBuf,

        /// Frame rate of the generated recording
        #[arg(long, default_value = "30")]
        fps: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    match args.command {
        Command::Run {
            recording,
            config,
            fps,
            initial_mode,
            no_finger_tracking,
        } => {
            let mut controller = match &config {
                Some(path) => {
                    info!("Loading configuration from: {}", path.display());
                    Config::from_file(path)?
                }
                None => Config::default(),
            };
            if let Some(fps) = fps {
                controller.capture.target_fps = fps;
            }
            if let Some(mode) = initial_mode {
                controller.debounce.initial_mode = mode;
            }
            if no_finger_tracking {
                controller.track_fingers = false;
            }

            let app = GestureApp::new(AppConfig {
                recording,
                controller,
                print_events: true,
            })?;
            let summary = app.run().await?;
            info!(
                "Processed {} frames ({} skipped), {} events",
                summary.frames_processed, summary.frames_skipped, summary.events_emitted
            );
        }
        Command::Demo { output, fps } => {
            let count = write_demo_recording(&output, fps)?;
            println!("Wrote {} frames to {}", count, output.display());
        }
    }

    Ok(())
}
