use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use quickbox::config::QuickboxConfig;
use quickbox::{headless, scene, App};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scene to load: sandbox, top-down-car
    #[arg(long, default_value = "sandbox")]
    scenario: String,

    /// List available scenes
    #[arg(long)]
    list_scenarios: bool,

    /// Run without a window for this many frames
    #[arg(long)]
    headless: Option<u32>,

    /// With --headless, save the last frame as PNG
    #[arg(long, requires = "headless")]
    screenshot: Option<PathBuf>,

    /// Print the effective configuration as RON and exit
    #[arg(long)]
    dump_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.list_scenarios {
        for name in scene::SCENE_NAMES {
            println!("{name}");
        }
        return Ok(());
    }

    let config = QuickboxConfig::load()?;

    if args.dump_config {
        println!("{}", config.to_ron()?);
        return Ok(());
    }

    let scene = scene::by_name(&args.scenario).with_context(|| {
        format!(
            "Unknown scenario '{}', expected one of: {}",
            args.scenario,
            scene::SCENE_NAMES.join(", ")
        )
    })?;

    if let Some(frames) = args.headless {
        let report = headless::run_headless(&config, scene, frames, args.screenshot.as_deref())?;
        log::info!(
            "Headless run finished: {} frames, {} bodies, {} sprites in last frame",
            report.frames,
            report.bodies,
            report.sprites_drawn
        );
        return Ok(());
    }

    log::info!("Starting Quickbox");
    pollster::block_on(run(config, scene))
}

async fn run(config: QuickboxConfig, scene: Box<dyn scene::Scene>) -> anyhow::Result<()> {
    let (app, event_loop) = App::new(config, scene).await?;
    App::run(event_loop, app)
}
