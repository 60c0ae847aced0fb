//! Countdown Timers - terminal host for a group of countdown timers
//!
//! This is the main entry point for the countdown-timers application.

use anyhow::Context;
use tracing::info;

use countdown_timers::{
    config::Config,
    console::{self, Reply, Session},
    group::TimerGroup,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so stdout carries only replies
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_timers={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting countdown-timers v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: interval={}ms, ui={}, mount={}, cleanup={}",
        config.interval_ms, !config.no_ui, config.mount, config.cleanup
    );

    let group = TimerGroup::new(config.group_config());
    let session = Session::new(group, config.interval(), config.json);

    for duration in &config.durations {
        let timer = session
            .create(duration, None)
            .with_context(|| format!("Failed to create timer from {:?}", duration))?;
        if config.autostart {
            timer
                .start()
                .with_context(|| format!("Failed to start timer {}", timer.id()))?;
        }
    }

    if !session.group().is_empty() {
        let reply = Reply::ok(String::new(), session.group()).with_canvas(session.group().render());
        println!("{}", session.format(&reply));
    }
    if !config.json {
        println!("type 'help' for commands");
    }

    console::run(&session).await.context("Console input failed")?;

    info!("Shutdown complete");
    Ok(())
}
