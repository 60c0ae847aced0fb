//! Interactive console host
//!
//! Reads one command per line from stdin and drives a [`TimerGroup`](crate::group::TimerGroup)
//! until `quit`, end of input or a shutdown signal.

pub mod commands;
pub mod handlers;
pub mod responses;

use std::io;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::utils::shutdown_signal;

// Re-export main types
pub use commands::{Command, Target, HELP};
pub use handlers::Session;
pub use responses::Reply;

/// Run the command loop.
///
/// When input closes while timers are still running, keeps going until they
/// have all ended so piped scripts see their completion.
pub async fn run(session: &Session) -> io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("Input closed");
                    break;
                };
                match Command::parse(&line) {
                    Ok(Some(command)) => {
                        debug!("Handling {:?}", command);
                        match session.handle(command) {
                            Some(reply) => println!("{}", session.format(&reply)),
                            None => return Ok(()),
                        }
                    }
                    Ok(None) => {}
                    Err(usage) => println!("{}", usage),
                }
            }
            _ = &mut shutdown => {
                info!("Shutdown signal received");
                return Ok(());
            }
        }
    }

    tokio::select! {
        _ = drain(session) => {}
        _ = &mut shutdown => info!("Shutdown signal received"),
    }
    Ok(())
}

/// Wait until no timer in the session's group is running.
async fn drain(session: &Session) {
    let group = session.group();
    let period = group
        .list_all()
        .iter()
        .map(|t| t.interval())
        .min()
        .unwrap_or_default()
        .max(std::time::Duration::from_millis(10));

    while group.list_all().iter().any(|t| t.is_running()) {
        tokio::time::sleep(period).await;
    }
    debug!("All timers idle, leaving console");
}
