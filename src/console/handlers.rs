//! Console command handlers

use std::time::Duration;
use tracing::{error, info, warn};

use super::{
    commands::{Command, Target, HELP},
    responses::Reply,
};
use crate::{
    duration,
    error::TimerError,
    group::TimerGroup,
    notify::handler,
    timer::{Timer, TimerEvent, TimerEventKind, TimerOptions},
};

/// Console state: the group being driven and output preferences.
#[derive(Debug)]
pub struct Session {
    group: TimerGroup,
    interval: Duration,
    json: bool,
}

impl Session {
    pub fn new(group: TimerGroup, interval: Duration, json: bool) -> Self {
        Self {
            group,
            interval,
            json,
        }
    }

    pub fn group(&self) -> &TimerGroup {
        &self.group
    }

    /// Create a timer in the group and announce its expiry on stdout.
    ///
    /// In JSON mode every lifecycle event is printed, one object per line.
    pub fn create(&self, duration: &str, label: Option<String>) -> Result<Timer, TimerError> {
        let mut options = TimerOptions::new().interval(self.interval);
        if let Some(label) = label {
            options = options.label(label);
        }
        let timer = self.group.create_timer(duration, options)?;

        let json = self.json;
        let announce = handler(move |event: &TimerEvent| {
            if json {
                match serde_json::to_string(event) {
                    Ok(line) => println!("{}", line),
                    Err(e) => error!("Failed to serialize timer event: {}", e),
                }
            } else {
                println!("timer {} done", event.timer.name());
            }
        });
        let kinds: &[TimerEventKind] = if json {
            &TimerEventKind::ALL
        } else {
            &[TimerEventKind::Done]
        };
        for kind in kinds {
            timer.on(*kind, announce.clone());
        }
        Ok(timer)
    }

    /// Run one command. `None` means the session should end.
    pub fn handle(&self, command: Command) -> Option<Reply> {
        let reply = match command {
            Command::Quit => return None,
            Command::Help => Reply::ok(HELP.to_string(), &self.group),
            Command::List => {
                let reply = Reply::ok(String::new(), &self.group);
                Reply {
                    message: reply.listing(),
                    ..reply
                }
            }
            Command::Show => {
                let reply = Reply::ok(String::new(), &self.group);
                let canvas = self.group.render().unwrap_or_else(|| reply.listing());
                reply.with_canvas(Some(canvas))
            }
            command => match self.apply(command) {
                Ok(message) => {
                    info!("{}", message);
                    Reply::ok(message, &self.group).with_canvas(self.group.render())
                }
                Err(e) => {
                    warn!("Command failed: {}", e);
                    Reply::error(e.to_string(), &self.group)
                }
            },
        };
        Some(reply)
    }

    /// Format a reply for printing.
    pub fn format(&self, reply: &Reply) -> String {
        if self.json {
            serde_json::to_string(reply).unwrap_or_else(|e| {
                error!("Failed to serialize reply: {}", e);
                format!(r#"{{"status":"error","message":"{}"}}"#, e)
            })
        } else {
            reply.to_text()
        }
    }

    fn apply(&self, command: Command) -> Result<String, TimerError> {
        match command {
            Command::New { duration, label } => {
                let timer = self.create(&duration, label)?;
                Ok(format!(
                    "created timer {} ({})",
                    timer.id(),
                    duration::format(timer.original_ms() as i64)
                ))
            }
            Command::Remove(target) => {
                let timer = self.resolve(&target)?;
                let removed = self.group.delete_timer(Some(timer.id()))?;
                Ok(format!("deleted timer {}", removed.id()))
            }
            Command::Start(target) => {
                let timer = self.resolve(&target)?;
                timer.start()?;
                Ok(format!("timer {} is {}", name(&timer), timer.status().as_str()))
            }
            Command::Pause(target) => {
                let timer = self.resolve(&target)?;
                timer.pause();
                Ok(format!("timer {} is {}", name(&timer), timer.status().as_str()))
            }
            Command::Stop(target) => {
                let timer = self.resolve(&target)?;
                timer.stop();
                Ok(format!("timer {} is {}", name(&timer), timer.status().as_str()))
            }
            Command::Reset(target) => {
                let timer = self.resolve(&target)?;
                timer.reset()?;
                Ok(format!("timer {} reset to {}", name(&timer), timer.snapshot().display()))
            }
            Command::Add { duration, target } => {
                let timer = self.resolve(&target)?;
                timer.add(&duration)?;
                Ok(format!("timer {} now at {}", name(&timer), timer.snapshot().display()))
            }
            Command::Select(target) => {
                let timer = self.resolve(&target)?;
                self.group.set_current_timer(timer.id())?;
                Ok(format!("selected timer {}", name(&timer)))
            }
            Command::List | Command::Show | Command::Help | Command::Quit => Ok(String::new()),
        }
    }

    fn resolve(&self, target: &Target) -> Result<Timer, TimerError> {
        match target {
            Target::Current => self.group.require_current(),
            Target::Position(position) => position
                .checked_sub(1)
                .and_then(|index| self.group.timer_at(index))
                .ok_or_else(|| TimerError::TimerNotInGroup(format!("#{}", position))),
            Target::Id(id) => self.group.find(id),
        }
    }
}

fn name(timer: &Timer) -> String {
    timer
        .label()
        .map_or_else(|| timer.id().to_string(), str::to_string)
}
