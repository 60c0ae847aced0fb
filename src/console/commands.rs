//! Line-oriented command parsing

use crate::id::TimerId;

/// Which timer a command applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// The group's current selection.
    Current,
    /// 1-based position as shown by `list`.
    Position(usize),
    /// Timer id string.
    Id(String),
}

impl Target {
    fn parse(arg: Option<&str>) -> Self {
        match arg {
            None => Self::Current,
            // Short numbers are positions; anything id-length is an id.
            Some(arg) => match arg.parse::<usize>() {
                Ok(position) if arg.len() < TimerId::LEN => Self::Position(position),
                _ => Self::Id(arg.to_string()),
            },
        }
    }
}

/// A host command, one per input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a timer and select it.
    New {
        duration: String,
        label: Option<String>,
    },
    /// Delete a timer.
    Remove(Target),
    Start(Target),
    Pause(Target),
    Stop(Target),
    Reset(Target),
    /// Grant extra time.
    Add {
        duration: String,
        target: Target,
    },
    Select(Target),
    List,
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  new <MM:SS> [label]    create a timer and select it
  rm [timer]             delete a timer (default: current)
  start|pause|stop|reset [timer]
  add <MM:SS> [timer]    grant extra time
  select <timer>         make a timer current
  list                   list timers
  show                   draw progress bars
  help | quit
[timer] is a 1-based position from `list` or a timer id";

impl Command {
    /// Parse one input line. Blank lines parse to `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let rest: Vec<&str> = words.collect();

        let command = match verb.to_lowercase().as_str() {
            "new" | "n" => {
                let (duration, label) = rest
                    .split_first()
                    .ok_or_else(|| "usage: new <MM:SS> [label]".to_string())?;
                let label = (!label.is_empty()).then(|| label.join(" "));
                Self::New {
                    duration: duration.to_string(),
                    label,
                }
            }
            "rm" | "delete" => Self::Remove(Self::single_target(verb, &rest)?),
            "start" | "s" => Self::Start(Self::single_target(verb, &rest)?),
            "pause" | "p" => Self::Pause(Self::single_target(verb, &rest)?),
            "stop" => Self::Stop(Self::single_target(verb, &rest)?),
            "reset" | "r" => Self::Reset(Self::single_target(verb, &rest)?),
            "add" | "a" => match rest.as_slice() {
                [duration] => Self::Add {
                    duration: duration.to_string(),
                    target: Target::Current,
                },
                [duration, target] => Self::Add {
                    duration: duration.to_string(),
                    target: Target::parse(Some(*target)),
                },
                _ => return Err("usage: add <MM:SS> [timer]".to_string()),
            },
            "select" | "sel" => match rest.as_slice() {
                [target] => Self::Select(Target::parse(Some(*target))),
                _ => return Err("usage: select <timer>".to_string()),
            },
            "list" | "ls" => Self::List,
            "show" => Self::Show,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(format!("unknown command '{}', try 'help'", other)),
        };
        Ok(Some(command))
    }

    fn single_target(verb: &str, rest: &[&str]) -> Result<Target, String> {
        match rest {
            [] => Ok(Target::Current),
            [target] => Ok(Target::parse(Some(*target))),
            _ => Err(format!("usage: {} [timer]", verb)),
        }
    }
}
