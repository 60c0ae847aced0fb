//! Text progress bar rendered into a group's mount point

use super::{mount::MountPoint, strategy::Presentation};
use crate::{id::TimerId, timer::TimerSnapshot};

const DEFAULT_WIDTH: usize = 30;

/// Bar fill drops below this share and the time moves out of the bar.
const LOW_TIME_PCT: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    None,
    Paused,
    Stopped,
    Done,
}

/// A horizontal bar showing the remaining share of a timer
///
/// Layout: `name [#########.........] 01:30`, with a trailing marker once the
/// timer is paused, stopped or done.
#[derive(Debug, Clone)]
pub struct TextBar {
    width: usize,
    fill: char,
    empty: char,
    owner: Option<TimerId>,
    mount: Option<MountPoint>,
    marker: Marker,
    line: String,
}

impl TextBar {
    pub fn new() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            fill: '#',
            empty: '.',
            owner: None,
            mount: None,
            marker: Marker::None,
            line: String::new(),
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }

    pub fn with_chars(mut self, fill: char, empty: char) -> Self {
        self.fill = fill;
        self.empty = empty;
        self
    }

    /// The most recently rendered line.
    pub fn line(&self) -> &str {
        &self.line
    }

    fn render(&mut self, timer: &TimerSnapshot) {
        let pct = timer.remaining_pct();
        let filled = ((pct / 100.0) * self.width as f64).round() as usize;
        let bar: String = std::iter::repeat(self.fill)
            .take(filled.min(self.width))
            .chain(std::iter::repeat(self.empty).take(self.width - filled.min(self.width)))
            .collect();

        let time = timer.display();
        let mut line = if pct <= LOW_TIME_PCT {
            format!("{} [{}] {} !", timer.name(), bar, time)
        } else {
            format!("{} [{}] {}", timer.name(), bar, time)
        };
        match self.marker {
            Marker::None => {}
            Marker::Paused => line.push_str(" (paused)"),
            Marker::Stopped => line.push_str(" (stopped)"),
            Marker::Done => line.push_str(" (done)"),
        }

        self.line = line;
        if let (Some(mount), Some(owner)) = (&self.mount, &self.owner) {
            mount.write(owner, self.line.clone());
        }
    }
}

impl Default for TextBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Presentation for TextBar {
    fn generate(&mut self, timer: &TimerSnapshot) {
        self.owner = Some(timer.id.clone());
        self.marker = Marker::None;
        self.render(timer);
    }

    fn inject(&mut self, mount: &MountPoint) {
        if let Some(owner) = &self.owner {
            mount.attach(owner, self.line.clone());
        }
        self.mount = Some(mount.clone());
    }

    fn update(&mut self, timer: &TimerSnapshot) {
        self.render(timer);
    }

    fn reset(&mut self, timer: &TimerSnapshot) {
        self.marker = Marker::None;
        self.render(timer);
    }

    fn pause(&mut self, timer: &TimerSnapshot) {
        self.marker = Marker::Paused;
        self.render(timer);
    }

    fn stop(&mut self, timer: &TimerSnapshot) {
        self.marker = Marker::Stopped;
        self.render(timer);
    }

    fn done(&mut self, timer: &TimerSnapshot) {
        self.marker = Marker::Done;
        self.render(timer);
    }

    fn destroy(&mut self) {
        if let (Some(mount), Some(owner)) = (self.mount.take(), &self.owner) {
            mount.detach(owner);
        }
    }
}
