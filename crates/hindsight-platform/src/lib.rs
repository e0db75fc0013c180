//! Platform runners (headless: frames as text, clicks by label)
//!

mod common;
mod config;
mod error;

pub use config::HeadlessConfig;
pub use error::PlatformError;

use std::io::{BufRead, Write};

use hindsight_core::*;
use hindsight_ui::layout_and_paint;

/// Owns one mounted root component and the last frame it produced.
///
/// Frames are only recomposed when the scheduler has been invalidated (a
/// signal written by a click handler, or `request_frame`); otherwise
/// `frame` hands back the cached one.
pub struct Headless {
    root: Box<dyn FnMut(&mut Scheduler) -> View>,
    sched: Scheduler,
    frame_cache: Option<Frame>,
    config: HeadlessConfig,
    events: usize,
}

impl Headless {
    pub fn new(root: impl FnMut(&mut Scheduler) -> View + 'static) -> Self {
        Self::with_config(root, HeadlessConfig::default())
    }

    pub fn with_config(
        root: impl FnMut(&mut Scheduler) -> View + 'static,
        config: HeadlessConfig,
    ) -> Self {
        Self {
            root: Box::new(root),
            sched: Scheduler::new(),
            frame_cache: None,
            config,
            events: 0,
        }
    }

    pub fn config(&self) -> &HeadlessConfig {
        &self.config
    }

    /// Number of dispatched clicks.
    pub fn events(&self) -> usize {
        self.events
    }

    pub fn frames_rendered(&self) -> u64 {
        self.sched.frame_no()
    }

    pub fn is_mounted(&self) -> bool {
        self.sched.is_mounted()
    }

    /// The current frame, recomposing first if anything invalidated it.
    pub fn frame(&mut self) -> Result<&Frame, PlatformError> {
        let frame = match self.frame_cache.take() {
            Some(frame) if !self.sched.needs_recompose() => frame,
            _ => self.sched.repose(&mut self.root, layout_and_paint)?,
        };
        Ok(self.frame_cache.insert(frame))
    }

    pub fn text(&mut self) -> Result<String, PlatformError> {
        Ok(self.frame()?.text())
    }

    /// Forces the next `frame` call to recompose.
    pub fn request_frame(&self) {
        self.sched.invalidator().invalidate();
    }

    /// Clicks the first button whose label matches `label`.
    pub fn click(&mut self, label: &str) -> Result<(), PlatformError> {
        let on_click = {
            let frame = self.frame()?;
            let idx = common::hit_index_by_label(frame, label)
                .ok_or_else(|| PlatformError::NoSuchTarget(label.to_string()))?;
            frame.hit_regions[idx].on_click.clone()
        };
        self.dispatch(label, on_click);
        Ok(())
    }

    pub fn click_id(&mut self, id: ViewId) -> Result<(), PlatformError> {
        let (label, on_click) = {
            let frame = self.frame()?;
            let idx = common::hit_index_by_id(frame, id)
                .ok_or_else(|| PlatformError::NoSuchTarget(id.to_string()))?;
            let hit = &frame.hit_regions[idx];
            (hit.label.clone(), hit.on_click.clone())
        };
        self.dispatch(&label, on_click);
        Ok(())
    }

    fn dispatch(&mut self, label: &str, on_click: Option<Callback>) {
        match on_click {
            Some(cb) => {
                log::debug!("click '{label}'");
                cb();
                self.events += 1;
            }
            None => log::debug!("click '{label}' ignored: control is disabled"),
        }
    }

    /// Tears the component down; cleanups run and state is dropped.
    pub fn unmount(&mut self) {
        self.frame_cache = None;
        self.sched.unmount();
    }
}

enum Command<'a> {
    Render,
    Quit,
    Click(&'a str),
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Self {
        match line {
            "render" => Command::Render,
            "quit" | "exit" => Command::Quit,
            label => Command::Click(label),
        }
    }
}

fn write_frame(out: &mut impl Write, frame: &Frame, separator: Option<&str>) -> std::io::Result<()> {
    if let Some(sep) = separator {
        writeln!(out, "{sep}")?;
    }
    writeln!(out, "{}", frame.scene)
}

/// Runs `root` headlessly. Every non-empty input line is a button label to
/// click, `render`, or `quit`.
pub fn run_headless_app(
    root: impl FnMut(&mut Scheduler) -> View + 'static,
    input: impl BufRead,
    mut output: impl Write,
    config: HeadlessConfig,
) -> anyhow::Result<()> {
    let separator = config.separator.clone();
    let echo = config.echo_frames;
    let max_events = config.max_events;
    let mut app = Headless::with_config(root, config);

    write_frame(&mut output, app.frame()?, None)?;

    let mut handled = 0usize;
    for line in input.lines() {
        let line = line?;
        let cmd = line.trim();
        if cmd.is_empty() {
            continue;
        }
        match Command::parse(cmd) {
            Command::Quit => {
                log::info!("quit requested");
                break;
            }
            Command::Render => {}
            Command::Click(label) => match app.click(label) {
                Ok(()) => {}
                Err(PlatformError::NoSuchTarget(target)) => {
                    log::warn!("unknown control '{target}'");
                    writeln!(output, "no such control: {target}")?;
                    continue;
                }
                Err(e) => return Err(e.into()),
            },
        }

        handled += 1;
        if echo {
            write_frame(&mut output, app.frame()?, separator.as_deref())?;
        }
        if max_events.is_some_and(|max| handled >= max) {
            log::info!("stopping after {handled} event(s)");
            break;
        }
    }

    output.flush()?;
    app.unmount();
    Ok(())
}
