//! Headless session: the event loop that feeds the controller.
//!
//! Input lines (stdin in the binary) carry key presses (`s`, `Shift+Tab`,
//! `Space`, `[KeyQ]`), control messages as JSON (`{"cmd":"focus","arg":"right"}`)
//! and the session commands `status` and `quit`. Control messages go through
//! the named control channel so every subscriber sees them.

use crate::controller::Controller;
use crate::player::{HeadlessProvider, ReadyToken};
use crate::render::PageView;
use crate::scheduler::{TimerFired, TokioScheduler};
use anyhow::{Context, Result};
use spectate_config::Config;
use spectate_control::{ControlError, ControlHub, ControlMessage, ControlReceiver};
use spectate_keybindings::{KeyInput, parse_key_combo};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum InputLine {
    Key(KeyInput),
    Control(ControlMessage),
    Status,
    Quit,
    Empty,
}

impl InputLine {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Self::Empty);
        }
        if line.starts_with('{') {
            let message = ControlMessage::from_json(line)
                .with_context(|| format!("Invalid control message: {line}"))?;
            return Ok(Self::Control(message));
        }
        match line.to_ascii_lowercase().as_str() {
            "quit" | "exit" => return Ok(Self::Quit),
            "status" => return Ok(Self::Status),
            _ => {}
        }
        let text = line.strip_prefix("key ").unwrap_or(line);
        let combo = parse_key_combo(text).with_context(|| format!("Invalid key: {text}"))?;
        Ok(Self::Key(KeyInput::from_combo(&combo)))
    }
}

/// Session settings that are not part of the viewer configuration.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Rewrite this file with the page after every change
    pub html_out: Option<PathBuf>,
    /// End the session after this long, even with input still open
    pub exit_after: Option<Duration>,
    /// Print the view as JSON after every change
    pub echo_status: bool,
}

/// Outcome of a finished session.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    /// Events that changed the view
    pub changes: usize,
    pub final_view: PageView,
}

enum Event {
    Line(Option<String>),
    Timer(TimerFired),
    Ready(ReadyToken),
    Control(ControlMessage),
    Deadline,
}

/// Run a session until input ends (or the deadline passes) or `quit`.
///
/// Must run inside a tokio runtime.
pub async fn run_session<R>(
    config: &Config,
    hub: &ControlHub,
    input: R,
    options: &SessionOptions,
) -> Result<SessionSummary>
where
    R: AsyncBufRead + Unpin,
{
    let (timer_tx, mut timer_rx) = mpsc::unbounded_channel();
    let (ready_tx, mut ready_rx) = mpsc::unbounded_channel();
    let mut controller = Controller::new(
        config,
        HeadlessProvider::new(ready_tx),
        TokioScheduler::new(timer_tx),
    );

    let channel = match hub.open(&config.control_channel) {
        Ok(channel) => Some(channel),
        Err(ControlError::Unavailable(reason)) => {
            log::info!("Control channel disabled: {}", reason);
            None
        }
        Err(e) => return Err(e).context("Failed to open control channel"),
    };
    let mut control_rx = channel.as_ref().map(|c| c.subscribe());

    controller.start();
    publish_view(&controller, options)?;

    let deadline = options
        .exit_after
        .map(|after| tokio::time::Instant::now() + after);
    let mut lines = input.lines();
    let mut input_open = true;
    let mut changes = 0;

    loop {
        let event = tokio::select! {
            line = lines.next_line(), if input_open => {
                Event::Line(line.context("Failed to read input")?)
            }
            Some(fired) = timer_rx.recv() => Event::Timer(fired),
            Some(token) = ready_rx.recv() => Event::Ready(token),
            Some(message) = next_control(&mut control_rx) => Event::Control(message),
            _ = sleep_until(deadline) => Event::Deadline,
        };

        let changed = match event {
            Event::Line(None) => {
                input_open = false;
                if deadline.is_none() {
                    break;
                }
                false
            }
            Event::Line(Some(line)) => match InputLine::parse(&line) {
                Ok(InputLine::Quit) => break,
                Ok(InputLine::Empty) => false,
                Ok(InputLine::Status) => {
                    println!("{}", serde_json::to_string(controller.view())?);
                    false
                }
                Ok(InputLine::Key(key)) => {
                    let before = controller.state().clone();
                    controller.handle_key(&key);
                    *controller.state() != before
                }
                Ok(InputLine::Control(message)) => match &channel {
                    Some(channel) => {
                        channel.publish(message);
                        false
                    }
                    None => {
                        log::debug!("No control channel, dropping {:?}", message.cmd);
                        false
                    }
                },
                Err(e) => {
                    log::warn!("{:#}", e);
                    eprintln!("spectate: {e:#}");
                    false
                }
            },
            Event::Timer(fired) => controller.timer_fired(fired),
            Event::Ready(token) => controller.player_ready(token),
            Event::Control(message) => controller.handle_control(&message),
            Event::Deadline => {
                log::info!("Session time limit reached");
                break;
            }
        };

        if changed {
            changes += 1;
            publish_view(&controller, options)?;
        }
    }

    controller.shutdown();
    Ok(SessionSummary {
        changes,
        final_view: controller.view().clone(),
    })
}

async fn next_control(rx: &mut Option<ControlReceiver>) -> Option<ControlMessage> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

async fn sleep_until(deadline: Option<tokio::time::Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

fn publish_view<P, S>(controller: &Controller<P, S>, options: &SessionOptions) -> Result<()>
where
    P: crate::player::EmbedProvider,
    S: crate::scheduler::Scheduler,
{
    if let Some(path) = &options.html_out {
        std::fs::write(path, controller.render_html())
            .with_context(|| format!("Failed to write page to {}", path.display()))?;
    }
    if options.echo_status {
        println!("{}", serde_json::to_string(controller.view())?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lines() {
        assert_eq!(InputLine::parse("  ").unwrap(), InputLine::Empty);
        assert_eq!(InputLine::parse("# comment").unwrap(), InputLine::Empty);
        assert_eq!(InputLine::parse("QUIT").unwrap(), InputLine::Quit);
        assert_eq!(InputLine::parse("status").unwrap(), InputLine::Status);
        assert_eq!(
            InputLine::parse("s").unwrap(),
            InputLine::Key(KeyInput::new("s"))
        );
        assert_eq!(
            InputLine::parse("key Space").unwrap(),
            InputLine::Key(KeyInput::new(" "))
        );
        assert_eq!(
            InputLine::parse(r#"{"cmd":"swap"}"#).unwrap(),
            InputLine::Control(ControlMessage::new("swap"))
        );
    }

    #[test]
    fn test_parse_bad_lines() {
        assert!(InputLine::parse("{not json").is_err());
        assert!(InputLine::parse("Ctrl+Alt").is_err());
    }
}
