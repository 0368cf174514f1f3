//! Headless sessions driven through the tokio event loop.

use spectate::SlotId;
use spectate::app::{SessionOptions, run_session};
use spectate_config::{Config, LayoutMode};
use spectate_control::{ControlHub, ControlMessage};
use std::time::Duration;
use tempfile::TempDir;

fn config(channels: &str) -> Config {
    Config::new().with_channels(channels)
}

fn until(after: Duration) -> SessionOptions {
    SessionOptions {
        exit_after: Some(after),
        ..SessionOptions::default()
    }
}

#[tokio::test(start_paused = true)]
async fn test_keys_from_input() {
    let hub = ControlHub::new();
    let input: &[u8] = b"2\nb\n";
    let summary = run_session(
        &config("twitch:a,twitch:b"),
        &hub,
        input,
        &SessionOptions::default(),
    )
    .await
    .unwrap();
    assert_eq!(summary.final_view.mode, LayoutMode::Both);
    assert_eq!(summary.final_view.focus, 1);
}

#[tokio::test(start_paused = true)]
async fn test_quit_stops_reading() {
    let hub = ControlHub::new();
    let input: &[u8] = b"2\nquit\nb\n";
    let summary = run_session(
        &config("twitch:a,twitch:b"),
        &hub,
        input,
        &SessionOptions::default(),
    )
    .await
    .unwrap();
    assert_eq!(summary.final_view.mode, LayoutMode::Focus);
}

#[tokio::test(start_paused = true)]
async fn test_control_line_goes_through_channel() {
    let hub = ControlHub::new();
    let input: &[u8] = b"{\"cmd\":\"swap\"}\n";
    let summary = run_session(
        &config("twitch:a,twitch:b"),
        &hub,
        input,
        &until(Duration::from_secs(1)),
    )
    .await
    .unwrap();
    assert_eq!(summary.final_view.focus, 1);
    assert_eq!(summary.final_view.audio, Some(SlotId::RIGHT));
}

#[tokio::test(start_paused = true)]
async fn test_control_panel_in_another_task() {
    let hub = ControlHub::new();
    let panel = hub.open("spectate-control").unwrap();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        panel.publish(ControlMessage::new("mode").with_arg("both"));
        panel.publish(ControlMessage::new("audio").with_arg("right"));
    });

    let input: &[u8] = b"";
    let summary = run_session(
        &config("twitch:a,twitch:b"),
        &hub,
        input,
        &until(Duration::from_secs(2)),
    )
    .await
    .unwrap();
    assert_eq!(summary.final_view.mode, LayoutMode::Both);
    assert_eq!(summary.final_view.audio, Some(SlotId::RIGHT));
}

#[tokio::test(start_paused = true)]
async fn test_without_control_channel_messages_are_dropped() {
    let hub = ControlHub::unavailable();
    let input: &[u8] = b"{\"cmd\":\"focus\",\"arg\":\"right\"}\n";
    let summary = run_session(
        &config("twitch:a,twitch:b"),
        &hub,
        input,
        &until(Duration::from_secs(1)),
    )
    .await
    .unwrap();
    assert_eq!(summary.final_view.focus, 0);
}

#[tokio::test(start_paused = true)]
async fn test_default_audio_and_auto_cycle() {
    let hub = ControlHub::new();
    let input: &[u8] = b"";
    let summary = run_session(
        &config("twitch:a,twitch:b,twitch:c").with_cycle(5),
        &hub,
        input,
        &until(Duration::from_millis(5_500)),
    )
    .await
    .unwrap();
    // Default audio went to the focused pane at 750ms, then one tick at 5s
    assert_eq!(summary.final_view.focus, 1);
    assert_eq!(summary.final_view.audio, Some(SlotId::LEFT));
    assert!(summary.final_view.cycle_enabled);
    assert!(summary.final_view.panes.iter().all(|pane| pane.ready));
}

#[tokio::test(start_paused = true)]
async fn test_huge_cycle_interval_keeps_session_alive() {
    let hub = ControlHub::new();
    let from_query = config("twitch:a,twitch:b").with_query("cycle=18446744073709551615");
    let summary = run_session(&from_query, &hub, &b""[..], &until(Duration::from_secs(2)))
        .await
        .unwrap();
    assert!(!summary.final_view.cycle_enabled);

    let from_file =
        Config::from_yaml("channels: twitch:a,twitch:b\ncycle: 18446744073709551615\n").unwrap();
    let summary = run_session(&from_file, &hub, &b"2\n"[..], &until(Duration::from_secs(2)))
        .await
        .unwrap();
    assert!(summary.final_view.cycle_enabled);
    assert_eq!(summary.final_view.focus, 1);
}

#[tokio::test(start_paused = true)]
async fn test_page_written_to_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("page.html");
    let options = SessionOptions {
        html_out: Some(path.clone()),
        ..SessionOptions::default()
    };
    let hub = ControlHub::new();
    let input: &[u8] = b"b\n";
    run_session(&config("twitch:a,url:https://x.example/p"), &hub, input, &options)
        .await
        .unwrap();

    let html = std::fs::read_to_string(&path).unwrap();
    assert!(html.contains("layout-both"));
    assert!(html.contains("https://player.twitch.tv/?channel=a&amp;parent=localhost"));
    assert!(html.contains("<div class=\"badge\">x.example</div>"));
}

#[tokio::test(start_paused = true)]
async fn test_bad_lines_do_not_end_session() {
    let hub = ControlHub::new();
    let input: &[u8] = b"Ctrl+Alt\n{oops\n2\n";
    let summary = run_session(
        &config("twitch:a,twitch:b"),
        &hub,
        input,
        &SessionOptions::default(),
    )
    .await
    .unwrap();
    assert_eq!(summary.final_view.focus, 1);
}
