//! Integration Tests for the Reactor
//!
//! Full applications: events in through the handle, replies and change
//! notifications out, with the reactor running as its own task.

use std::time::Duration;

use tokio::time::timeout;

use lissacon::app::{App, AppEvent, AppHandle, ReplReply};
use lissacon::Config;

const WAIT: Duration = Duration::from_secs(10);

async fn reply(handle: &mut AppHandle) -> ReplReply {
    timeout(WAIT, handle.replies.recv())
        .await
        .expect("timed out waiting for a REPL reply")
        .expect("reply channel closed")
}

async fn shutdown(handle: &AppHandle, reactor: tokio::task::JoinHandle<()>) {
    handle.events.send(AppEvent::Shutdown).unwrap();
    timeout(WAIT, reactor)
        .await
        .expect("reactor did not stop")
        .expect("reactor task panicked");
}

#[tokio::test]
async fn test_repl_input_mutates_the_store() {
    let (app, mut handle) = App::new(Config::default());
    let reactor = tokio::spawn(app.run());

    handle
        .events
        .send(AppEvent::ReplInput {
            line: "set a 5".to_string(),
        })
        .unwrap();
    let reply = reply(&mut handle).await;
    assert_eq!(reply.prompt, ">>> ");
    assert_eq!(handle.context.snapshot().a, 5.0);

    shutdown(&handle, reactor).await;
}

#[tokio::test]
async fn test_ui_edit_notifies_subscribed_views() {
    let (app, handle) = App::new(Config::default());
    let mut changes = handle.context.subscribe();
    let reactor = tokio::spawn(app.run());

    handle
        .events
        .send(AppEvent::SetParam {
            name: "b".to_string(),
            value: 7.0,
        })
        .unwrap();
    let snapshot = timeout(WAIT, changes.recv()).await.unwrap().unwrap();
    assert_eq!(snapshot.b, 7.0);

    handle
        .events
        .send(AppEvent::ApplyPreset {
            name: "circle".to_string(),
        })
        .unwrap();
    let snapshot = timeout(WAIT, changes.recv()).await.unwrap().unwrap();
    assert_eq!(snapshot.a, 1.0);
    assert_eq!(snapshot.b, 1.0);

    shutdown(&handle, reactor).await;
}

#[tokio::test]
async fn test_rejected_edit_does_not_stop_the_reactor() {
    let (app, mut handle) = App::new(Config::default());
    let reactor = tokio::spawn(app.run());

    handle
        .events
        .send(AppEvent::SetParam {
            name: "bogus".to_string(),
            value: 1.0,
        })
        .unwrap();
    handle
        .events
        .send(AppEvent::ApplyPreset {
            name: "spiral".to_string(),
        })
        .unwrap();

    // The reactor is still serving REPL traffic afterwards.
    handle
        .events
        .send(AppEvent::ReplInput {
            line: "set delta 0.1".to_string(),
        })
        .unwrap();
    reply(&mut handle).await;
    assert_eq!(handle.context.snapshot().delta, 0.1);
    assert_eq!(handle.context.snapshot().a, 3.0);

    shutdown(&handle, reactor).await;
}

#[tokio::test]
async fn test_continuation_prompt_round_trip() {
    let (app, mut handle) = App::new(Config::default());
    let reactor = tokio::spawn(app.run());

    handle
        .events
        .send(AppEvent::ReplInput {
            line: "set a \\".to_string(),
        })
        .unwrap();
    assert_eq!(reply(&mut handle).await.prompt, "... ");

    handle
        .events
        .send(AppEvent::ReplInput {
            line: "8".to_string(),
        })
        .unwrap();
    assert_eq!(reply(&mut handle).await.prompt, ">>> ");
    assert_eq!(handle.context.snapshot().a, 8.0);

    shutdown(&handle, reactor).await;
}

#[tokio::test]
async fn test_repl_error_is_reported_in_the_delta() {
    let (app, mut handle) = App::new(Config::default());
    let reactor = tokio::spawn(app.run());

    handle
        .events
        .send(AppEvent::ReplInput {
            line: "frobnicate".to_string(),
        })
        .unwrap();
    let reply = reply(&mut handle).await;
    assert!(reply.delta.contains("ERROR: "));
    assert_eq!(reply.prompt, ">>> ");

    shutdown(&handle, reactor).await;
}

#[tokio::test]
async fn test_prompts_come_from_configuration() {
    let mut config = Config::default();
    config.repl.primary_prompt = "lc> ".to_string();
    config.repl.continuation_prompt = "..> ".to_string();

    let (app, mut handle) = App::new(config);
    let reactor = tokio::spawn(app.run());

    handle
        .events
        .send(AppEvent::ReplInput {
            line: "get a".to_string(),
        })
        .unwrap();
    let reply = reply(&mut handle).await;
    assert!(reply.delta.starts_with("lc> get a\n"));
    assert_eq!(reply.prompt, "lc> ");

    shutdown(&handle, reactor).await;
}

#[tokio::test]
async fn test_failed_launch_request_keeps_the_reactor_alive() {
    let mut config = Config::default();
    // Force interpreter resolution to a path that cannot exist.
    config.plugins.tclsh_candidates = vec!["/nonexistent/tclsh".to_string()];

    let (app, mut handle) = App::new(config);
    let reactor = tokio::spawn(app.run());

    handle
        .events
        .send(AppEvent::LaunchPlugin {
            kind: lissacon::plugin::PluginKind::Tk,
        })
        .unwrap();

    handle
        .events
        .send(AppEvent::ReplInput {
            line: "set b 4".to_string(),
        })
        .unwrap();
    reply(&mut handle).await;
    assert_eq!(handle.context.snapshot().b, 4.0);

    shutdown(&handle, reactor).await;
}
