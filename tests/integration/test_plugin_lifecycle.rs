//! Integration Tests for Plugin Lifecycle
//!
//! Real child processes driven through the plugin manager. The tests use
//! `sh` as the interpreter so they run anywhere, but the manager goes
//! through exactly the same path as the Tcl and tkinter helpers: write the
//! script to a temp file, spawn, stream, frame, tear down.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;

use lissacon::plugin::{LaunchSpec, PluginEvent, PluginKind, PluginManager};
use lissacon::protocol::ControlMessage;
use lissacon::store::ParamStore;

const WAIT: Duration = Duration::from_secs(10);

fn sh_spec(script: &str) -> LaunchSpec {
    LaunchSpec {
        command: "sh".to_string(),
        script: script.to_string(),
        suffix: ".sh".to_string(),
    }
}

/// Drain events until the helper exits, framing output through the manager
/// and applying every decoded message to the store.
async fn run_to_exit(
    manager: &mut PluginManager,
    rx: &mut mpsc::UnboundedReceiver<PluginEvent>,
    store: &mut ParamStore,
) -> Vec<ControlMessage> {
    let mut applied = Vec::new();
    loop {
        let event = timeout(WAIT, rx.recv())
            .await
            .expect("timed out waiting for plugin event")
            .expect("event channel closed");
        match event {
            PluginEvent::Output { kind, stream, data } => {
                for message in manager.on_output(kind, stream, &data) {
                    if store.apply_message(&message).is_ok() {
                        applied.push(message);
                    }
                }
            }
            PluginEvent::Exited { kind } => {
                manager.stop(kind);
                return applied;
            }
        }
    }
}

#[tokio::test]
async fn test_helper_output_is_applied_in_order() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut manager = PluginManager::new(tx);
    let mut store = ParamStore::new();

    let spec = sh_spec("echo 'SET a 1.5'\necho 'SET b 2.5'\necho 'PRESET star'\n");
    manager.launch(PluginKind::Tk, &spec, "").unwrap();
    assert!(manager.is_running(PluginKind::Tk));

    let applied = run_to_exit(&mut manager, &mut rx, &mut store).await;
    assert_eq!(
        applied,
        vec![
            ControlMessage::Set {
                name: "a".to_string(),
                value: 1.5
            },
            ControlMessage::Set {
                name: "b".to_string(),
                value: 2.5
            },
            ControlMessage::Preset {
                name: "star".to_string()
            },
        ]
    );
    // The preset won, since it applied last.
    assert_eq!(store.get("a").unwrap(), 5.0);
    assert_eq!(store.get("b").unwrap(), 6.0);
    assert!(!manager.is_running(PluginKind::Tk));
}

#[tokio::test]
async fn test_startup_args_reach_the_helper() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut manager = PluginManager::new(tx);
    let mut store = ParamStore::new();

    // The helper echoes its first startup argument back as a SET line,
    // the way the real sliders initialize from the snapshot.
    let spec = sh_spec("echo \"SET a $1\"\n");
    let args = lissacon::protocol::format_args(&store.snapshot());
    manager.launch(PluginKind::Tk, &spec, &args).unwrap();

    store.set("a", 9.0).unwrap();
    run_to_exit(&mut manager, &mut rx, &mut store).await;
    // Snapshot taken at launch said a=3; the round trip restored it.
    assert_eq!(store.get("a").unwrap(), 3.0);
}

#[tokio::test]
async fn test_second_launch_while_running_is_a_noop() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut manager = PluginManager::new(tx);

    let spec = sh_spec("echo 'SET a 1.0'\nsleep 30\n");
    manager.launch(PluginKind::Tk, &spec, "").unwrap();

    // Wait for the first output so the process is demonstrably live.
    let first = timeout(WAIT, rx.recv()).await.unwrap().unwrap();
    assert!(matches!(first, PluginEvent::Output { .. }));

    let other = sh_spec("echo 'SET a 2.0'\n");
    manager.launch(PluginKind::Tk, &other, "").unwrap();
    assert!(manager.is_running(PluginKind::Tk));

    // No output from the second script ever arrives.
    manager.stop(PluginKind::Tk);
    assert!(!manager.is_running(PluginKind::Tk));
}

#[tokio::test]
async fn test_independent_kinds_run_side_by_side() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut manager = PluginManager::new(tx);
    let mut store = ParamStore::new();

    manager
        .launch(PluginKind::Tk, &sh_spec("echo 'SET a 7.0'\n"), "")
        .unwrap();
    manager
        .launch(PluginKind::Tkinter, &sh_spec("echo 'SET b 8.0'\n"), "")
        .unwrap();
    assert!(manager.is_running(PluginKind::Tk));
    assert!(manager.is_running(PluginKind::Tkinter));

    // Two exits, one per kind, interleaved with their output.
    let mut exits = 0;
    while exits < 2 {
        let event = timeout(WAIT, rx.recv()).await.unwrap().unwrap();
        match event {
            PluginEvent::Output { kind, stream, data } => {
                for message in manager.on_output(kind, stream, &data) {
                    store.apply_message(&message).unwrap();
                }
            }
            PluginEvent::Exited { kind } => {
                manager.stop(kind);
                exits += 1;
            }
        }
    }
    assert_eq!(store.get("a").unwrap(), 7.0);
    assert_eq!(store.get("b").unwrap(), 8.0);
}

#[tokio::test]
async fn test_launch_failure_leaves_no_handle() {
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut manager = PluginManager::new(tx);

    let spec = LaunchSpec {
        command: "/nonexistent/interpreter".to_string(),
        script: "whatever".to_string(),
        suffix: ".sh".to_string(),
    };
    assert!(manager.launch(PluginKind::Tk, &spec, "").is_err());
    assert!(!manager.is_running(PluginKind::Tk));

    // The channel is reusable after a failed launch.
    manager
        .launch(PluginKind::Tk, &sh_spec("true\n"), "")
        .unwrap();
    assert!(manager.is_running(PluginKind::Tk));
    manager.stop(PluginKind::Tk);
}

#[tokio::test]
async fn test_stop_is_idempotent_and_kills_the_helper() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut manager = PluginManager::new(tx);

    manager
        .launch(PluginKind::Tkinter, &sh_spec("echo 'SET a 1.0'\nsleep 30\n"), "")
        .unwrap();
    let first = timeout(WAIT, rx.recv()).await.unwrap().unwrap();
    assert!(matches!(first, PluginEvent::Output { .. }));

    manager.stop(PluginKind::Tkinter);
    manager.stop(PluginKind::Tkinter);
    manager.stop_all();
    assert!(!manager.is_running(PluginKind::Tkinter));
}

#[tokio::test]
async fn test_noise_on_stderr_does_not_disturb_stdout_lines() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut manager = PluginManager::new(tx);
    let mut store = ParamStore::new();

    let spec = sh_spec("echo 'warning: no display' >&2\necho 'SET delta 0.5'\n");
    manager.launch(PluginKind::Tk, &spec, "").unwrap();

    let applied = run_to_exit(&mut manager, &mut rx, &mut store).await;
    assert_eq!(
        applied,
        vec![ControlMessage::Set {
            name: "delta".to_string(),
            value: 0.5
        }]
    );
}

#[tokio::test]
async fn test_unterminated_stderr_does_not_corrupt_stdout_framing() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut manager = PluginManager::new(tx);
    let mut store = ParamStore::new();

    // The diagnostic has no trailing newline and lands before the control
    // line; it must not glue itself onto the stdout frame.
    let spec = sh_spec("printf 'warning: partial' >&2\nsleep 1\necho 'SET a 9.0'\n");
    manager.launch(PluginKind::Tk, &spec, "").unwrap();

    let applied = run_to_exit(&mut manager, &mut rx, &mut store).await;
    assert_eq!(
        applied,
        vec![ControlMessage::Set {
            name: "a".to_string(),
            value: 9.0
        }]
    );
    assert_eq!(store.get("a").unwrap(), 9.0);
}

#[tokio::test]
async fn test_relaunch_after_exit() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut manager = PluginManager::new(tx);
    let mut store = ParamStore::new();

    manager
        .launch(PluginKind::Tk, &sh_spec("echo 'SET a 4.0'\n"), "")
        .unwrap();
    run_to_exit(&mut manager, &mut rx, &mut store).await;
    assert!(!manager.is_running(PluginKind::Tk));

    manager
        .launch(PluginKind::Tk, &sh_spec("echo 'SET a 6.0'\n"), "")
        .unwrap();
    run_to_exit(&mut manager, &mut rx, &mut store).await;
    assert_eq!(store.get("a").unwrap(), 6.0);
}
