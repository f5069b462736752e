//! End-to-end push flow against the in-memory remote.

use hdl_studio::core::error::RemoteError;
use hdl_studio::core::remote::{Credential, MockRemote, link_remote};
use hdl_studio::core::{Effect, Key, Session, SessionConfig};
use hdl_studio::models::Focus;

fn session() -> Session {
    Session::new(SessionConfig {
        banner: false,
        ..SessionConfig::default()
    })
}

fn run(session: &mut Session, line: &str) -> Option<Effect> {
    session.submit(line).effect
}

fn scrollback(session: &Session) -> Vec<String> {
    session.shell().lines().map(|l| l.content()).collect()
}

fn committed_session() -> Session {
    let mut s = session();
    for line in ["git init", "git add .", "git commit -m \"Initial commit\""] {
        assert!(run(&mut s, line).is_none(), "{line} produced an effect");
    }
    s
}

/// Push without a remote, then link through the dialog.
async fn linked_session(remote: &MockRemote) -> Session {
    let mut s = committed_session();
    assert_eq!(run(&mut s, "git push"), Some(Effect::OpenLinkDialog));
    assert_eq!(s.focus(), Focus::LinkDialog);

    let credential = Credential::new(MockRemote::TOKEN, "ada", "hdl-workspace");
    let result = link_remote(remote, credential).await;
    s.complete_link(result).unwrap();
    assert_eq!(s.focus(), Focus::Shell);
    s
}

#[tokio::test]
async fn test_push_uploads_workspace() {
    let remote = MockRemote::new();
    let mut s = linked_session(&remote).await;

    let Some(Effect::Push(task)) = run(&mut s, "git push") else {
        panic!("expected a push effect");
    };
    assert!(s.push_in_flight());
    let result = task.run(&remote).await;
    s.complete_push(result);
    assert!(!s.push_in_flight());

    let pushes = remote.pushes();
    assert_eq!(pushes.len(), 1);
    assert_eq!(pushes[0].message, "Initial commit");
    assert_eq!(pushes[0].url, MockRemote::url_for("ada", "hdl-workspace"));
    let paths: Vec<_> = pushes[0].files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(
        paths,
        vec!["counter.v", "counter_tb.v", "README.md", "GIT_GUIDE.md"]
    );

    let lines = scrollback(&s);
    assert!(lines.contains(&"✓ Connected to GitHub as ada".to_string()));
    assert!(lines.contains(&format!(
        "✓ Successfully pushed to {}",
        MockRemote::url_for("ada", "hdl-workspace")
    )));
}

#[tokio::test]
async fn test_edited_file_is_pushed() {
    let remote = MockRemote::new();
    let mut s = linked_session(&remote).await;

    run(&mut s, "vim notes.txt");
    assert_eq!(s.focus(), Focus::Editor);
    for key in [Key::Char('i'), Key::Char('h'), Key::Char('i'), Key::Escape] {
        s.handle_key(key);
    }
    for c in ":wq".chars() {
        s.handle_key(Key::Char(c));
    }
    s.handle_key(Key::Enter);
    assert_eq!(s.focus(), Focus::Shell);
    assert_eq!(s.fs().read("notes.txt"), Some("hi"));

    run(&mut s, "git add notes.txt");
    run(&mut s, "git commit -m \"Add notes\"");
    let Some(Effect::Push(task)) = run(&mut s, "git push") else {
        panic!("expected a push effect");
    };
    s.complete_push(task.run(&remote).await);

    let pushed = &remote.pushes()[0];
    assert_eq!(pushed.message, "Add notes");
    assert!(
        pushed
            .files
            .iter()
            .any(|f| f.path == "notes.txt" && f.content == "hi")
    );
}

#[tokio::test]
async fn test_failed_push_reports_error() {
    let remote = MockRemote::failing(RemoteError::Transport("offline".to_string()));
    let mut s = linked_session(&remote).await;

    let Some(Effect::Push(task)) = run(&mut s, "git push") else {
        panic!("expected a push effect");
    };
    s.complete_push(task.run(&remote).await);

    assert!(remote.pushes().is_empty());
    assert!(!s.push_in_flight());
    let last_error = s
        .shell()
        .lines()
        .filter(|l| l.is_error())
        .last()
        .map(|l| l.content());
    assert_eq!(
        last_error.as_deref(),
        Some("error: failed to push to GitHub: Network error: offline")
    );
}

#[tokio::test]
async fn test_bad_token_keeps_dialog_open() {
    let remote = MockRemote::new();
    let mut s = committed_session();
    run(&mut s, "git push");

    let result = link_remote(&remote, Credential::new("ghp_wrong", "ada", "hdl-workspace")).await;
    assert_eq!(s.complete_link(result), Err(RemoteError::Unauthorized));
    assert_eq!(s.focus(), Focus::LinkDialog);
    assert!(s.repo().remote().is_none());

    s.cancel_link();
    assert_eq!(s.focus(), Focus::Shell);
    assert!(scrollback(&s).contains(&"GitHub authentication cancelled".to_string()));
    // Pushing again reopens the dialog
    assert_eq!(run(&mut s, "git push"), Some(Effect::OpenLinkDialog));
}

#[tokio::test]
async fn test_missing_fields_never_reach_remote() {
    let remote = MockRemote::new();
    let result = link_remote(&remote, Credential::new(MockRemote::TOKEN, "  ", "repo")).await;
    assert!(matches!(result, Err(RemoteError::MissingField)));
    assert_eq!(remote.link_attempts(), 0);
}

#[tokio::test]
async fn test_second_push_refused_while_in_flight() {
    let remote = MockRemote::new();
    let mut s = linked_session(&remote).await;

    let Some(Effect::Push(task)) = run(&mut s, "git push") else {
        panic!("expected a push effect");
    };
    assert_eq!(run(&mut s, "git push"), None);
    assert!(scrollback(&s).contains(&"error: a push is already in progress".to_string()));

    s.complete_push(task.run(&remote).await);
    assert_eq!(remote.pushes().len(), 1);
}
