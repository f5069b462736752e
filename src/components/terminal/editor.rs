//! Full-screen view of the modal editor.

use leptos::prelude::*;

use crate::core::Session;
use crate::core::editor::{EditorMode, EditorSession, Position};

stylance::import_crate_style!(css, "src/components/terminal/editor.module.css");

/// Splits a line around the cursor column: before, under, after.
fn split_at_cursor(line: &str, col: usize) -> (String, String, String) {
    let before: String = line.chars().take(col).collect();
    let mut rest = line.chars().skip(col);
    let under = rest.next().map_or_else(|| "\u{00a0}".to_string(), String::from);
    (before, under, rest.collect())
}

fn render_line(index: usize, text: String, cursor: Position) -> AnyView {
    if index != cursor.line {
        return view! { <div class=css::line>{text}</div> }.into_any();
    }
    let (before, under, after) = split_at_cursor(&text, cursor.col);
    view! {
        <div class=format!("{} {}", css::line, css::current)>
            {before}
            <span class=css::cursor>{under}</span>
            {after}
        </div>
    }
    .into_any()
}

/// Left side of the status bar: the pending `:` command or the message.
fn status_text(editor: &EditorSession) -> String {
    match editor.mode() {
        EditorMode::Command => format!(":{}", editor.command_text()),
        _ => editor.status().to_string(),
    }
}

/// Right side of the status bar: mode, cursor position and percentage.
fn position_text(editor: &EditorSession) -> String {
    format!(
        "{}  {}  {}%",
        editor.mode().as_str(),
        editor.position_label(),
        editor.percent()
    )
}

#[component]
pub fn EditorView(session: RwSignal<Session>) -> impl IntoView {
    let lines = move || {
        session.with(|s| {
            s.editor()
                .map(|e| (e.buffer().lines().to_vec(), e.cursor()))
                .unwrap_or_default()
        })
    };
    let status = move || session.with(|s| s.editor().map(status_text).unwrap_or_default());
    let position = move || session.with(|s| s.editor().map(position_text).unwrap_or_default());
    let title = move || {
        session.with(|s| {
            s.editor()
                .map(|e| {
                    let marker = if e.is_dirty() { " [+]" } else { "" };
                    format!("{}{}", e.path(), marker)
                })
                .unwrap_or_default()
        })
    };

    view! {
        <div class=css::editor>
            <div class=css::title>{title}</div>
            <div class=css::buffer>
                {move || {
                    let (text, cursor) = lines();
                    text.into_iter()
                        .enumerate()
                        .map(|(i, line)| render_line(i, line, cursor))
                        .collect_view()
                }}
            </div>
            <div class=css::statusBar>
                <span class=css::status>{status}</span>
                <span class=css::position>{position}</span>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_at_cursor() {
        assert_eq!(
            split_at_cursor("module", 2),
            ("mo".to_string(), "d".to_string(), "ule".to_string())
        );
    }

    #[test]
    fn test_split_past_end_shows_block() {
        let (before, under, after) = split_at_cursor("ab", 2);
        assert_eq!(before, "ab");
        assert_eq!(under, "\u{00a0}");
        assert!(after.is_empty());
    }

    #[test]
    fn test_status_text_in_command_mode() {
        let mut editor = EditorSession::open("counter.v", "module counter;");
        assert_eq!(status_text(&editor), "\"counter.v\" 1L");
        editor.handle_key(crate::core::Key::Char(':'));
        editor.handle_key(crate::core::Key::Char('w'));
        assert_eq!(status_text(&editor), ":w");
    }

    #[test]
    fn test_position_text_shows_mode() {
        let mut editor = EditorSession::open("counter.v", "module counter;\nendmodule");
        assert_eq!(position_text(&editor), "NORMAL  1,1  50%");
        editor.handle_key(crate::core::Key::Char('j'));
        editor.handle_key(crate::core::Key::Char('i'));
        assert_eq!(position_text(&editor), "INSERT  2,1  100%");
    }
}
