//! Terminal view component.
//!
//! One focusable surface: keystrokes go to the session, which decides
//! whether the shell, the editor or the link dialog gets them.

use leptos::ev::KeyboardEvent;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::components::terminal::{EditorView, LinkDialog, Output};
use crate::core::{Effect as SessionEffect, Key};
use crate::models::Focus;

stylance::import_crate_style!(css, "src/components/terminal/terminal.module.css");

/// Carry out an effect returned by the session.
fn run_effect(ctx: AppContext, effect: SessionEffect) {
    match effect {
        SessionEffect::Push(task) => {
            let remote = ctx.remote.get_value();
            spawn_local(async move {
                let result = task.run(&remote).await;
                ctx.session.update(|s| s.complete_push(result));
            });
        }
        // The dialog is rendered from the session's focus
        SessionEffect::OpenLinkDialog => {}
    }
}

#[component]
pub fn Terminal() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    let session = ctx.session;

    let container_ref = NodeRef::<leptos::html::Div>::new();
    let output_ref = NodeRef::<leptos::html::Div>::new();

    // Keep the newest line in view
    Effect::new(move |_| {
        session.with(|s| s.shell().scrollback_len());
        if let Some(el) = output_ref.get() {
            el.set_scroll_top(el.scroll_height());
        }
    });

    // Refocus the surface whenever the shell or editor takes over again
    Effect::new(move |_| {
        let focus = session.with(|s| s.focus());
        if focus != Focus::LinkDialog
            && let Some(el) = container_ref.get()
        {
            let _ = el.focus();
        }
    });

    let on_keydown = move |ev: KeyboardEvent| {
        if ev.meta_key() || ev.alt_key() {
            return;
        }
        if session.with_untracked(|s| s.focus()) == Focus::LinkDialog {
            return;
        }
        let Some(key) = Key::from_dom(&ev.key(), ev.ctrl_key()) else {
            return;
        };
        ev.prevent_default();

        if let Some(effect) = session.try_update(|s| s.handle_key(key)).flatten() {
            run_effect(ctx, effect);
        }
    };

    let in_editor = move || session.with(|s| s.focus() == Focus::Editor);
    let linking = move || session.with(|s| s.focus() == Focus::LinkDialog);

    view! {
        <div
            node_ref=container_ref
            class=css::terminal
            tabindex="0"
            on:keydown=on_keydown
        >
            <Show
                when=in_editor
                fallback=move || view! {
                    <div node_ref=output_ref class=css::output>
                        <For
                            each=move || session.with(|s| s.shell().lines().cloned().collect::<Vec<_>>())
                            key=|line| line.id
                            children=move |line| view! { <Output line=line /> }
                        />
                        <div class=css::inputLine>
                            <span class=css::prompt>{move || session.with(|s| s.prompt())}</span>
                            <span class=css::dollar>"$ "</span>
                            <span class=css::input>
                                {move || session.with(|s| s.shell().input().to_string())}
                            </span>
                            <span class=css::cursor>"\u{00a0}"</span>
                        </div>
                    </div>
                }
            >
                <EditorView session=session />
            </Show>
            <Show when=linking>
                <LinkDialog />
            </Show>
        </div>
    }
}
