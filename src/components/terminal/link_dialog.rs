//! Credential dialog shown when `git push` has no linked remote.

use leptos::ev::{MouseEvent, SubmitEvent};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::config::DEFAULT_REPO_NAME;
use crate::core::remote::{Credential, link_remote};

stylance::import_crate_style!(css, "src/components/terminal/link_dialog.module.css");

#[component]
pub fn LinkDialog() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");

    let token = RwSignal::new(String::new());
    let owner = RwSignal::new(String::new());
    let repository = RwSignal::new(DEFAULT_REPO_NAME.to_string());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let credential = Credential::new(
            token.get_untracked(),
            owner.get_untracked(),
            repository.get_untracked(),
        );
        let remote = ctx.remote.get_value();
        busy.set(true);
        error.set(None);

        spawn_local(async move {
            let result = link_remote(&remote, credential).await;
            busy.set(false);
            // On success the session drops focus and this dialog unmounts
            if let Some(Err(e)) = ctx.session.try_update(|s| s.complete_link(result)) {
                error.set(Some(e.to_string()));
            }
        });
    };

    let on_cancel = move |_: MouseEvent| ctx.session.update(|s| s.cancel_link());

    view! {
        <div class=css::overlay>
            <form class=css::dialog on:submit=on_submit>
                <h2 class=css::title>"Connect to GitHub"</h2>
                <p class=css::hint>
                    "A personal access token with the \"repo\" scope is needed to push."
                </p>
                <label class=css::label>
                    "Personal access token"
                    <input
                        class=css::field
                        type="password"
                        autocomplete="off"
                        autofocus=true
                        prop:value=move || token.get()
                        on:input=move |ev| token.set(event_target_value(&ev))
                    />
                </label>
                <label class=css::label>
                    "Owner"
                    <input
                        class=css::field
                        type="text"
                        placeholder="your-github-username"
                        prop:value=move || owner.get()
                        on:input=move |ev| owner.set(event_target_value(&ev))
                    />
                </label>
                <label class=css::label>
                    "Repository"
                    <input
                        class=css::field
                        type="text"
                        prop:value=move || repository.get()
                        on:input=move |ev| repository.set(event_target_value(&ev))
                    />
                </label>
                <Show when=move || error.with(Option::is_some)>
                    <p class=css::error>{move || error.get().unwrap_or_default()}</p>
                </Show>
                <div class=css::actions>
                    <button
                        type="button"
                        class=css::secondary
                        disabled=move || busy.get()
                        on:click=on_cancel
                    >
                        "Cancel"
                    </button>
                    <button type="submit" class=css::primary disabled=move || busy.get()>
                        {move || if busy.get() { "Connecting..." } else { "Connect" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
