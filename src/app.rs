//! Root application module.
//!
//! Holds the [`AppContext`] shared by every component and the [`App`]
//! root with its error boundary.

use leptos::prelude::*;

use crate::components::Terminal;
use crate::core::remote::GitHubRemote;
use crate::core::{Session, SessionConfig};

// ============================================================================
// AppContext
// ============================================================================

/// Global state provided at the root.
///
/// `Copy`, since both fields are arena handles.
#[derive(Clone, Copy)]
pub struct AppContext {
    /// The whole terminal session: shell, workspace, repository, editor.
    pub session: RwSignal<Session>,
    /// Hosting service used for `git push` and the link dialog.
    pub remote: StoredValue<GitHubRemote>,
}

impl AppContext {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            session: RwSignal::new(Session::new(config)),
            remote: StoredValue::new(GitHubRemote::default()),
        }
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

/// Root component: provides the context and renders the terminal.
#[component]
pub fn App() -> impl IntoView {
    provide_context(AppContext::default());

    view! {
        <ErrorBoundary
            fallback=|errors| view! {
                <div style="
                    display: flex;
                    flex-direction: column;
                    align-items: center;
                    justify-content: center;
                    height: 100vh;
                    padding: 2rem;
                    background: #0d1117;
                    color: #c9d1d9;
                    font-family: 'JetBrains Mono', monospace;
                ">
                    <h1 style="color: #f85149; margin-bottom: 1rem;">
                        "The terminal crashed"
                    </h1>
                    <ul style="color: #f85149; font-size: 0.9rem;">
                        {move || errors.get()
                            .into_iter()
                            .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                            .collect::<Vec<_>>()
                        }
                    </ul>
                    <button
                        on:click=move |_| {
                            if let Some(window) = web_sys::window() {
                                let _ = window.location().reload();
                            }
                        }
                        style="
                            background: #238636;
                            color: white;
                            border: none;
                            padding: 0.6rem 1.5rem;
                            border-radius: 4px;
                            cursor: pointer;
                        "
                    >
                        "Reload"
                    </button>
                </div>
            }
        >
            <Terminal />
        </ErrorBoundary>
    }
}
