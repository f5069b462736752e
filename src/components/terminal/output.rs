use crate::models::{OutputLine, OutputLineData};
use leptos::prelude::*;

stylance::import_crate_style!(css, "src/components/terminal/output.module.css");

#[component]
pub fn Output(line: OutputLine) -> impl IntoView {
    let (class, text) = match line.data {
        OutputLineData::Command { prompt, input } => {
            return view! {
                <div class=css::command>
                    <span class=css::textGreen>{prompt}</span>
                    <span class=css::textDim>"$ "</span>
                    <span class=css::textFg>{input}</span>
                </div>
            }
            .into_any();
        }
        OutputLineData::Empty => {
            return view! { <div class=css::lineEmpty></div> }.into_any();
        }
        OutputLineData::Text(text) => (css::textFg, text),
        OutputLineData::Error(text) => (css::textRed, text),
        OutputLineData::Success(text) => (css::textGreen, text),
        OutputLineData::Info(text) => (css::textYellow, text),
    };

    view! {
        <div class=format!("{} {}", css::line, class)>{text}</div>
    }
    .into_any()
}
