//! Top bar: sidebar toggle, application title and today's date.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::date_utils::{format_date, today};
use crate::shared::icons::icon;
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let toggle_sidebar = move |_| {
        ctx.toggle_left();
    };

    let is_sidebar_visible = move || ctx.left_open.get();
    let today_label = format_date(&today().to_string());

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=toggle_sidebar
                    title=move || if is_sidebar_visible() { "Hide navigation" } else { "Show navigation" }
                >
                    {move || if is_sidebar_visible() {
                        icon("panel-left-close")
                    } else {
                        icon("panel-left-open")
                    }}
                </button>
                <span class="top-header__title">"Apparel Operations"</span>
            </div>

            <div class="top-header__actions">
                <div class="top-header__user">
                    {icon("calendar")}
                    <span>{today_label}</span>
                </div>
            </div>
        </div>
    }
}
