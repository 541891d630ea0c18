//! Application shell: sidebar plus one `TabPage` per open tab.

use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use crate::layout::left::sidebar::Sidebar;
use crate::layout::tabs::TabPage;
use crate::layout::Shell;
use crate::shared::config::use_config;
use leptos::prelude::*;

/// Main layout; restores the active tab from `?active=...` once created.
#[component]
fn MainLayout() -> impl IntoView {
    let tabs_store = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    tabs_store.init_router_integration();

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=move || {
                view! {
                    <For
                        each=move || tabs_store.opened.get()
                        key=|tab| tab.key.clone()
                        children=move |tab: TabData| {
                            view! {
                                <TabPage tab=tab tabs_store=tabs_store />
                            }
                        }
                    />
                }.into_any()
            }
        />
    }
}

/// Shows the layout once configuration is loaded.
#[component]
pub fn AppShell() -> impl IntoView {
    let config = use_config();

    view! {
        <Show
            when=move || config.loaded.get()
            fallback=|| view! { <div class="app-loading">"Loading configuration..."</div> }
        >
            <MainLayout />
        </Show>
    }
}
