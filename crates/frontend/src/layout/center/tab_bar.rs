//! Strip of open tabs above the content: click switches, the cross closes.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use leptos::ev;
use leptos::prelude::*;

#[component]
pub fn TabBar() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    view! {
        <div class="tab-bar">
            {move || {
                let tabs = ctx.opened.get();
                if tabs.is_empty() {
                    view! {
                        <div class="tab-bar__empty">"Pick a page in the sidebar"</div>
                    }.into_any()
                } else {
                    let active = ctx.active.get();
                    tabs.into_iter().map(|tab| {
                        let is_active = active.as_ref() == Some(&tab.key);
                        let key_for_switch = tab.key.clone();
                        let key_for_close = tab.key.clone();

                        view! {
                            <div
                                class="tab-bar__item"
                                class:tab-bar__item--active=is_active
                                on:click=move |_| ctx.activate_tab(&key_for_switch)
                            >
                                <span class="tab-bar__title">{tab.title.clone()}</span>
                                <button
                                    class="tab-bar__close"
                                    on:click=move |ev: ev::MouseEvent| {
                                        ev.stop_propagation();
                                        ctx.close_tab(&key_for_close);
                                    }
                                    title="Close"
                                >
                                    {icon("x")}
                                </button>
                            </div>
                        }
                    }).collect_view().into_any()
                }
            }}
        </div>
    }
}
