use crate::app_shell::AppShell;
use crate::domain::a012_production::store::ProductionStore;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::{ModalService, NotificationService};
use crate::shared::api::set_api_base;
use crate::shared::config::{load_config, ConfigContext};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppGlobalContext::new());
    provide_context(ModalService::new());
    provide_context(NotificationService::new());
    provide_context(ProductionStore::new());

    let config = ConfigContext::new();
    provide_context(config);

    // Pages fetch on mount, so the shell waits until the API base is known.
    spawn_local(async move {
        let loaded = load_config().await;
        set_api_base(&loaded.api.base_url);
        config.config.set(loaded);
        config.loaded.set(true);
    });

    view! {
        <AppShell />
    }
}
