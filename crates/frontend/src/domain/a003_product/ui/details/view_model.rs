use super::model;
use crate::layout::NotificationService;
use contracts::domain::a003_product::aggregate::{margin_percent, ProductDto};
use contracts::domain::a006_collection::aggregate::Collection;
use leptos::prelude::*;
use leptos::task::spawn_local;

pub const PRODUCT_STATUSES: [&str; 3] = ["active", "draft", "discontinued"];

#[derive(Clone, Copy)]
pub struct ProductDetailsViewModel {
    pub form: RwSignal<ProductDto>,
    pub collections: RwSignal<Vec<Collection>>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
}

impl ProductDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(ProductDto {
                status: Some("draft".to_string()),
                ..Default::default()
            }),
            collections: RwSignal::new(Vec::new()),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.form.with(|f| f.id.is_some())
    }

    pub fn is_form_valid(&self) -> bool {
        self.form.with(|f| f.validate().is_ok())
    }

    /// Live margin for the entered price and cost
    pub fn margin(&self) -> Option<f64> {
        self.form.with(|f| margin_percent(f.price, f.cost))
    }

    pub fn load(&self, id: Option<String>, take: usize) {
        let collections = self.collections;
        spawn_local(async move {
            collections.set(model::fetch_collections(take).await);
        });

        let Some(existing_id) = id else {
            return;
        };
        let form = self.form;
        let error = self.error;
        spawn_local(async move {
            match model::fetch_by_id(&existing_id).await {
                Ok(product) => form.set(ProductDto::from(product)),
                Err(e) => error.set(Some(format!("Cannot load product: {}", e))),
            }
        });
    }

    pub fn save_command(&self, notifications: NotificationService, on_saved: Callback<()>) {
        let current = self.form.get_untracked();
        if let Err(message) = current.validate() {
            self.error.set(Some(message));
            return;
        }
        self.error.set(None);
        self.saving.set(true);

        let this = *self;
        spawn_local(async move {
            match model::save_form(&current).await {
                Ok(saved) => {
                    notifications.success(format!("Product {} saved", saved.sku));
                    on_saved.run(());
                }
                Err(e) => {
                    this.error.set(Some(e.to_string()));
                    notifications.error(format!("Cannot save product: {}", e));
                }
            }
            this.saving.set(false);
        });
    }
}
