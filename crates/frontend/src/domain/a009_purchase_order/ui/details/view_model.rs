use super::model;
use crate::layout::NotificationService;
use crate::shared::date_utils::today;
use contracts::domain::a002_supplier::aggregate::Supplier;
use contracts::domain::a006_collection::aggregate::Collection;
use contracts::domain::a009_purchase_order::aggregate::PurchaseOrderDto;
use leptos::prelude::*;
use leptos::task::spawn_local;

pub const PO_STATUSES: [&str; 5] = ["draft", "sent", "confirmed", "received", "cancelled"];

#[derive(Clone, Copy)]
pub struct PurchaseOrderDetailsViewModel {
    pub form: RwSignal<PurchaseOrderDto>,
    pub suppliers: RwSignal<Vec<Supplier>>,
    pub collections: RwSignal<Vec<Collection>>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
}

impl PurchaseOrderDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(PurchaseOrderDto {
                order_date: today().format("%Y-%m-%d").to_string(),
                status: Some("draft".to_string()),
                ..Default::default()
            }),
            suppliers: RwSignal::new(Vec::new()),
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

    /// Picks a supplier; the name is stored alongside the id.
    pub fn select_supplier(&self, supplier_id: String) {
        let name = self.suppliers.with_untracked(|list| {
            list.iter().find(|s| s.id == supplier_id).map(|s| s.name.clone())
        });
        self.form.update(|f| {
            f.supplier_id = Some(supplier_id).filter(|id| !id.is_empty());
            f.supplier_name = name;
        });
    }

    pub fn load(&self, id: Option<String>, take: usize) {
        let suppliers = self.suppliers;
        let collections = self.collections;
        spawn_local(async move {
            suppliers.set(model::fetch_suppliers(take).await);
            collections.set(model::fetch_collections(take).await);
        });

        let Some(existing_id) = id else {
            return;
        };
        let form = self.form;
        let error = self.error;
        spawn_local(async move {
            match model::fetch_by_id(&existing_id).await {
                Ok(po) => form.set(PurchaseOrderDto::from(po)),
                Err(e) => error.set(Some(format!("Cannot load purchase order: {}", e))),
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
                    notifications.success(format!("Purchase order {} saved", saved.po_number));
                    on_saved.run(());
                }
                Err(e) => {
                    this.error.set(Some(e.to_string()));
                    notifications.error(format!("Cannot save purchase order: {}", e));
                }
            }
            this.saving.set(false);
        });
    }
}
