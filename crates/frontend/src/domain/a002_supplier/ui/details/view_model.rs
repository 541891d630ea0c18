use super::model;
use crate::layout::NotificationService;
use contracts::domain::a002_supplier::aggregate::SupplierDto;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// ViewModel for the supplier form
#[derive(Clone, Copy)]
pub struct SupplierDetailsViewModel {
    pub form: RwSignal<SupplierDto>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
}

impl SupplierDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(SupplierDto::new_active()),
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

    /// Loads the supplier when editing an existing one.
    pub fn load_if_needed(&self, id: Option<String>) {
        let Some(existing_id) = id else {
            return;
        };
        let form = self.form;
        let error = self.error;
        spawn_local(async move {
            match model::fetch_by_id(&existing_id).await {
                Ok(supplier) => form.set(SupplierDto::from(supplier)),
                Err(e) => error.set(Some(format!("Cannot load supplier: {}", e))),
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
                    notifications.success(format!("Supplier \"{}\" saved", saved.name));
                    on_saved.run(());
                }
                Err(e) => {
                    this.error.set(Some(e.to_string()));
                    notifications.error(format!("Cannot save supplier: {}", e));
                }
            }
            this.saving.set(false);
        });
    }
}
