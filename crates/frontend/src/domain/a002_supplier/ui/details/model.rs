use crate::shared::api::{self, ApiError};
use contracts::domain::a002_supplier::aggregate::{Supplier, SupplierDto};
use contracts::domain::common::Resource;

pub async fn fetch_by_id(id: &str) -> Result<Supplier, ApiError> {
    api::fetch_one(Supplier::endpoint(), id).await
}

/// PATCH when the form carries an id, POST otherwise.
pub async fn save_form(dto: &SupplierDto) -> Result<Supplier, ApiError> {
    match dto.id.as_deref().filter(|id| !id.is_empty()) {
        Some(id) => api::patch_json(Supplier::endpoint(), id, dto).await,
        None => api::post_json(Supplier::endpoint(), dto).await,
    }
}

pub async fn delete_by_id(id: &str) -> Result<(), ApiError> {
    api::delete(Supplier::endpoint(), id).await
}
