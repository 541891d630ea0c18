use crate::shared::api::{self, ApiError};
use contracts::domain::a003_product::aggregate::{Product, ProductDto};
use contracts::domain::a006_collection::aggregate::Collection;
use contracts::domain::common::Resource;

pub async fn fetch_by_id(id: &str) -> Result<Product, ApiError> {
    api::fetch_one(Product::endpoint(), id).await
}

/// Collections offered in the form's select.
pub async fn fetch_collections(take: usize) -> Vec<Collection> {
    api::fetch_list_or_empty(Collection::endpoint(), take).await
}

pub async fn save_form(dto: &ProductDto) -> Result<Product, ApiError> {
    match dto.id.as_deref().filter(|id| !id.is_empty()) {
        Some(id) => api::patch_json(Product::endpoint(), id, dto).await,
        None => api::post_json(Product::endpoint(), dto).await,
    }
}

pub async fn delete_by_id(id: &str) -> Result<(), ApiError> {
    api::delete(Product::endpoint(), id).await
}
