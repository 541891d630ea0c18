/// A REST resource the dashboard reads as a list.
///
/// Defines the identity of a record plus the static metadata the frontend needs
/// to build URLs, tab keys and titles.
pub trait Resource {
    // ============================================================================
    // Instance methods
    // ============================================================================

    /// Record ID as returned by the API
    fn id(&self) -> &str;

    /// Business code shown in tables and tab titles (e.g. "INV-2024-001")
    fn code(&self) -> &str;

    // ============================================================================
    // Resource metadata
    // ============================================================================

    /// Index of the resource in the system (e.g. "a001")
    fn aggregate_index() -> &'static str;

    /// Collection name (e.g. "customer")
    fn collection_name() -> &'static str;

    /// REST path without base URL (e.g. "/customers")
    fn endpoint() -> &'static str;

    /// Singular UI name
    fn element_name() -> &'static str;

    /// Plural UI name
    fn list_name() -> &'static str;

    // ============================================================================
    // Default implementations
    // ============================================================================

    /// Full system name (e.g. "a001_customer"), used as tab key
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }

    /// Tab key of the detail view of one record
    fn detail_key(id: &str) -> String {
        format!("{}_detail_{}", Self::full_name(), id)
    }

    /// REST path of one record
    fn item_endpoint(id: &str) -> String {
        format!("{}/{}", Self::endpoint(), id)
    }
}
