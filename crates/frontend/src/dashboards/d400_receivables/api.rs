use crate::shared::api::{fetch_listing, Listing};
use contracts::domain::a008_proforma_invoice::aggregate::ProformaInvoice;
use contracts::domain::common::Resource;

/// Every proforma invoice; the summary needs the whole ledger.
pub async fn load_invoices(take: usize) -> Listing<ProformaInvoice> {
    fetch_listing(ProformaInvoice::endpoint(), take).await
}
