pub mod a001_customer;
pub mod a002_supplier;
pub mod a003_product;
pub mod a004_warehouse;
pub mod a005_inventory;
pub mod a006_collection;
pub mod a007_order;
pub mod a008_proforma_invoice;
pub mod a009_purchase_order;
pub mod a010_size_chart;
pub mod a011_bom;
pub mod a012_production;
pub mod common;
