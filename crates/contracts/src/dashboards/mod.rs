pub mod d400_receivables;
pub mod d401_payables;
pub mod d402_inventory;
pub mod d403_sales;
pub mod d404_fulfillment;
pub mod d405_open_to_buy;
pub mod ledger;
