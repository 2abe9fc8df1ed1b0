//! sea-orm entities, one module per table.

pub mod customer;
pub mod delivery_line_item;
pub mod delivery_receipt;
pub mod employee;
pub mod ingredient;
pub mod menu_item;
pub mod purchase_order;
pub mod purchase_order_line;
pub mod release_line_item;
pub mod release_record;
pub mod sales_line_item;
pub mod sales_transaction;
pub mod supplier;
