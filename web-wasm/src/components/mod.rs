pub mod header;
pub mod field_list;
pub mod footer;
pub mod records_bar;
