pub mod summary;
pub mod table;
pub mod xlsx;
