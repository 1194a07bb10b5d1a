mod basic_operations;
pub mod helpers;
