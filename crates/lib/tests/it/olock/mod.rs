mod concurrency;
pub mod helpers;
