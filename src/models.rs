pub mod dashboard;
pub mod lead;
pub mod sync;
