pub mod dashboard;
pub mod leads;
pub mod pipeline;
pub mod sync;
