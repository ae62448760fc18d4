pub mod dash;
pub mod probe;
pub mod report;
