pub mod file;
pub mod json_time;
pub mod math;
pub mod series;
pub mod structs;
pub mod summary;
