pub mod charts;
pub mod console;
