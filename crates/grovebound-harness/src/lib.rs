pub mod pilot;
pub mod report;
pub mod runner;
