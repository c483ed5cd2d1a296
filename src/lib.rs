pub mod cli;
pub mod config;
pub mod harness;
pub mod probes;
pub mod report;
pub mod sample;
pub mod util;
