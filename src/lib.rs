pub mod cli;
pub mod commands;
pub mod matrix;
pub mod readers;
pub mod regions;
pub mod threader;
pub mod utils;
pub mod workflows;
pub mod writers;
