pub mod batch;
pub mod config;
pub mod extract;
pub mod mail;
pub mod output;
pub mod scan;
