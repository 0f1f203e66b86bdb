#![forbid(unsafe_code)]

pub mod cli;
pub mod encoding;
pub mod fetch;
pub mod formats;
pub mod links;
pub mod logging;
pub mod page;
pub mod repair;
pub mod run;
pub mod transcript;
pub mod writer;
