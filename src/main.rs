use crate::cli::run;

pub mod catalog;
pub mod cli;
mod config;
pub mod domain;
pub mod json;
pub mod uri;

fn main() -> anyhow::Result<()> {
    run()
}
