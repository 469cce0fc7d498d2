//! TravelBlogr upstream shield - Entry Point
//!
//! | Command | Description |
//! |---------|-------------|
//! | `tbr fetch --category C ITEMS...` | Fetch items through cache, gate and batches; print JSON |
//! | `tbr config` | Print the effective configuration as TOML |

use clap::Parser;
use std::process::ExitCode;
use tbr::cli::{Cli, run};

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let succeeded = run(cli).await?;
    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
