//! GraphQL schema export.

use anyhow::Result;

pub fn execute() -> Result<()> {
    print!("{}", news_api::sdl());
    Ok(())
}
