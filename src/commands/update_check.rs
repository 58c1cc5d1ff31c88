//! Update-check command

use console::Style;

use crate::commands::AppContext;
use crate::error::Result;
use crate::update_check::{check_for_updates, current_version};

pub fn run() -> Result<()> {
    let ctx = AppContext::init()?;
    let current = current_version();

    match check_for_updates(ctx.client.as_ref(), current) {
        Some(latest) => {
            println!(
                "{} skillfetch {} is available (you have {})",
                Style::new().yellow().bold().apply_to("!"),
                latest,
                current
            );
            println!("  Upgrade with: cargo install skillfetch");
        }
        None => println!("skillfetch {current} is up to date."),
    }
    Ok(())
}
