//! Remove command

use console::Style;

use crate::agents::Scope;
use crate::cli::RemoveArgs;
use crate::commands::AppContext;
use crate::error::Result;
use crate::installer::global::GlobalLookup;
use crate::installer::Installer;

pub fn run(args: RemoveArgs) -> Result<()> {
    let ctx = AppContext::init()?;
    let agents = ctx.select_agents(&args.agents)?;
    let scope = if args.global { Scope::Global } else { Scope::Local };

    let installer = Installer::new(&ctx.cache, GlobalLookup::discover());
    let results = installer.remove(&args.skill, &agents, scope);

    for result in &results {
        if result.removed {
            println!(
                "{} Removed {} for {}",
                Style::new().green().bold().apply_to("✓"),
                result.skill,
                result.agent
            );
        } else {
            println!(
                "{} {} {} for {}",
                Style::new().dim().apply_to("•"),
                result.skill,
                result.message.as_deref().unwrap_or("not removed"),
                result.agent
            );
        }
    }
    Ok(())
}
