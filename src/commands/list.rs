//! List command: installed skills per agent, or the published registry

use console::Style;

use crate::agents::Scope;
use crate::cli::ListArgs;
use crate::commands::AppContext;
use crate::error::{Result, SkillfetchError};
use crate::installer::global::GlobalLookup;
use crate::installer::{InstalledEntry, Installer};

pub fn run(args: ListArgs) -> Result<()> {
    let ctx = AppContext::init()?;

    if args.available {
        return list_available(&ctx, args.refresh);
    }

    let agents = match &args.agent {
        Some(id) => vec![ctx.agents.get(id).ok_or_else(|| {
            SkillfetchError::UnknownAgent { name: id.clone() }
        })?],
        None => ctx.select_agents(&[])?,
    };
    let scope = if args.global { Scope::Global } else { Scope::Local };

    let installer = Installer::new(&ctx.cache, GlobalLookup::discover());
    for agent in agents {
        let entries = installer.list_installed(agent, scope)?;
        println!(
            "{} ({} scope):",
            Style::new().bold().yellow().apply_to(&agent.display_name),
            scope
        );
        if entries.is_empty() {
            println!("  (no skills installed)");
            continue;
        }
        for entry in entries {
            match entry {
                InstalledEntry::Directory(name) => println!("  {name}"),
                InstalledEntry::Symlink(name) => {
                    println!("  {name} {}", Style::new().dim().apply_to("(symlink)"))
                }
            }
        }
    }
    Ok(())
}

fn list_available(ctx: &AppContext, refresh: bool) -> Result<()> {
    let registry = ctx.resolver().get_registry(refresh)?;
    println!(
        "Available skills ({}):",
        Style::new().bold().apply_to(registry.skills.len())
    );
    for skill in &registry.skills {
        let cached = if ctx.cache.is_skill_complete(skill) {
            Style::new().green().apply_to(" [cached]").to_string()
        } else {
            String::new()
        };
        println!(
            "  {}{}",
            Style::new().bold().yellow().apply_to(&skill.name),
            cached
        );
        println!("    {}", skill.description);
    }
    Ok(())
}
