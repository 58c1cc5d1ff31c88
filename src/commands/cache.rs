//! Cache command: statistics and clearing

use crate::cli::{CacheArgs, CacheSubcommand};
use crate::commands::AppContext;
use crate::error::Result;
use crate::fsutil;

pub fn run(args: CacheArgs) -> Result<()> {
    let ctx = AppContext::init()?;

    match args.command {
        Some(CacheSubcommand::Clear(clear_args)) => {
            if let Some(name) = clear_args.only {
                ctx.cache.clear_skill_cache(&name);
                println!("Removed '{name}' from cache.");
            } else {
                ctx.cache.clear_all()?;
                println!("Cache cleared.");
            }
            Ok(())
        }
        Some(CacheSubcommand::Info) | None => show_cache_info(&ctx),
    }
}

fn show_cache_info(ctx: &AppContext) -> Result<()> {
    let stats = ctx.cache.stats();

    println!("Cache statistics:");
    println!("  Location: {}", ctx.cache.root().display());
    println!("  Skills: {}", stats.skills);
    println!("  Size: {}", fsutil::formatted_size(stats.total_size));

    let registry_state = match ctx.cache.read_registry_cache() {
        Some(entry) if entry.is_valid(crate::registry::cache::now_ms()) => "fresh",
        Some(_) => "stale",
        None => "absent",
    };
    println!("  Registry manifest: {registry_state}");

    let skills = ctx.cache.cached_skills();
    if skills.is_empty() {
        println!("\nCache is empty.");
    } else {
        println!("\nCached skills:");
        for name in skills {
            println!("  {name}");
        }
    }
    Ok(())
}
