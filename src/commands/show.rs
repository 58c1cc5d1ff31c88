//! Show command: one skill's registry metadata and cache state

use console::Style;

use crate::cli::ShowArgs;
use crate::commands::AppContext;
use crate::error::Result;

pub fn run(args: ShowArgs) -> Result<()> {
    let ctx = AppContext::init()?;
    let skill = ctx.resolver().get_skill(&args.name, args.refresh)?;

    let bold = Style::new().bold();
    println!("{}", Style::new().bold().yellow().apply_to(&skill.name));
    println!("  {} {}", bold.apply_to("Description:"), skill.description);
    println!("  {} {}", bold.apply_to("Category:"), skill.category);
    if let Some(ref author) = skill.author {
        println!("  {} {}", bold.apply_to("Author:"), author);
    }
    if let Some(ref version) = skill.version {
        println!("  {} {}", bold.apply_to("Version:"), version);
    }
    println!("  {} {}", bold.apply_to("Files:"), skill.files.len());

    let cached = if ctx.cache.is_skill_complete(&skill) {
        "complete"
    } else if ctx.cache.is_skill_cached(&skill.name) {
        "partial"
    } else {
        "not cached"
    };
    println!("  {} {}", bold.apply_to("Cache:"), cached);
    Ok(())
}
