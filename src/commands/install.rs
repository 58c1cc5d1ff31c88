//! Install command: resolve, download into cache, materialize into targets

use console::Style;

use crate::agents::Scope;
use crate::cli::InstallArgs;
use crate::commands::AppContext;
use crate::error::{Result, SkillfetchError};
use crate::installer::global::GlobalLookup;
use crate::installer::{InstallOptions, InstallResult, Installer};
use crate::progress::DownloadProgress;
use crate::registry::SkillMetadata;

pub fn run(args: InstallArgs) -> Result<()> {
    let ctx = AppContext::init()?;
    let resolver = ctx.resolver();
    let agents = ctx.select_agents(&args.agents)?;
    let scope = if args.global { Scope::Global } else { Scope::Local };

    let registry = resolver.get_registry(args.refresh)?;

    let mut skills: Vec<SkillMetadata> = Vec::new();
    let mut failed = 0usize;
    for name in &args.skills {
        let Some(skill) = registry.skill(name).cloned() else {
            print_failure(name, "not found in registry");
            failed += 1;
            continue;
        };

        if !ctx.cache.is_skill_complete(&skill) {
            println!(
                "Downloading {} ({} file{})...",
                Style::new().bold().apply_to(name),
                skill.files.len(),
                if skill.files.len() == 1 { "" } else { "s" }
            );
            let progress = DownloadProgress::new(name, skill.files.len() as u64);
            match resolver.ensure_skill_cached(&skill, Some(&progress)) {
                Ok(_) => progress.finish(),
                Err(e) => {
                    progress.abandon();
                    print_failure(name, &e.to_string());
                    failed += 1;
                    continue;
                }
            }
        }
        skills.push(skill);
    }

    let installer = Installer::new(&ctx.cache, GlobalLookup::discover());
    let options = InstallOptions {
        scope,
        method: args.method,
    };
    let results = installer.install(&skills, &agents, options);

    for result in &results {
        print_install_result(result);
        if !result.success {
            failed += 1;
        }
    }

    if failed > 0 {
        let total = args.skills.len() * agents.len().max(1);
        return Err(SkillfetchError::PartialFailure { failed, total });
    }
    Ok(())
}

fn print_install_result(result: &InstallResult) {
    if result.success {
        if result.error.is_some() {
            // Already installed: a successful no-op
            println!(
                "{} {} already installed for {}",
                Style::new().dim().apply_to("•"),
                result.skill,
                result.agent
            );
        } else {
            let note = if result.used_global_symlink {
                " (shared global copy)"
            } else {
                ""
            };
            println!(
                "{} {} for {} -> {} [{}]{}",
                Style::new().green().bold().apply_to("✓"),
                result.skill,
                result.agent,
                result.path.display(),
                result.method,
                note
            );
        }
    } else {
        print_failure(
            &result.skill,
            result.error.as_deref().unwrap_or("install failed"),
        );
    }
}

fn print_failure(name: &str, reason: &str) {
    eprintln!(
        "{} {}: {}",
        Style::new().red().bold().apply_to("✗"),
        name,
        reason
    );
}
