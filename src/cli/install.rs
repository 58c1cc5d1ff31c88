use clap::Parser;

use crate::installer::InstallMethod;

/// Arguments for the install command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Install for detected agents:\n    skillfetch install cloudflare-deploy\n\n\
                   Install for specific agents:\n    skillfetch install my-skill --agent cursor --agent claude-code\n\n\
                   Install per user instead of per project:\n    skillfetch install my-skill --global\n\n\
                   Copy instead of symlinking:\n    skillfetch install my-skill --method copy")]
pub struct InstallArgs {
    /// Skill names to install
    #[arg(required = true)]
    pub skills: Vec<String>,

    /// Install only for specific agents (repeatable)
    #[arg(long = "agent", short = 'a', value_name = "AGENT")]
    pub agents: Vec<String>,

    /// Install into the per-user directory instead of the project
    #[arg(long)]
    pub global: bool,

    /// How to materialize the skill into the target directory
    #[arg(long, value_enum, default_value_t = InstallMethod::Symlink)]
    pub method: InstallMethod,

    /// Refetch the registry even when the cached copy is still fresh
    #[arg(long)]
    pub refresh: bool,
}
