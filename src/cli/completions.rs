use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    skillfetch completions bash > ~/.bash_completion.d/skillfetch\n\n\
                  Generate zsh completions:\n    skillfetch completions zsh > ~/.zfunc/_skillfetch\n\n\
                  Generate fish completions:\n    skillfetch completions fish > ~/.config/fish/completions/skillfetch.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
