//! Provides helpers to easily generate shell completions
use clap::CommandFactory;

use crate::SelectOptions;

/// Available shells for completion generation
#[derive(Clone, clap::ValueEnum, PartialEq, Debug)]
pub enum Shell {
    /// Bourne Again SHell
    Bash,
    /// Elvish shell
    Elvish,
    /// Friendly Interactive SHell
    Fish,
    /// PowerShell
    PowerShell,
    /// Zsh
    Zsh,
}

impl From<&Shell> for clap_complete::Shell {
    fn from(sh: &Shell) -> Self {
        match sh {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Elvish => clap_complete::Shell::Elvish,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Zsh => clap_complete::Shell::Zsh,
        }
    }
}

/// Generate the completion and write it to `output`
pub fn generate_to(sh: &Shell, output: &mut dyn std::io::Write) {
    let cmd = &mut SelectOptions::command();
    clap_complete::generate(clap_complete::Shell::from(sh), cmd, "dropsel", output)
}

/// Generate the completion and write it to stdout
pub fn generate(sh: &Shell) {
    generate_to(sh, &mut std::io::stdout())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bash_completion_mentions_flags() {
        let mut out = Vec::new();
        generate_to(&Shell::Bash, &mut out);
        let script = String::from_utf8(out).unwrap();
        assert!(script.contains("dropsel"));
        assert!(script.contains("--search-placeholder"));
    }
}
