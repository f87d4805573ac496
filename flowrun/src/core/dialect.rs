//! Shell dialects a flow script can target.

use crate::error::FlowError;

/// Supported script dialects. Persisted in settings by [`Self::name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellDialect {
    Bash,
    Zsh,
    PowerShell,
    Cmd,
}

impl ShellDialect {
    pub const ALL: [ShellDialect; 4] = [
        ShellDialect::Bash,
        ShellDialect::Zsh,
        ShellDialect::PowerShell,
        ShellDialect::Cmd,
    ];

    /// Parse a settings value. Unknown names are an error, never a silent
    /// fallback.
    pub fn from_name(name: &str) -> Result<Self, FlowError> {
        match name {
            "bash" => Ok(ShellDialect::Bash),
            "zsh" => Ok(ShellDialect::Zsh),
            "powershell" => Ok(ShellDialect::PowerShell),
            "cmd" => Ok(ShellDialect::Cmd),
            other => Err(FlowError::UnsupportedDialect {
                name: other.to_string(),
            }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShellDialect::Bash => "bash",
            ShellDialect::Zsh => "zsh",
            ShellDialect::PowerShell => "powershell",
            ShellDialect::Cmd => "cmd",
        }
    }

    /// First line of every generated script.
    pub fn header(self) -> &'static str {
        match self {
            ShellDialect::Bash => "#!/bin/bash",
            ShellDialect::Zsh => "#!/bin/zsh",
            ShellDialect::PowerShell => "# PowerShell flow script",
            ShellDialect::Cmd => "@echo off",
        }
    }

    /// Extension for generated script files (no leading dot).
    pub fn extension(self) -> &'static str {
        match self {
            ShellDialect::Bash | ShellDialect::Zsh => "sh",
            ShellDialect::PowerShell => "ps1",
            ShellDialect::Cmd => "bat",
        }
    }

    /// Separator between statements. POSIX shells get a blank line between
    /// commands for readability; the rest a single newline.
    pub fn command_separator(self) -> &'static str {
        match self {
            ShellDialect::Bash | ShellDialect::Zsh => "\n\n",
            ShellDialect::PowerShell | ShellDialect::Cmd => "\n",
        }
    }

    /// Interpreter argument vector for running a script: the program and
    /// the arguments that precede the script path. The script path is
    /// always passed as its own argument, never interpolated into a shell
    /// line.
    pub fn interpreter(self) -> (&'static str, &'static [&'static str]) {
        match self {
            ShellDialect::Bash => ("bash", &[]),
            ShellDialect::Zsh => ("zsh", &[]),
            ShellDialect::PowerShell => ("powershell", &["-File"]),
            ShellDialect::Cmd => ("cmd", &["/C"]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FlowError;

    #[test]
    fn names_round_trip() {
        for dialect in ShellDialect::ALL {
            assert_eq!(ShellDialect::from_name(dialect.name()).unwrap(), dialect);
        }
    }

    #[test]
    fn unknown_name_is_unsupported_dialect() {
        let err = ShellDialect::from_name("fish").unwrap_err();
        assert!(matches!(err, FlowError::UnsupportedDialect { name } if name == "fish"));
    }

    #[test]
    fn posix_dialects_share_extension() {
        assert_eq!(ShellDialect::Bash.extension(), "sh");
        assert_eq!(ShellDialect::Zsh.extension(), "sh");
        assert_eq!(ShellDialect::PowerShell.extension(), "ps1");
        assert_eq!(ShellDialect::Cmd.extension(), "bat");
    }
}
