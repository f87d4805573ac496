//! Script text generation from a comma-separated command list.
//!
//! Commands are split on `,`; the delimiter has no escape syntax, so a
//! command containing a literal comma cannot be expressed.

use crate::core::dialect::ShellDialect;

/// Generated script text plus the extension it should be saved with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptSource {
    pub text: String,
    pub extension: &'static str,
}

/// Build the script for `dialect` from a comma-separated command list.
///
/// The dialect header comes first; commands follow in input order, joined
/// with the dialect's statement separator. Surrounding whitespace is
/// trimmed and empty segments are dropped.
pub fn generate(dialect: ShellDialect, command_list: &str) -> ScriptSource {
    let mut parts = vec![dialect.header().to_string()];
    parts.extend(
        command_list
            .split(',')
            .map(str::trim)
            .filter(|command| !command.is_empty())
            .map(str::to_string),
    );
    let mut text = parts.join(dialect.command_separator());
    text.push('\n');
    ScriptSource {
        text,
        extension: dialect.extension(),
    }
}
