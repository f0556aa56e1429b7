//! POSIX shell output: `export TERM_COLOR_*` variables, optionally followed
//! by printf calls that recolor the terminal the file is sourced in.

use std::fmt::Write;

use crate::theme::Theme;

use super::ansi::osc_bodies;
use super::comment_text;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShellMode {
    #[default]
    Vars,
    Apply,
}

impl ShellMode {
    pub fn parse(mode: Option<&str>) -> Self {
        match mode.map(str::to_ascii_lowercase).as_deref() {
            None | Some("vars") => ShellMode::Vars,
            Some("apply") => ShellMode::Apply,
            Some(other) => {
                log::warn!("unknown shell mode '{other}', using 'vars'");
                ShellMode::Vars
            }
        }
    }
}

/// Slot key as an environment variable name.
pub fn var_name(key: &str) -> String {
    format!("TERM_COLOR_{}", key.to_ascii_uppercase())
}

/// `comments` controls the name and usage lines under the shebang.
pub fn serialize(theme: &Theme, mode: ShellMode, comments: bool) -> String {
    let mut out = String::from("#!/bin/sh\n");
    if comments {
        let _ = writeln!(out, "# {}", comment_text(&theme.name));
        out.push_str("# Source this file: . ./theme.sh\n");
    }
    out.push('\n');

    for (slot, color) in theme.iter() {
        let _ = writeln!(out, "export {}='{color}'", var_name(slot.key()));
    }

    if mode == ShellMode::Apply {
        out.push_str("\nif [ -t 1 ]; then\n");
        for body in osc_bodies(theme) {
            let _ = writeln!(out, "  printf '\\033]{body}\\033\\\\'");
        }
        out.push_str("fi\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::default_theme;
    use std::process::Command;

    #[test]
    fn exports_every_slot() {
        let out = serialize(&default_theme(), ShellMode::Vars, true);
        assert_eq!(out.lines().filter(|l| l.starts_with("export ")).count(), 19);
        assert!(out.contains("export TERM_COLOR_BACKGROUND='#1e1e1e'\n"));
        assert!(out.contains("export TERM_COLOR_BRIGHT_WHITE='#e5e5e5'\n"));
        assert!(!out.contains("printf"));
    }

    #[test]
    fn apply_mode_adds_osc_printf() {
        let out = serialize(&default_theme(), ShellMode::Apply, true);
        assert!(out.contains("  printf '\\033]4;1;rgb:cd/31/31\\033\\\\'\n"));
        assert!(out.contains("printf '\\033]11;rgb:1e/1e/1e\\033\\\\'"));
        assert_eq!(out.matches("printf").count(), 19);
    }

    #[test]
    fn mode_parsing_falls_back() {
        assert_eq!(ShellMode::parse(None), ShellMode::Vars);
        assert_eq!(ShellMode::parse(Some("APPLY")), ShellMode::Apply);
        assert_eq!(ShellMode::parse(Some("nope")), ShellMode::Vars);
    }

    #[test]
    fn name_cannot_break_out_of_comment() {
        let mut theme = default_theme();
        theme.name = "x\nrm -rf /".to_string();
        let out = serialize(&theme, ShellMode::Vars, true);
        assert!(out.lines().all(|l| !l.starts_with("rm ")));
    }

    #[test]
    fn without_comments_only_the_shebang_remains() {
        let out = serialize(&default_theme(), ShellMode::Apply, false);
        assert!(out.starts_with("#!/bin/sh\n\nexport TERM_COLOR_BACKGROUND="));
        assert_eq!(out.lines().filter(|l| l.trim_start().starts_with('#')).count(), 1);
        assert!(!out.contains("My New Theme"));
    }

    #[test]
    fn output_is_valid_sh() {
        let dir = tempfile::tempdir().unwrap();
        for mode in [ShellMode::Vars, ShellMode::Apply] {
            let path = dir.path().join("theme.sh");
            std::fs::write(&path, serialize(&default_theme(), mode, true)).unwrap();
            // Skip where no POSIX shell is installed.
            let Ok(status) = Command::new("sh").arg("-n").arg(&path).status() else {
                return;
            };
            assert!(status.success(), "{mode:?}");
        }
    }
}
