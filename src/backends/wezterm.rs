//! WezTerm Lua color schemes.
//!
//! Besides plain serialization, themes can be installed into the WezTerm
//! config directory. Each installed theme is a standalone scheme file under
//! `termtint/schemes/`, and a generated `termtint.lua` loader registers all
//! of them plus a `termtint-cycle-scheme` event for switching at runtime.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::theme::{Slot, Theme};

use super::{comment_text, file_stem};

pub const LOADER_FILE: &str = "termtint.lua";
pub const SCHEMES_DIR: &str = "termtint/schemes";
pub const CYCLE_EVENT: &str = "termtint-cycle-scheme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WeztermMode {
    /// A `return { ... }` scheme table.
    #[default]
    Scheme,
    /// A complete `wezterm.lua` that registers and selects the scheme.
    Config,
}

impl WeztermMode {
    pub fn parse(mode: Option<&str>) -> Self {
        match mode.map(str::to_ascii_lowercase).as_deref() {
            None | Some("scheme") => WeztermMode::Scheme,
            Some("config") => WeztermMode::Config,
            Some(other) => {
                log::warn!("unknown wezterm mode '{other}', using 'scheme'");
                WeztermMode::Scheme
            }
        }
    }
}

/// Quote a Lua string literal.
pub fn lua_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_ascii_control() => {
                let _ = write!(out, "\\{:03}", c as u32);
            }
            c if c.is_control() => out.push(' '),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn color_list(out: &mut String, indent: &str, key: &str, slots: &[Slot], theme: &Theme) {
    let colors: Vec<String> = slots
        .iter()
        .map(|&slot| lua_string(&theme.get(slot).to_hex()))
        .collect();
    let _ = writeln!(out, "{indent}{key} = {{ {} }},", colors.join(", "));
}

/// The scheme table body, each line prefixed by `indent`.
fn scheme_table(theme: &Theme, indent: &str) -> String {
    let hex = |slot| lua_string(&theme.get(slot).to_hex());
    let mut out = String::new();
    let _ = writeln!(out, "{indent}foreground = {},", hex(Slot::Foreground));
    let _ = writeln!(out, "{indent}background = {},", hex(Slot::Background));
    let _ = writeln!(out, "{indent}cursor_bg = {},", hex(Slot::Cursor));
    let _ = writeln!(out, "{indent}cursor_fg = {},", hex(Slot::Background));
    let _ = writeln!(out, "{indent}cursor_border = {},", hex(Slot::Cursor));
    let _ = writeln!(out, "{indent}selection_fg = {},", hex(Slot::Foreground));
    let _ = writeln!(out, "{indent}selection_bg = {},", hex(Slot::BrightBlack));
    color_list(&mut out, indent, "ansi", &Slot::ANSI[..8], theme);
    color_list(&mut out, indent, "brights", &Slot::ANSI[8..], theme);
    out
}

pub fn serialize(theme: &Theme, mode: WeztermMode, comments: bool) -> String {
    let mut out = String::new();
    if comments {
        let _ = writeln!(out, "-- {}", comment_text(&theme.name));
    }
    match mode {
        WeztermMode::Scheme => {
            out.push_str("return {\n");
            out.push_str(&scheme_table(theme, "  "));
            out.push_str("}\n");
        }
        WeztermMode::Config => {
            let name = lua_string(&theme.name);
            out.push_str("local wezterm = require(\"wezterm\")\n");
            out.push_str("local config = wezterm.config_builder()\n\n");
            out.push_str("config.color_schemes = {\n");
            let _ = writeln!(out, "  [{name}] = {{");
            out.push_str(&scheme_table(theme, "    "));
            out.push_str("  },\n}\n");
            let _ = writeln!(out, "config.color_scheme = {name}\n");
            out.push_str("return config\n");
        }
    }
    out
}

/// `$XDG_CONFIG_HOME/wezterm`, else `~/.config/wezterm`.
pub fn config_dir() -> Result<PathBuf> {
    let config_home = match std::env::var_os("XDG_CONFIG_HOME") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs::home_dir()
            .context("cannot locate home directory for the WezTerm config")?
            .join(".config"),
    };
    Ok(config_home.join("wezterm"))
}

/// Install into the default WezTerm config directory.
pub fn install(theme: &Theme) -> Result<PathBuf> {
    install_to(&config_dir()?, theme)
}

/// Write the scheme file under `dir` and regenerate the loader.
/// Returns the path of the scheme file.
pub fn install_to(dir: &Path, theme: &Theme) -> Result<PathBuf> {
    let schemes = dir.join(SCHEMES_DIR);
    std::fs::create_dir_all(&schemes)
        .with_context(|| format!("failed to create schemes directory: {}", schemes.display()))?;

    let path = schemes.join(format!("{}.lua", file_stem(&theme.name)));
    std::fs::write(&path, serialize(theme, WeztermMode::Scheme, true))
        .with_context(|| format!("failed to write scheme to {}", path.display()))?;
    log::info!("installed WezTerm scheme {}", path.display());

    let installed = installed_schemes(&schemes)?;
    let loader = dir.join(LOADER_FILE);
    std::fs::write(&loader, loader_source(&installed))
        .with_context(|| format!("failed to write loader to {}", loader.display()))?;
    log::debug!("loader {} lists {} schemes", loader.display(), installed.len());

    Ok(path)
}

/// File stems of every `*.lua` under `schemes`, sorted.
fn installed_schemes(schemes: &Path) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(schemes)
        .with_context(|| format!("failed to list {}", schemes.display()))?;
    let mut names = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("failed to list {}", schemes.display()))?
            .path();
        if path.extension().is_some_and(|ext| ext == "lua") {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

/// Lua module registering every installed scheme by file stem.
pub fn loader_source(schemes: &[String]) -> String {
    let mut out = String::from(
        "-- Generated by termtint; regenerated on every install.\n\
         --\n\
         -- In wezterm.lua:\n\
         --   local termtint = require(\"termtint\")\n\
         --   termtint.apply(config)\n\
         -- and bind a key to wezterm.action.EmitEvent(\"",
    );
    let _ = write!(out, "{CYCLE_EVENT}\") to cycle schemes.\n\n");
    out.push_str("local wezterm = require(\"wezterm\")\n\nlocal M = {}\n\n");

    out.push_str("M.order = {\n");
    for name in schemes {
        let _ = writeln!(out, "  {},", lua_string(name));
    }
    out.push_str("}\n\nM.schemes = {}\nfor _, name in ipairs(M.order) do\n");
    let _ = writeln!(
        out,
        "  M.schemes[name] = dofile(wezterm.config_dir .. {} .. name .. \".lua\")",
        lua_string(&format!("/{SCHEMES_DIR}/"))
    );
    out.push_str("end\n\n");

    out.push_str(
        "function M.apply(config)\n\
         \x20 config.color_schemes = config.color_schemes or {}\n\
         \x20 for name, scheme in pairs(M.schemes) do\n\
         \x20   config.color_schemes[name] = scheme\n\
         \x20 end\n\
         \x20 if config.color_scheme == nil then\n\
         \x20   config.color_scheme = M.order[1]\n\
         \x20 end\n\
         \x20 return config\n\
         end\n\n",
    );

    let _ = writeln!(
        out,
        "wezterm.on({}, function(window, _pane)",
        lua_string(CYCLE_EVENT)
    );
    out.push_str(
        "\x20 if #M.order == 0 then\n\
         \x20   return\n\
         \x20 end\n\
         \x20 local overrides = window:get_config_overrides() or {}\n\
         \x20 local current = overrides.color_scheme or window:effective_config().color_scheme\n\
         \x20 local next_index = 1\n\
         \x20 for i, name in ipairs(M.order) do\n\
         \x20   if name == current then\n\
         \x20     next_index = i % #M.order + 1\n\
         \x20   end\n\
         \x20 end\n\
         \x20 overrides.color_scheme = M.order[next_index]\n\
         \x20 window:set_config_overrides(overrides)\n\
         end)\n\n\
         return M\n",
    );
    out
}
