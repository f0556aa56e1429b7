use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use termtint::backends::{wezterm, Format};
use termtint::cli::Args;
use termtint::pipeline::{assign, decode, extract};
use termtint::theme::{Theme, DEFAULT_NAME};
use termtint::tui::{self, TuiApp};
use termtint::{presets, preview};

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level()))
        .init();

    if args.list_presets {
        for name in presets::NAMES {
            println!("{name}");
        }
        return Ok(());
    }
    if args.list_formats {
        for format in Format::ALL {
            println!(
                "{:<12} {:<13} {}",
                format.tag(),
                format.extension(),
                format.description()
            );
        }
        return Ok(());
    }

    let mut theme = load_theme(&args)?;
    if let Some(name) = &args.name {
        theme.name = name.clone();
    }
    if !args.overrides.is_empty() {
        let mut draft = theme.to_draft();
        for (slot, color) in &args.overrides {
            draft = draft.with(slot.key(), color.to_hex());
        }
        theme = draft.complete().0;
    }

    if args.tui {
        match tui::run(TuiApp::new(theme))? {
            Some(edited) => theme = edited,
            None => {
                log::info!("editor aborted, nothing written");
                return Ok(());
            }
        }
    }

    if args.preview {
        preview::write_ansi(&theme, &mut io::stdout().lock())
            .context("failed to write preview")?;
    }

    if args.install_wezterm {
        let path = wezterm::install(&theme)?;
        eprintln!("Installed WezTerm scheme to {}", path.display());
    }

    let artifact = args
        .format
        .artifact_with(&theme, args.mode.as_deref(), !args.no_comments);
    if let Some(path) = &args.output {
        write_file(path, &artifact.bytes)?;
        eprintln!("Wrote {} theme to {}", args.format, path.display());
    } else if let Some(dir) = &args.out_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory {}", dir.display()))?;
        let path = dir.join(&artifact.filename);
        write_file(&path, &artifact.bytes)?;
        eprintln!("Wrote {} theme to {}", args.format, path.display());
    } else if !args.preview && !args.install_wezterm {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(&artifact.bytes)
            .and_then(|()| stdout.flush())
            .context("failed to write theme to stdout")?;
    }

    Ok(())
}

/// Resolve the starting theme from exactly one source.
fn load_theme(args: &Args) -> Result<Theme> {
    if let Some(path) = &args.image {
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(DEFAULT_NAME);
        let config = args.extract_config();
        let pixels = decode::decode_file(path, config.max_dimension)
            .with_context(|| format!("failed to load image {}", path.display()))?;
        let colors = extract::extract_colors(&pixels, &config);
        log::info!(
            "extracted {} colors from {}",
            colors.iter().filter(|c| c.weight > 0.0).count(),
            path.display()
        );
        return Ok(assign::assign_slots(&colors, name));
    }
    if let Some(name) = &args.preset {
        return presets::find(name).with_context(|| {
            format!(
                "unknown preset '{name}' (available: {})",
                presets::NAMES.join(", ")
            )
        });
    }
    if let Some(path) = &args.theme {
        return Theme::load_json(path).context("failed to load theme");
    }
    Ok(Theme::default())
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
}
