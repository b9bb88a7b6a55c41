//! `molview` command line: inspect the catalog, download structures and
//! manage option files.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use molview::catalog::{Catalog, MoleculeDescriptor, RemoteId, StructureSource};
use molview::fetch::{self, fetch_blocking};
use molview::input::KeyBindings;
use molview::options::ViewerOptions;
use molview::search::SearchGateway;

#[derive(Parser)]
#[command(name = "molview", about = "Molecular viewer tooling")]
struct Cli {
    /// TOML options file (defaults apply for anything it leaves out).
    #[arg(long, global = true)]
    options: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the built-in preset molecules.
    Catalog,
    /// Download a preset or a 4-character PDB id.
    Fetch {
        /// Preset id (`caffeine`) or PDB id (`1CRN`).
        id: String,
        /// Output directory.
        #[arg(long, default_value = "assets/models")]
        out: PathBuf,
    },
    /// Print the options JSON schema.
    Schema,
    /// Write the default options as TOML.
    Config {
        /// Destination file.
        path: PathBuf,
    },
    /// Print the keyboard shortcut table.
    Keys,
    /// List option presets (TOML files) in a directory.
    Presets {
        /// Directory to scan.
        dir: PathBuf,
    },
}

fn load_options(path: Option<&Path>) -> anyhow::Result<ViewerOptions> {
    match path {
        Some(path) => ViewerOptions::load(path)
            .with_context(|| format!("loading options from {}", path.display())),
        None => Ok(ViewerOptions::default()),
    }
}

fn print_catalog(out: &mut impl Write) -> anyhow::Result<()> {
    for preset in Catalog::builtin().presets() {
        let source = match &preset.source {
            StructureSource::Remote(remote) => remote.label(),
            StructureSource::Inline => "inline".to_owned(),
        };
        writeln!(
            out,
            "{:<10} {:<10} {:<12} {:>8.2} g/mol  {source}",
            preset.id, preset.name, preset.formula, preset.weight
        )?;
    }
    Ok(())
}

fn print_keys(out: &mut impl Write, bindings: &KeyBindings) -> anyhow::Result<()> {
    for (key, tag) in bindings.entries() {
        writeln!(out, "{key:<6} {}", tag.description())?;
    }
    Ok(())
}

/// Write a preset's bundled structure, or download its remote source.
fn fetch_preset(
    preset: &MoleculeDescriptor,
    out: &Path,
    options: &ViewerOptions,
) -> anyhow::Result<PathBuf> {
    match &preset.source {
        StructureSource::Inline => {
            let inline = Catalog::builtin().inline_structure();
            let path = out.join(format!("{}.{}", preset.id, inline.format.as_str()));
            std::fs::write(&path, inline.data)
                .with_context(|| format!("writing {}", path.display()))?;
            Ok(path)
        }
        StructureSource::Remote(remote) => fetch_remote(remote, out, options),
    }
}

fn fetch_remote(
    remote: &RemoteId,
    out: &Path,
    options: &ViewerOptions,
) -> anyhow::Result<PathBuf> {
    let path = out.join(fetch::file_name(remote));
    if path.exists() {
        log::info!("{} already present at {}", remote.label(), path.display());
        return Ok(path);
    }
    let content = fetch_blocking(remote, &options.fetch)
        .with_context(|| format!("fetching {}", remote.label()))?;
    std::fs::write(&path, content)
        .with_context(|| format!("writing {}", path.display()))?;
    log::info!("Downloaded to {}", path.display());
    Ok(path)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let options = load_options(cli.options.as_deref())?;
    let mut stdout = io::stdout().lock();

    match cli.command {
        Command::Catalog => print_catalog(&mut stdout)?,
        Command::Fetch { id, out } => {
            std::fs::create_dir_all(&out)
                .with_context(|| format!("creating {}", out.display()))?;
            let path = if let Some(preset) = Catalog::builtin().lookup(&id) {
                fetch_preset(preset, &out, &options)?
            } else {
                match SearchGateway::validate(&id) {
                    Ok(remote) => fetch_remote(&remote, &out, &options)?,
                    Err(e) => bail!("{id:?} is neither a preset nor a PDB id: {e}"),
                }
            };
            writeln!(stdout, "{}", path.display())?;
        }
        Command::Schema => {
            let schema = serde_json::to_string_pretty(&ViewerOptions::json_schema())?;
            writeln!(stdout, "{schema}")?;
        }
        Command::Config { path } => {
            options
                .save(&path)
                .with_context(|| format!("writing {}", path.display()))?;
            log::info!("Wrote options to {}", path.display());
        }
        Command::Keys => print_keys(&mut stdout, &options.keybindings)?,
        Command::Presets { dir } => {
            for name in ViewerOptions::list_presets(&dir) {
                writeln!(stdout, "{name}")?;
            }
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = run(Cli::parse()) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}
