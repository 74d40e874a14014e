//! memzip CLI - command-line tool for inspecting ZIP archives.
//!
//! This is the main entry point for the memzip command-line application.

use std::fs;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use glob::Pattern;
use indicatif::{ProgressBar, ProgressStyle};

use memzip::prelude::*;

/// memzip - list, inspect and extract ZIP archives
#[derive(Parser)]
#[command(name = "memzip")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the ZIP archive
    #[arg(short, long, env = "MEMZIP_ARCHIVE")]
    archive: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List entries in central directory order
    List {
        /// Filter pattern (glob-style)
        #[arg(short, long)]
        filter: Option<String>,

        /// Show detailed information
        #[arg(short, long)]
        detailed: bool,
    },

    /// Show all metadata of one entry
    Info {
        /// Entry name, or index if numeric
        entry: String,
    },

    /// Write the decompressed contents of one entry to stdout
    Cat {
        /// Entry name, or index if numeric
        entry: String,
    },

    /// Print the archive comment
    Comment {
        /// Decode as code page 437 instead of UTF-8
        #[arg(short, long)]
        legacy: bool,
    },

    /// Extract entries to a directory
    Extract {
        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        /// Filter pattern (glob-style)
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Check every entry against its recorded CRC-32
    Verify,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let start = Instant::now();
    let archive = Archive::open_file(&cli.archive)
        .with_context(|| format!("Failed to open archive {}", cli.archive.display()))?;

    match cli.command {
        Commands::List { filter, detailed } => {
            cmd_list(&archive, filter.as_deref(), detailed)?;
        }
        Commands::Info { entry } => {
            cmd_info(&archive, &entry)?;
        }
        Commands::Cat { entry } => {
            cmd_cat(&archive, &entry)?;
        }
        Commands::Comment { legacy } => {
            println!("{}", archive.comment(legacy));
        }
        Commands::Extract { output, filter } => {
            println!(
                "Loaded {} entries in {:?}",
                archive.len(),
                start.elapsed()
            );
            cmd_extract(&archive, &output, filter.as_deref())?;
        }
        Commands::Verify => {
            cmd_verify(&archive)?;
        }
    }

    Ok(())
}

/// Interpret a command-line entry argument as an index when it is numeric.
fn entry_key(arg: &str) -> EntryKey<'_> {
    match arg.parse::<usize>() {
        Ok(index) => EntryKey::Index(index),
        Err(_) => EntryKey::Name(arg),
    }
}

fn filter_pattern(filter: Option<&str>) -> Result<Option<Pattern>> {
    filter
        .map(|f| Pattern::new(f).with_context(|| format!("Invalid filter pattern {f:?}")))
        .transpose()
}

fn method_name(entry: &Entry) -> String {
    match entry.compression_method() {
        0 => "stored".to_string(),
        8 => "deflate".to_string(),
        other => format!("method {other}"),
    }
}

fn cmd_list<B: AsRef<[u8]>>(
    archive: &Archive<B>,
    filter: Option<&str>,
    detailed: bool,
) -> Result<()> {
    let pattern = filter_pattern(filter)?;

    let mut count = 0;
    for entry in archive.entries() {
        if let Some(pattern) = &pattern {
            if !pattern.matches(entry.name()) {
                continue;
            }
        }

        if detailed {
            println!(
                "{:>12} {:>12} {:<8} {} {} {}",
                entry.compressed_size(),
                entry.uncompressed_size(),
                method_name(entry),
                entry.last_modified(),
                if entry.is_encrypted() { "E" } else { " " },
                entry.name()
            );
        } else {
            println!("{}", entry.name());
        }
        count += 1;
    }

    println!("\nTotal: {} entries", count);

    Ok(())
}

fn cmd_info<B: AsRef<[u8]>>(archive: &Archive<B>, arg: &str) -> Result<()> {
    let entry = archive.metadata(entry_key(arg))?;

    println!("name:                {}", entry.name());
    println!("comment:             {}", entry.comment());
    println!("version created:     {}", entry.version_created());
    println!("version needed:      {}", entry.version_needed());
    println!("bit flag:            {:#06x}", entry.bitflag());
    println!("compression:         {}", method_name(entry));
    println!("last modified:       {}", entry.last_modified());
    println!("crc32:               {:#010x}", entry.crc32());
    println!("compressed size:     {}", entry.compressed_size());
    println!("uncompressed size:   {}", entry.uncompressed_size());
    println!("disk number:         {}", entry.disk_number());
    println!("internal attributes: {:#06x}", entry.internal_attributes());
    println!("external attributes: {:#010x}", entry.external_attributes());
    println!("extra field:         {} bytes", entry.extra_field().len());
    println!("encrypted:           {}", entry.is_encrypted());
    println!("utf-8 name:          {}", entry.is_utf8());

    Ok(())
}

fn cmd_cat<B: AsRef<[u8]>>(archive: &Archive<B>, arg: &str) -> Result<()> {
    let data = archive.read(entry_key(arg))?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(&data)?;
    stdout.flush()?;

    Ok(())
}

/// Join an entry name onto `root`, refusing names that would escape it.
fn output_path(root: &Path, name: &str) -> Result<PathBuf> {
    let relative = Path::new(name.trim_start_matches(['/', '\\']));
    for component in relative.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            _ => bail!("Refusing to extract {name:?} outside the output directory"),
        }
    }
    Ok(root.join(relative))
}

fn cmd_extract<B: AsRef<[u8]>>(
    archive: &Archive<B>,
    output: &Path,
    filter: Option<&str>,
) -> Result<()> {
    let pattern = filter_pattern(filter)?;

    // Collect matching indices
    let indices: Vec<usize> = archive
        .entries()
        .iter()
        .enumerate()
        .filter(|(_, e)| pattern.as_ref().map_or(true, |p| p.matches(e.name())))
        .map(|(i, _)| i)
        .collect();

    println!("Extracting {} entries...", indices.len());

    let pb = ProgressBar::new(indices.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    fs::create_dir_all(output)?;

    let start = Instant::now();
    let mut failed = 0;
    for &idx in &indices {
        let entry = &archive.entries()[idx];
        let target = output_path(output, &entry.name().replace('\\', "/"))?;

        if entry.is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }

            match archive.read(idx) {
                Ok(data) => fs::write(&target, data)?,
                Err(err) => {
                    pb.println(format!("skipped {}: {err}", entry.name()));
                    failed += 1;
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Done");
    println!("Extraction completed in {:?}", start.elapsed());

    if failed > 0 {
        bail!("{failed} entries could not be extracted");
    }

    Ok(())
}

fn cmd_verify<B: AsRef<[u8]>>(archive: &Archive<B>) -> Result<()> {
    let mut failed = 0;
    for (idx, entry) in archive.entries().iter().enumerate() {
        match archive.verify(idx) {
            Ok(()) => println!("OK   {}", entry.name()),
            Err(err) => {
                println!("FAIL {}: {err}", entry.name());
                failed += 1;
            }
        }
    }

    println!("\nTotal: {} entries, {} failed", archive.len(), failed);

    if failed > 0 {
        bail!("{failed} entries failed verification");
    }

    Ok(())
}
