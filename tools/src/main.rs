// Convert raw color map files into the catalog layout of `data/`.
//
//     color-catalog-tools --manifest tools/manifests/scientific.hjson \
//         --source-dir ScientificColourMaps4 \
//         --target-dir data/ScientificColourMaps4
//
// Source files hold one RGB triple per line, components in [0, 1] or
// in [0, 255].

use std::{fs, path::{Path, PathBuf}};
use anyhow::{Context, Result};
use clap::Parser;
use rgb::RGB;
use tracing_subscriber::EnvFilter;
use color_catalog::{samples, write_json, CatalogMeta, CATALOG_FILE_NAME};

mod manifest;
use manifest::{Manifest, MapEntry};

#[derive(Parser, Debug)]
#[command(name = "color-catalog-tools", version,
          about = "Ingest color maps into a catalog directory")]
struct Args {
    /// HJSON file describing the catalog and its color maps.
    #[arg(long)]
    manifest: PathBuf,
    /// Directory of the raw sample files (default: the manifest's).
    #[arg(long)]
    source_dir: Option<PathBuf>,
    /// Catalog directory to write; created if needed.
    #[arg(long)]
    target_dir: PathBuf,
}

/// Read the samples of `path`, scaling them to [0, 1] if any
/// component exceeds 1.
fn read_source(path: &Path) -> Result<Vec<RGB<f64>>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let mut rows = samples::parse_rows(path, &text)?;
    if rows.iter().flatten().any(|&x| x > 1.) {
        tracing::debug!("{}: scaling 8 bits components", path.display());
        for x in rows.iter_mut().flatten() { *x /= 255. }
    }
    Ok(samples::check_samples(path, &rows)?)
}

fn ingest_map(map: &MapEntry, source_dir: &Path, target_dir: &Path)
              -> Result<()> {
    let colors = read_source(&source_dir.join(&map.source))
        .with_context(|| format!("color map {:?}", map.meta.name))?;
    samples::write_samples(&target_dir.join(&map.meta.file_name), &colors)?;
    write_json(&target_dir.join(format!("{}.json", map.meta.name)), &map.meta)?;
    tracing::info!("{}: {} samples", map.meta.name, colors.len());
    Ok(())
}

/// Write the catalog described by `manifest` into `target_dir`.
fn ingest(manifest: &Manifest, source_dir: &Path, target_dir: &Path)
          -> Result<()> {
    fs::create_dir_all(target_dir)
        .with_context(|| format!("cannot create {}", target_dir.display()))?;
    for map in &manifest.maps {
        ingest_map(map, source_dir, target_dir)?;
    }
    let catalog = CatalogMeta {
        color_maps: Some(manifest.maps.iter()
                         .map(|m| format!("{}.json", m.meta.name)).collect()),
        ..manifest.catalog.clone()
    };
    write_json(&target_dir.join(CATALOG_FILE_NAME), &catalog)?;
    tracing::info!("catalog {} written to {}", catalog.id(),
                   target_dir.display());
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env()
                         .unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let text = fs::read_to_string(&args.manifest)
        .with_context(|| format!("cannot read {}", args.manifest.display()))?;
    let manifest = Manifest::parse(&text)
        .with_context(|| format!("{}", args.manifest.display()))?;
    let source_dir = match args.source_dir {
        Some(d) => d,
        None => args.manifest.parent().map(Path::to_path_buf)
            .unwrap_or_default(),
    };
    ingest(&manifest, &source_dir, &args.target_dir)
}
