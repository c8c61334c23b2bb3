use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use ormshim::{OPERATIONS, SequelizeTable, ShimConfig};
use ormshim_dispatch::{ManifestVersion, Resolve, SemverMatcher, StaticVersion, Version, VersionDetector};
use tracing::{debug, info};

use crate::cli::{CoverageArg, DetectArg, InspectArg};
use crate::ui::{BindingRow, FailureRow, Formatter};

pub fn inspect(arg: &InspectArg) -> Result<ExitCode> {
    let version = Version::parse(&arg.host_version)
        .with_context(|| format!("invalid version '{}'", arg.host_version))?;
    let table = SequelizeTable::declare(arg.table.features())?;

    let rows = bindings(&table, &version);
    let formatter = Formatter {
        header: Some(format!("ormshim {}", version)),
        ..Default::default()
    };
    println!("{}", formatter.build(rows));

    table
        .resolve(&version, &SemverMatcher)
        .with_context(|| format!("version {} is not supported", version))?;
    Ok(ExitCode::SUCCESS)
}

pub fn coverage(arg: &CoverageArg) -> Result<ExitCode> {
    let table = SequelizeTable::declare(arg.table.features())?;
    let boundaries = table.boundaries();
    debug!(count = boundaries.len(), "checking boundary versions");

    let failures = failures(&table, &boundaries);
    if failures.is_empty() {
        println!(
            "{} operations resolve at {} boundary versions",
            OPERATIONS.len(),
            boundaries.len()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let formatter = Formatter {
        header: Some("unmatched operations".to_string()),
        footer: Some(format!("{} failure(s)", failures.len())),
    };
    println!("{}", formatter.build(failures));
    Ok(ExitCode::FAILURE)
}

pub fn detect(arg: &DetectArg) -> Result<ExitCode> {
    let mut config = ShimConfig::load().context("failed to load configuration")?;
    if let Some(manifest) = &arg.manifest {
        config.manifest = Some(manifest.clone());
    }

    let (source, version) = detect_version(&config)?;
    info!(%version, source, "detected host version");
    println!("{} ({})", version, source);
    Ok(ExitCode::SUCCESS)
}

/// The version detection would use, and where it came from.
fn detect_version(config: &ShimConfig) -> Result<(&'static str, Version)> {
    match (&config.version, &config.manifest) {
        (Some(pinned), _) => Ok(("pinned", StaticVersion::new(pinned.as_str()).detect()?)),
        (None, Some(manifest)) => {
            let version = ManifestVersion::new(manifest).detect()?;
            Ok(("manifest", version))
        }
        (None, None) => bail!(
            "no version to detect from: set {}VERSION or pass --manifest",
            ShimConfig::ENV_PREFIX
        ),
    }
}

fn bindings(table: &SequelizeTable, version: &Version) -> Vec<BindingRow> {
    table
        .operations()
        .iter()
        .map(|op| {
            let (range, call) = match op.binding(version, &SemverMatcher) {
                Some((range, call)) => (range.to_string(), call),
                None => ("-".to_string(), "unmatched"),
            };
            BindingRow {
                operation: op.name().to_string(),
                range,
                call: call.to_string(),
            }
        })
        .collect()
}

fn failures(table: &SequelizeTable, boundaries: &[Version]) -> Vec<FailureRow> {
    boundaries
        .iter()
        .flat_map(|version| {
            table
                .unmatched(version, &SemverMatcher)
                .into_iter()
                .map(move |operation| FailureRow {
                    version: version.to_string(),
                    operation: operation.to_string(),
                })
        })
        .collect()
}
