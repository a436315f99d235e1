//! locml - OpenOffice locale to LDML conversion tool
//!
//! This is the main CLI entry point that orchestrates reading, reference
//! resolution and LDML generation across a batch of locale files.

mod cli;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{bail, Context, Result};
use clap::Parser;
use rayon::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use locml_core::record::{read_locale, ReadOptions};
use locml_core::resolve::{FsLoader, ResolveOptions};
use locml_core::{compare_records, load_document, render_text, write_ldml, Diagnostics};

use cli::Args;

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Expand glob patterns to concrete paths. Literal paths pass through so
/// a typo'd filename still produces a useful load error later.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();
    for pattern in patterns {
        let mut matched = false;
        for entry in glob::glob(pattern).with_context(|| format!("invalid pattern {pattern}"))? {
            let path = entry.with_context(|| format!("failed to read match of {pattern}"))?;
            matched = true;
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
        if !matched && !pattern.contains(['*', '?', '[']) {
            let path = PathBuf::from(pattern);
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}

/// Returns the number of files that failed.
fn run(args: Args) -> Result<usize> {
    let files = expand_globs(&args.files)?;
    if files.is_empty() {
        bail!("no input files matched");
    }

    let read_opts = ReadOptions {
        resolve_refs: !args.no_resolve,
        resolve: ResolveOptions {
            max_hops: args.max_hops,
            deadline: None,
        },
    };

    if let Some(other) = &args.compare {
        if files.len() != 1 {
            bail!("--compare takes exactly one input file");
        }
        return run_compare(&files[0], other, &read_opts, &args.output);
    }

    if let Some(dir) = &args.out_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    }

    let threads = args.concurrency.unwrap_or_else(num_cpus::get);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();

    let failures = AtomicUsize::new(0);
    files.par_iter().for_each(|path| {
        if let Err(err) = convert_file(path, &read_opts, args.out_dir.as_deref()) {
            error!("failed to convert {}: {err:#}", path.display());
            failures.fetch_add(1, Ordering::Relaxed);
        }
    });
    Ok(failures.into_inner())
}

fn convert_file(path: &Path, opts: &ReadOptions, out_dir: Option<&Path>) -> Result<()> {
    let diag = Diagnostics::new();
    let doc =
        load_document(path).with_context(|| format!("failed to load {}", path.display()))?;
    let record = read_locale(&doc, &FsLoader, opts, &diag);
    let ldml = write_ldml(&record)?;

    match out_dir {
        Some(dir) => {
            let out_path = dir.join(format!("{}.xml", record.locale));
            fs::write(&out_path, ldml)
                .with_context(|| format!("failed to write {}", out_path.display()))?;
            info!(
                locale = record.locale.as_str(),
                output = %out_path.display(),
                skipped_categories = record.failed_categories.len(),
                "converted"
            );
        }
        None => println!("{ldml}"),
    }
    Ok(())
}

fn run_compare(
    left_path: &Path,
    right_path: &Path,
    opts: &ReadOptions,
    output: &str,
) -> Result<usize> {
    let diag = Diagnostics::new();
    let left = load_document(left_path)
        .with_context(|| format!("failed to load {}", left_path.display()))?;
    let right = load_document(right_path)
        .with_context(|| format!("failed to load {}", right_path.display()))?;
    let left = read_locale(&left, &FsLoader, opts, &diag);
    let right = read_locale(&right, &FsLoader, opts, &diag);

    let diffs = compare_records(&left, &right);
    match output {
        "json" => println!("{}", serde_json::to_string_pretty(&diffs)?),
        _ => print!("{}", render_text(&diffs)),
    }
    Ok(usize::from(!diffs.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn globs_expand_sorted_and_deduplicated() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.xml", "a.xml"] {
            let mut f = fs::File::create(dir.path().join(name)).unwrap();
            writeln!(f, "<Locale/>").unwrap();
        }
        let pattern = dir.path().join("*.xml").to_string_lossy().into_owned();
        let files = expand_globs(&[pattern.clone(), pattern]).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("a.xml"));
        assert!(files[1].ends_with("b.xml"));
    }

    #[test]
    fn literal_missing_path_passes_through() {
        let files = expand_globs(&["does-not-exist.xml".to_string()]).unwrap();
        assert_eq!(files, vec![PathBuf::from("does-not-exist.xml")]);
    }
}
