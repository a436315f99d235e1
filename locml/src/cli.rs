//! CLI argument parsing using clap

use std::path::PathBuf;

use clap::Parser;

/// Convert OpenOffice locale documents to LDML
#[derive(Parser, Debug)]
#[command(name = "locml")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Convert one locale to stdout
    locml data/de_DE.xml

    # Convert a whole directory, following cross-locale references
    locml "data/*.xml" -d out/

    # Keep references as LDML aliases instead of following them
    locml "data/*.xml" -d out/ --no-resolve

    # Compare two locale documents field by field
    locml data/de_DE.xml --compare other/de_DE.xml -o json
"#)]
pub struct Args {
    /// Locale files to process (supports glob patterns like "data/*.xml")
    #[arg(required = true)]
    pub files: Vec<String>,

    /// Output directory for generated LDML documents
    #[arg(short = 'd', long = "out-dir")]
    pub out_dir: Option<PathBuf>,

    /// Compare the (single) input against this locale document
    #[arg(long = "compare")]
    pub compare: Option<PathBuf>,

    /// Keep references as aliases instead of resolving them
    #[arg(long = "no-resolve")]
    pub no_resolve: bool,

    /// Maximum reference-chain length before a category is abandoned
    #[arg(long = "max-hops", default_value_t = 16)]
    pub max_hops: usize,

    /// Report format: text (default), json
    #[arg(short = 'o', long = "output", default_value = "text")]
    pub output: String,

    /// Number of parallel workers
    #[arg(short = 'c', long = "concurrency")]
    pub concurrency: Option<usize>,

    /// Show verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}
