//! lbacache inspector
//!
//! Command-line harness around the address resolver: builds a geometry from
//! a YAML file and/or flag overrides, then resolves a single virtual LBA or
//! sweeps a range, printing where each block lands.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                    lbacache inspector                      │
//! ├────────────────────────────────────────────────────────────┤
//! │  geometry file / flags ──► CacheGeometry ──► Resolver      │
//! │                                                 │          │
//! │              --vlba N  ──► one address          ▼          │
//! │              (default) ──► sweep 0..end     stdout         │
//! └────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use serde_json::json;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use lbacache::{AddressResolver, CacheGeometry, ResolvedAddress, Result};

// =============================================================================
// CLI Arguments
// =============================================================================

/// lbacache inspector - resolve virtual LBAs to cluster and cache coordinates
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML file with the cache geometry (flags below override its fields)
    #[arg(long, env = "LBACACHE_GEOMETRY_FILE")]
    geometry_file: Option<PathBuf>,

    /// Cluster size in bytes
    #[arg(long, env = "LBACACHE_CLUSTER_SIZE_BYTES")]
    cluster_size_bytes: Option<u64>,

    /// Logical block size in bytes
    #[arg(long, env = "LBACACHE_LBA_SIZE_BYTES")]
    lba_size_bytes: Option<u64>,

    /// Total number of cache slots
    #[arg(long, env = "LBACACHE_CACHE_SLOTS")]
    cache_slots: Option<u64>,

    /// Ways per cache line
    #[arg(long, env = "LBACACHE_CACHE_ASSOCIATIVITY")]
    cache_associativity: Option<u64>,

    /// Resolve this single virtual LBA instead of sweeping
    #[arg(long)]
    vlba: Option<i64>,

    /// Sweep end (exclusive), in virtual LBAs
    #[arg(long, env = "LBACACHE_SWEEP_END", default_value = "1048576")]
    sweep_end: u64,

    /// Sweep step in virtual LBAs (default: one cluster)
    #[arg(long, env = "LBACACHE_SWEEP_STEP")]
    sweep_step: Option<u64>,

    /// Emit one JSON object per resolved address
    #[arg(long, env = "LBACACHE_JSON")]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON")]
    log_json: bool,
}

// =============================================================================
// Main
// =============================================================================

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging(&args);

    info!("Starting lbacache inspector");

    let geometry = load_geometry(&args)?;
    let resolver = AddressResolver::new(geometry)?;

    info!("  Geometry: {}", geometry);
    info!("  Blocks per cluster: {}", resolver.cluster_lbas());
    info!("  Cache lines: {}", resolver.cache_lines());

    match args.vlba {
        Some(vlba) => {
            let resolved = resolver.resolve_signed(vlba)?;
            print_resolved(vlba as u64, &resolved, args.json);
        }
        None => {
            let step = args.sweep_step.unwrap_or_else(|| resolver.cluster_lbas());
            sweep(&resolver, args.sweep_end, step, args.json);
        }
    }

    Ok(())
}

// =============================================================================
// Geometry Loading
// =============================================================================

/// Build the geometry: YAML file first (if given), then flag overrides.
fn load_geometry(args: &Args) -> Result<CacheGeometry> {
    let mut geometry = match &args.geometry_file {
        Some(path) => {
            let raw = fs::read_to_string(path)?;
            serde_yaml::from_str(&raw)?
        }
        None => CacheGeometry::default(),
    };

    if let Some(cluster_size_bytes) = args.cluster_size_bytes {
        geometry.cluster_size_bytes = cluster_size_bytes;
    }
    if let Some(lba_size_bytes) = args.lba_size_bytes {
        geometry.lba_size_bytes = lba_size_bytes;
    }
    if let Some(cache_slots) = args.cache_slots {
        geometry.cache_slots = cache_slots;
    }
    if let Some(cache_associativity) = args.cache_associativity {
        geometry.cache_associativity = cache_associativity;
    }

    Ok(geometry)
}

// =============================================================================
// Output
// =============================================================================

fn print_resolved(vlba: u64, resolved: &ResolvedAddress, as_json: bool) {
    if as_json {
        let line = json!({
            "vlba": vlba,
            "cluster_index": resolved.cluster_index,
            "cluster_offset": resolved.cluster_offset,
            "tag": resolved.tag,
            "line_index": resolved.line_index,
            "slots": resolved.slots.iter().collect::<Vec<_>>(),
        });
        println!("{}", line);
    } else {
        println!("{:>12}  {}", vlba, resolved);
    }
}

fn sweep(resolver: &AddressResolver, end: u64, step: u64, as_json: bool) {
    let step = step.max(1);
    let mut vlba = 0;
    while vlba < end {
        let resolved = resolver.resolve(vlba);
        print_resolved(vlba, &resolved, as_json);
        vlba += step;
    }
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .init();
    }
}
