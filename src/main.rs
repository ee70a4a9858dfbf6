use clap::Parser;
use krishi_atlas::dataset;
use krishi_atlas::location::StateResolver;
use krishi_atlas::map::{CropMap, OUTPUT_FILE};
use std::path::PathBuf;

/// Krishi Atlas — interactive crop production map for India.
///
/// Reads a state-level agricultural CSV, resolves each state name to
/// coordinates (seeded cache first, Nominatim fallback), and writes a
/// self-contained Leaflet map with one toggle-able layer per crop.
///
/// Examples:
///   krishi-atlas crop_data.csv
///   krishi-atlas harvest_2020.csv -o harvest_map.html
///   krishi-atlas crop_data.csv --offline
#[derive(Parser)]
#[command(name = "krishi-atlas", version, about, long_about = None)]
struct Cli {
    /// Input CSV file with the ten crop dataset columns.
    #[arg(index = 1, default_value = "crop_data.csv")]
    input: PathBuf,

    /// Output HTML file (overwritten if present).
    #[arg(long, short = 'o', default_value = OUTPUT_FILE)]
    output: PathBuf,

    /// Offline mode: only cached states resolve; no network calls.
    #[arg(long)]
    offline: bool,

    /// Number of preview rows printed after loading.
    #[arg(long, default_value_t = 5)]
    preview_rows: usize,
}

fn main() {
    let cli = Cli::parse();

    // ── Load dataset ────────────────────────────────────────────

    let records = dataset::load_records(&cli.input).unwrap_or_else(|e| {
        eprintln!("Error loading {}: {}", cli.input.display(), e);
        std::process::exit(1);
    });

    eprintln!("Loaded file: {} ({} rows)", cli.input.display(), records.len());
    eprintln!("Preview of loaded data:");
    eprint!("{}", dataset::preview(&records, cli.preview_rows));

    // ── Resolve state coordinates ───────────────────────────────

    let states = dataset::distinct_states(&records);
    let mut resolver = StateResolver::new();
    if cli.offline {
        resolver.set_offline(true);
    }

    let report = resolver.resolve_all(&states);
    eprintln!(
        "Resolved {}/{} states ({} cached, {} fetched)",
        report.resolved(),
        states.len(),
        report.cache_hits,
        report.fetched,
    );
    for (state, reason) in &report.failed {
        eprintln!("  unresolved: {} ({}) — its rows will be skipped", state, reason);
    }

    // ── Build the map ───────────────────────────────────────────

    let mut map = CropMap::new();
    // Layers exist for every crop, even if all its rows end up skipped.
    for crop in dataset::distinct_crops(&records) {
        map.add_layer(&crop);
    }
    for record in &records {
        if let Some(coord) = resolver.coordinate(&record.state) {
            map.add_marker(record, coord);
        }
    }

    eprintln!(
        "Placed {} markers across {} crop layers",
        map.marker_count(),
        map.layer_count(),
    );

    // ── Write output ────────────────────────────────────────────

    map.save(&cli.output).unwrap_or_else(|e| {
        eprintln!("Error writing {}: {}", cli.output.display(), e);
        std::process::exit(1);
    });

    println!("Map has been saved as '{}'", cli.output.display());
}
