use clap::{Parser, Subcommand};
use foliogen::{config, generate, output, process, scan, types};
use std::path::PathBuf;

/// Shared flags for commands that render card images.
#[derive(clap::Args, Clone)]
struct CacheArgs {
    /// Disable the card cache and re-render every screenshot
    #[arg(long)]
    no_cache: bool,
}

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "foliogen")]
#[command(about = "Static site generator for single-page portfolio sites")]
#[command(long_about = "\
Static site generator for single-page portfolio sites

Your filesystem is the page. Numbered markdown files become prose sections,
numbered directories become project galleries, and a hero plus a contact
section are synthesized from config.toml.

Content structure:

  content/
  ├── config.toml                  # Site config (identity, colors, behavior)
  ├── assets/                      # Static assets (favicon, fonts) → copied to output root
  ├── 010-about.md                 # Prose section (numbered = on the page)
  ├── 020-projects/                # Gallery section (directory of projects)
  │   ├── config.toml              # Per-gallery card overrides (optional)
  │   ├── 010-Weather-Dashboard/   # Project
  │   │   ├── project.toml         # Category, tags, links
  │   │   ├── description.md       # Card blurb
  │   │   └── 001-cover.png        # Screenshot (lowest number becomes the card)
  │   └── 020-Task-Tracker/
  │       └── project.toml
  ├── 030-writing.md               # Another prose section
  └── wip-experiments/             # No number prefix = not rendered

Sections appear in numeric order between the hero (#home) and the contact
section (#contact), so those two slugs are reserved.

Run 'foliogen gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest, processed cards)
    #[arg(long, default_value = ".foliogen-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan content directory into a manifest
    Scan,
    /// Render card images from project screenshots
    Process(CacheArgs),
    /// Produce the final HTML page from processed cards
    Generate,
    /// Run the full pipeline: scan → process → generate
    Build(CacheArgs),
    /// Validate content directory without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            std::fs::create_dir_all(&cli.temp_dir)?;
            let manifest_path = cli.temp_dir.join("manifest.json");
            let json = serde_json::to_string_pretty(&manifest)?;
            std::fs::write(&manifest_path, json)?;
            output::print_scan_output(&manifest);
        }
        Command::Process(cache_args) => {
            let scan_manifest_path = cli.temp_dir.join("manifest.json");
            let manifest_content = std::fs::read_to_string(&scan_manifest_path)?;
            let scan_manifest: types::SiteManifest = serde_json::from_str(&manifest_content)?;
            init_thread_pool(&scan_manifest.config.processing);
            let processed_dir = cli.temp_dir.join("processed");
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_process_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let result = process::process(
                &scan_manifest_path,
                &cli.source,
                &processed_dir,
                !cache_args.no_cache,
                Some(tx),
            )?;
            printer.join().unwrap();
            let output_manifest = processed_dir.join("manifest.json");
            let json = serde_json::to_string_pretty(&result.manifest)?;
            std::fs::write(&output_manifest, &json)?;
            println!("Cache: {}", result.cache_stats);
        }
        Command::Generate => {
            let processed_dir = cli.temp_dir.join("processed");
            let processed_manifest_path = processed_dir.join("manifest.json");
            let result = generate::generate(
                &processed_manifest_path,
                &processed_dir,
                &cli.output,
                &cli.source,
            )?;
            let manifest_content = std::fs::read_to_string(&processed_manifest_path)?;
            let manifest: types::SiteManifest = serde_json::from_str(&manifest_content)?;
            output::print_generate_output(&manifest, &result, &cli.output);
        }
        Command::Build(cache_args) => {
            std::fs::create_dir_all(&cli.temp_dir)?;

            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            let scan_manifest_path = cli.temp_dir.join("manifest.json");
            let json = serde_json::to_string_pretty(&manifest)?;
            std::fs::write(&scan_manifest_path, json)?;
            output::print_scan_output(&manifest);

            println!("==> Stage 2: Processing screenshots");
            init_thread_pool(&manifest.config.processing);
            let processed_dir = cli.temp_dir.join("processed");
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_process_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let result = process::process(
                &scan_manifest_path,
                &cli.source,
                &processed_dir,
                !cache_args.no_cache,
                Some(tx),
            )?;
            printer.join().unwrap();
            let processed_manifest_path = processed_dir.join("manifest.json");
            let json = serde_json::to_string_pretty(&result.manifest)?;
            std::fs::write(&processed_manifest_path, &json)?;
            println!("Cache: {}", result.cache_stats);

            println!("==> Stage 3: Generating HTML → {}", cli.output.display());
            let gen_result = generate::generate(
                &processed_manifest_path,
                &processed_dir,
                &cli.output,
                &cli.source,
            )?;
            output::print_generate_output(&result.manifest, &gen_result, &cli.output);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores. Users can constrain down,
/// not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
