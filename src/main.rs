use clap::{Parser, Subcommand};
use folio_view::page::Page;
use folio_view::{config, layout, output, script, shell};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "folio-view")]
#[command(about = "Behavior layer for single-page portfolio sites")]
#[command(long_about = "\
Behavior layer for single-page portfolio sites

A page layout (TOML) describes the sections, stats, education cards, project
slides and modals. From it folio-view renders the static HTML shell, and it can
replay scripted user sessions against an in-memory copy of the page to show
the resulting view state.

Layout structure:

  title = \"Ada Lovelace\"
  [[sections]]                # In page order
  id = \"about\"                # Target of the nav link and shortcuts
  title = \"About\"
  stats = [{ value = \"150+\", label = \"Programs\" }]
  [[modals]]
  id = \"note-g\"
  title = \"Note G\"
  body = \"Markdown text\"

Behavior tuning (scroll offsets, throttle intervals, animation timing) lives in
behavior.toml. Run 'folio-view gen-config' to print a documented stock file.")]
#[command(version)]
struct Cli {
    /// Behavior config file (missing file means stock defaults)
    #[arg(long, default_value = "behavior.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the HTML shell and copy assets
    Build {
        /// Page layout file
        #[arg(long, default_value = "layout.toml")]
        layout: PathBuf,
        /// Asset directory copied next to the page
        #[arg(long)]
        assets: Option<PathBuf>,
        /// Output directory
        #[arg(long, default_value = "dist")]
        output: PathBuf,
    },
    /// Replay a JSON step script and print the resulting view state
    Simulate {
        #[arg(long, default_value = "layout.toml")]
        layout: PathBuf,
        /// Step script (JSON array)
        #[arg(long)]
        script: PathBuf,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate layout and behavior config without building
    Check {
        #[arg(long, default_value = "layout.toml")]
        layout: PathBuf,
    },
    /// Print a stock behavior.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Build {
            layout: layout_path,
            assets,
            output: output_dir,
        } => {
            let page_layout = layout::load_layout(&layout_path)?;
            config::load_config(&cli.config)?;
            println!("==> Rendering {}", layout_path.display());
            let report = shell::build(&page_layout, assets.as_deref(), &output_dir)?;
            output::print_build_output(&report);
        }
        Command::Simulate {
            layout: layout_path,
            script: script_path,
            json,
        } => {
            let page_layout = layout::load_layout(&layout_path)?;
            let behavior = config::load_config(&cli.config)?;
            let steps = script::load_script(&script_path)?;
            let mut page = Page::new(page_layout.to_document(), behavior);
            let report = script::run(&mut page, &steps)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                output::print_simulation(&report);
            }
        }
        Command::Check {
            layout: layout_path,
        } => {
            println!("==> Checking {}", layout_path.display());
            let page_layout = layout::load_layout(&layout_path)?;
            config::load_config(&cli.config)?;
            output::print_check_output(&page_layout);
            println!("==> Layout and config are valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
