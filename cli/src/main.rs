//! docforge CLI - dry-run compiler for document descriptions

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use docforge::{
    submit, CellOrder, CompileOptions, DocumentSpec, DryRunTransport, JsonFormat, Phase,
};

#[derive(Parser)]
#[command(name = "docforge")]
#[command(version)]
#[command(about = "Compile JSON document descriptions into batch edit requests", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a document and print the batches a submission would send
    Compile {
        /// Input JSON document description
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Show what a document compiles to
    Stats {
        /// Input JSON document description
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Show version information
    Version,
}

#[derive(clap::Args)]
struct StyleArgs {
    /// Body font family
    #[arg(long, env = "DOCFORGE_FONT", default_value = "Arial")]
    font: String,

    /// Body font size in points
    #[arg(long, default_value = "11")]
    font_size: f32,

    /// Order of table cell insertions
    #[arg(long, value_enum, default_value = "reverse")]
    cell_order: CellOrderArg,

    /// Skip the title block
    #[arg(long)]
    no_title: bool,

    /// Fail on unsupported features instead of downgrading them
    #[arg(long)]
    strict: bool,
}

impl StyleArgs {
    fn options(&self) -> CompileOptions {
        let mut options = CompileOptions::new()
            .with_font(self.font.clone(), self.font_size)
            .with_cell_order(self.cell_order.into())
            .with_title_block(!self.no_title);
        if self.strict {
            options = options.strict();
        }
        options
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CellOrderArg {
    /// Last cell first, every write at its unshifted offset
    Reverse,
    /// First cell first, offsets include earlier content
    Natural,
}

impl From<CellOrderArg> for CellOrder {
    fn from(arg: CellOrderArg) -> Self {
        match arg {
            CellOrderArg::Reverse => CellOrder::Reverse,
            CellOrderArg::Natural => CellOrder::Natural,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Compile {
            input,
            output,
            compact,
            style,
        }) => cmd_compile(&input, output.as_deref(), compact, &style.options()),
        Some(Commands::Stats { input, style }) => cmd_stats(&input, &style.options()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: docforge compile <FILE>".yellow());
            println!("       docforge --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_compile(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    options: &CompileOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = DocumentSpec::from_path(input)?;
    let compiled = docforge::compile(&doc, options)?;
    log::info!(
        "compiled {} into {} requests",
        input.display(),
        compiled.request_count()
    );
    for notice in &compiled.notices {
        eprintln!("{}: {}", "Notice".yellow().bold(), notice.message);
    }

    let mut transport = DryRunTransport::new();
    submit(compiled.into_plan(), &mut transport)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = docforge::ops::to_json(transport.batches(), format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_stats(input: &Path, options: &CompileOptions) -> Result<(), Box<dyn std::error::Error>> {
    let doc = DocumentSpec::from_path(input)?;
    let compiled = docforge::compile(&doc, options)?;
    let stats = compiled.stats.clone();
    let notices = compiled.notices.clone();
    let final_cursor = compiled.final_cursor;
    let plan = compiled.into_plan();

    println!("{}", "Document".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    if !doc.title.is_empty() {
        println!("{}: {}", "Title".bold(), doc.title);
    }
    println!("{}: {}", "Blocks".bold(), doc.blocks.len());
    println!("{}: {}", "Final cursor".bold(), final_cursor);

    println!();
    println!("{}", "Content".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!(
        "{}: {} ({} items)",
        "Lists".bold(),
        stats.list_count,
        stats.list_item_count
    );
    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!("{}: {}", "Callouts".bold(), stats.callout_count);
    println!("{}: {}", "Code blocks".bold(), stats.code_block_count);
    println!("{}: {}", "Images".bold(), stats.image_count);

    println!();
    println!("{}", "Batches".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    let deferred: usize = plan.deferred().iter().map(|d| d.requests().len()).sum();
    for (phase, count) in [
        (Phase::Creation, plan.creation().len()),
        (Phase::Structural, plan.structural().len()),
        (Phase::StyleOnly, plan.style_only().len()),
        (Phase::Deferred, deferred),
    ] {
        let line = format!("{}: {} requests", phase, count);
        if count == 0 {
            println!("{}", line.dimmed());
        } else {
            println!("{}", line);
        }
    }
    println!("{}: {}", "Total".bold(), plan.request_count());

    if !notices.is_empty() {
        println!();
        println!("{}", "Notices".yellow().bold());
        println!("{}", "─".repeat(40).dimmed());
        for notice in notices {
            match notice.block {
                Some(index) => println!("  block {}: {}", index, notice.message),
                None => println!("  {}", notice.message),
            }
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docforge".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document-mutation compiler (dry run)");
    println!();
    println!("License: MIT");
}
