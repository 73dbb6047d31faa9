use pix_core::error::Result;
use pix_core::{DEFAULT_MAX_SIDE, PackOptions, pack, plan_file};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "pixdev CLI (alpha)", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack a file into square chunk images
    Pack {
        input: PathBuf,

        /// Directory the images are written into
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Largest image side in pixels
        #[arg(long, default_value_t = DEFAULT_MAX_SIDE)]
        max_side: u32,
    },

    /// Show the chunk layout for a file without writing images
    Plan {
        input: PathBuf,

        /// Largest image side in pixels
        #[arg(long, default_value_t = DEFAULT_MAX_SIDE)]
        max_side: u32,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Pack {
            input,
            out_dir,
            max_side,
        } => {
            let opts = PackOptions { max_side };
            let report = pack(&input, &out_dir, Some(&opts))?;
            for path in &report.images {
                println!("{}", path.display());
            }
            eprintln!(
                "pack: OK ({} bytes into {} image(s), uuid {})",
                report.file_size,
                report.last_seqnum,
                report.uuid.as_simple()
            );
        }

        Commands::Plan { input, max_side } => {
            let summary = plan_file(&input, max_side)?;
            for r in &summary.rows {
                println!(
                    "#{:<5} body={:<10} side={:<6} cap={}",
                    r.seqnum, r.body_size, r.side, r.capacity
                );
            }
            eprintln!(
                "plan: {} bytes, {}-byte header, {} chunk(s) of up to {} bytes",
                summary.file_size, summary.header_len, summary.last_seqnum, summary.max_body
            );
        }
    }

    Ok(())
}
