use audit_intake::batch::process_batch;
use audit_intake::formats::json::write_json_array;
use audit_intake::sources::Record;
use clap::{Parser, Subcommand};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "audit-intake")]
#[command(about = "Audit event batch processor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Decodes and validates a batch file, printing the JSON event array.
    Process {
        /// Batch file: a JSON array of channel-tagged records.
        #[arg(short, long)]
        input: PathBuf,
        /// Output file; stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Process { input, output } => {
            let contents = fs::read_to_string(&input)?;
            let records: Vec<Record> = serde_json::from_str(&contents)?;

            let events = process_batch(&records)?;

            match output {
                Some(path) => {
                    let mut file = File::create(path)?;
                    write_json_array(&mut file, &events)?;
                }
                None => {
                    let stdout = io::stdout();
                    let mut handle = stdout.lock();
                    write_json_array(&mut handle, &events)?;
                    handle.flush()?;
                }
            }

            Ok(())
        }
    }
}
