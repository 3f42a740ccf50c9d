use clap::{Parser, Subcommand};
use log::info;
use std::fs::File;
use std::io::BufReader;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use weekly_timetable::checkpoint::{Checkpoint, CsvCheckpoint, NoCheckpoint};
use weekly_timetable::data::{SchedulingInput, SchedulingOutput};
use weekly_timetable::interchange::Table;
use weekly_timetable::{Result, server, solver};

#[derive(Parser)]
#[command(author, version, about, long_about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the solver over HTTP.
    Serve {
        #[arg(long, short, env = "TIMETABLE_BIND", default_value = "127.0.0.1:8080")]
        bind: SocketAddr,
    },
    /// Run all four passes on a JSON input file.
    Run {
        #[arg(long, short)]
        input: PathBuf,
        #[arg(long, short, default_value = "timetable.csv")]
        output: PathBuf,
        /// Directory receiving one CSV table per pass.
        #[arg(long, env = "TIMETABLE_CHECKPOINT_DIR")]
        checkpoint_dir: Option<PathBuf>,
        /// Also write the full output document as JSON.
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Run only the classroom pass over a previously written table.
    Allocate {
        #[arg(long, short)]
        input: PathBuf,
        #[arg(long, short)]
        grid: PathBuf,
        #[arg(long, short, default_value = "timetable.csv")]
        output: PathBuf,
    },
}

fn read_input(path: &Path) -> Result<SchedulingInput> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

fn write_output(output: &SchedulingOutput, table: &Path, json: Option<&Path>) -> Result<()> {
    output.table.write_csv_path(table)?;
    info!("Timetable written to {}", table.display());
    if let Some(path) = json {
        serde_json::to_writer_pretty(File::create(path)?, output)?;
        info!("Output document written to {}", path.display());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match args.command {
        Command::Serve { bind } => server::run_server(bind).await,
        Command::Run {
            input,
            output,
            checkpoint_dir,
            json,
        } => {
            let input = read_input(&input)?;
            let mut checkpoint: Box<dyn Checkpoint> = match checkpoint_dir {
                Some(dir) => Box::new(CsvCheckpoint::new(dir)?),
                None => Box::new(NoCheckpoint),
            };
            let result = solver::solve_with_checkpoint(&input, checkpoint.as_mut())?;
            write_output(&result, &output, json.as_deref())
        }
        Command::Allocate { input, grid, output } => {
            let input = read_input(&input)?;
            let table = Table::read_csv_path(&grid)?;
            let result = solver::allocate_classrooms(&input, &table)?;
            write_output(&result, &output, None)
        }
    }
}
