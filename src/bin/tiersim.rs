use std::collections::HashSet;
use std::io::BufReader;
use std::path::PathBuf;

use log::{error, warn};
use structopt::StructOpt;

use tiercache_sim::config::{self, Cli};
use tiercache_sim::machine::Machine;
use tiercache_sim::output;
use tiercache_sim::trace::TraceReader;

fn run() -> tiercache_sim::error::Result<()> {
    let cli = Cli::from_args();

    #[cfg(feature = "figment_config")]
    let configuration = config::load(&cli)?;
    #[cfg(not(feature = "figment_config"))]
    let configuration = config::load(&cli)?;

    #[cfg(feature = "init_env_logger")]
    tiercache_sim::init_env_logger(configuration.verbose);

    if configuration.file_name.is_empty() {
        warn!("file_name is empty, nothing to replay");
        return Ok(());
    }

    let mut machine = Machine::new(&configuration, 0)?;

    let file = std::fs::File::open(&configuration.file_name)
        .map_err(|e| tiercache_sim::error::Error::Configuration(format!("{e}")))?;
    let mut reader = TraceReader::new(BufReader::new(file));

    let mut seen = HashSet::new();
    let mut bootstrap_blocks = Vec::new();
    let mut lines = Vec::new();
    for (count, line) in reader.by_ref().enumerate() {
        if configuration.operation_count != 0 && count as u64 >= configuration.operation_count {
            break;
        }
        let block = line.global_block();
        if seen.insert(block) {
            bootstrap_blocks.push(block);
        }
        lines.push(line);
    }
    machine.bootstrap(bootstrap_blocks)?;

    for line in &lines {
        let block = line.global_block();
        match line.op {
            tiercache_sim::trace::TraceOp::Read => machine.read(block)?,
            tiercache_sim::trace::TraceOp::Write => machine.write(block)?,
            tiercache_sim::trace::TraceOp::Flush => machine.flush(block)?,
            tiercache_sim::trace::TraceOp::Invalid(_) => {}
        }
    }

    if reader.invalid_lines > 0 {
        warn!("{} invalid trace lines skipped", reader.invalid_lines);
    }

    let summary_path = PathBuf::from(output::DEFAULT_SUMMARY_FILE);
    output::write_summary(&summary_path, lines.len() as u64, machine.total_duration())?;

    if configuration.verbose {
        output::log_verbose_summary(&machine, lines.len() as u64);
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        error!("{e}");
        std::process::exit(1);
    }
}
