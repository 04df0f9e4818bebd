use std::{io, io::Write, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use switchsim::{driver, time::Slot, Config, Discipline, Format};

/// Simulate a slotted N-port packet switch and print one summary line:
/// ports, load, queue type, average delay, link utilization and drop
/// probability.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON config file; flags given on the command line override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of switch ports
    #[arg(short = 'N', long = "ports")]
    num_ports: Option<usize>,

    /// Capacity of every input and output buffer
    #[arg(short = 'B', long = "buffer")]
    buffer_size: Option<usize>,

    /// Per-port, per-slot packet arrival probability
    #[arg(short = 'p', long = "prob")]
    packet_gen_prob: Option<f64>,

    /// Arbitration discipline: INQ, KOUQ or iSLIP
    #[arg(short = 'q', long = "queue")]
    queue_type: Option<Discipline>,

    /// Number of slots to simulate
    #[arg(short = 'T', long = "slots")]
    max_time_slots: Option<u64>,

    /// Knockout limit as a fraction of the port count (KOUQ only)
    #[arg(short = 'K', long = "knockout")]
    knockout_fraction: Option<f64>,

    /// Seed for every random draw
    #[arg(short, long)]
    seed: Option<u64>,

    /// Do not bound the input buffers
    #[arg(long)]
    unbounded_input: bool,

    /// Also append the summary line to this file
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Summary line format
    #[arg(long, value_enum, default_value_t = Format::Tsv)]
    format: Format,

    /// Enable debug log messages
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    fn into_config(self) -> Result<Config> {
        let mut cfg = match &self.config {
            Some(path) => driver::read_config(path)
                .with_context(|| format!("failed to read config from {}", path.display()))?,
            None => Config::default(),
        };
        if let Some(v) = self.num_ports {
            cfg.num_ports = v;
        }
        if let Some(v) = self.buffer_size {
            cfg.buffer_size = v;
        }
        if let Some(v) = self.packet_gen_prob {
            cfg.packet_gen_prob = v;
        }
        if let Some(v) = self.queue_type {
            cfg.queue_type = v;
        }
        if let Some(v) = self.max_time_slots {
            cfg.max_time_slots = Slot::new(v);
        }
        if let Some(v) = self.knockout_fraction {
            cfg.knockout_fraction = v;
        }
        if let Some(v) = self.seed {
            cfg.seed = v;
        }
        cfg.unbounded_input |= self.unbounded_input;
        Ok(cfg)
    }
}

/// Configure the logger level and formatting string.
fn setup_logger(debug: bool) {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "{}: {}", record.level(), record.args()))
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logger(args.debug);

    let format = args.format;
    let out = args.out.clone();
    let cfg = args.into_config()?;
    let record = switchsim::run(&cfg).context("simulation failed")?;

    driver::write_record(&record, format, io::stdout().lock())?;
    if let Some(path) = out {
        driver::append_record(&record, format, &path)
            .with_context(|| format!("failed to write summary to {}", path.display()))?;
    }
    Ok(())
}
