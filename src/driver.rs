use std::{fs::OpenOptions, io::Write, path::Path};

use crate::{
    arbiter::{Arbitrate, Inq, Islip, Kouq},
    port::Ports,
    rng::SimRng,
    simulation::Simulation,
    switch::Switch,
    time::Slot,
    traffic::Traffic,
    Discipline, Format, Record,
};

/// A switch simulation configuration.
///
/// Every field has a default, so a JSON config file only needs to name the
/// fields it changes.
#[derive(
    Debug, Clone, PartialEq, typed_builder::TypedBuilder, serde::Serialize, serde::Deserialize,
)]
#[serde(default)]
pub struct Config {
    /// The number of switch ports.
    #[builder(default = 8)]
    pub num_ports: usize,
    /// The capacity of every input and output buffer.
    #[builder(default = 4)]
    pub buffer_size: usize,
    /// The per-port, per-slot probability that a packet arrives.
    #[builder(default = 0.5)]
    pub packet_gen_prob: f64,
    #[builder(default)]
    pub queue_type: Discipline,
    /// The number of slots to simulate.
    #[builder(default = Slot::new(10_000), setter(into))]
    pub max_time_slots: Slot,
    /// The knockout limit as a fraction of the port count (KOUQ only).
    #[builder(default = 0.6)]
    pub knockout_fraction: f64,
    /// Seeds every random draw of the run.
    #[builder(default)]
    pub seed: u64,
    /// Lifts the capacity limit on input buffers.
    #[builder(default)]
    pub unbounded_input: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), Error> {
        if self.num_ports == 0 {
            return Err(Error::NoPorts);
        }
        check_probability("packet_gen_prob", self.packet_gen_prob)?;
        check_probability("knockout_fraction", self.knockout_fraction)?;
        Ok(())
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), Error> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::Probability { name, value })
    }
}

/// Runs one simulation to completion and summarizes it.
pub fn run(cfg: &Config) -> Result<Record, Error> {
    cfg.validate()?;
    log::info!(
        "simulating a {}-port {} switch for {} slots (p = {}, seed = {})",
        cfg.num_ports,
        cfg.queue_type,
        cfg.max_time_slots,
        cfg.packet_gen_prob,
        cfg.seed,
    );
    let record = match cfg.queue_type {
        Discipline::Inq => simulate(cfg, Inq),
        Discipline::Kouq => {
            let kouq = Kouq::with_fraction(cfg.num_ports, cfg.knockout_fraction);
            log::debug!("knockout limit K = {}", kouq.limit());
            simulate(cfg, kouq)
        }
        Discipline::Islip => simulate(cfg, Islip::new(cfg.num_ports)),
    };
    log::info!(
        "{} generated, {} transmitted, {} dropped, {} still buffered",
        record.generated,
        record.transmitted,
        record.dropped(),
        record.in_flight,
    );
    Ok(record)
}

fn simulate<A: Arbitrate>(cfg: &Config, arbiter: A) -> Record {
    let switch = Switch::builder()
        .ports(Ports::new(cfg.num_ports, cfg.buffer_size, cfg.unbounded_input))
        .arbiter(arbiter)
        .traffic(Traffic::new(cfg.packet_gen_prob))
        .build();
    let sim = Simulation::builder()
        .rng(SimRng::from_seed(cfg.seed))
        .switch(switch)
        .max_slots(cfg.max_time_slots)
        .build();
    let outcome = sim.run();
    Record::new(
        cfg.num_ports,
        cfg.packet_gen_prob,
        cfg.queue_type,
        cfg.max_time_slots,
        &outcome.metrics,
        outcome.in_flight,
    )
}

pub fn read_config(path: impl AsRef<Path>) -> Result<Config, Error> {
    let s = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&s)?)
}

/// Writes `record` as a single line.
pub fn write_record(record: &Record, format: Format, mut out: impl Write) -> Result<(), Error> {
    writeln!(out, "{}", record.render(format)?)?;
    Ok(())
}

/// Appends `record` as a single line to the file at `path`, creating it if needed.
pub fn append_record(
    record: &Record,
    format: Format,
    path: impl AsRef<Path>,
) -> Result<(), Error> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    write_record(record, format, file)
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("a switch needs at least one port")]
    NoPorts,

    #[error("{name} must lie in [0, 1], got {value}")]
    Probability { name: &'static str, value: f64 },

    #[error("serde error")]
    Serde(#[from] serde_json::Error),

    #[error("IO error")]
    Io(#[from] std::io::Error),
}
