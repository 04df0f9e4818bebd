use std::fmt;

use crate::{metrics::Metrics, time::Slot, Discipline};

/// The summary of one simulation run.
///
/// Averages whose denominator is zero (no packets transmitted, or a run of
/// zero slots) are `None` rather than NaN.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Record {
    /// The number of switch ports.
    pub num_ports: usize,
    /// The per-port, per-slot arrival probability.
    pub packet_gen_prob: f64,
    /// The arbitration discipline.
    pub queue_type: Discipline,
    /// Mean number of slots between a packet's arrival and its transmission.
    pub avg_packet_delay: Option<f64>,
    /// Fraction of (link, slot) pairs in which a link carried a packet.
    pub avg_link_utilization: Option<f64>,
    /// Drops of every kind per (port, slot) pair.
    pub drop_probability: Option<f64>,

    // Raw counters
    pub generated: u64,
    pub transmitted: u64,
    pub capacity_drops: u64,
    pub knockout_drops: u64,
    /// Packets still buffered when the run ended.
    pub in_flight: u64,
}

impl Record {
    pub(crate) fn new(
        num_ports: usize,
        packet_gen_prob: f64,
        queue_type: Discipline,
        slots: Slot,
        metrics: &Metrics,
        in_flight: u64,
    ) -> Self {
        let port_slots = num_ports as f64 * slots.into_f64();
        let transmitted = metrics.transmitted as f64;
        Self {
            num_ports,
            packet_gen_prob,
            queue_type,
            avg_packet_delay: ratio(metrics.total_delay.into_f64(), transmitted),
            avg_link_utilization: ratio(metrics.busy_link_slots as f64, port_slots),
            drop_probability: ratio(metrics.dropped() as f64, port_slots),
            generated: metrics.generated,
            transmitted: metrics.transmitted,
            capacity_drops: metrics.capacity_drops(),
            knockout_drops: metrics.knockout_drops,
            in_flight,
        }
    }

    /// Drops of every kind.
    pub fn dropped(&self) -> u64 {
        self.capacity_drops + self.knockout_drops
    }
}

fn ratio(num: f64, den: f64) -> Option<f64> {
    (den > 0.0).then(|| num / den)
}

struct OrNa(Option<f64>);

impl fmt::Display for OrNa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(val) => write!(f, "{val}"),
            None => f.write_str("N/A"),
        }
    }
}

/// Tab-separated: ports, load, discipline, delay, utilization, drop probability.
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.num_ports,
            self.packet_gen_prob,
            self.queue_type,
            OrNa(self.avg_packet_delay),
            OrNa(self.avg_link_utilization),
            OrNa(self.drop_probability),
        )
    }
}

/// How a [`Record`] is rendered.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    clap::ValueEnum,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// One tab-separated line.
    #[default]
    Tsv,
    /// One JSON object per line.
    Json,
}

impl Record {
    pub fn render(&self, format: Format) -> Result<String, serde_json::Error> {
        match format {
            Format::Tsv => Ok(self.to_string()),
            Format::Json => serde_json::to_string(self),
        }
    }
}
