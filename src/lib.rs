//! A slotted N-port packet switch simulator comparing input queueing,
//! knockout output queueing and iSLIP arbitration.

pub mod driver;
pub mod time;

pub(crate) mod arbiter;
pub(crate) mod data;
pub(crate) mod ident;
pub(crate) mod metrics;
pub(crate) mod packet;
pub(crate) mod port;
pub(crate) mod queue;
pub(crate) mod rng;
pub(crate) mod simulation;
pub(crate) mod switch;
pub(crate) mod traffic;

pub use arbiter::{Discipline, ParseDisciplineError};
pub use data::{Format, Record};
pub use driver::{run, Config, Error};
pub use ident::{PacketId, PortId};
