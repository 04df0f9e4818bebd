use crate::{
    arbiter::Arbitrate,
    metrics::Metrics,
    rng::SimRng,
    switch::Switch,
    time::{Slot, Slots},
};

#[derive(Debug, typed_builder::TypedBuilder)]
pub(crate) struct Simulation<A: Arbitrate> {
    // Run-time
    #[builder(default, setter(skip))]
    cur_slot: Slot,
    rng: SimRng,

    switch: Switch<A>,

    // Used for termination
    #[builder(setter(into))]
    max_slots: Slot,
}

/// The state of a finished run.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Outcome {
    pub(crate) metrics: Metrics,
    pub(crate) in_flight: u64,
}

impl<A: Arbitrate> Simulation<A> {
    pub(crate) fn run(mut self) -> Outcome {
        while !self.should_stop() {
            self.step();
        }
        self.finish()
    }

    fn step(&mut self) {
        let now = self.cur_slot;
        log::trace!("slot {now} begins");
        self.switch.step(now, &mut self.rng);
        self.cur_slot += Slots::ONE;
    }

    fn should_stop(&self) -> bool {
        self.cur_slot >= self.max_slots
    }

    fn finish(self) -> Outcome {
        Outcome {
            metrics: *self.switch.metrics(),
            in_flight: self.switch.in_flight(),
        }
    }
}
