use std::ops::{Add, AddAssign, Sub};

/// A discrete time slot of the switch's logical clock.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialOrd,
    Ord,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    derive_more::FromStr,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Slot(u64);

impl Slot {
    pub const ZERO: Slot = Self::new(0);
    pub const ONE: Slot = Self::new(1);
    pub const MAX: Slot = Self::new(u64::MAX);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn into_u64(self) -> u64 {
        self.0
    }

    pub const fn into_f64(self) -> f64 {
        self.0 as f64
    }

    /// Iterates over the slots `[0, end)`.
    pub fn until(end: Slot) -> impl Iterator<Item = Slot> {
        (0..end.0).map(Slot::new)
    }
}

/// A number of elapsed slots.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialOrd,
    Ord,
    PartialEq,
    Eq,
    Hash,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::Sum,
    derive_more::Display,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Slots(u64);

impl Slots {
    pub const ZERO: Slots = Self::new(0);
    pub const ONE: Slots = Self::new(1);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn into_u64(self) -> u64 {
        self.0
    }

    pub const fn into_f64(self) -> f64 {
        self.0 as f64
    }
}

impl From<u64> for Slot {
    fn from(val: u64) -> Self {
        Self(val)
    }
}

impl Add<Slots> for Slot {
    type Output = Slot;

    fn add(self, rhs: Slots) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign<Slots> for Slot {
    fn add_assign(&mut self, rhs: Slots) {
        *self = Self(self.0 + rhs.0)
    }
}

impl Sub<Slot> for Slot {
    type Output = Slots;

    fn sub(self, rhs: Slot) -> Self::Output {
        assert!(self >= rhs);
        Slots::new(self.0 - rhs.0)
    }
}
