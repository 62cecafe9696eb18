use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, Sub};

pub const KG_PER_TONNE: f64 = 1000.0;

/// Carbon-dioxide-equivalent mass, stored in kilograms.
///
/// Serializes as a bare number of kilograms so persisted collections stay
/// plain JSON arrays of entries.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Co2e(f64);

impl Co2e {
    pub const ZERO: Co2e = Co2e(0.0);

    pub fn from_kg(kg: f64) -> Self {
        Self(kg)
    }

    pub fn from_tonnes(tonnes: f64) -> Self {
        Self(tonnes * KG_PER_TONNE)
    }

    pub fn kg(self) -> f64 {
        self.0
    }

    pub fn tonnes(self) -> f64 {
        self.0 / KG_PER_TONNE
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0.0
    }
}

impl Add for Co2e {
    type Output = Co2e;

    fn add(self, rhs: Co2e) -> Co2e {
        Co2e(self.0 + rhs.0)
    }
}

impl Sub for Co2e {
    type Output = Co2e;

    fn sub(self, rhs: Co2e) -> Co2e {
        Co2e(self.0 - rhs.0)
    }
}

impl Sum for Co2e {
    fn sum<I: Iterator<Item = Co2e>>(iter: I) -> Co2e {
        iter.fold(Co2e::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Co2e> for Co2e {
    fn sum<I: Iterator<Item = &'a Co2e>>(iter: I) -> Co2e {
        iter.copied().sum()
    }
}
