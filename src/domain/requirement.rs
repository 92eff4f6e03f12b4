use std::fmt;

use serde::Serialize;

use crate::domain::Course;

/// A degree or major requirement that courses can contribute to.
///
/// This is the only capability the [`Solver`](crate::Solver) relies on. An
/// implementation owns its matching policy and its fulfillment state, and
/// is handed completed courses one at a time.
///
/// Implementations must uphold the following contract:
///
/// - a course that is irrelevant to the requirement is a no-op: no state
///   change and no error;
/// - a relevant course may only move the requirement towards greater
///   fulfillment, never back;
/// - errors are reserved for caller misuse, such as a course identifier
///   the requirement needs to interpret but cannot.
///
/// If a requirement may be driven by more than one solve pass it should
/// also be idempotent against courses it has already seen.
pub trait Requirement {
    /// The error reported when a course cannot be evaluated.
    type Error;

    /// Offers a single course to the requirement.
    ///
    /// # Errors
    ///
    /// Implementation defined. See the trait documentation.
    fn attempt_fulfill(&mut self, course: &Course) -> Result<(), Self::Error>;
}

impl<R: Requirement + ?Sized> Requirement for &mut R {
    type Error = R::Error;

    fn attempt_fulfill(&mut self, course: &Course) -> Result<(), Self::Error> {
        (**self).attempt_fulfill(course)
    }
}

impl<R: Requirement + ?Sized> Requirement for Box<R> {
    type Error = R::Error;

    fn attempt_fulfill(&mut self, course: &Course) -> Result<(), Self::Error> {
        (**self).attempt_fulfill(course)
    }
}

/// How far a requirement has progressed towards satisfaction.
///
/// Values are ordered by advancement, so a requirement's fulfillment
/// before and after a course should always compare `before <= after`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Fulfillment {
    /// Nothing has counted towards the requirement yet.
    Unfulfilled,
    /// Some, but not all, of the requirement has been met.
    Partial {
        /// Units earned so far (courses or credit hours).
        earned: u32,
        /// Units needed in total.
        needed: u32,
    },
    /// The requirement is met.
    Fulfilled,
}

impl Fulfillment {
    /// Classifies `earned` out of `needed` units.
    ///
    /// A requirement that needs nothing is always fulfilled.
    #[must_use]
    pub const fn from_progress(earned: u32, needed: u32) -> Self {
        if earned >= needed {
            Self::Fulfilled
        } else if earned == 0 {
            Self::Unfulfilled
        } else {
            Self::Partial { earned, needed }
        }
    }

    /// Whether the requirement is met.
    #[must_use]
    pub const fn is_satisfied(&self) -> bool {
        matches!(self, Self::Fulfilled)
    }

    /// Progress as a fraction in `0.0..=1.0`.
    ///
    /// A hand-built `Partial` that needs nothing, or has earned more than it
    /// needs, counts as complete.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        match *self {
            Self::Unfulfilled => 0.0,
            Self::Partial { needed: 0, .. } | Self::Fulfilled => 1.0,
            Self::Partial { earned, needed } => (f64::from(earned) / f64::from(needed)).min(1.0),
        }
    }
}

impl PartialOrd for Fulfillment {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        use std::cmp::Ordering;

        if self == other {
            return Some(Ordering::Equal);
        }
        // equal ratios over different totals are incomparable
        match self.ratio().partial_cmp(&other.ratio()) {
            Some(Ordering::Equal) => None,
            ordering => ordering,
        }
    }
}

impl fmt::Display for Fulfillment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Unfulfilled => write!(f, "unfulfilled"),
            Self::Partial { earned, needed } => write!(f, "partial ({earned}/{needed})"),
            Self::Fulfilled => write!(f, "fulfilled"),
        }
    }
}

/// Read access to a requirement's state after solving.
///
/// This sits outside the solving contract: the solver never calls it.
pub trait Progress {
    /// The current fulfillment state.
    fn fulfillment(&self) -> Fulfillment;

    /// Courses that have counted towards the requirement, in the order they
    /// were first applied.
    fn matched(&self) -> &[Course];
}
