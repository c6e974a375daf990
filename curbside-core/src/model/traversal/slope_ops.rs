//! walking cost of sloped ground. costs are expressed as seconds at the
//! reference walking speed of 4.8 km/h; the kernel rescales them to the
//! traveler's actual speed.

use uom::si::f64::{Length, Time};
use uom::si::length::meter;
use uom::si::time::second;

/// the walking speed the slope cost table assumes, meters per second.
pub const REFERENCE_WALK_SPEED: f64 = 4.0 / 3.0;

/// seconds to walk `distance` of ground whose steepest grade is
/// `max_slope`, at the reference speed. flat ground costs exactly
/// `distance / REFERENCE_WALK_SPEED`; grades pay a Tobler hiking pace
/// factor on top.
pub fn walk_cost_for_slope(distance: Length, max_slope: f32) -> Time {
    let slope = max_slope.abs() as f64;
    let pace_factor = (3.5 * ((slope + 0.05).abs() - 0.05)).exp();
    Time::new::<second>(distance.get::<meter>() / REFERENCE_WALK_SPEED * pace_factor)
}
