//! packed boolean attributes for street edges. fifteen of the sixteen
//! bits are in use; widen the backing integer before adding a sixteenth.

const BACK: u16 = 0;
const ROUNDABOUT: u16 = 1;
const BOGUS_NAME: u16 = 2;
const NO_THRU_TRAFFIC: u16 = 3;
const STAIRS: u16 = 4;
const SLOPE_OVERRIDE: u16 = 5;
const WHEELCHAIR_ACCESSIBLE: u16 = 6;
const FOOTWAY: u16 = 7;
const CROSSING: u16 = 8;
const BOLLARD: u16 = 9;
const TURNSTILE: u16 = 10;
const CYCLE_BARRIER: u16 = 11;
const TRAFFIC_LIGHT_SOUND: u16 = 12;
const TRAFFIC_LIGHT_VIBRATION: u16 = 13;
const TRAFFIC_LIGHT_FLOOR_VIBRATION: u16 = 14;

/// per-edge flag word. set during graph loading, read-only at search time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeFlags(u16);

impl EdgeFlags {
    pub fn empty() -> EdgeFlags {
        EdgeFlags(0)
    }

    pub fn bits(&self) -> u16 {
        self.0
    }

    fn get(&self, index: u16) -> bool {
        self.0 >> index & 1 == 1
    }

    fn set(&mut self, index: u16, value: bool) {
        if value {
            self.0 |= 1 << index;
        } else {
            self.0 &= !(1 << index);
        }
    }

    pub fn is_back(&self) -> bool {
        self.get(BACK)
    }

    pub fn set_back(&mut self, value: bool) {
        self.set(BACK, value)
    }

    pub fn is_roundabout(&self) -> bool {
        self.get(ROUNDABOUT)
    }

    pub fn set_roundabout(&mut self, value: bool) {
        self.set(ROUNDABOUT, value)
    }

    pub fn has_bogus_name(&self) -> bool {
        self.get(BOGUS_NAME)
    }

    pub fn set_bogus_name(&mut self, value: bool) {
        self.set(BOGUS_NAME, value)
    }

    pub fn is_no_thru_traffic(&self) -> bool {
        self.get(NO_THRU_TRAFFIC)
    }

    pub fn set_no_thru_traffic(&mut self, value: bool) {
        self.set(NO_THRU_TRAFFIC, value)
    }

    pub fn is_stairs(&self) -> bool {
        self.get(STAIRS)
    }

    pub fn set_stairs(&mut self, value: bool) {
        self.set(STAIRS, value)
    }

    pub fn is_slope_override(&self) -> bool {
        self.get(SLOPE_OVERRIDE)
    }

    pub fn set_slope_override(&mut self, value: bool) {
        self.set(SLOPE_OVERRIDE, value)
    }

    pub fn is_wheelchair_accessible(&self) -> bool {
        self.get(WHEELCHAIR_ACCESSIBLE)
    }

    pub fn set_wheelchair_accessible(&mut self, value: bool) {
        self.set(WHEELCHAIR_ACCESSIBLE, value)
    }

    pub fn is_footway(&self) -> bool {
        self.get(FOOTWAY)
    }

    pub fn set_footway(&mut self, value: bool) {
        self.set(FOOTWAY, value)
    }

    pub fn is_crossing(&self) -> bool {
        self.get(CROSSING)
    }

    pub fn set_crossing(&mut self, value: bool) {
        self.set(CROSSING, value)
    }

    pub fn has_bollard(&self) -> bool {
        self.get(BOLLARD)
    }

    pub fn set_bollard(&mut self, value: bool) {
        self.set(BOLLARD, value)
    }

    pub fn has_turnstile(&self) -> bool {
        self.get(TURNSTILE)
    }

    pub fn set_turnstile(&mut self, value: bool) {
        self.set(TURNSTILE, value)
    }

    pub fn has_cycle_barrier(&self) -> bool {
        self.get(CYCLE_BARRIER)
    }

    pub fn set_cycle_barrier(&mut self, value: bool) {
        self.set(CYCLE_BARRIER, value)
    }

    pub fn has_traffic_light_sound(&self) -> bool {
        self.get(TRAFFIC_LIGHT_SOUND)
    }

    pub fn set_traffic_light_sound(&mut self, value: bool) {
        self.set(TRAFFIC_LIGHT_SOUND, value)
    }

    pub fn has_traffic_light_vibration(&self) -> bool {
        self.get(TRAFFIC_LIGHT_VIBRATION)
    }

    pub fn set_traffic_light_vibration(&mut self, value: bool) {
        self.set(TRAFFIC_LIGHT_VIBRATION, value)
    }

    pub fn has_traffic_light_floor_vibration(&self) -> bool {
        self.get(TRAFFIC_LIGHT_FLOOR_VIBRATION)
    }

    pub fn set_traffic_light_floor_vibration(&mut self, value: bool) {
        self.set(TRAFFIC_LIGHT_FLOOR_VIBRATION, value)
    }
}
