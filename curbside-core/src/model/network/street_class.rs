use serde::{Deserialize, Serialize};

pub const CROSSING_CLASS_MASK: u8 = 7; // ignore platform bits
pub const ANY_PLATFORM_MASK: u8 = 24;

/// coarse classification of a street segment, compatible with the
/// platform/crossing bit masks used by the transit linker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StreetClass {
    Street,
    Crossing,
    OtherPath,
    OtherPlatform,
    TrainPlatform,
    Link,
}

impl StreetClass {
    pub fn code(&self) -> u8 {
        match self {
            StreetClass::Street => 3,
            StreetClass::Crossing => 4,
            StreetClass::OtherPath => 5,
            StreetClass::OtherPlatform => 8,
            StreetClass::TrainPlatform => 16,
            StreetClass::Link => 32,
        }
    }

    pub fn is_platform(&self) -> bool {
        self.code() & ANY_PLATFORM_MASK != 0
    }

    pub fn crossing_class(&self) -> u8 {
        self.code() & CROSSING_CLASS_MASK
    }
}

impl Default for StreetClass {
    fn default() -> Self {
        StreetClass::OtherPath
    }
}
