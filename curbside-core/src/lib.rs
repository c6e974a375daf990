#![allow(clippy::too_many_arguments)]
pub mod model;
pub mod util;
