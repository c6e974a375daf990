pub mod azimuth_ops;
