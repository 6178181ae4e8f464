pub mod vector;

pub use vector::Vec3;

pub const AIR_DENSITY_SEA_LEVEL: f64 = 1.225;
