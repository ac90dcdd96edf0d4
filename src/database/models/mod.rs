pub mod measurement;
pub mod station;
pub mod variable;

pub use measurement::{LatestReading, Measurement, NewMeasurement};
pub use station::Station;
pub use variable::Variable;
