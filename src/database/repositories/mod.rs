/// Repository implementations over the station database
///
/// Handlers depend on the traits; the `*Impl` types pull connections from
/// a provider closure so tests can swap in failing or fake stores.

pub mod measurement_repository;
pub mod station_repository;
pub mod variable_repository;

pub use measurement_repository::{MeasurementRepository, MeasurementRepositoryImpl};
pub use station_repository::{StationRepository, StationRepositoryImpl};
pub use variable_repository::{VariableRepository, VariableRepositoryImpl};
