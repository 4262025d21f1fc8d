//! Simulated RF device driver.
//!
//! Backs a device record with simulation when no real hardware binding is
//! attached: configuration changes apply instantly (after the same bounds
//! validation a real front end would enforce), temperature drifts as a
//! bounded random walk, and identity comes from a configurable
//! [`DeviceProfile`]. Everything random is driven by one seedable generator
//! so tests can pin behavior exactly.

pub mod profile;
pub mod rng;
pub mod simulator;

pub use profile::DeviceProfile;
pub use rng::SimRng;
pub use simulator::{SimulatedDriver, SimulatedDriverBuilder, TemperatureModel};
