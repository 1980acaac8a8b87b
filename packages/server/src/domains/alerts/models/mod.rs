pub mod alert;
pub mod region;

pub use alert::{Alert, AlertType};
pub use region::{Region, RegionType};
