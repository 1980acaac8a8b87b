// HTTP routes
pub mod alerts;
pub mod disaster;
pub mod health;
pub mod places;

pub use alerts::*;
pub use disaster::*;
pub use health::*;
pub use places::*;
