mod analyze;
mod health;
mod home;

pub use analyze::analyze;
pub use health::healthcheck;
pub use home::homepage;
