pub mod logging;
pub mod timing;

pub use logging::logging_middleware;
pub use timing::timing_middleware;
