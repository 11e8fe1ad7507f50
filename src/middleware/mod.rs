pub mod metrics;
pub mod session;

pub use metrics::MetricsMiddleware;
pub use session::{CurrentUser, MaybeUser, SessionAuth};
