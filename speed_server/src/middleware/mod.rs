mod bearer;

pub use bearer::{BearerAuthMiddlewareFactory, BearerAuthMiddlewareService};
