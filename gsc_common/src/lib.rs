mod secret;
mod speed;

pub mod helpers;

pub use secret::Secret;
pub use speed::Speed;
