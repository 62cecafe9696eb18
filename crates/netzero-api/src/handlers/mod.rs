mod expand;
mod health;

pub use expand::expand_url;
pub use health::health_check;
