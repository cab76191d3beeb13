pub mod handlers;

pub use handlers::{get_config, ChargerAppState};
