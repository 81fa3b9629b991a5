pub mod errors;
pub mod time;

pub use errors::WidgetError;
pub use time::{format_shanghai_time, next_refresh};
