mod frame;
mod r#type;
mod value;

pub use frame::*;
pub use r#type::*;
pub use value::*;

pub use chrono;
pub use rust_decimal;
