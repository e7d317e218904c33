pub mod error;
pub mod fields;
pub mod formatter;
pub mod record;
pub mod time;
