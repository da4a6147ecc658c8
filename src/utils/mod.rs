mod time;

pub use time::format_datetime;
