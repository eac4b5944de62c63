pub mod availability;
pub mod catalog;
pub mod interval;
pub mod time_window;
