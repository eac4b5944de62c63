pub mod booking_screen;
pub mod controller;
