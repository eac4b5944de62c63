pub mod backend_client;
mod booking_service;
