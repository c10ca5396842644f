pub mod customer;
pub mod line;
pub mod server;
