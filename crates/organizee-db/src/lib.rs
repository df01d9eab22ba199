
pub mod connection;
pub use connection::Connection;

pub mod results;
pub mod schema;

pub mod members;
pub mod events;
pub mod announcements;
pub mod fees;
pub mod dues;
pub mod income;
pub mod expense;
