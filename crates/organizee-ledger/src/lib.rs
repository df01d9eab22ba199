pub mod birthdays;
pub mod datetime;
pub mod feed;
pub mod status;
pub mod summary;
