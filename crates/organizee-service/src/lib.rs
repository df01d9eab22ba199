// Errors and shared plumbing
mod error;
pub use error::*;

mod validate;
pub use validate::*;

mod views;
pub use views::*;

pub mod password;

// Credentials
mod auth;
pub use auth::*;

// Handlers
mod members;
pub use members::*;

mod events;
pub use events::*;

mod announcements;
pub use announcements::*;

mod cashbook;
pub use cashbook::*;

mod payments;
pub use payments::*;

// External collaborators
mod summarize;
pub use summarize::*;
