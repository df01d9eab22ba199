// Operations
mod operations;
pub use operations::*;

// Models
mod members;
pub use members::*;

mod events;
pub use events::*;

mod announcements;
pub use announcements::*;

mod fees;
pub use fees::*;

mod dues;
pub use dues::*;

mod cashbook;
pub use cashbook::*;

mod status;
pub use status::*;

mod settings;
pub use settings::*;
