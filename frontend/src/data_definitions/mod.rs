pub mod clock;
pub mod sentinel;
pub mod url_query;
pub mod wakeup;
