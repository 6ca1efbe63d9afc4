mod check;
mod fmt;
mod head;
mod init;
mod nav;
mod sidebar;

pub use check::check;
pub use fmt::fmt;
pub use head::head;
pub use init::init;
pub use nav::nav;
pub use sidebar::sidebar;
