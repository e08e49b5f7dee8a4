//! CLI commands.

pub mod add;
pub mod catalog_cmd;
pub mod checkout;
pub mod clear;
pub mod remove;
pub mod set_qty;
pub mod view;
pub mod watch;

pub use add::AddArgs;
pub use checkout::CheckoutArgs;
pub use remove::RemoveArgs;
pub use set_qty::SetQtyArgs;
