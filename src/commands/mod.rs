pub mod add;
pub mod check;
pub mod remotes;
pub mod remove;
pub mod rename;
pub mod scan;
pub mod show;
pub mod states;

pub use add::*;
pub use check::*;
pub use remotes::*;
pub use remove::*;
pub use rename::*;
pub use scan::*;
pub use show::*;
pub use states::*;
