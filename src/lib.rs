// public modules
pub mod cli;
pub mod config;
pub mod console;
pub mod error;
pub mod paging;
pub mod settings;
pub mod wrap;

// public uses
pub use console::Viewport;
pub use error::{Error, PagerClosed, Result};
pub use paging::{AnyPager, BasicPager, Content, NullPager, Options, Pager, Strategy, SystemPager, page};
pub use settings::Settings;
