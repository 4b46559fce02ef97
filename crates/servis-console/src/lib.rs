mod config;
mod error;
pub mod forms;
mod navigation;
mod notify;
pub mod pages;
mod table;
mod validate;

pub use config::{ConsoleConfig, DisplayConfig};
pub use error::ConsoleError;
pub use forms::FormClock;
pub use navigation::{Navigation, Route, guard};
pub use notify::{Level, MAX_DETAILS, Notification};
pub use table::{MAX_CELL_WIDTH, TableError, TableOptions, find_column, render_table, select_rows};
pub use validate::{FieldError, FormErrors, is_email, is_phone};
