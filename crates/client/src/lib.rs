//! `stockdesk-client`
//!
//! **Responsibility:** the operator-facing front-end of the inventory backend.
//!
//! - Session handling with a persisted bearer token
//! - Six sections rendered as tables, plus the stock-update form
//! - Terminal rendering of the current screen
//!
//! The UI layer is a [`Screen`] value; the binary prints it, tests inspect it.

pub mod actions;
pub mod app;
pub mod config;
pub mod form;
pub mod screen;
pub mod section;
pub mod session;
pub mod state;
pub mod table;
pub mod views;

pub use app::App;
pub use config::ClientConfig;
pub use form::{StockFormError, StockFormView, StockUpdateInput, ValidatedUpdate, validate};
pub use screen::{Block, NoticeLevel, Notification, Screen, ScreenMode};
pub use section::{Section, UnknownSection};
pub use session::{
    FileTokenStore, MemoryTokenStore, Session, SessionState, SessionTransition, StoreError,
    TokenStore,
};
pub use state::AppState;
pub use table::{Table, TableRow, render_table};
pub use views::SubmitOutcome;
