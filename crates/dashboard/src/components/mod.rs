//! Presentational components shared by the dashboard pages.

pub mod shell;
pub mod store_card;

pub use shell::{NavItem, Shell, ShellSnapshot};
pub use store_card::{CardCommand, CardElement, ClickTarget, StoreCard, StoreCardView};
