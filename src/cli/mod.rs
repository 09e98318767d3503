pub mod convert;
pub mod rates;
pub mod refresh;
pub mod setup;
pub mod status;
pub mod switch;
pub mod ui;
