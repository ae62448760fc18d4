mod app;
mod ui;

pub use app::DashApp;
