pub mod app;

pub use app::{TestApp, get_json, make_test_app};
