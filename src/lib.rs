extern crate serde;
extern crate serde_json;

#[macro_use]
extern crate lazy_static;
extern crate tracing;
extern crate tracing_subscriber;

pub mod cmd;
pub mod config;
pub mod inventory;
pub mod logging;
pub mod navigation;
pub mod render;
