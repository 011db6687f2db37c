pub mod chain;
pub mod chain_list;
pub mod client;
pub mod config;
pub mod controller;
pub mod form;
pub mod logging;
pub mod render;
pub mod rules;
pub mod run;
pub mod stdin;
pub mod types;

pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}
