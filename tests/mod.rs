mod common;

mod config_tests;
mod parser_tests;
mod stream_bridge_tests;
