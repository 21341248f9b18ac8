extern crate dotenv;

use std::{env, str::FromStr};

use dotenv::dotenv;

pub const DEFAULT_NODE_URL: &str = "http://localhost:5000";

pub struct Config {
    // Node settings
    pub node_url: String,

    // Console settings
    pub wait_on_exit: bool,
}

impl Config {
    pub fn read_envvar<T: FromStr>(key: &str, default_value: T) -> T {
        match env::var(key) {
            Ok(value) => value.trim().parse::<T>().unwrap_or(default_value),
            Err(_) => default_value,
        }
    }

    pub fn read() -> Config {
        dotenv().ok();

        Config {
            // Node settings
            node_url: Config::read_envvar("NODE_URL", DEFAULT_NODE_URL.to_string()),

            // Console settings
            wait_on_exit: Config::read_envvar("WAIT_ON_EXIT", true),
        }
    }
}
