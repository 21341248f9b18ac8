use std::{io, sync::Arc};

use anyhow::Result;
use util::initialize_logger;

use crate::{
    console::Console,
    model::Page,
    node_client::NodeClient,
    util::{termination, Config, Context},
};

#[macro_use]
extern crate log;

mod bridge;
mod console;
mod model;
mod node_client;
mod render;
mod util;

fn main() -> Result<()> {
    initialize_logger();

    info!("Starting up");

    termination::set_ctrlc_handler();

    let config = Config::read();
    let node = NodeClient::new(&config.node_url)?;

    info!("Talking to node at {}", node.base_url());

    let context = Context {
        config,
        page: Page::new(),
        node: Arc::new(node),
    };

    let console = Console::new(&context);

    console.run(io::stdin().lock())
}
