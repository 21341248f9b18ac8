use std::sync::Arc;

use crate::{model::Page, node_client::NodeApi};

use super::config::Config;

pub struct Context {
    pub config: Config,
    pub page: Page,
    pub node: Arc<dyn NodeApi>,
}
