mod console;
mod stub_node;

pub use console::{rendered_blocks, run_console, unused_local_url};
pub use stub_node::{RecordedRequest, StubNode};
