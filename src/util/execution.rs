use std::{
    io,
    mem,
    sync::Mutex,
    thread::{self, JoinHandle},
};

use crossbeam_utils::sync::WaitGroup;

/// Tracks worker threads so callers can block until everything started so
/// far has finished. Tasks started while someone waits join the next round.
#[derive(Default)]
pub struct InFlight {
    group: Mutex<WaitGroup>,
}

impl InFlight {
    pub fn new() -> InFlight {
        InFlight::default()
    }

    pub fn spawn<F>(&self, name: &str, task: F) -> io::Result<JoinHandle<()>>
    where
        F: FnOnce() + Send + 'static,
    {
        let ticket = self.group.lock().unwrap().clone();

        thread::Builder::new().name(name.to_string()).spawn(move || {
            task();
            drop(ticket);
        })
    }

    pub fn wait(&self) {
        let group = mem::replace(&mut *self.group.lock().unwrap(), WaitGroup::new());

        group.wait();
    }
}
