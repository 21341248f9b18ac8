use std::process;

pub fn set_ctrlc_handler() {
    let result = ctrlc::set_handler(|| {
        info!("Received termination signal, shutting down");

        process::exit(0);
    });

    if let Err(err) = result {
        warn!("Could not install termination handler: {}", err);
    }
}
