//! Native desktop viewer for the moonscape scene.

use std::path::Path;

use moonscape::{options::Options, Viewer};

fn load_options(arg: Option<String>) -> Options {
    let Some(path) = arg else {
        return Options::default();
    };
    match Options::load(Path::new(&path)) {
        Ok(options) => {
            log::info!("loaded options from {path}");
            options
        }
        Err(e) => {
            log::error!("{path}: {e}");
            std::process::exit(1);
        }
    }
}

fn main() {
    env_logger::init();

    let options = load_options(std::env::args().nth(1));

    if let Err(e) = Viewer::builder().with_options(options).build().run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
