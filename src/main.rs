mod archive;
mod config;
mod desktop;
mod download;
mod install;
mod output;
mod preflight;
mod version;

fn main() {
    let cfg = match config::Config::from_args(std::env::args().skip(1)) {
        Ok(cfg) => cfg,
        Err(err) => {
            output::error(&format!("{err:#}"));
            std::process::exit(1);
        }
    };

    if let Err(err) = install::run(&cfg) {
        output::error(&format!("{err:#}"));
        std::process::exit(1);
    }
}
