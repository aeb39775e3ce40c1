use coursework::exercise::run_stdio;
use coursework::exercises::SharedSwap;
use coursework::{exit_codes, logging};

fn main() {
    logging::init();
    if let Err(err) = run_stdio(&SharedSwap) {
        eprintln!("{:#}", err);
        std::process::exit(exit_codes::INVALID);
    }
}
