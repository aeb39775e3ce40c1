use coursework::exercise::run_stdio;
use coursework::exercises::Sum;
use coursework::{exit_codes, logging};

fn main() {
    logging::init();
    if let Err(err) = run_stdio(&Sum) {
        eprintln!("{:#}", err);
        std::process::exit(exit_codes::INVALID);
    }
}
