use std::io;

fn main() {
    riverstone_cli::logging::init_logging();
    let code = riverstone_cli::run(std::env::args(), &mut io::stdout(), &mut io::stderr());
    std::process::exit(code);
}
