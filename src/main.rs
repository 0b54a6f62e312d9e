fn main() {
    if let Err(e) = hostswap::cli::run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
