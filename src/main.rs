fn main() {
    if let Err(error) = cellpick::run_cli() {
        eprintln!("{error}");
        std::process::exit(1);
    }
}
