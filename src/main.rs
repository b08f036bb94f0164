fn main() {
    if let Err(err) = csvwerk_lib::run() {
        eprintln!("csvwerk: {}", err);
        std::process::exit(1);
    }
}
