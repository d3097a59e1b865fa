fn main() {
    if let Err(err) = novamind::entry() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
