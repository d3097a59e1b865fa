//! Short binary name (`nova`) that forwards to the `novamind` library.

fn main() {
    if let Err(err) = novamind::entry() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
