fn main() {
    if let Err(err) = plangraph::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
