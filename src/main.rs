fn main() {
    if let Err(err) = storelens::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
