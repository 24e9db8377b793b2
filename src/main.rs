fn main() {
    if let Err(err) = column_roles::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
