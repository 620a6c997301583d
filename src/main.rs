fn main() {
    if let Err(err) = csv_wrangler::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
