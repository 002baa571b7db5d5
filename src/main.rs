fn main() {
    if let Err(e) = userlist::app::run_cli() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
