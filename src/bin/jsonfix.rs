fn main() {
    std::process::exit(jsonfix::cli::run());
}
