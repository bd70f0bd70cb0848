fn main() {
    use movie_kg_dashboard::cli::parse;
    let cli = parse();
    movie_kg_dashboard::utils::logging::init(cli.verbose, cli.quiet);
    let code = movie_kg_dashboard::app::run_cli(cli);
    if code != 0 {
        std::process::exit(code);
    }
}
