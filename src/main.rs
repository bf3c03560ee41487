use env_logger::Env;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--print-config") {
        let config = termgrid::config::Config::default();
        match toml::to_string_pretty(&config) {
            Ok(s) => print!("{s}"),
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("termgrid {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("termgrid {}", env!("CARGO_PKG_VERSION"));
        println!("A GPU-rendered fixed-size character grid\n");
        println!("USAGE:");
        println!("    termgrid [OPTIONS]\n");
        println!("OPTIONS:");
        println!("    --print-config    Print the default configuration to stdout");
        println!("    --version, -V     Print version information");
        println!("    --help, -h        Print this help message\n");
        println!("CONFIG:");
        println!("    {}", termgrid::config::config_path().display());
        return;
    }

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let config = termgrid::config::Config::load();
    if let Err(e) = termgrid::app::App::run(config) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
