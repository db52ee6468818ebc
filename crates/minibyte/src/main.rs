const DEFAULT_IMAGE: &str = include_str!("../../../assets/programs/print_eight.mb8");

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let program = match args.next() {
        Some(path) => match minibyte::load_image(&path) {
            Ok(program) => {
                log::info!("running program image '{path}'");
                program
            }
            Err(err) => {
                eprintln!("{err:#}");
                std::process::exit(2);
            }
        },
        None => {
            log::info!("no program path given, running the bundled demo");
            minibyte::parse_image(DEFAULT_IMAGE).expect("bundled demo image is valid")
        }
    };

    if let Err(fault) = minibyte::run(&program) {
        eprintln!("fault: {fault}");
        std::process::exit(1);
    }
}
