use anyhow::Result;

fn main() -> Result<()> {
    env_logger::init();

    let options = match arcade8080::Options::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}\n\n{}", arcade8080::USAGE);
            std::process::exit(1);
        }
    };

    arcade8080::run(&options)
}
