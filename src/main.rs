use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    ragask::cli::main()
}
