use anyhow::Result;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if let Err(err) = show_package::cli::run(&args) {
        // YAML error document on stderr, then a failing exit status
        show_package::output::emit_error(&err)?;
        return Err(err);
    }
    Ok(())
}
