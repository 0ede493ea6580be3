use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = file_renamer::cli::parse();
    app::run(args)
}
