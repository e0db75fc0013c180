use std::io::{self, Cursor};

use hindsight_platform::{HeadlessConfig, run_headless_app};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Arguments, when given, replace stdin as the command script.
    let script: Vec<String> = std::env::args().skip(1).collect();
    let stdout = io::stdout().lock();
    if script.is_empty() {
        run_headless_app(counter::app, io::stdin().lock(), stdout, HeadlessConfig::default())
    } else {
        log::debug!("running {} scripted command(s)", script.len());
        let input = Cursor::new(script.join("\n"));
        run_headless_app(counter::app, input, stdout, HeadlessConfig::default())
    }
}
