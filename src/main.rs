use std::env;
use std::ffi::OsStr;
use std::path::PathBuf;

use log::{error, info};
use seahorse::{App, Context};

use weekly_timesheet::generate_timesheets;
use weekly_timesheet::input::Config;
use weekly_timesheet::time::SystemClock;

fn set_env_if_absent<K: AsRef<OsStr>, V: AsRef<OsStr>>(var: K, default: impl FnOnce() -> V) {
    if env::var(var.as_ref()).is_err() {
        env::set_var(var, default());
    }
}

fn main() {
    set_env_if_absent("RUST_APP_LOG", || "info");
    color_backtrace::install();
    pretty_env_logger::init_custom_env("RUST_APP_LOG");

    let args: Vec<String> = env::args().collect();
    let program = args.first().cloned().unwrap_or_else(|| "weekly-timesheet".to_string());

    let app = App::new(env!("CARGO_PKG_NAME"))
        .description(env!("CARGO_PKG_DESCRIPTION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .usage(format!("{} <path to config>", program))
        .action(|context: &Context| exit_on_error(generate(context)));

    app.run(args);
}

fn exit_on_error(result: anyhow::Result<()>) {
    if let Err(e) = result {
        error!("{:?}", e);
        ::std::process::exit(1);
    }
}

fn config_path(args: &[String]) -> anyhow::Result<PathBuf> {
    match args {
        [path] => Ok(PathBuf::from(path)),
        [] => Err(anyhow::anyhow!("missing the path to the config file")),
        _ => Err(anyhow::anyhow!(
            "expected a single path to a config file, got {} arguments",
            args.len()
        )),
    }
}

fn generate(context: &Context) -> anyhow::Result<()> {
    let path = config_path(&context.args)?;
    info!("reading config from {}", path.display());

    let config = Config::try_from_file(&path)?.build()?;
    let written = generate_timesheets(&config, &SystemClock)?;

    for path in written {
        info!("wrote {}", path.display());
    }

    Ok(())
}
