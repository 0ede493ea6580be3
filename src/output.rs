//! User-facing messages outside the tracing pipeline (config discovery, template
//! creation, fatal errors before logging is up). Colored only when stdout is a TTY.

use owo_colors::OwoColorize;

#[derive(Clone, Copy)]
enum Kind {
    Info,
    Success,
    Warn,
    Error,
}

impl Kind {
    fn label(self) -> &'static str {
        match self {
            Kind::Info => "info:",
            Kind::Success => "ok:",
            Kind::Warn => "warn:",
            Kind::Error => "error:",
        }
    }

    fn to_stderr(self) -> bool {
        matches!(self, Kind::Warn | Kind::Error)
    }
}

fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn emit(kind: Kind, msg: &str) {
    let label = kind.label();
    let tag = if is_tty() {
        match kind {
            Kind::Info => label.cyan().bold().to_string(),
            Kind::Success => label.green().bold().to_string(),
            Kind::Warn => label.yellow().bold().to_string(),
            Kind::Error => label.red().bold().to_string(),
        }
    } else {
        label.to_string()
    };
    if kind.to_stderr() {
        eprintln!("{tag} {msg}");
    } else {
        println!("{tag} {msg}");
    }
}

pub fn print_info(msg: &str) {
    emit(Kind::Info, msg);
}

pub fn print_success(msg: &str) {
    emit(Kind::Success, msg);
}

pub fn print_warn(msg: &str) {
    emit(Kind::Warn, msg);
}

pub fn print_error(msg: &str) {
    emit(Kind::Error, msg);
}
