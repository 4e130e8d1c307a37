use std::env;
use std::io::{self, IsTerminal, Write};
use std::sync::OnceLock;

fn use_color() -> bool {
    static USE_COLOR: OnceLock<bool> = OnceLock::new();
    *USE_COLOR.get_or_init(|| env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal())
}

fn is_tty() -> bool {
    static IS_TTY: OnceLock<bool> = OnceLock::new();
    *IS_TTY.get_or_init(|| io::stderr().is_terminal())
}

fn paint(code: &str, text: &str) -> String {
    if use_color() {
        format!("\u{1b}[{}m{}\u{1b}[0m", code, text)
    } else {
        text.to_string()
    }
}

fn dim(text: &str) -> String {
    paint("2", text)
}

fn green(text: &str) -> String {
    paint("32", text)
}

fn yellow(text: &str) -> String {
    paint("33", text)
}

fn red(text: &str) -> String {
    paint("31", text)
}

pub fn header(command: &str, version: &str) {
    eprintln!("{}", dim(&format!("gvm {} v{}", command, version)));
    eprintln!();
}

pub fn step(message: &str) {
    if is_tty() {
        eprint!("\r\u{1b}[K{}\n", dim(message));
        let _ = io::stderr().flush();
    } else {
        eprintln!("{}", dim(message));
    }
}

pub fn info(message: &str) {
    println!("{}", message);
}

pub fn success(message: &str) {
    println!("{} {}", green("✓"), message);
}

pub fn note(message: &str) {
    println!("{}", dim(&format!("Note: {}", message)));
}

pub fn installation(version: &str, in_use: Option<&str>) {
    match in_use {
        Some(root) => println!(
            "  {} {} {}",
            green("*"),
            version,
            dim(&format!("(Using with GOROOT {})", root))
        ),
        None => println!("    {}", version),
    }
}

pub fn warn(message: &str) {
    let tag = yellow("warn");
    eprintln!("{} {}", tag, message);
}

pub fn error(message: &str) {
    let tag = red("error");
    eprintln!("{} {}", tag, message);
}
