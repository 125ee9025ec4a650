use {
    crate::prelude::*,
    colored::ColoredString,
    std::{
        sync::{Arc, Mutex},
        thread,
    },
};

/// Print a grey colored line to separate sections
pub(crate) fn separator() -> ColoredString {
    "\n-=-=-=-=-=-=-=-".truecolor(100, 100, 100)
}

/// Print the title of the currently executed command.
#[macro_export]
macro_rules! command_title {
    ($($args:tt)*) => {
        if !JSON_MODE.load(Ordering::Relaxed) {
            println!(
                "\n{arrow} {title}{separator}",
                arrow = "▶".bold().purple(),
                title = format!($($args)*).bold(),
                separator = $crate::display::separator()
            );
        }
    };
}

/// Ask the user for confirmation before proceeding. Evaluates to `true` when
/// the user typed `y`. Always `true` in [`JSON_MODE`].
#[macro_export]
macro_rules! confirm {
    ($($args:tt)*) => {
        {
            if JSON_MODE.load(Ordering::Relaxed) {
                true
            } else {
                use std::io::{self, Write};

                print!("{warning} {message} {yn}: ", warning = "⚠".bold().yellow(), message = format!($($args)*).bold(), yn = "[y/N]".truecolor(100, 100, 100));

                let _ = io::stdout().flush();

                let mut input = String::new();

                io::stdin().read_line(&mut input).is_ok() && input.trim().eq_ignore_ascii_case("y")
            }
        }
    };
}

/// Notify the user of a successful operation. Basicaly [`println!`] but
/// includes a not [`JSON_MODE`] check and some success formatting.
#[macro_export]
macro_rules! notify_success {
    ($($args:tt)*) => {
        if !JSON_MODE.load(Ordering::Relaxed) {
            println!(
                "[{check}] {msg}",
                check = "✔".green().bold(),
                msg = format!($($args)*)
            );
        }
    };
}

/// Read commands that could not reach the network still render an empty
/// result. This tells the user why.
#[macro_export]
macro_rules! notify_warning {
    ($($args:tt)*) => {
        if !JSON_MODE.load(Ordering::Relaxed) {
            eprintln!(
                "[{warning}] {msg}",
                warning = "⚠".yellow().bold(),
                msg = format!($($args)*)
            );
        }
    };
}

/// Formatted list item.
#[macro_export]
macro_rules! item {
    ($($args:tt)*) => {
        if !JSON_MODE.load(Ordering::Relaxed) {
            println!(
                "    {arrow} {item}",
                arrow = "▶".truecolor(100, 100, 100),
                item = format!($($args)*)
            );
        }
    };
}

/// Macro to print a loading state. Accepts a message and returns a handle
/// that finishes the spinner with either a success or an error mark.
#[macro_export]
macro_rules! loading {
    ($($args:tt)*) => {{
        use std::{
            io::Write,
            sync::{Arc, Mutex},
            thread,
        };

        let message = format!($($args)*);
        let state = Arc::new(Mutex::new($crate::display::LoadingState::Running));

        let thread = {
            let state = state.clone();

            thread::spawn(move || {
                let frames = ["/", "-", "\\", "|"];

                let mut i = 0;

                while !JSON_MODE.load(Ordering::Relaxed) {
                    let current = *state.lock().unwrap_or_else(|e| e.into_inner());

                    match current {
                        $crate::display::LoadingState::Running => {
                            print!("\r[{}] {message} ", frames[i].purple());
                        }
                        $crate::display::LoadingState::Success => {
                            println!("\r[{check}] {message}", check = "✔".green().bold());

                            break;
                        }
                        $crate::display::LoadingState::Error => {
                            println!("\r[{ballot}] {message}", ballot = "✘".red().bold());

                            break;
                        }
                    }

                    i = (i + 1) % frames.len();

                    let _ = std::io::stdout().flush();

                    thread::sleep(std::time::Duration::from_millis(100));
                }
            })
        };

        $crate::display::LoadingHandle::new(state, thread)
    }};
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LoadingState {
    Running,
    Success,
    Error,
}

/// Struct helping with handling loading state.
pub(crate) struct LoadingHandle {
    state: Arc<Mutex<LoadingState>>,
    thread: thread::JoinHandle<()>,
}

impl LoadingHandle {
    pub(crate) fn new(state: Arc<Mutex<LoadingState>>, thread: thread::JoinHandle<()>) -> Self {
        Self { state, thread }
    }

    /// Mark the loading as successful.
    pub(crate) fn success(self) {
        self.finish(LoadingState::Success);
    }

    /// Mark the loading as errored.
    pub(crate) fn error(self) {
        self.finish(LoadingState::Error);
    }

    fn finish(self, outcome: LoadingState) {
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = outcome;

        let _ = self.thread.join();
    }
}

/// If [`JSON_MODE`] is enabled, output the given data as JSON.
pub(crate) fn json_output<T: Serialize>(data: &T) -> AnyResult<(), AptdeckCliError> {
    if !JSON_MODE.load(Ordering::Relaxed) {
        return Ok(());
    }

    match serde_json::to_string_pretty(data) {
        Ok(json) => {
            println!("{json}");

            Ok(())
        }
        Err(e) => Err(AptdeckCliError::Any(e.into())),
    }
}

/// Shorten a long hex string to `0x1234…abcd` for tables.
pub(crate) fn shorten_hex(value: &str) -> String {
    if value.len() <= 14 {
        return value.to_string();
    }

    format!("{}…{}", &value[..6], &value[value.len() - 4..])
}
