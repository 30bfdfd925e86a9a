use std::sync::atomic::{AtomicBool, Ordering};

pub const RESET: &str = "\x1b[0m";
pub const GREEN: &str = "\x1b[32m";
pub const PURPLE: &str = "\x1b[35m";
pub const BRIGHT_RED: &str = "\x1b[1;31m";

// in no way does this need to be locked. this is just to have a static mutable.
pub static VERBOSING: AtomicBool = AtomicBool::new(false);
pub static COLORING: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(verbose: bool) {
  VERBOSING.store(verbose, Ordering::SeqCst);
}

// only bother with escape codes when someone's looking at a terminal.
pub fn detect_color() {
  let tty = unsafe { libc::isatty(libc::STDOUT_FILENO) } != 0;
  COLORING.store(tty, Ordering::SeqCst);
}

pub fn paint(color: &'static str) -> (&'static str, &'static str) {
  if COLORING.load(Ordering::Relaxed) {
    (color, RESET)
  } else {
    ("", "")
  }
}

macro_rules! error {
  ($($arg:tt)*) => ({
    let (on, off) = $crate::display::paint($crate::display::BRIGHT_RED);
    eprintln!("{}{}{}", on, format_args!($($arg)*), off);
  });
}

macro_rules! verbose {
  ($($arg:tt)*) => (
    if $crate::display::VERBOSING.load(::std::sync::atomic::Ordering::Relaxed) {
      let (on, off) = $crate::display::paint($crate::display::PURPLE);
      eprintln!("{}{}{}", on, format_args!($($arg)*), off);
    }
  )
}

pub fn hex_bytes(bytes: &[u8]) -> String {
  bytes.iter().map(|b| format!("{:02x}", b)).collect::<Vec<String>>().join(" ")
}
