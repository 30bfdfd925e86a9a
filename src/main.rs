extern crate clap;
extern crate crc32_table;
extern crate libc;

#[macro_use]
mod display;

use clap::{App, Arg, ArgMatches};
use crc32_table::{Crc32, LookupTable, POLYNOMIAL};
use std::io::{self, Write};
use std::process;
use tracing_subscriber::EnvFilter;

const TABLE_COLUMNS: usize = 8;

fn main() {
  let matches = App::new("crc32")
    .version("0.1")
    .about("compute table-driven CRC-32 checksums of literal data")
    .arg(Arg::with_name("verbose").short("v").help("show verbose debugging messages"))
    .arg(
      Arg::with_name("polynomial").short("p").long("polynomial")
        .help(&format!("reflected polynomial, decimal or 0x/$ hex (default: ${:x})", POLYNOMIAL))
        .takes_value(true)
    )
    .arg(
      Arg::with_name("seed").short("s").long("seed")
        .help("resume from an earlier digest (default: 0)")
        .takes_value(true)
    )
    .arg(
      Arg::with_name("chunk").short("c").long("chunk")
        .help("feed the checksum this many bytes at a time (default: all at once)")
        .takes_value(true)
    )
    .arg(Arg::with_name("hex").short("x").long("hex").help("arguments are hex-encoded bytes"))
    .arg(Arg::with_name("bytes").short("b").long("bytes").help("print the digest as little-endian bytes"))
    .arg(Arg::with_name("table").long("table").help("dump the lookup table and exit"))
    .arg(Arg::with_name("text").multiple(true).required_unless("table"))
    .get_matches();

  display::detect_color();
  let verbose = matches.occurrences_of("verbose") > 0;
  display::set_verbose(verbose);
  if verbose {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("crc32_table=trace"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
  }

  let polynomial = parse_option(&matches, "polynomial", POLYNOMIAL);
  let table = LookupTable::new(polynomial);
  verbose!("Using polynomial ${:08x}", polynomial);

  if matches.is_present("table") {
    let stdout = io::stdout();
    finish_output(dump_table(&mut stdout.lock(), &table));
    return;
  }

  let seed = parse_option(&matches, "seed", 0);
  let chunk = matches.value_of("chunk").map(|value| {
    parse_chunk(value).unwrap_or_else(|err| {
      error!("{}", err);
      process::exit(1);
    })
  });

  let hex_input = matches.is_present("hex");
  let bytes = matches.is_present("bytes");
  let stdout = io::stdout();
  let mut out = stdout.lock();
  for text in matches.values_of("text").into_iter().flatten() {
    let data = decode(text, hex_input).unwrap_or_else(|err| {
      error!("{}", err);
      process::exit(1);
    });
    let crc = checksum(&table, seed, chunk, &data);
    finish_output(write_digest(&mut out, &crc, text, bytes));
  }
}

// a reader that went away (`| head`) isn't an error worth reporting.
fn exit_code(result: &io::Result<()>) -> Option<i32> {
  match result {
    Ok(()) => None,
    Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Some(0),
    Err(_) => Some(1),
  }
}

fn finish_output(result: io::Result<()>) {
  if let Some(code) = exit_code(&result) {
    if let Err(err) = result {
      if code != 0 {
        error!("Can't write output: {}", err);
      }
    }
    process::exit(code);
  }
}

// accepts "1234", "0x4d2", or "$4d2". no signs, anywhere.
fn parse_u32(value: &str) -> Result<u32, String> {
  let (digits, radix) = if let Some(digits) = value.strip_prefix("0x") {
    (digits, 16)
  } else if let Some(digits) = value.strip_prefix('$') {
    (digits, 16)
  } else {
    (value, 10)
  };
  if digits.starts_with('+') || digits.starts_with('-') {
    return Err("unexpected sign".to_string());
  }
  u32::from_str_radix(digits, radix).map_err(|err| err.to_string())
}

fn parse_option(matches: &ArgMatches, name: &str, default: u32) -> u32 {
  match matches.value_of(name) {
    None => default,
    Some(value) => parse_u32(value).unwrap_or_else(|err| {
      error!("Can't parse {} '{}': {}", name, value, err);
      process::exit(1);
    }),
  }
}

fn parse_chunk(value: &str) -> Result<usize, String> {
  match value.parse::<usize>() {
    Ok(0) => Err("Chunk size must be at least 1".to_string()),
    Ok(n) => Ok(n),
    Err(err) => Err(format!("Can't parse chunk size '{}': {}", value, err)),
  }
}

fn decode(text: &str, hex: bool) -> Result<Vec<u8>, String> {
  if hex {
    hex::decode(text).map_err(|err| format!("Can't decode hex '{}': {}", text, err))
  } else {
    Ok(text.as_bytes().to_vec())
  }
}

fn checksum<'t>(
  table: &'t LookupTable,
  seed: u32,
  chunk: Option<usize>,
  data: &[u8],
) -> Crc32<'t> {
  let mut crc = Crc32::resume(table, seed);
  match chunk {
    Some(n) => {
      for (i, piece) in data.chunks(n).enumerate() {
        crc.update(piece);
        verbose!("  chunk {} ({}B): ${:08x}", i, piece.len(), crc.digest());
      }
    }
    None => {
      crc.update(data);
    }
  }
  crc
}

fn write_digest<W: Write>(out: &mut W, crc: &Crc32, text: &str, bytes: bool) -> io::Result<()> {
  let (on, off) = display::paint(display::GREEN);
  if bytes {
    writeln!(out, "{}{}  {}{}", on, display::hex_bytes(&crc.digest_bytes()), text, off)
  } else {
    writeln!(out, "{}{:08x}  {}{}", on, crc.digest(), text, off)
  }
}

fn dump_table<W: Write>(out: &mut W, table: &LookupTable) -> io::Result<()> {
  for row in table.entries().chunks(TABLE_COLUMNS) {
    let line: Vec<String> = row.iter().map(|entry| format!("{:08x}", entry)).collect();
    writeln!(out, "{}", line.join(" "))?;
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crc32_table::digest_of;

  fn output<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
    let mut buffer = Vec::new();
    f(&mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
  }

  #[test]
  fn parses_radix_prefixes() {
    assert_eq!(parse_u32("1234"), Ok(1234));
    assert_eq!(parse_u32("0xedb88320"), Ok(POLYNOMIAL));
    assert_eq!(parse_u32("$82f63b78"), Ok(0x82f63b78));
    assert!(parse_u32("0x").is_err());
    assert!(parse_u32("").is_err());
    assert!(parse_u32("-1").is_err());
  }

  #[test]
  fn rejects_signs_after_prefix() {
    assert_eq!(parse_u32("0x+5"), Err("unexpected sign".to_string()));
    assert_eq!(parse_u32("$+5"), Err("unexpected sign".to_string()));
    assert_eq!(parse_u32("+5"), Err("unexpected sign".to_string()));
    assert!(parse_u32("0x-5").is_err());
  }

  #[test]
  fn chunk_size_must_be_positive() {
    assert_eq!(parse_chunk("3"), Ok(3));
    assert_eq!(parse_chunk("0"), Err("Chunk size must be at least 1".to_string()));
    assert!(parse_chunk("-2").is_err());
    assert!(parse_chunk("lots").is_err());
  }

  #[test]
  fn decodes_hex_arguments() {
    assert_eq!(decode("3132", true), Ok(vec![0x31, 0x32]));
    assert_eq!(decode("12", false), Ok(b"12".to_vec()));
    assert!(decode("3g", true).is_err());
    assert!(decode("313", true).is_err());
  }

  #[test]
  fn chunked_matches_whole() {
    let table = LookupTable::standard();
    for &n in &[1, 2, 4, 9, 100] {
      assert_eq!(checksum(table, 0, Some(n), b"123456789").digest(), 0xcbf43926, "chunks of {}", n);
    }
    assert_eq!(checksum(table, 0, None, b"123456789").digest(), 0xcbf43926);
  }

  #[test]
  fn seed_resumes_concatenation() {
    let table = LookupTable::standard();
    let head = digest_of(b"12345", 0);
    assert_eq!(checksum(table, head, Some(2), b"6789").digest(), 0xcbf43926);
    assert_eq!(checksum(table, head, None, b"").digest(), head);
  }

  #[test]
  fn writes_digest_as_word_or_bytes() {
    display::COLORING.store(false, std::sync::atomic::Ordering::SeqCst);
    let crc = checksum(LookupTable::standard(), 0, None, b"123456789");
    assert_eq!(output(|out| write_digest(out, &crc, "123456789", false)), "cbf43926  123456789\n");
    assert_eq!(output(|out| write_digest(out, &crc, "123456789", true)), "26 39 f4 cb  123456789\n");
  }

  struct ClosedPipe;

  impl Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
      Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }

    fn flush(&mut self) -> io::Result<()> {
      Ok(())
    }
  }

  #[test]
  fn closed_pipe_exits_quietly() {
    let result = dump_table(&mut ClosedPipe, LookupTable::standard());
    assert_eq!(result.as_ref().map_err(|err| err.kind()), Err(io::ErrorKind::BrokenPipe));
    assert_eq!(exit_code(&result), Some(0));

    let crc = Crc32::new();
    assert_eq!(exit_code(&write_digest(&mut ClosedPipe, &crc, "", false)), Some(0));
    assert_eq!(exit_code(&Err(io::Error::from(io::ErrorKind::PermissionDenied))), Some(1));
    assert_eq!(exit_code(&Ok(())), None);
  }

  #[test]
  fn dumps_table_in_rows() {
    let dump = output(|out| dump_table(out, LookupTable::standard()));
    let lines: Vec<&str> = dump.lines().collect();
    assert_eq!(lines.len(), 256 / TABLE_COLUMNS);
    assert!(lines[0].starts_with("00000000 77073096 "));
    assert!(lines[31].ends_with(" 2d02ef8d"));
  }
}
