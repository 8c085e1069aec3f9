use pngkit::png::*;

use std::path::PathBuf;

/// Prints log records to stdout.
struct StdoutLogger;
impl log::Log for StdoutLogger {
  fn enabled(&self, metadata: &log::Metadata) -> bool {
    metadata.level() <= log::max_level()
  }
  fn log(&self, record: &log::Record) {
    if self.enabled(record.metadata()) {
      println!("[{}] {}", record.level(), record.args());
    }
  }
  fn flush(&self) {}
}
static LOGGER: StdoutLogger = StdoutLogger;

struct Args {
  input: PathBuf,
  output: PathBuf,
  level: CompressionLevel,
}

fn parse_args() -> Result<Args, String> {
  let mut paths = Vec::new();
  let mut level = CompressionLevel::default();
  let mut args = std::env::args().skip(1);
  while let Some(arg) = args.next() {
    if arg == "--level" {
      let name = args.next().ok_or("--level needs a value")?;
      level = name
        .parse()
        .map_err(|_| format!("unknown compression level {name:?}, expected optimal, fastest, none, or smallest"))?;
    } else {
      paths.push(PathBuf::from(arg));
    }
  }
  let mut paths = paths.into_iter();
  let input = paths.next().unwrap_or_else(|| PathBuf::from("image.png"));
  let output = paths.next().unwrap_or_else(|| PathBuf::from("image_out.png"));
  if let Some(extra) = paths.next() {
    return Err(format!("unexpected argument {}", extra.display()));
  }
  Ok(Args { input, output, level })
}

fn main() {
  let filter = match std::env::var("PNGKIT_LOG").as_deref() {
    Ok("trace") => log::LevelFilter::Trace,
    Ok("debug") => log::LevelFilter::Debug,
    Ok("warn") => log::LevelFilter::Warn,
    Ok("error") => log::LevelFilter::Error,
    _ => log::LevelFilter::Info,
  };
  if log::set_logger(&LOGGER).is_ok() {
    log::set_max_level(filter);
  }

  let result = parse_args().and_then(|args| run(&args));
  if let Err(e) = result {
    eprintln!("{e}");
    std::process::exit(1);
  }
}

fn run(args: &Args) -> Result<(), String> {
  println!("Decoding file '{}'...", args.input.display());
  let bytes = std::fs::read(&args.input).map_err(|e| format!("{}: {e}", args.input.display()))?;
  let file = PngFile::decode(&bytes).map_err(|e| format!("{}: {e}", args.input.display()))?;
  for (i, chunk) in file.chunks().enumerate() {
    println!("Chunk {i}: {chunk}");
  }
  if file.scanlines().is_some() {
    println!("Filter types: {}", file.filter_histogram());
  }

  let encoded = file.encode(args.level).map_err(|e| format!("{}: {e}", args.output.display()))?;
  std::fs::write(&args.output, encoded).map_err(|e| format!("{}: {e}", args.output.display()))?;
  log::info!("wrote {}", args.output.display());

  #[cfg(feature = "bmp")]
  if let Some(header) = file.header().filter(|_| file.scanlines().is_some()) {
    write_bmp(&args.output.with_extension("bmp"), header, &file)?;
  }
  Ok(())
}

#[cfg(feature = "bmp")]
fn write_bmp(path: &std::path::Path, header: &IHDR, file: &PngFile) -> Result<(), String> {
  let pixels: Vec<pngkit::Pixel> = file.pixels().collect();
  let height = i32::try_from(header.height).map_err(|_| "image too tall for a bitmap".to_string())?;
  let bmp = pngkit::bmp::bmp_write(header.width, -height, &pixels).map_err(|e| e.to_string())?;
  std::fs::write(path, bmp).map_err(|e| format!("{}: {e}", path.display()))?;
  log::info!("wrote {}", path.display());
  Ok(())
}
