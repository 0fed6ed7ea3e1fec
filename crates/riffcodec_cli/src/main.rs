//! `wavcopy` - decodes a WAVE file, prints what it found and optionally re-encodes it.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use log::info;
use structopt::StructOpt;

use riffcodec::wave::WaveFile;

#[derive(Debug, StructOpt)]
#[structopt(name = "wavcopy", about = "Inspect and re-encode PCM wave files")]
struct Opt {
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: usize,

    /// The wave file to decode.
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    /// Re-encode the decoded file to this path.
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Print the first N samples of every channel.
    #[structopt(short, long, default_value = "0")]
    samples: usize,
}

fn main() -> io::Result<()> {
    let opt = Opt::from_args();

    let level = match opt.verbose {
        0 => log::Level::Info,
        1 => log::Level::Debug,
        _ => log::Level::Trace,
    };
    simple_logger::init_with_level(level)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    let mut reader = BufReader::new(File::open(&opt.input)?);
    let wave = WaveFile::decode(&mut reader)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_summary(&mut out, &wave)?;
    print_samples(&mut out, &wave, opt.samples)?;

    if let Some(path) = opt.output {
        let mut writer = BufWriter::new(File::create(&path)?);
        wave.write_to(&mut writer)?;
        writer.flush()?;

        info!("wrote {}", path.display());
    }

    Ok(())
}

fn print_summary(out: &mut impl Write, wave: &WaveFile) -> io::Result<()> {
    let fmt = wave.fmt();

    writeln!(out, "riff size:       {}", wave.header().size)?;
    writeln!(out, "audio format:    {:#06x}", fmt.audio_format)?;
    writeln!(out, "channels:        {}", fmt.n_channels)?;
    writeln!(out, "sample rate:     {} Hz", fmt.sample_rate)?;
    writeln!(out, "byte rate:       {}", fmt.byte_rate)?;
    writeln!(out, "block align:     {}", fmt.block_align)?;
    writeln!(out, "bits per sample: {}", fmt.bits_per_sample)?;
    if !fmt.extension.is_empty() {
        writeln!(out, "fmt extension:   {} bytes", fmt.extension.len())?;
    }
    writeln!(out, "data size:       {}", wave.data().byte_len)?;
    writeln!(out, "samples:         {}", wave.n_samples())?;
    writeln!(out, "duration:        {:.3} s", wave.duration().as_secs_f64())
}

fn print_samples(out: &mut impl Write, wave: &WaveFile, n: usize) -> io::Result<()> {
    if n == 0 {
        return Ok(());
    }

    for (i, channel) in wave.channels().iter().enumerate() {
        let shown = &channel[..n.min(channel.len())];
        writeln!(out, "channel {i}: {shown:?}")?;
    }

    Ok(())
}
