//! Writes a small record file: a binary header with big-endian fields, then
//! CRLF-terminated text lines. Reads the file back, prints a dump of the
//! header, and decodes every field in declared order.
//!
//! Run with
//!
//! ```bash
//! RUST_LOG=rwbuf=trace cargo run -p rwbuf --example frame_roundtrip
//! ```

use std::{env, error::Error, path::PathBuf};

use rwbuf::{ByteBuffer, DumpOptions, hex};

const MAGIC: u32 = 0x5257_4246;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let path: PathBuf = env::args_os()
        .nth(1)
        .map_or_else(|| env::temp_dir().join("rwbuf-demo").join("records.bin"), PathBuf::from);

    let records = ["alpha", "beta", "gamma δ"];
    let mut out = ByteBuffer::with_growth_factor(32);
    out.write4(MAGIC)?;
    out.write2(1)?;
    out.write2(u16::try_from(records.len())?)?;
    out.write8(1_700_000_000)?;
    for record in records {
        out.println(record)?;
    }
    let written = out.write_to_file(&path)?;
    tracing::info!(path = %path.display(), bytes = written, "wrote records");

    let mut input = ByteBuffer::from_file(&path)?;
    let header = input.readable()?.get(..16).unwrap_or_default().to_vec();
    print!("{}", ByteBuffer::from_bytes(header).hexdump(DumpOptions::parse(Some("hex"), Some("hex"))?)?);

    let magic = input.read4()?;
    if magic != MAGIC {
        return Err(format!("bad magic {}", hex::encode_u32(magic)).into());
    }
    let version = input.read2()?;
    let count = input.read2()?;
    let stamp = input.read8()?;
    println!("version {version}, {count} records, stamp {stamp}");
    for (i, line) in input.lines().enumerate() {
        println!("{i}: {}", line?);
    }
    Ok(())
}
