#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rwbuf::{BufferOptions, ByteBuffer, CharReader, hex};

#[derive(Debug, Arbitrary)]
enum Op {
    Write(Vec<u8>),
    Write8(u64),
    Print(String),
    Nwrite(u8, u8),
    SkipWrite(u8),
    ReadByte,
    ReadMany(u8),
    Read4,
    ReadLine,
    SkipRead(u8),
    Unread,
    UnreadByte(u8),
    UnreadN(u8),
    MarkRead,
    ResetRead,
    MarkWrite,
    ResetWrite,
    Clear,
    Close,
    Drain,
}

#[derive(Debug, Arbitrary)]
struct Input {
    growth: u8,
    initial: u8,
    reopen: bool,
    copy_chunk: u8,
    ops: Vec<Op>,
    hex: String,
    text: String,
}

fn run_buffer(input: &Input) {
    let mut buf = ByteBuffer::with_options(BufferOptions {
        growth_factor: usize::from(input.growth),
        initial_capacity: usize::from(input.initial),
        allow_reopen_at_end: input.reopen,
        copy_chunk: usize::from(input.copy_chunk),
        ..BufferOptions::default()
    });
    for op in &input.ops {
        let before = buf.available();
        match op {
            Op::Write(bytes) => buf.write_bytes(bytes).unwrap(),
            Op::Write8(v) => buf.write8(*v).unwrap(),
            Op::Print(text) => buf.println(text).unwrap(),
            Op::Nwrite(b, n) => assert_eq!(buf.nwrite(*b, usize::from(*n)).unwrap(), usize::from(*n)),
            Op::SkipWrite(n) => assert_eq!(buf.skip_write(usize::from(*n)).unwrap(), usize::from(*n)),
            Op::ReadByte => assert_eq!(buf.read_byte().unwrap().is_some(), before > 0),
            Op::ReadMany(n) => {
                let got = buf.read_many(usize::from(*n)).unwrap().map_or(0, |v| v.len());
                assert_eq!(got, before.min(usize::from(*n)));
            }
            Op::Read4 => assert_eq!(buf.read4().is_ok(), before >= 4),
            Op::ReadLine => assert_eq!(buf.read_line().unwrap().is_some(), before > 0),
            Op::SkipRead(n) => assert!(buf.skip_read(usize::from(*n)).unwrap() <= before),
            Op::Unread => {
                let _ = buf.unread();
            }
            Op::UnreadByte(b) => {
                let _ = buf.unread_byte(*b);
            }
            Op::UnreadN(n) => {
                let _ = buf.unread_n(usize::from(*n));
            }
            Op::MarkRead => buf.mark_read().unwrap(),
            Op::ResetRead => buf.reset_read().unwrap(),
            Op::MarkWrite => buf.mark_write().unwrap(),
            Op::ResetWrite => buf.reset_write().unwrap(),
            Op::Clear => buf.clear().unwrap(),
            Op::Close => buf.close().unwrap(),
            Op::Drain => {
                let mut sink = Vec::new();
                assert_eq!(buf.write_to(&mut sink).unwrap(), before);
                assert_eq!(sink.len(), before);
            }
        }
        buf.assert_invariants();
        let _ = buf.hexdump(rwbuf::DumpOptions::default()).unwrap();
    }
}

fn run_codecs(input: &Input) {
    if let Ok(bytes) = hex::decode(&input.hex) {
        assert_eq!(bytes.len(), input.hex.len().div_ceil(2));
        let encoded = hex::encode(&bytes);
        if input.hex.len() % 2 == 0 {
            assert!(encoded.eq_ignore_ascii_case(&input.hex));
        }
    }
    if let Ok(mut reader) = CharReader::from_text(&input.text) {
        while reader.ready() {
            let _ = reader.integer(0);
            if reader.skip_class(&rwbuf::char_reader::WHITESPACE) == 0 {
                reader.read();
            }
            assert!(reader.position() <= reader.limit());
        }
    }
}

fuzz_target!(|input: Input| {
    run_buffer(&input);
    run_codecs(&input);
});
