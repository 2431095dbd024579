use rstest::rstest;

use super::*;
use crate::options::{Content, DumpOptions, Offset};

#[test]
fn bytes_round_trip_in_order() {
    let mut buf = ByteBuffer::new();
    for b in [0u8, 1, 0x7F, 0x80, 0xFF] {
        buf.write_byte(b).unwrap();
    }
    let mut out = Vec::new();
    while let Some(b) = buf.read_byte().unwrap() {
        out.push(b);
    }
    assert_eq!(out, [0, 1, 0x7F, 0x80, 0xFF]);
    assert_eq!(buf.read_byte().unwrap(), None);
}

#[test]
fn wide_writes_are_big_endian() {
    let mut buf = ByteBuffer::new();
    buf.write2(0x0102).unwrap();
    buf.write3(0xFF03_0405).unwrap();
    buf.write4(0x0607_0809).unwrap();
    buf.write8(0x0A0B_0C0D_0E0F_1011).unwrap();
    assert_eq!(
        buf.readable().unwrap(),
        [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17]
    );
    assert_eq!(buf.read2().unwrap(), 0x0102);
    assert_eq!(buf.read3().unwrap(), 0x03_0405);
    assert_eq!(buf.read4().unwrap(), 0x0607_0809);
    assert_eq!(buf.read8().unwrap(), 0x0A0B_0C0D_0E0F_1011);
}

#[test]
fn signed_and_float_fields() {
    let mut buf = ByteBuffer::new();
    buf.write_i32(-2).unwrap();
    buf.write_i64(i64::MIN).unwrap();
    buf.write_f32(1.5).unwrap();
    buf.write_f64(f64::NEG_INFINITY).unwrap();
    buf.write2_all(&[1, 2]).unwrap();
    buf.write4_all(&[3]).unwrap();
    buf.write8_all(&[4]).unwrap();
    assert_eq!(buf.read_i32().unwrap(), -2);
    assert_eq!(buf.read_i64().unwrap(), i64::MIN);
    assert!((buf.read_f32().unwrap() - 1.5).abs() < f32::EPSILON);
    assert_eq!(buf.read_f64().unwrap(), f64::NEG_INFINITY);
    assert_eq!(buf.read2().unwrap(), 1);
    assert_eq!(buf.read2().unwrap(), 2);
    assert_eq!(buf.read4().unwrap(), 3);
    assert_eq!(buf.read8().unwrap(), 4);
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(3)]
fn short_read4_fails_without_consuming(#[case] len: usize) {
    let mut buf = ByteBuffer::from(vec![0xAA; len]);
    match buf.read4() {
        Err(Error::InsufficientData { needed, available }) => {
            assert_eq!((needed, available), (4, len));
        }
        other => panic!("expected insufficient data, got {other:?}"),
    }
    assert_eq!(buf.available(), len);
}

#[test]
fn growth_from_zero_capacity_keeps_every_byte() {
    let growth = 16;
    let mut buf = ByteBuffer::with_options(BufferOptions {
        growth_factor: growth,
        initial_capacity: 0,
        ..BufferOptions::default()
    });
    assert_eq!(buf.capacity(), 0);
    let data: Vec<u8> = (0..=u8::try_from(growth).unwrap()).collect();
    for &b in &data {
        buf.write_byte(b).unwrap();
    }
    assert_eq!(buf.available(), growth + 1);
    assert_eq!(buf.capacity(), 2 * growth);
    assert_eq!(buf.to_vec().unwrap().unwrap(), data);
}

#[test]
fn large_run_grows_in_one_step() {
    let mut buf = ByteBuffer::with_growth_factor(4);
    buf.write_bytes(&[7; 100]).unwrap();
    assert_eq!(buf.capacity(), 104);
    buf.write_bytes(&[8; 4]).unwrap();
    assert_eq!(buf.capacity(), 104);
    buf.write_byte(9).unwrap();
    assert_eq!(buf.capacity(), 108);
    assert_eq!(buf.available(), 105);
}

#[test]
fn write_range_checks_bounds() {
    let mut buf = ByteBuffer::new();
    buf.write_range(b"abcdef", 1, 3).unwrap();
    assert_eq!(buf.readable().unwrap(), b"bcd");
    assert!(matches!(
        buf.write_range(b"abc", 2, 2),
        Err(Error::OutOfBounds { .. })
    ));
    assert_eq!(buf.available(), 3);
}

#[test]
fn streaming_reads_cap_to_available() {
    let mut buf = ByteBuffer::from(&b"hello"[..]);
    let mut dst = [0u8; 8];
    assert_eq!(buf.read_range(&mut dst, 2, 6).unwrap(), Some(5));
    assert_eq!(&dst[2..7], b"hello");
    assert_eq!(buf.read_into(&mut dst).unwrap(), None);
    assert!(buf.read_range(&mut dst, 4, 5).is_err());

    let mut buf = ByteBuffer::from(&b"abc"[..]);
    assert_eq!(buf.read_many(2).unwrap().as_deref(), Some(&b"ab"[..]));
    assert_eq!(buf.read_many(9).unwrap().as_deref(), Some(&b"c"[..]));
    assert_eq!(buf.read_many(1).unwrap(), None);
}

#[test]
fn peek_sees_both_ends() {
    let mut buf = ByteBuffer::new();
    assert_eq!(buf.peek().unwrap(), None);
    assert_eq!(buf.peek_write().unwrap(), None);
    buf.write_bytes(b"xyz").unwrap();
    assert_eq!(buf.peek().unwrap(), Some(b'x'));
    assert_eq!(buf.peek_write().unwrap(), Some(b'z'));
    assert_eq!(buf.available(), 3);
}

#[test]
fn unread_steps_back_and_can_replace() {
    let mut buf = ByteBuffer::from(&b"ab"[..]);
    assert!(matches!(buf.unread(), Err(Error::UnreadWithoutRead)));
    assert_eq!(buf.read_byte().unwrap(), Some(b'a'));
    buf.unread().unwrap();
    assert_eq!(buf.read_byte().unwrap(), Some(b'a'));
    buf.unread_byte(b'A').unwrap();
    assert_eq!(buf.read_many(2).unwrap().as_deref(), Some(&b"Ab"[..]));
    buf.unread_n(0).unwrap();
    buf.unread_n(2).unwrap();
    assert_eq!(buf.available(), 2);
    assert!(matches!(
        buf.unread_n(1),
        Err(Error::UnreadWithoutRead)
    ));
    buf.skip_read(1).unwrap();
    assert!(matches!(
        buf.unread_n(2),
        Err(Error::UnreadUnderflow {
            requested: 2,
            consumed: 1
        })
    ));
}

#[rstest]
#[case(true)]
#[case(false)]
fn reopening_a_drained_buffer(#[case] allow: bool) {
    let mut buf = ByteBuffer::with_options(BufferOptions {
        allow_reopen_at_end: allow,
        ..BufferOptions::default()
    });
    buf.write_byte(0x42).unwrap();
    assert_eq!(buf.read_byte().unwrap(), Some(0x42));
    let result = buf.unread();
    if allow {
        result.unwrap();
        assert_eq!(buf.read_byte().unwrap(), Some(0x42));
    } else {
        assert!(matches!(result, Err(Error::ReopenAtEnd)));
        assert!(buf.is_empty());
    }
}

#[test]
fn read_mark_is_one_shot() {
    let mut buf = ByteBuffer::from(&b"0123456789"[..]);
    buf.skip_read(3).unwrap();
    buf.mark_read().unwrap();
    buf.skip_read(4).unwrap();
    buf.reset_read().unwrap();
    assert_eq!(buf.offset_read(), Some(2));
    buf.skip_read(1).unwrap();
    buf.reset_read().unwrap();
    assert_eq!(buf.offset_read(), None);
    assert_eq!(buf.available(), 10);
}

#[test]
fn write_reset_discards_and_clamps_reader() {
    let mut buf = ByteBuffer::new();
    buf.write_bytes(b"head").unwrap();
    buf.mark_write().unwrap();
    buf.write_bytes(b"-tail").unwrap();
    buf.skip_read(7).unwrap();
    buf.mark_read().unwrap();
    buf.reset_write().unwrap();
    assert_eq!(buf.offset_write(), Some(3));
    assert_eq!(buf.offset_read(), Some(3));
    assert!(buf.is_empty());
    buf.reset_read().unwrap();
    assert_eq!(buf.offset_read(), Some(3));
    buf.write_bytes(b"!").unwrap();
    assert_eq!(buf.read_byte().unwrap(), Some(b'!'));
    buf.reset().unwrap();
    assert_eq!(buf.capacity(), 512);
    assert_eq!(buf.offset_write(), None);
    assert_eq!(buf.offset_read(), None);
}

#[test]
fn clear_keeps_read_mark_but_close_drops_it() {
    let mut buf = ByteBuffer::from(&b"abcd"[..]);
    buf.skip_read(2).unwrap();
    buf.mark_read().unwrap();
    buf.mark_write().unwrap();
    buf.clear().unwrap();
    assert!(buf.is_empty());
    assert_eq!(buf.marked_write().unwrap(), None);
    assert_eq!(buf.read.mark, Some(0));

    buf.write_bytes(b"xy").unwrap();
    buf.mark_read().unwrap();
    buf.close().unwrap();
    assert_eq!(buf.read, Cursor::default());
    assert_eq!(buf.write, Cursor::default());
}

#[test]
fn reset_all_returns_both_directions() {
    let mut buf = ByteBuffer::new();
    buf.write_bytes(b"abc").unwrap();
    buf.mark_write().unwrap();
    buf.write_bytes(b"def").unwrap();
    buf.skip_read(2).unwrap();
    buf.reset_all().unwrap();
    assert_eq!(buf.offset_write(), Some(2));
    assert_eq!(buf.offset_read(), None);
    assert_eq!(buf.readable().unwrap(), b"abc");
}

#[test]
fn marked_spans() {
    let mut buf = ByteBuffer::new();
    assert_eq!(buf.marked_write().unwrap(), None);
    buf.write_bytes(b"key=").unwrap();
    buf.mark_write().unwrap();
    buf.write_bytes(b"value\r\n").unwrap();
    assert_eq!(buf.marked_write().unwrap().as_deref(), Some(&b"value\r\n"[..]));

    buf.skip_read(4).unwrap();
    buf.mark_read().unwrap();
    buf.skip_read(7).unwrap();
    assert_eq!(buf.marked_read().unwrap().as_deref(), Some(&b"value\r\n"[..]));
    assert_eq!(buf.marked_read_drop(2).unwrap().as_deref(), Some(&b"value"[..]));
    assert_eq!(buf.marked_read_drop(7).unwrap(), None);
    assert_eq!(buf.marked_read_drop(100).unwrap(), None);
    assert_eq!(buf.offset_read(), Some(10));
}

#[test]
fn nwrite_and_skip_write() {
    let mut buf = ByteBuffer::with_growth_factor(2);
    assert_eq!(buf.nwrite(b'-', 5).unwrap(), 5);
    assert_eq!(buf.skip_write(3).unwrap(), 3);
    assert_eq!(buf.readable().unwrap(), b"-----\0\0\0");
    assert_eq!(buf.skip_read(100).unwrap(), 8);
    assert_eq!(buf.skip_read(1).unwrap(), 0);
}

#[test]
fn snapshots_do_not_move_cursors() {
    let mut buf = ByteBuffer::with_growth_factor(8);
    assert_eq!(buf.to_vec().unwrap(), None);
    buf.write_bytes(b"abc").unwrap();
    buf.read_byte().unwrap();
    assert_eq!(buf.to_vec().unwrap().as_deref(), Some(&b"bc"[..]));
    assert_eq!(buf.verbatim().unwrap(), b"abc\0\0\0\0\0");
    assert_eq!(buf.dump().unwrap().map(|d| d.len()), Some(8));
    assert_eq!(buf.available(), 2);
    assert_eq!(buf.clone().into_inner().unwrap(), b"abc");
    assert_eq!(ByteBuffer::with_growth_factor(0).dump().unwrap(), None);
}

#[test]
fn from_bytes_makes_everything_readable() {
    let buf = ByteBuffer::from_bytes(b"payload".to_vec());
    assert_eq!(buf.available(), 7);
    assert_eq!(buf.capacity(), 7);
    assert_eq!(buf.offset_write(), Some(6));
    assert_eq!(buf.offset_read(), None);
}

#[test]
fn growth_factor_can_change() {
    let mut buf = ByteBuffer::with_growth_factor(1);
    buf.set_growth_factor(32);
    assert_eq!(buf.growth_factor(), 32);
    buf.write_bytes(b"ab").unwrap();
    assert_eq!(buf.capacity(), 33);
    assert_eq!(buf.options().growth_factor, 32);
}

#[test]
fn destroyed_buffer_refuses_data_operations() {
    let mut buf = ByteBuffer::from(&b"data"[..]);
    buf.destroy();
    assert!(buf.is_destroyed());
    assert_eq!(buf.capacity(), 0);
    assert_eq!(buf.available(), 0);
    assert!(matches!(buf.write_byte(1), Err(Error::Destroyed)));
    assert!(matches!(buf.read_byte(), Err(Error::Destroyed)));
    assert!(matches!(buf.read4(), Err(Error::Destroyed)));
    assert!(matches!(buf.unread(), Err(Error::Destroyed)));
    assert!(matches!(buf.to_vec(), Err(Error::Destroyed)));
    assert!(matches!(buf.unread_n(0), Err(Error::Destroyed)));
    assert!(matches!(buf.mark_read(), Err(Error::Destroyed)));
    assert!(matches!(buf.reset_read(), Err(Error::Destroyed)));
    assert!(matches!(buf.mark_write(), Err(Error::Destroyed)));
    assert!(matches!(buf.reset_write(), Err(Error::Destroyed)));
    assert!(matches!(buf.reset(), Err(Error::Destroyed)));
    assert!(matches!(buf.reset_all(), Err(Error::Destroyed)));
    assert!(matches!(buf.clear(), Err(Error::Destroyed)));
    assert!(matches!(buf.close(), Err(Error::Destroyed)));
    assert!(matches!(buf.read_line(), Err(Error::Destroyed)));
    assert!(matches!(buf.into_inner(), Err(Error::Destroyed)));
}

#[test]
fn absurd_counts_are_too_large() {
    let mut buf = ByteBuffer::new();
    buf.write_bytes(b"ab").unwrap();
    assert!(matches!(buf.nwrite(0, usize::MAX), Err(Error::TooLarge { .. })));
    assert!(matches!(buf.skip_write(usize::MAX - 1), Err(Error::TooLarge { .. })));
    assert_eq!(buf.readable().unwrap(), b"ab");
    assert_eq!(buf.capacity(), 512);
}

#[test]
fn hexdump_labels_by_read_offset() {
    let mut buf = ByteBuffer::from(&b"\0AB\n"[..]);
    buf.skip_read(1).unwrap();
    let dump = buf
        .hexdump(DumpOptions {
            offset: Offset::Dec,
            content: Content::Hex,
        })
        .unwrap();
    assert_eq!(dump, "0000001 41 42 0A\n0000004\n");
}

#[test]
fn debug_shows_readable_bytes() {
    let mut buf = ByteBuffer::from(&b"ok\xFF"[..]);
    buf.read_byte().unwrap();
    let debug = format!("{buf:?}");
    assert!(debug.contains(r#"readable: "k\xff""#), "{debug}");
}
