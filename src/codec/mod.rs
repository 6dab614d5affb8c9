//! FLH encoding and decoding subroutines.

macro_rules! module {
    ($e:ident) => {
        pub use self::$e::*;
        mod $e;
    };
}

use log::warn;

use crate::{FlhResult, RasterMut, BYTES_PER_PIXEL};

module!(codec025);
module!(codec027);

/*--------------------------------------------------------------*/

/// A maximal run of pixels differing from the same line of the
/// previous frame, preceded by `skip` unchanged pixels.  Positions
/// and lengths are in pixels.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct SubChunk {
    skip: usize,
    start: usize,
    len: usize,
}

/// An iterator that splits a pixel line into the sub-chunks that
/// differ from the same line of the previous frame.
///
/// The skip counts and changed stretches together partition the
/// line, in left-to-right order; trailing unchanged pixels are not
/// reported.
struct SubChunks<'a> {
    old: &'a [u8],
    new: &'a [u8],
    idx: usize,
}

/// An iterator that groups a line into maximal runs of one repeated
/// pixel value, yielding `(start, len)` in pixels.
struct PixelRuns<'a> {
    line: &'a [u8],
    idx: usize,
}

/// A primitive of the per-row RLE stream.  Counts are in pixels and
/// may exceed 127; the chunk writers split oversized packets.
#[derive(Debug, Eq, PartialEq)]
enum Packet<'a> {
    /// One pixel replicated `len` times.
    Repeat { len: usize, pixel: &'a [u8] },
    /// Literal pixels copied verbatim.
    Copy { data: &'a [u8] },
}

/*--------------------------------------------------------------*/

/// Decode a chunk, based on the chunk type.
///
/// Unsupported chunk types are skipped with a warning; the caller has
/// already consumed their payload.
pub fn decode_chunk(magic: u16, buf: &[u8], dst: &mut RasterMut) -> FlhResult<()> {
    match magic {
        DTA_BRUN => decode_dta_brun(buf, dst)?,
        DTA_LC => decode_dta_lc(buf, dst)?,

        _ => match chunk_name(magic) {
            Some(name) => warn!("skipping unsupported {} chunk", name),
            None => warn!("skipping unrecognised chunk type {}", magic),
        },
    }

    Ok(())
}

/// Names of chunk types that appear in other FLIC dialects.  They are
/// never produced by the FLH writer and are skipped on read.
fn chunk_name(magic: u16) -> Option<&'static str> {
    match magic {
        11 => Some("COLOR"),
        12 => Some("LC"),
        13 => Some("BLACK"),
        15 => Some("BRUN"),
        16 => Some("COPY"),
        26 => Some("DTA_COPY"),
        _ => None,
    }
}

/*--------------------------------------------------------------*/

fn pixel(buf: &[u8], idx: usize) -> &[u8] {
    &buf[idx * BYTES_PER_PIXEL..(idx + 1) * BYTES_PER_PIXEL]
}

impl<'a> SubChunks<'a> {
    /// Create a new SubChunks iterator over a line and the same line
    /// of the previous frame.
    fn new(old: &'a [u8], new: &'a [u8]) -> Self {
        assert_eq!(old.len(), new.len());
        SubChunks { old, new, idx: 0 }
    }
}

impl<'a> Iterator for SubChunks<'a> {
    type Item = SubChunk;

    /// Advances the iterator and returns the next value.
    fn next(&mut self) -> Option<SubChunk> {
        let len = self.new.len() / BYTES_PER_PIXEL;
        let mut i = self.idx;

        while i < len && pixel(self.old, i) == pixel(self.new, i) {
            i = i + 1;
        }
        if i >= len {
            self.idx = i;
            return None;
        }

        let skip = i - self.idx;
        let start = i;
        while i < len && pixel(self.old, i) != pixel(self.new, i) {
            i = i + 1;
        }

        self.idx = i;
        Some(SubChunk {
            skip,
            start,
            len: i - start,
        })
    }
}

impl<'a> PixelRuns<'a> {
    /// Create a new PixelRuns iterator.
    fn new(line: &'a [u8]) -> Self {
        PixelRuns { line, idx: 0 }
    }
}

impl<'a> Iterator for PixelRuns<'a> {
    type Item = (usize, usize);

    /// Advances the iterator and returns the next value.
    fn next(&mut self) -> Option<(usize, usize)> {
        let len = self.line.len() / BYTES_PER_PIXEL;
        let start = self.idx;
        let mut i = start;

        if i >= len {
            return None;
        }

        while i < len && pixel(self.line, i) == pixel(self.line, start) {
            i = i + 1;
        }

        self.idx = i;
        Some((start, i - start))
    }
}

/// Reduce one pixel line, or one delta sub-chunk, to RLE packets.
///
/// A stretch of two or more identical pixels becomes a REPEAT; the
/// isolated pixels between such stretches gather into COPY packets.
/// When the second pixel of a stretch is seen, the pending COPY
/// already holds the first; that pixel is transferred into the REPEAT
/// rather than flushed with the COPY.
fn encode_rle(line: &[u8]) -> Vec<Packet> {
    let mut packets = Vec::new();
    let mut copy = 0;

    for (start, len) in PixelRuns::new(line) {
        if len >= 2 {
            if copy > 0 {
                packets.push(Packet::Copy {
                    data: &line[(start - copy) * BYTES_PER_PIXEL..start * BYTES_PER_PIXEL],
                });
                copy = 0;
            }
            packets.push(Packet::Repeat {
                len,
                pixel: pixel(line, start),
            });
        } else {
            copy = copy + 1;
        }
    }

    if copy > 0 {
        let len = line.len() / BYTES_PER_PIXEL;
        packets.push(Packet::Copy {
            data: &line[(len - copy) * BYTES_PER_PIXEL..],
        });
    }

    packets
}

#[cfg(test)]
mod tests {
    use super::{decode_chunk, encode_rle, Packet, PixelRuns, SubChunk, SubChunks};
    use crate::RasterMut;

    #[test]
    fn test_decode_chunk_skips_unsupported_types() {
        let mut buf = [0x5A; 2 * 2 * 2];
        let before = buf;

        for magic in [11, 12, 13, 15, 16, 26, 999] {
            let mut dst = RasterMut::new(2, 2, &mut buf);
            let res = decode_chunk(magic, &[1, 2, 3], &mut dst);
            assert!(res.is_ok());
        }

        assert_eq!(&buf[..], &before[..]);
    }

    #[test]
    fn test_sub_chunks() {
        let xs = [1, 0, 2, 0, 3, 0, 4, 0, 5, 0, 6, 0];
        let ys = [9, 0, 9, 0, 3, 0, 4, 0, 9, 0, 6, 0];
        //        ^^^^^^^^^^              ^^^^
        let expected = [
            SubChunk { skip: 0, start: 0, len: 2 },
            SubChunk { skip: 2, start: 4, len: 1 },
        ];

        let scs: Vec<SubChunk> = SubChunks::new(&xs, &ys).collect();

        assert_eq!(&scs[..], expected);
    }

    #[test]
    fn test_sub_chunks_no_change() {
        let xs = [1, 0, 2, 0, 3, 0];

        assert_eq!(SubChunks::new(&xs, &xs).count(), 0);
    }

    #[test]
    fn test_pixel_runs() {
        let xs = [1, 0, 1, 0, 2, 0, 3, 0, 3, 0, 3, 0];
        let expected = [(0, 2), (2, 1), (3, 3)];

        let rs: Vec<(usize, usize)> = PixelRuns::new(&xs).collect();

        assert_eq!(&rs[..], expected);
    }

    #[test]
    fn test_encode_rle_mode_switch() {
        // A single literal, a run of three, a single literal.
        let xs = [1, 0, 2, 0, 2, 0, 2, 0, 3, 0];
        let expected = [
            Packet::Copy { data: &xs[0..2] },
            Packet::Repeat { len: 3, pixel: &xs[2..4] },
            Packet::Copy { data: &xs[8..10] },
        ];

        let ps = encode_rle(&xs);

        assert_eq!(&ps[..], expected);
    }

    #[test]
    fn test_encode_rle_all_literals() {
        let xs = [1, 0, 2, 0, 3, 0, 4, 0];
        let expected = [Packet::Copy { data: &xs[..] }];

        let ps = encode_rle(&xs);

        assert_eq!(&ps[..], expected);
    }

    #[test]
    fn test_encode_rle_trailing_run() {
        let xs = [1, 0, 2, 0, 2, 0];
        let expected = [
            Packet::Copy { data: &xs[0..2] },
            Packet::Repeat { len: 2, pixel: &xs[2..4] },
        ];

        let ps = encode_rle(&xs);

        assert_eq!(&ps[..], expected);
    }
}
