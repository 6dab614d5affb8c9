//! Codec for chunk type 25 = FLI_DTA_BRUN.

use std::io::{Cursor, Read, Seek, SeekFrom, Write};

use byteorder::{ReadBytesExt, WriteBytesExt};

use super::{encode_rle, Packet};
use crate::{FlhError, FlhResult, Raster, RasterMut, BYTES_PER_PIXEL};

/// Magic for a FLI_DTA_BRUN chunk - 16-bit Byte Run Length Compression.
///
/// This chunk contains the entire frame in a compressed format.  It
/// is used for the first frame of an FLH animation, which has no
/// predecessor to encode differences against.
///
/// The data is organised in lines, stored bottom-up: the first line
/// in the chunk is the lowest line of the frame.  Each line contains
/// packets of compressed pixels.
///
/// The first byte of each line is a count of packets in the line.
/// The count is truncated to a byte when written, and readers do not
/// depend on it; the frame width drives the decoding of packets on a
/// line.  Continue reading and processing packets until width pixels
/// have been processed, then proceed to the next line.
///
/// Each packet consists of a type/size byte, followed by one or more
/// 16-bit pixels.  If the packet type is positive it contains a
/// single pixel which is to be replicated; the packet type is the
/// number of times the pixel is to be replicated.  If the packet type
/// is negative it is a count of pixels to be copied from the packet
/// to the frame.
pub const DTA_BRUN: u16 = 25;

/// Decode a FLI_DTA_BRUN chunk.
pub fn decode_dta_brun(src: &[u8], dst: &mut RasterMut) -> FlhResult<()> {
    let mut r = Cursor::new(src);
    let row_len = dst.w * BYTES_PER_PIXEL;

    for row in dst.buf.chunks_mut(row_len).rev() {
        // Obsolete count byte; the width paces the line instead.
        let _count = r.read_u8()?;
        let mut x0 = 0;

        while x0 < dst.w {
            let signed_length = i32::from(r.read_i8()?);

            if signed_length >= 0 {
                let start = x0;
                let end = start + signed_length as usize;
                if end > dst.w {
                    return Err(FlhError::Corrupted);
                }

                let mut c = [0; BYTES_PER_PIXEL];
                r.read_exact(&mut c)?;
                for e in row[start * BYTES_PER_PIXEL..end * BYTES_PER_PIXEL]
                    .chunks_mut(BYTES_PER_PIXEL)
                {
                    e.copy_from_slice(&c);
                }

                x0 = end;
            } else {
                let start = x0;
                let end = start + (-signed_length) as usize;
                if end > dst.w {
                    return Err(FlhError::Corrupted);
                }

                r.read_exact(&mut row[start * BYTES_PER_PIXEL..end * BYTES_PER_PIXEL])?;

                x0 = end;
            }
        }
    }

    Ok(())
}

/// Encode a FLI_DTA_BRUN chunk.
///
/// Returns the size of the payload in bytes.
pub fn encode_dta_brun<W: Write + Seek>(next: &Raster, w: &mut W) -> FlhResult<usize> {
    let pos0 = w.stream_position()?;
    let row_len = next.w * BYTES_PER_PIXEL;

    for n in next.buf.chunks(row_len).rev() {
        // Reserve space for the count.
        let pos1 = w.stream_position()?;
        w.write_u8(0)?;

        let mut count = 0;
        for packet in encode_rle(n) {
            count = count + write_packet(&packet, w)?;
        }

        // A line may need more than 255 packets; the count byte is
        // truncated, and readers pace on the frame width.
        let pos2 = w.stream_position()?;
        w.seek(SeekFrom::Start(pos1))?;
        w.write_u8(count as u8)?;
        w.seek(SeekFrom::Start(pos2))?;
    }

    let pos1 = w.stream_position()?;
    Ok((pos1 - pos0) as usize)
}

/// Write a packet, splitting runs longer than 127 pixels.
///
/// Returns the number of packets written.
fn write_packet<W: Write>(packet: &Packet, w: &mut W) -> FlhResult<usize> {
    let max = i8::MAX as usize;
    let mut count = 0;

    match *packet {
        Packet::Repeat { mut len, pixel } => {
            while len > 0 {
                let l = len.min(max);
                w.write_i8(l as i8)?;
                w.write_all(pixel)?;

                len = len - l;
                count = count + 1;
            }
        }
        Packet::Copy { data } => {
            let mut idx = 0;
            let mut len = data.len() / BYTES_PER_PIXEL;
            while len > 0 {
                let l = len.min(max);
                w.write_i8(-(l as i32) as i8)?;
                w.write_all(&data[idx..(idx + l * BYTES_PER_PIXEL)])?;

                idx = idx + l * BYTES_PER_PIXEL;
                len = len - l;
                count = count + 1;
            }
        }
    }

    Ok(count)
}
