//! Codec for chunk type 27 = FLI_DTA_LC.

use std::io::{Cursor, Read, Seek, SeekFrom, Write};

use byteorder::LittleEndian as LE;
use byteorder::{ReadBytesExt, WriteBytesExt};

use super::{encode_rle, Packet, SubChunks};
use crate::{FlhError, FlhResult, Raster, RasterMut, BYTES_PER_PIXEL};

/// Magic for a FLI_DTA_LC chunk - 16-bit Delta Compression.
///
/// This chunk contains the differences between the previous frame and
/// this frame.  Every frame of an FLH animation after the first is
/// stored this way.
///
/// The first 16-bit word following the chunk header contains the
/// number of modified lines.  Lines are visited bottom-up, the same
/// order DTA_BRUN stores them.  Each modified line is preceded by
/// zero or more negative 16-bit words, each skipping that many
/// unchanged lines, and then a non-negative 16-bit word holding the
/// number of packets in the line.  Unchanged lines after the last
/// modified line are not represented.
///
/// Each packet consists of a single byte column skip, counting the
/// unchanged pixels since the end of the previous packet, followed by
/// a packet type/size byte.  If the packet type is positive it is a
/// count of pixels to be copied from the packet to the frame.  If the
/// packet type is negative it contains a single 16-bit pixel which is
/// to be replicated; the absolute value of the packet type gives the
/// number of times the pixel is to be replicated.
///
/// # Note
///
/// The negative/positive meaning of the packet type bytes in DTA_LC
/// compression is reversed from that used in DTA_BRUN compression.
pub const DTA_LC: u16 = 27;

/// Decode a FLI_DTA_LC chunk.
///
/// The raster must already contain the previous frame; only the delta
/// regions are overwritten.
pub fn decode_dta_lc(src: &[u8], dst: &mut RasterMut) -> FlhResult<()> {
    let mut r = Cursor::new(src);
    let row_len = dst.w * BYTES_PER_PIXEL;
    let lines = r.read_u16::<LE>()?;
    let mut y = 0;

    for _ in 0..lines {
        let num_packets;
        loop {
            let word = i32::from(r.read_i16::<LE>()?);
            if word < 0 {
                y = y + (-word) as usize;
            } else {
                num_packets = word as usize;
                break;
            }
        }

        if y >= dst.h {
            return Err(FlhError::Corrupted);
        }

        // Lines are counted up from the bottom of the frame.
        let start = (dst.h - 1 - y) * row_len;
        let row = &mut dst.buf[start..start + row_len];
        let mut x0 = 0;

        for _ in 0..num_packets {
            let nskip = r.read_u8()? as usize;
            let signed_length = i32::from(r.read_i8()?);
            let start = x0 + nskip;

            if signed_length >= 0 {
                let end = start + signed_length as usize;
                if end > dst.w {
                    return Err(FlhError::Corrupted);
                }

                r.read_exact(&mut row[start * BYTES_PER_PIXEL..end * BYTES_PER_PIXEL])?;

                x0 = end;
            } else {
                let end = start + (-signed_length) as usize;
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
            }
        }

        y = y + 1;
    }

    Ok(())
}

/// Encode a FLI_DTA_LC chunk.
///
/// Returns the size of the payload in bytes.  Two identical frames
/// produce a payload holding only a zero modified-line count.
pub fn encode_dta_lc<W: Write + Seek>(
    prev: &Raster,
    next: &Raster,
    w: &mut W,
) -> FlhResult<usize> {
    if (prev.w != next.w) || (prev.h != next.h) {
        return Err(FlhError::WrongResolution);
    }

    let row_len = next.w * BYTES_PER_PIXEL;
    let pos0 = w.stream_position()?;

    // Reserve space for the modified line count.
    w.write_u16::<LE>(0)?;

    let mut lines = 0;
    let mut line_skip = 0;

    for (p, n) in prev
        .buf
        .chunks(row_len)
        .rev()
        .zip(next.buf.chunks(row_len).rev())
    {
        if p == n {
            line_skip = line_skip + 1;
            continue;
        }

        let max = i16::MAX as usize;
        while line_skip > 0 {
            let l = line_skip.min(max);
            w.write_i16::<LE>(-(l as i32) as i16)?;
            line_skip = line_skip - l;
        }

        // Reserve space for the packet count.
        let pos1 = w.stream_position()?;
        w.write_u16::<LE>(0)?;

        let mut count = 0;
        for sc in SubChunks::new(p, n) {
            let sub = &n[sc.start * BYTES_PER_PIXEL..(sc.start + sc.len) * BYTES_PER_PIXEL];
            let mut skip = sc.skip;
            for packet in encode_rle(sub) {
                count = count + write_packet(&packet, skip, w)?;
                skip = 0;
            }
        }

        if count > u16::MAX as usize {
            return Err(FlhError::ExceededLimit);
        }

        let pos2 = w.stream_position()?;
        w.seek(SeekFrom::Start(pos1))?;
        w.write_u16::<LE>(count as u16)?;
        w.seek(SeekFrom::Start(pos2))?;

        lines = lines + 1;
    }

    // Trailing unchanged lines are not represented.
    if lines > u16::MAX as usize {
        return Err(FlhError::ExceededLimit);
    }

    let pos2 = w.stream_position()?;
    w.seek(SeekFrom::Start(pos0))?;
    w.write_u16::<LE>(lines as u16)?;
    w.seek(SeekFrom::Start(pos2))?;

    Ok((pos2 - pos0) as usize)
}

/// Write a packet and the unchanged-pixel skip preceding it,
/// splitting runs longer than 127 pixels.  Skips longer than 255
/// pixels are carried by zero-length COPY packets.
///
/// Returns the number of packets written.
fn write_packet<W: Write>(packet: &Packet, skip: usize, w: &mut W) -> FlhResult<usize> {
    let max = i8::MAX as usize;
    let mut skip = skip;
    let mut count = 0;

    while skip > u8::MAX as usize {
        w.write_u8(u8::MAX)?;
        w.write_i8(0)?; // copy 0

        skip = skip - u8::MAX as usize;
        count = count + 1;
    }

    match *packet {
        Packet::Repeat { mut len, pixel } => {
            while len > 0 {
                let l = len.min(max);
                w.write_u8(skip as u8)?;
                w.write_i8(-(l as i32) as i8)?;
                w.write_all(pixel)?;

                skip = 0;
                len = len - l;
                count = count + 1;
            }
        }
        Packet::Copy { data } => {
            let mut idx = 0;
            let mut len = data.len() / BYTES_PER_PIXEL;
            while len > 0 {
                let l = len.min(max);
                w.write_u8(skip as u8)?;
                w.write_i8(l as i8)?;
                w.write_all(&data[idx..(idx + l * BYTES_PER_PIXEL)])?;

                skip = 0;
                idx = idx + l * BYTES_PER_PIXEL;
                len = len - l;
                count = count + 1;
            }
        }
    }

    Ok(count)
}
