//! FLH implementation.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use byteorder::LittleEndian as LE;
use byteorder::{ReadBytesExt, WriteBytesExt};
use log::warn;

use crate::codec::*;
use crate::{FlhError, FlhResult, Raster, RasterMut};

/// Magic for an FLH file - Rock Raiders FLIC Files.
///
/// This animation file format is a 16 bits-per-pixel offshoot of the
/// Autodesk Animator Pro FLC format.  An FLH file does not contain a
/// prefix chunk, palette chunks, or a ring frame, and it records no
/// playback speed.
///
/// The file header for an FLH file is defined as follows:
///
///   Offset | Length |   Name   | Description
///   ------:| ------:|:--------:| -----------------------------------
///        0 |      4 |   size   | The size of the entire animation file, including this file header.
///        4 |      2 |   magic  | File format identifier.  Always 0xAF43.
///        6 |      2 |  frames  | Number of frames in the FLH.
///        8 |      2 |   width  | Frame width in pixels.
///       10 |      2 |  height  | Frame height in pixels.
///       12 |      2 |   depth  | Bits per pixel (always 16).
///       14 |      2 |   flags  | Always zero.
///       16 |      2 |   speed  | Always zero.
///       18 |      4 |   next   | Always zero.
///       22 |      4 |   frit   | Always zero.
///       26 |    102 | reserved | Unused space, set to zeroes, except for the two words at offset 0x50.
///
/// The Rock Raiders reader additionally expects two 32-bit words
/// inside the reserved space, at offset 0x50: the offset of the first
/// frame (always 0x80), and the offset of the end of the first frame
/// (the first frame's size plus 0x80).
pub const FLH_MAGIC: u16 = 0xAF43;

/// Magic for an FLH frame.
///
/// Frame chunks contain the pixel data for the animation.  A frame
/// chunk may contain multiple subordinate chunks, each starting with
/// a chunk header.  Each frame chunk starts with a 16-byte header:
///
///   Offset | Length |   Name   | Description
///   ------:| ------:|:--------:| -----------------------------------
///        0 |      4 |   size   | The size of the frame chunk, including this header and all subordinate chunks that follow.
///        4 |      2 |   magic  | Frame chunk identifier.  Always 0xF1FA.
///        6 |      2 |  chunks  | Number of subordinate chunks in the frame chunk.
///        8 |      8 | reserved | Unused space, set to zeroes.
pub const FLHF_MAGIC: u16 = 0xF1FA;

/// Size of an FLH file header on disk.
pub const SIZE_OF_FLH_HEADER: usize = 128;

/// Size of an FLH frame header on disk.
pub const SIZE_OF_FLH_FRAME: usize = 16;

/// Size of a chunk header on disk.
///
/// Each data chunk within a frame chunk is formatted as follows:
///
///   Offset | Length | Name | Description
///   ------:| ------:|:----:| ---------------------------------------
///        0 |      4 | size | The size of the chunk, including this header.
///        4 |      2 | type | Data type identifier.
///        6 | size-6 | data | The pixel data.
pub const SIZE_OF_CHUNK: usize = 6;

/// File offset of the two words recording where the first frame ends.
const FIRST_FRAME_OFFSET: u64 = 0x50;

/// FLH header.
struct FlhHeader {
    frame_count: u16,
    w: u16,
    h: u16,
}

/// FLH animation, with a File handle.
///
/// Opens and holds onto the file handle until it is dropped.  Frames
/// are decoded in sequence; each delta frame is rendered over the
/// previous frame's pixels in the caller's raster.
#[allow(dead_code)]
pub struct FlhFile {
    hdr: FlhHeader,
    frame: usize,

    filename: PathBuf,
    file: File,
}

/// FLH animation writer, with a File handle.
///
/// Opens and holds onto the file handle until it is closed.
pub struct FlhFileWriter {
    hdr: FlhHeader,

    filename: PathBuf,
    file: Option<File>,
}

/*--------------------------------------------------------------*/

impl FlhFile {
    /// Open an FLH file.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    ///
    /// flh::FlhFile::open(Path::new("ex.flh"));
    /// ```
    pub fn open(filename: &Path) -> FlhResult<Self> {
        if !filename.exists() {
            return Err(FlhError::NoFile);
        } else if !filename.is_file() {
            return Err(FlhError::NotARegularFile);
        }

        let mut file = File::open(filename)?;
        let hdr = read_flh_header(&mut file)?;

        Ok(FlhFile {
            hdr,
            frame: 0,
            filename: filename.to_path_buf(),
            file,
        })
    }

    /// Get the next frame number.
    pub fn frame(&self) -> u16 {
        self.frame as u16
    }

    /// Get the frame count.
    pub fn frame_count(&self) -> u16 {
        self.hdr.frame_count
    }

    /// Get the FLH width.
    pub fn width(&self) -> u16 {
        self.hdr.w
    }

    /// Get the FLH height.
    pub fn height(&self) -> u16 {
        self.hdr.h
    }

    /// Decode the next frame in the FLH.
    ///
    /// The raster must contain the previously decoded frame, since
    /// delta frames only overwrite the pixels that changed.  Reading
    /// past the last frame reports a truncated stream.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    ///
    /// if let Ok(ref mut flh) = flh::FlhFile::open(Path::new("ex.flh")) {
    ///     let w = flh.width() as usize;
    ///     let h = flh.height() as usize;
    ///     let mut buf = vec![0; w * h * flh::BYTES_PER_PIXEL];
    ///
    ///     let res = flh.read_next_frame(&mut flh::RasterMut::new(w, h, &mut buf));
    /// }
    /// ```
    pub fn read_next_frame(&mut self, dst: &mut RasterMut) -> FlhResult<()> {
        if (self.hdr.w as usize != dst.w) || (self.hdr.h as usize != dst.h) {
            return Err(FlhError::WrongResolution);
        }

        decode_frame(&mut self.file, self.frame, dst)?;
        self.frame = self.frame + 1;

        Ok(())
    }
}

/*--------------------------------------------------------------*/

impl FlhFileWriter {
    /// Create a file for writing FLHs.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    ///
    /// const SCREEN_W: u16 = 640;
    /// const SCREEN_H: u16 = 480;
    ///
    /// flh::FlhFileWriter::create(Path::new("ex.flh"), SCREEN_W, SCREEN_H);
    /// ```
    pub fn create(filename: &Path, w: u16, h: u16) -> FlhResult<Self> {
        if w == 0 || h == 0 {
            return Err(FlhError::WrongResolution);
        }

        let mut file = File::create(filename)?;

        let hdr = FlhHeader {
            frame_count: 0,
            w,
            h,
        };

        // The size and frame count are placeholders until close.
        write_flh_header(&hdr, 0, &mut file)?;

        Ok(FlhFileWriter {
            hdr,
            filename: filename.to_path_buf(),
            file: Some(file),
        })
    }

    /// Close the FLH file.
    ///
    /// You must close the FLH writer after you have supplied all the
    /// frames, to patch the file size and frame count into the
    /// header.
    ///
    /// The FLH writer is not usable after being closed.
    pub fn close(mut self) -> FlhResult<()> {
        if let Some(mut file) = self.file.take() {
            if self.hdr.frame_count == 0 {
                return Err(FlhError::NoFrames);
            }

            let size = file.seek(SeekFrom::End(0))?;
            if size > u32::MAX as u64 {
                return Err(FlhError::ExceededLimit);
            }

            file.seek(SeekFrom::Start(0))?;
            file.write_u32::<LE>(size as u32)?;
            file.seek(SeekFrom::Start(6))?;
            file.write_u16::<LE>(self.hdr.frame_count)?;
        }

        Ok(())
    }

    /// Encode the next frame in the FLH.
    ///
    /// Supply None as the previous frame for the first frame, which
    /// is stored in full, and the previously written frame for every
    /// later frame, which stores only the differences.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    /// use flh::{FlhFileWriter, Raster};
    ///
    /// const SCREEN_W: usize = 640;
    /// const SCREEN_H: usize = 480;
    /// let buf = vec![0; SCREEN_W * SCREEN_H * flh::BYTES_PER_PIXEL];
    ///
    /// if let Ok(mut flh) = FlhFileWriter::create(
    ///         Path::new("ex.flh"), SCREEN_W as u16, SCREEN_H as u16) {
    ///     let raster = Raster::new(SCREEN_W, SCREEN_H, &buf);
    ///     flh.write_next_frame(None, &raster);
    ///     flh.write_next_frame(Some(&raster), &raster);
    ///     flh.close();
    /// }
    /// ```
    pub fn write_next_frame(&mut self, prev: Option<&Raster>, next: &Raster) -> FlhResult<()> {
        let Some(file) = self.file.as_mut() else {
            return Err(FlhError::NoFile);
        };

        if (self.hdr.w as usize != next.w) || (self.hdr.h as usize != next.h) {
            return Err(FlhError::WrongResolution);
        }
        if self.hdr.frame_count == u16::MAX {
            return Err(FlhError::ExceededLimit);
        }

        let first = self.hdr.frame_count == 0;
        let size = match (first, prev) {
            (true, None) => write_frame(file, DTA_BRUN, |w| encode_dta_brun(next, w))?,
            (false, Some(prev)) => {
                write_frame(file, DTA_LC, |w| encode_dta_lc(prev, next, w))?
            }
            _ => return Err(FlhError::NoGood),
        };

        if first {
            // The Rock Raiders reader expects the end of the first
            // frame recorded inside the header padding.
            let pos = file.stream_position()?;
            file.seek(SeekFrom::Start(FIRST_FRAME_OFFSET))?;
            file.write_u32::<LE>(SIZE_OF_FLH_HEADER as u32)?;
            file.write_u32::<LE>(size + SIZE_OF_FLH_HEADER as u32)?;
            file.seek(SeekFrom::Start(pos))?;
        }

        self.hdr.frame_count = self.hdr.frame_count + 1;

        Ok(())
    }
}

impl Drop for FlhFileWriter {
    /// A method called when the value goes out of scope.
    fn drop(&mut self) {
        if self.file.is_some() {
            warn!(
                "{} was not closed, may be corrupt",
                self.filename.to_string_lossy()
            );
        }
    }
}

/*--------------------------------------------------------------*/

/// Read the FLH's header.
fn read_flh_header<R: Read + Seek>(r: &mut R) -> FlhResult<FlhHeader> {
    let _size = r.read_u32::<LE>()?;
    let magic = r.read_u16::<LE>()?;

    if magic != FLH_MAGIC {
        return Err(FlhError::BadMagic);
    }

    let frame_count = r.read_u16::<LE>()?;
    let width = r.read_u16::<LE>()?;
    let height = r.read_u16::<LE>()?;
    let depth = r.read_u16::<LE>()?;
    let _flags = r.read_u16::<LE>()?;
    let _speed = r.read_u16::<LE>()?;
    r.seek(SeekFrom::Start(SIZE_OF_FLH_HEADER as u64))?;

    if depth != 16 {
        return Err(FlhError::BadDepth(depth));
    }
    if width == 0 || height == 0 || frame_count == 0 {
        return Err(FlhError::Corrupted);
    }

    Ok(FlhHeader {
        frame_count,
        w: width,
        h: height,
    })
}

/// Write the FLH header.
fn write_flh_header<W: Write>(hdr: &FlhHeader, size: u32, w: &mut W) -> FlhResult<()> {
    let depth = 16;
    let flags = 0;
    let speed = 0;
    let next = 0;
    let frit = 0;

    w.write_u32::<LE>(size)?;
    w.write_u16::<LE>(FLH_MAGIC)?;
    w.write_u16::<LE>(hdr.frame_count)?;
    w.write_u16::<LE>(hdr.w)?;
    w.write_u16::<LE>(hdr.h)?;
    w.write_u16::<LE>(depth)?;
    w.write_u16::<LE>(flags)?;
    w.write_u16::<LE>(speed)?;
    w.write_u32::<LE>(next)?;
    w.write_u32::<LE>(frit)?;
    w.write_all(&[0; SIZE_OF_FLH_HEADER - 26])?;

    Ok(())
}

/// Write one frame: frame header, chunk header, then the payload,
/// with both sizes patched in afterwards.
///
/// Returns the size of the frame in bytes.
fn write_frame<W, F>(w: &mut W, chunk_magic: u16, encode: F) -> FlhResult<u32>
where
    W: Write + Seek,
    F: FnOnce(&mut W) -> FlhResult<usize>,
{
    let pos0 = w.stream_position()?;

    // Reserve space for the frame and chunk headers.
    w.write_all(&[0; SIZE_OF_FLH_FRAME])?;
    w.write_all(&[0; SIZE_OF_CHUNK])?;

    let payload = encode(w)?;

    let chunk_size = SIZE_OF_CHUNK + payload;
    let frame_size = SIZE_OF_FLH_FRAME + chunk_size;
    if frame_size > u32::MAX as usize {
        return Err(FlhError::ExceededLimit);
    }

    let pos1 = w.stream_position()?;

    w.seek(SeekFrom::Start(pos0))?;
    w.write_u32::<LE>(frame_size as u32)?;
    w.write_u16::<LE>(FLHF_MAGIC)?;
    w.write_u16::<LE>(1)?; // chunks

    w.seek(SeekFrom::Start(pos0 + SIZE_OF_FLH_FRAME as u64))?;
    w.write_u32::<LE>(chunk_size as u32)?;
    w.write_u16::<LE>(chunk_magic)?;

    w.seek(SeekFrom::Start(pos1))?;

    Ok(frame_size as u32)
}

/// Decode a single frame at the current stream position.
fn decode_frame<R: Read + Seek>(r: &mut R, frame_num: usize, dst: &mut RasterMut) -> FlhResult<()> {
    let pos0 = r.stream_position()?;

    let frame_size = r.read_u32::<LE>()? as u64;
    let magic = r.read_u16::<LE>()?;
    let num_chunks = r.read_u16::<LE>()?;
    r.seek(SeekFrom::Current(8))?;

    if magic != FLHF_MAGIC {
        return Err(FlhError::BadMagic);
    }
    if (frame_size as usize) < SIZE_OF_FLH_FRAME {
        return Err(FlhError::Corrupted);
    }

    for _ in 0..num_chunks {
        let chunk_size = r.read_u32::<LE>()? as usize;
        let chunk_magic = r.read_u16::<LE>()?;

        if chunk_size < SIZE_OF_CHUNK || chunk_size as u64 > frame_size {
            return Err(FlhError::Corrupted);
        }

        let mut buf = vec![0; chunk_size - SIZE_OF_CHUNK];
        r.read_exact(&mut buf)?;

        decode_chunk(chunk_magic, &buf, dst)?;
    }

    // Animator-family writers have been known to disagree with their
    // own frame sizes; trust the header when moving on.
    let pos1 = r.stream_position()?;
    let expected = pos0 + frame_size;
    if pos1 != expected {
        warn!(
            "frame {} reads too {} - current offset={}, expected offset={}",
            frame_num,
            if pos1 > expected { "much" } else { "little" },
            pos1,
            expected
        );
        r.seek(SeekFrom::Start(expected))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::BYTES_PER_PIXEL;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("flh-test-{}-{}.flh", std::process::id(), name))
    }

    fn read_u16(buf: &[u8], offset: usize) -> u16 {
        u16::from_le_bytes(buf[offset..offset + 2].try_into().unwrap())
    }

    fn read_u32(buf: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(buf[offset..offset + 4].try_into().unwrap())
    }

    #[test]
    fn test_write_and_read_round_trip() {
        const SCREEN_W: usize = 8;
        const SCREEN_H: usize = 4;
        let path = temp_path("round-trip");

        let frame0 = [0x1F, 0x00].repeat(SCREEN_W * SCREEN_H);
        let mut frame1 = frame0.clone();
        frame1[6] = 0xAB;
        frame1[7] = 0xCD;
        let frame2 = frame1.clone(); // unchanged
        let frames = [frame0, frame1, frame2];

        {
            let mut out = FlhFileWriter::create(&path, SCREEN_W as u16, SCREEN_H as u16).unwrap();
            for (i, buf) in frames.iter().enumerate() {
                let next = Raster::new(SCREEN_W, SCREEN_H, buf);
                if i == 0 {
                    out.write_next_frame(None, &next).unwrap();
                } else {
                    let prev = Raster::new(SCREEN_W, SCREEN_H, &frames[i - 1]);
                    out.write_next_frame(Some(&prev), &next).unwrap();
                }
            }
            out.close().unwrap();
        }

        let mut flh = FlhFile::open(&path).unwrap();
        assert_eq!(flh.frame_count(), 3);
        assert_eq!(flh.width() as usize, SCREEN_W);
        assert_eq!(flh.height() as usize, SCREEN_H);

        let mut buf = vec![0; SCREEN_W * SCREEN_H * BYTES_PER_PIXEL];
        for (i, expected) in frames.iter().enumerate() {
            flh.read_next_frame(&mut RasterMut::new(SCREEN_W, SCREEN_H, &mut buf))
                .unwrap();
            assert_eq!(&buf[..], &expected[..], "frame {}", i);
        }

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_header_fields_and_first_frame_offset() {
        const SCREEN_W: usize = 4;
        const SCREEN_H: usize = 2;
        let path = temp_path("header-fields");

        let frame0 = [0x1F, 0x00].repeat(SCREEN_W * SCREEN_H);
        let mut frame1 = frame0.clone();
        frame1[0] = 0xFF;

        {
            let mut out = FlhFileWriter::create(&path, SCREEN_W as u16, SCREEN_H as u16).unwrap();
            out.write_next_frame(None, &Raster::new(SCREEN_W, SCREEN_H, &frame0))
                .unwrap();
            out.write_next_frame(
                Some(&Raster::new(SCREEN_W, SCREEN_H, &frame0)),
                &Raster::new(SCREEN_W, SCREEN_H, &frame1),
            )
            .unwrap();
            out.close().unwrap();
        }

        let bytes = fs::read(&path).unwrap();

        assert_eq!(read_u32(&bytes, 0) as usize, bytes.len());
        assert_eq!(read_u16(&bytes, 4), FLH_MAGIC);
        assert_eq!(read_u16(&bytes, 6), 2); // frames
        assert_eq!(read_u16(&bytes, 8) as usize, SCREEN_W);
        assert_eq!(read_u16(&bytes, 10) as usize, SCREEN_H);
        assert_eq!(read_u16(&bytes, 12), 16); // depth
        assert_eq!(read_u16(&bytes, 14), 0); // flags
        assert_eq!(read_u16(&bytes, 16), 0); // speed

        // Walk the frames and check every declared size.
        let mut offset = SIZE_OF_FLH_HEADER;
        let mut frame_sizes = Vec::new();
        for magic in [DTA_BRUN, DTA_LC] {
            let frame_size = read_u32(&bytes, offset) as usize;
            assert_eq!(read_u16(&bytes, offset + 4), FLHF_MAGIC);
            assert_eq!(read_u16(&bytes, offset + 6), 1); // chunks

            let chunk_size = read_u32(&bytes, offset + SIZE_OF_FLH_FRAME) as usize;
            assert_eq!(chunk_size, frame_size - SIZE_OF_FLH_FRAME);
            assert_eq!(read_u16(&bytes, offset + SIZE_OF_FLH_FRAME + 4), magic);

            frame_sizes.push(frame_size);
            offset = offset + frame_size;
        }
        assert_eq!(offset, bytes.len());

        // The words at 0x50 locate the end of the first frame.
        assert_eq!(read_u32(&bytes, 0x50), 0x80);
        assert_eq!(read_u32(&bytes, 0x54) as usize, frame_sizes[0] + 0x80);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_unchanged_delta_frame() {
        const SCREEN_W: usize = 4;
        const SCREEN_H: usize = 2;
        let path = temp_path("unchanged-delta");

        let frame0 = [0x12, 0x34].repeat(SCREEN_W * SCREEN_H);

        {
            let mut out = FlhFileWriter::create(&path, SCREEN_W as u16, SCREEN_H as u16).unwrap();
            let raster = Raster::new(SCREEN_W, SCREEN_H, &frame0);
            out.write_next_frame(None, &raster).unwrap();
            out.write_next_frame(Some(&raster), &raster).unwrap();
            out.close().unwrap();
        }

        let bytes = fs::read(&path).unwrap();

        // The delta frame holds only a zero modified-line count.
        let frame0_size = read_u32(&bytes, SIZE_OF_FLH_HEADER) as usize;
        let offset = SIZE_OF_FLH_HEADER + frame0_size;
        let frame1_size = read_u32(&bytes, offset) as usize;
        assert_eq!(frame1_size, SIZE_OF_FLH_FRAME + SIZE_OF_CHUNK + 2);
        assert_eq!(read_u16(&bytes, offset + SIZE_OF_FLH_FRAME + 4), DTA_LC);
        assert_eq!(read_u16(&bytes, offset + SIZE_OF_FLH_FRAME + SIZE_OF_CHUNK), 0);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_close_without_frames() {
        let path = temp_path("no-frames");

        let out = FlhFileWriter::create(&path, 4, 4).unwrap();
        let res = out.close();
        assert!(matches!(res, Err(FlhError::NoFrames)));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_wrong_resolution() {
        let path = temp_path("wrong-resolution");

        let buf = [0; 4 * 4 * BYTES_PER_PIXEL];
        let mut out = FlhFileWriter::create(&path, 8, 8).unwrap();
        let res = out.write_next_frame(None, &Raster::new(4, 4, &buf));
        assert!(matches!(res, Err(FlhError::WrongResolution)));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_open_bad_magic() {
        let path = temp_path("bad-magic");

        fs::write(&path, [0; SIZE_OF_FLH_HEADER]).unwrap();
        let res = FlhFile::open(&path);
        assert!(matches!(res, Err(FlhError::BadMagic)));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_random_round_trip() {
        let mut rng = StdRng::seed_from_u64(0x464C48);
        let path = temp_path("random");

        let palette: [[u8; 2]; 4] = [[0x00, 0x00], [0x1F, 0x00], [0xE0, 0x03], [0x00, 0x7C]];

        for round in 0..8 {
            let w = rng.gen_range(1..=64);
            let h = rng.gen_range(1..=64);
            let num_frames = rng.gen_range(1..=8);

            let mut frames: Vec<Vec<u8>> = Vec::new();
            for i in 0..num_frames {
                let buf = if i == 0 {
                    let mut buf = vec![0; w * h * BYTES_PER_PIXEL];
                    for px in buf.chunks_mut(BYTES_PER_PIXEL) {
                        px.copy_from_slice(&palette[rng.gen_range(0..4)]);
                    }
                    buf
                } else {
                    // Mutate a few random pixels; sometimes none at all.
                    let mut buf = frames[i - 1].clone();
                    for _ in 0..rng.gen_range(0..(w * h / 2 + 1)) {
                        let px = rng.gen_range(0..w * h);
                        buf[px * BYTES_PER_PIXEL..(px + 1) * BYTES_PER_PIXEL]
                            .copy_from_slice(&palette[rng.gen_range(0..4)]);
                    }
                    buf
                };
                frames.push(buf);
            }

            {
                let mut out = FlhFileWriter::create(&path, w as u16, h as u16).unwrap();
                for i in 0..num_frames {
                    let next = Raster::new(w, h, &frames[i]);
                    if i == 0 {
                        out.write_next_frame(None, &next).unwrap();
                    } else {
                        let prev = Raster::new(w, h, &frames[i - 1]);
                        out.write_next_frame(Some(&prev), &next).unwrap();
                    }
                }
                out.close().unwrap();
            }

            let bytes = fs::read(&path).unwrap();
            assert_eq!(read_u32(&bytes, 0) as usize, bytes.len(), "round {}", round);

            let mut flh = FlhFile::open(&path).unwrap();
            assert_eq!(flh.frame_count() as usize, num_frames);

            let mut buf = vec![0; w * h * BYTES_PER_PIXEL];
            for i in 0..num_frames {
                flh.read_next_frame(&mut RasterMut::new(w, h, &mut buf))
                    .unwrap();
                assert_eq!(&buf[..], &frames[i][..], "round {}, frame {}", round, i);
            }
        }

        let _ = fs::remove_file(&path);
    }
}
