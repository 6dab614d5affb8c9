//! Convert between a directory of frame bitmaps and a Rock Raiders
//! FLH animation.

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use flh::bitmap::Bitmap;
use flh::{FlhError, FlhFile, FlhFileWriter, FlhResult, Raster, RasterMut, BYTES_PER_PIXEL};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() || args.len() > 2 {
        usage();
        process::exit(1);
    }

    let input = PathBuf::from(&args[0]);
    if !input.exists() {
        eprintln!("Error: invalid input path: {} does not exist", input.display());
        process::exit(1);
    }

    let compiling = input.is_dir();
    let output = match args.get(1) {
        Some(s) => PathBuf::from(s),
        None if compiling => PathBuf::from("output.flh"),
        None => PathBuf::from("output"),
    };

    let res = if compiling {
        compile(&input, &output)
    } else {
        decompile(&input, &output)
    };

    if let Err(e) = res {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn usage() {
    println!("Usage: flhtool <input> [output]");
    println!();
    println!("  input   an FLH file to decompile, or a directory of");
    println!("          frameNNNN.bmp files to compile");
    println!("  output  the FLH file to create (default: output.flh), or");
    println!("          the directory for decompiled frames (default: output)");
}

/// Returns true for frame file names of the form frameNNNN.bmp.
fn is_frame_name(name: &str) -> bool {
    name.len() == 13
        && name.starts_with("frame")
        && name.as_bytes()[5..9].iter().all(u8::is_ascii_digit)
        && name.ends_with(".bmp")
}

/// Name of the frame file holding the given 0-based frame.
fn frame_name(frame: usize) -> String {
    format!("frame{:04}.bmp", frame + 1)
}

fn compile(input: &Path, output: &Path) -> FlhResult<()> {
    let mut filenames = Vec::new();
    for entry in fs::read_dir(input)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if is_frame_name(&entry.file_name().to_string_lossy()) {
            filenames.push(entry.path());
        }
    }
    filenames.sort();

    if filenames.is_empty() {
        return Err(FlhError::NoFrames);
    }
    println!("Found {} frames in input folder.", filenames.len());

    let mut bitmaps = Vec::with_capacity(filenames.len());
    for filename in &filenames {
        bitmaps.push(Bitmap::load(filename)?);
    }

    let (w, h) = (bitmaps[0].width(), bitmaps[0].height());
    if w > u32::from(u16::MAX) || h > u32::from(u16::MAX) {
        return Err(FlhError::ExceededLimit);
    }
    if bitmaps.iter().any(|b| b.width() != w || b.height() != h) {
        return Err(FlhError::WrongResolution);
    }
    let (w, h) = (w as usize, h as usize);

    println!("Compiling {} -> {}", input.display(), output.display());

    let mut out = FlhFileWriter::create(output, w as u16, h as u16)?;
    for i in 0..bitmaps.len() {
        let next = Raster::new(w, h, bitmaps[i].pixels());
        if i == 0 {
            out.write_next_frame(None, &next)?;
        } else {
            let prev = Raster::new(w, h, bitmaps[i - 1].pixels());
            out.write_next_frame(Some(&prev), &next)?;
        }
        progress(i + 1, bitmaps.len())?;
    }
    println!();

    out.close()
}

fn decompile(input: &Path, output: &Path) -> FlhResult<()> {
    fs::create_dir_all(output)?;

    let mut flh = FlhFile::open(input)?;
    let w = flh.width() as usize;
    let h = flh.height() as usize;
    let frame_count = flh.frame_count() as usize;

    println!("Decompiling {} -> {}", input.display(), output.display());

    let mut buf = vec![0; w * h * BYTES_PER_PIXEL];
    for i in 0..frame_count {
        flh.read_next_frame(&mut RasterMut::new(w, h, &mut buf))?;

        let bmp = Bitmap::new(w as u32, h as u32, buf.clone());
        bmp.save(&output.join(frame_name(i)))?;
        progress(i + 1, frame_count)?;
    }
    println!();

    Ok(())
}

fn progress(done: usize, total: usize) -> FlhResult<()> {
    print!("\r{} / {}", done, total);
    io::stdout().flush()?;
    Ok(())
}
