use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use simplifier_core::WordReplacer;

use crate::error::Result;

/// Rewrite `reader` into `writer` line by line. Each output line carries a
/// trailing newline. Returns the number of lines written.
pub fn replace_lines(
    engine: &mut WordReplacer,
    reader: impl BufRead,
    mut writer: impl Write,
) -> Result<usize> {
    engine.ensure_initialized()?;

    let mut count = 0;
    for line in reader.lines() {
        let line = line?;
        let replaced = engine.replace_text(&line)?;
        writeln!(writer, "{replaced}")?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

/// Rewrite `input` into `output`, one output line per input line.
///
/// Refuses to start (and leaves `output` untouched) until both stores are
/// loaded. An I/O failure mid-way may leave a truncated `output`.
pub fn replace_file(engine: &mut WordReplacer, input: &Path, output: &Path) -> Result<usize> {
    engine.ensure_initialized()?;

    let reader = BufReader::new(File::open(input)?);
    let writer = BufWriter::new(File::create(output)?);
    let count = replace_lines(engine, reader, writer)?;

    tracing::info!(
        "replaced {count} lines: {} -> {}",
        input.display(),
        output.display()
    );
    tracing::debug!("{} words hold cached candidates", engine.cached_count());
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use simplifier_core::{EngineError, Resource};
    use std::io::Cursor;

    fn engine() -> WordReplacer {
        let mut e = WordReplacer::seeded(1);
        e.set_embeddings(
            [("cat", vec![1.0, 0.0]), ("dog", vec![0.9, 0.1]), ("car", vec![0.0, 1.0])]
                .into_iter()
                .map(|(w, v)| (w.to_string(), v))
                .collect(),
        );
        e.set_candidates(["dog", "car"].into_iter().collect());
        e
    }

    #[test]
    fn test_replace_lines_preserves_count() {
        let mut e = engine();
        let mut out = Vec::new();
        let n = replace_lines(&mut e, Cursor::new("The cat.\n\nA car\n"), &mut out).unwrap();
        assert_eq!(n, 3);
        assert_eq!(String::from_utf8(out).unwrap(), "The dog.\n\nA car\n");
    }

    #[test]
    fn test_missing_final_newline_gains_one() {
        let mut e = engine();
        let mut out = Vec::new();
        replace_lines(&mut e, Cursor::new("cat"), &mut out).unwrap();
        assert_eq!(out, b"dog\n");
    }

    #[test]
    fn test_uninitialized_refuses_before_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.txt");
        std::fs::write(&input, "cat\n").unwrap();

        let mut e = WordReplacer::seeded(0);
        let err = replace_file(&mut e, &input, &output).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Engine(EngineError::NotInitialized {
                missing: Resource::Embeddings
            })
        ));
        assert!(!output.exists(), "no output file before initialization");
    }

    #[test]
    fn test_missing_input_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut e = engine();
        let err = replace_file(&mut e, &dir.path().join("nope.txt"), &dir.path().join("o.txt"))
            .unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }
}
