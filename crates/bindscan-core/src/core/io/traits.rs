use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing the record files exchanged with
/// the pipeline (query result documents, request lists, resolution reports).
///
/// Implementors supply the reader/writer based methods; the path based helpers
/// open and buffer the file.
pub trait RecordFile: Sized {
    type Error: Error + From<io::Error>;

    /// Parses the whole collection; a malformed record fails the read.
    fn read_from(reader: &mut impl BufRead) -> Result<Self, Self::Error>;

    fn write_to(&self, writer: &mut impl Write) -> Result<(), Self::Error>;

    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, Self::Error> {
        Self::read_from(&mut BufReader::new(File::open(path)?))
    }

    fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
