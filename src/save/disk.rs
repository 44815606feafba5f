use crate::Result;
use std::fs::File;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;

/// something persisted as a single file on disk
pub trait Disk: Sized {
    fn name() -> String;
    fn read<R: Read>(reader: R) -> Result<Self>;
    fn write<W: Write>(&self, writer: W) -> Result<()>;

    fn load(path: &Path) -> Result<Self> {
        log::info!("{:<32}{:<32}", format!("loading     {}", Self::name()), path.display());
        let file = File::open(path)?;
        Self::read(BufReader::new(file))
    }
    /// overwrite `path`, copying whatever was there to a backup first
    fn save(&self, path: &Path) -> Result<()> {
        if let Some(backup) = super::backup(path)? {
            log::info!("{:<32}{:<32}", "backing up  previous", backup.display());
        }
        log::info!("{:<32}{:<32}", format!("saving      {}", Self::name()), path.display());
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        let mut writer = BufWriter::new(File::create(path)?);
        self.write(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

impl Disk for crate::table::PayoutTable {
    fn name() -> String {
        String::from("cash-out table")
    }
    fn read<R: Read>(reader: R) -> Result<Self> {
        super::reader::read(reader)
    }
    fn write<W: Write>(&self, writer: W) -> Result<()> {
        super::writer::write(self, writer)
    }
}
