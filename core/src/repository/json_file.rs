use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Write as _};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::config::default_data_dir;
use crate::error::Result;

/// Outcome of a mutation closure: `Commit` persists the collection,
/// `Skip` leaves the file untouched.
pub(crate) enum Write<R> {
    Commit(R),
    Skip(R),
}

/// A collection of documents stored as one pretty-printed JSON array.
///
/// Every mutation holds an exclusive lock on a sidecar `<file>.lock` for the
/// whole read-modify-write, so handles in other threads or processes see each
/// other's writes. Reads take the shared lock. The collection is persisted by
/// writing a temp file and renaming it over the original, so a failed write
/// leaves the previous contents in place.
pub(crate) struct JsonCollection<T> {
    file_path: PathBuf,
    lock_path: PathBuf,
    lock: Mutex<()>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Serialize + DeserializeOwned> JsonCollection<T> {
    pub fn open(base_dir: Option<PathBuf>, file_name: &str) -> Result<Self> {
        let mut path = match base_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        fs::create_dir_all(&path)?;
        path.push(file_name);

        let mut lock_name = OsString::from(file_name);
        lock_name.push(".lock");
        let lock_path = path.with_file_name(lock_name);

        let collection = Self {
            file_path: path,
            lock_path,
            lock: Mutex::new(()),
            _marker: PhantomData,
        };

        {
            let lock_file = collection.lock_file()?;
            lock_file.lock_exclusive()?;
            if !collection.file_path.exists() {
                collection.write_all(&[])?;
            }
        }
        Ok(collection)
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub fn read(&self) -> Result<Vec<T>> {
        let _guard = self.lock.lock();
        let lock_file = self.lock_file()?;
        lock_file.lock_shared()?;
        self.read_all()
    }

    pub fn mutate<R, F>(&self, operation: F) -> Result<R>
    where
        F: FnOnce(&mut Vec<T>) -> Result<Write<R>>,
    {
        let _guard = self.lock.lock();
        let lock_file = self.lock_file()?;
        lock_file.lock_exclusive()?;
        let mut docs = self.read_all()?;
        match operation(&mut docs)? {
            Write::Commit(result) => {
                self.write_all(&docs)?;
                Ok(result)
            }
            Write::Skip(result) => Ok(result),
        }
    }

    // Released when the returned handle is dropped.
    fn lock_file(&self) -> Result<File> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.lock_path)?;
        Ok(file)
    }

    fn read_all(&self) -> Result<Vec<T>> {
        if !self.file_path.exists() {
            return Ok(Vec::new());
        }
        let reader = BufReader::new(File::open(&self.file_path)?);
        let docs = serde_json::from_reader(reader)?;
        Ok(docs)
    }

    fn write_all(&self, docs: &[T]) -> Result<()> {
        let temp_path = self
            .file_path
            .with_extension(format!("{}.tmp", Uuid::new_v4().simple()));

        let written = (|| -> Result<()> {
            let mut writer = BufWriter::new(File::create(&temp_path)?);
            serde_json::to_writer_pretty(&mut writer, docs)?;
            writer.flush()?;
            fs::rename(&temp_path, &self.file_path)?;
            Ok(())
        })();

        if written.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        written?;

        debug!(path = %self.file_path.display(), documents = docs.len(), "collection written");
        Ok(())
    }
}
