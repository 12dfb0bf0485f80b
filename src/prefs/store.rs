use std::collections::HashMap;
use std::fs;
use std::fs::File;
use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use byteorder::{ReadBytesExt, WriteBytesExt, LE};
use log::warn;

// "GPRF"
const PREFS_MAGIC_FILE_HEADER: [u8; 4] = [0x47, 0x50, 0x52, 0x46];
const FORMAT_VERSION: i32 = 1;

/// Durable key-value storage for small opaque byte values.
///
/// `set` has no error channel on purpose. Durability is best effort, a value
/// that could not be flushed is still readable for the rest of the run.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<Vec<u8>>;
    fn set(&mut self, key: &str, value: Vec<u8>);
}

/// A preference store backed by a single binary file.
///
/// The whole file is read once on open and rewritten on every `set`.
/// That is plenty for a handful of small entries.
pub struct FileStore {
    path: PathBuf,
    entries: HashMap<String, Vec<u8>>,
}

impl FileStore {
    /// Opens the store at the given path. A missing file is a normal first
    /// launch. An unreadable file is logged and treated as empty, the old
    /// contents get overwritten on the next `set`.
    pub fn open(path: PathBuf) -> Self {
        let entries = match File::open(&path) {
            Ok(mut file) => match Self::entries_from_read(&mut file) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(
                        "Could not read preference file '{}', starting empty:\n{}",
                        path.display(),
                        e
                    );
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };

        FileStore { path, entries }
    }

    /// The per-user default location of the preference file.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gradient-prefs").join("prefs.bin"))
    }

    pub(crate) fn entries_from_read<R: Read>(data: &mut R) -> Result<HashMap<String, Vec<u8>>> {
        let mut magic_file_number = [0; 4];
        data.read_exact(&mut magic_file_number)
            .context("Could not read file header")?;

        if magic_file_number != PREFS_MAGIC_FILE_HEADER {
            bail!("File does not start with the preference file header");
        }

        let version = data.read_i32::<LE>()?;
        if version != FORMAT_VERSION {
            bail!("Unknown preference file version: {}", version);
        }

        let nr_of_entries = data.read_i32::<LE>()? as usize;

        let mut entries = HashMap::new();

        for i in 0..nr_of_entries {
            let key_length = data.read_i32::<LE>()? as usize;
            let key = read_string(data, key_length).context(format!(
                "Could not read the key of entry {} from {}",
                i + 1,
                nr_of_entries
            ))?;

            let value_length = data.read_i64::<LE>()? as usize;
            let mut value = vec![0; value_length];
            data.read_exact(&mut value).context(format!(
                "Could not read the value of entry '{}'",
                key
            ))?;

            entries.insert(key, value);
        }

        Ok(entries)
    }

    pub(crate) fn entries_to_write<W: Write>(
        entries: &HashMap<String, Vec<u8>>,
        data: &mut W,
    ) -> Result<()> {
        data.write_all(&PREFS_MAGIC_FILE_HEADER)?;
        data.write_i32::<LE>(FORMAT_VERSION)?;
        data.write_i32::<LE>(entries.len() as i32)?;

        // Sorted so the same entries always produce the same file.
        let mut keys: Vec<&String> = entries.keys().collect();
        keys.sort();

        for key in keys {
            let value = &entries[key];

            data.write_i32::<LE>(key.len() as i32)?;
            data.write_all(key.as_bytes())?;
            data.write_i64::<LE>(value.len() as i64)?;
            data.write_all(value)?;
        }

        Ok(())
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("Could not create the preference directory")?;
        }

        let mut file = File::create(&self.path).context("Could not create the preference file")?;
        Self::entries_to_write(&self.entries, &mut file)
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Vec<u8>) {
        self.entries.insert(key.to_owned(), value);

        if let Err(e) = self.flush() {
            warn!(
                "Could not write preference file '{}':\n{}",
                self.path.display(),
                e
            );
        }
    }
}

fn read_string(data: &mut dyn Read, length: usize) -> Result<String> {
    let mut bytes = vec![0; length];
    data.read_exact(bytes.as_mut_slice())
        .context("Could not read string")?;

    Ok(String::from_utf8(bytes).context("Could not convert string from bytes")?)
}

/// In-memory stand-in for tests.
#[cfg(test)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            entries: HashMap::new(),
        }
    }
}

#[cfg(test)]
impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Vec<u8>) {
        self.entries.insert(key.to_owned(), value);
    }
}
