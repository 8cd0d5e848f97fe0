//! Ordered primitive stream used by the binary save form.

use serde::{Deserialize, Serialize};

use super::{FormatVersion, PersistError, as_count, as_index};

/// Frame marker ("PLNB") written ahead of every encoded stream.
pub const STREAM_MAGIC: u32 = 0x504C_4E42;

/// One typed value in a primitive stream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Num(f64),
    Bool(bool),
    Str(String),
}

impl Primitive {
    fn kind(&self) -> &'static str {
        match self {
            Primitive::Num(_) => "number",
            Primitive::Bool(_) => "bool",
            Primitive::Str(_) => "string",
        }
    }
}

#[derive(Serialize, Deserialize)]
struct StreamFrame {
    magic: u32,
    version: FormatVersion,
    values: Vec<Primitive>,
}

/// Append-only writer for the binary save form.
#[derive(Clone, Debug)]
pub struct StreamWriter {
    version: FormatVersion,
    values: Vec<Primitive>,
}

impl StreamWriter {
    pub fn new(version: FormatVersion) -> Self {
        Self {
            version,
            values: Vec::new(),
        }
    }

    pub fn version(&self) -> FormatVersion {
        self.version
    }

    pub fn push_num(&mut self, value: f64) {
        self.values.push(Primitive::Num(value));
    }

    pub fn push_bool(&mut self, value: bool) {
        self.values.push(Primitive::Bool(value));
    }

    pub fn push_str(&mut self, value: &str) {
        self.values.push(Primitive::Str(value.to_owned()));
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Primitive] {
        &self.values
    }

    /// Hands the written values to a reader without going through bytes.
    pub fn into_reader(self) -> StreamReader {
        StreamReader::new(self.version, self.values)
    }

    /// Frames the values with [`STREAM_MAGIC`] and the version and encodes
    /// them with bincode.
    pub fn into_bytes(self) -> Result<Vec<u8>, PersistError> {
        let frame = StreamFrame {
            magic: STREAM_MAGIC,
            version: self.version,
            values: self.values,
        };
        bincode::serialize(&frame).map_err(|e| PersistError::Encoding(e.to_string()))
    }
}

/// Sequential reader over a primitive stream.
///
/// Every read names the type it expects; a value of another type is a
/// [`PersistError::TypeMismatch`], running off the end is
/// [`PersistError::UnexpectedEnd`].
#[derive(Clone, Debug)]
pub struct StreamReader {
    version: FormatVersion,
    values: Vec<Primitive>,
    position: usize,
}

impl StreamReader {
    pub fn new(version: FormatVersion, values: Vec<Primitive>) -> Self {
        Self {
            version,
            values,
            position: 0,
        }
    }

    /// Decodes a frame produced by [`StreamWriter::into_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PersistError> {
        let frame: StreamFrame =
            bincode::deserialize(bytes).map_err(|e| PersistError::Encoding(e.to_string()))?;
        if frame.magic != STREAM_MAGIC {
            return Err(PersistError::InvalidMagic(frame.magic));
        }
        Ok(Self::new(frame.version, frame.values))
    }

    /// Version the stream was written with.
    pub fn version(&self) -> FormatVersion {
        self.version
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.values.len() - self.position
    }

    fn next(&mut self) -> Result<&Primitive, PersistError> {
        let value = self
            .values
            .get(self.position)
            .ok_or(PersistError::UnexpectedEnd {
                position: self.position,
            })?;
        self.position += 1;
        Ok(value)
    }

    fn mismatch(&self, expected: &'static str, found: &Primitive) -> PersistError {
        PersistError::TypeMismatch {
            expected,
            found: found.kind(),
            position: self.position - 1,
        }
    }

    pub fn read_num(&mut self) -> Result<f64, PersistError> {
        match self.next()? {
            Primitive::Num(v) => Ok(*v),
            other => {
                let other = other.clone();
                Err(self.mismatch("number", &other))
            }
        }
    }

    pub fn read_bool(&mut self) -> Result<bool, PersistError> {
        match self.next()? {
            Primitive::Bool(v) => Ok(*v),
            other => {
                let other = other.clone();
                Err(self.mismatch("bool", &other))
            }
        }
    }

    pub fn read_str(&mut self) -> Result<String, PersistError> {
        match self.next()? {
            Primitive::Str(v) => Ok(v.clone()),
            other => {
                let other = other.clone();
                Err(self.mismatch("string", &other))
            }
        }
    }

    /// Reads a non-negative integral number as a table index.
    pub fn read_index(&mut self, field: &'static str) -> Result<usize, PersistError> {
        as_index(field, self.read_num()?)
    }

    /// Reads a non-negative integral number as a counter.
    pub fn read_count(&mut self, field: &'static str) -> Result<u32, PersistError> {
        as_count(field, self.read_num()?)
    }

    /// Reads an index where `-1` stands for "none".
    pub fn read_optional_index(
        &mut self,
        field: &'static str,
    ) -> Result<Option<usize>, PersistError> {
        let value = self.read_num()?;
        if value == -1.0 {
            Ok(None)
        } else {
            as_index(field, value).map(Some)
        }
    }

    /// Fails if any value is left unread.
    pub fn finish(&self) -> Result<(), PersistError> {
        match self.remaining() {
            0 => Ok(()),
            remaining => Err(PersistError::TrailingData { remaining }),
        }
    }
}
