//! Values stored on the final states of an automaton.
use std::hash::Hash;
use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::types::{FormIndex, ParadigmIndex};

/// Payload type tag written in the automaton header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum PayloadKind {
    /// [`WordForms`] of dictionary words.
    WordForms = 1,
    /// A `u32` per key, used for probabilities.
    Count = 2,
    /// [`SuffixStats`] for suffix guessing.
    SuffixStats = 3,
}

impl PayloadKind {
    /// Decodes a header tag.
    pub fn from_u16(value: u16) -> Option<PayloadKind> {
        match value {
            1 => Some(PayloadKind::WordForms),
            2 => Some(PayloadKind::Count),
            3 => Some(PayloadKind::SuffixStats),
            _ => None,
        }
    }
}

impl std::fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PayloadKind::WordForms => "words",
            PayloadKind::Count => "count",
            PayloadKind::SuffixStats => "suffixes",
        })
    }
}

impl std::str::FromStr for PayloadKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "words" => Ok(PayloadKind::WordForms),
            "count" => Ok(PayloadKind::Count),
            "suffixes" => Ok(PayloadKind::SuffixStats),
            other => Err(format!("unknown payload kind: {}", other)),
        }
    }
}

/// A value that can be stored on the final states of a [`crate::dawg::Dawg`].
pub trait Payload: Sized + Clone + Eq + Hash {
    /// Tag identifying the payload type in files.
    const KIND: PayloadKind;

    /// Binary encoding.
    fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()>;
    /// Inverse of [`Payload::write_to`].
    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self>;

    /// Parses the text form used by dictionary source files.
    fn parse_text(text: &str) -> Option<Self>;
    /// Inverse of [`Payload::parse_text`].
    fn to_text(&self) -> String;
}

/// A single (paradigm, form) reference of a dictionary word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WordForm {
    /// Paradigm the word inflects by.
    pub paradigm: ParadigmIndex,
    /// Which form of the paradigm the word is.
    pub form: FormIndex,
}

impl WordForm {
    /// Creates a form reference.
    pub fn new(paradigm: ParadigmIndex, form: FormIndex) -> WordForm {
        WordForm { paradigm, form }
    }
}

/// A suffix prediction record: how often the suffix closes a given form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SuffixStat {
    /// Number of dictionary words behind the record.
    pub frequency: u16,
    /// Paradigm of those words.
    pub paradigm: ParadigmIndex,
    /// Form of those words.
    pub form: FormIndex,
}

impl SuffixStat {
    /// Creates a prediction record.
    pub fn new(frequency: u16, paradigm: ParadigmIndex, form: FormIndex) -> SuffixStat {
        SuffixStat {
            frequency,
            paradigm,
            form,
        }
    }
}

/// Every reading of one dictionary word.
pub type WordForms = Vec<WordForm>;
/// Every prediction for one suffix.
pub type SuffixStats = Vec<SuffixStat>;

fn write_len<W: Write>(writer: &mut W, len: usize) -> io::Result<()> {
    if len > u16::MAX as usize {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("payload list too long: {}", len),
        ));
    }
    writer.write_u16::<LittleEndian>(len as u16)
}

impl Payload for WordForms {
    const KIND: PayloadKind = PayloadKind::WordForms;

    fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write_len(writer, self.len())?;
        for item in self {
            writer.write_u16::<LittleEndian>(item.paradigm)?;
            writer.write_u16::<LittleEndian>(item.form)?;
        }
        Ok(())
    }

    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        let len = reader.read_u16::<LittleEndian>()?;
        let mut out = Vec::with_capacity(len as usize);
        for _ in 0..len {
            let paradigm = reader.read_u16::<LittleEndian>()?;
            let form = reader.read_u16::<LittleEndian>()?;
            out.push(WordForm { paradigm, form });
        }
        Ok(out)
    }

    fn parse_text(text: &str) -> Option<Self> {
        text.split(',')
            .map(|pair| {
                let (paradigm, form) = pair.trim().split_once(':')?;
                Some(WordForm {
                    paradigm: paradigm.parse().ok()?,
                    form: form.parse().ok()?,
                })
            })
            .collect()
    }

    fn to_text(&self) -> String {
        self.iter()
            .map(|x| format!("{}:{}", x.paradigm, x.form))
            .join(",")
    }
}

impl Payload for u32 {
    const KIND: PayloadKind = PayloadKind::Count;

    fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u32::<LittleEndian>(*self)
    }

    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        reader.read_u32::<LittleEndian>()
    }

    fn parse_text(text: &str) -> Option<Self> {
        text.trim().parse().ok()
    }

    fn to_text(&self) -> String {
        self.to_string()
    }
}

impl Payload for SuffixStats {
    const KIND: PayloadKind = PayloadKind::SuffixStats;

    fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write_len(writer, self.len())?;
        for item in self {
            writer.write_u16::<LittleEndian>(item.frequency)?;
            writer.write_u16::<LittleEndian>(item.paradigm)?;
            writer.write_u16::<LittleEndian>(item.form)?;
        }
        Ok(())
    }

    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        let len = reader.read_u16::<LittleEndian>()?;
        let mut out = Vec::with_capacity(len as usize);
        for _ in 0..len {
            let frequency = reader.read_u16::<LittleEndian>()?;
            let paradigm = reader.read_u16::<LittleEndian>()?;
            let form = reader.read_u16::<LittleEndian>()?;
            out.push(SuffixStat {
                frequency,
                paradigm,
                form,
            });
        }
        Ok(out)
    }

    fn parse_text(text: &str) -> Option<Self> {
        text.split(',')
            .map(|triple| {
                let mut parts = triple.trim().split(':');
                let stat = SuffixStat {
                    frequency: parts.next()?.parse().ok()?,
                    paradigm: parts.next()?.parse().ok()?,
                    form: parts.next()?.parse().ok()?,
                };
                match parts.next() {
                    Some(_) => None,
                    None => Some(stat),
                }
            })
            .collect()
    }

    fn to_text(&self) -> String {
        self.iter()
            .map(|x| format!("{}:{}:{}", x.frequency, x.paradigm, x.form))
            .join(",")
    }
}
