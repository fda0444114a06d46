//! Binary layout of an automaton file.
//!
//! All integers are little-endian:
//!
//! ```text
//! magic "AZDW" | version u16 | payload kind u16
//! state count u32 | transition count u32 | value count u32
//! states:      first u32, count u32, value u32 (u32::MAX when not final)
//! transitions: symbol u32, target u32
//! values:      payload specific
//! ```
use std::io::{Cursor, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use super::{Dawg, DawgError, Payload, PayloadKind, State, Transition};
use crate::constants::{
    DAWG_HEADER_SIZE, DAWG_MAGIC, DAWG_VERSION, NO_VALUE, STATE_RECORD_SIZE,
    TRANSITION_RECORD_SIZE,
};

// Caps preallocation so a corrupt header cannot request a huge buffer.
const MAX_PREALLOCATION: usize = 1 << 16;

impl<V: Payload> Dawg<V> {
    /// Decodes an automaton, warning about trailing bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Dawg<V>, DawgError> {
        let mut cursor = Cursor::new(bytes);
        let dawg = Self::read_from(&mut cursor)?;

        if (cursor.position() as usize) < bytes.len() {
            log::warn!(
                "{} trailing bytes after automaton",
                bytes.len() - cursor.position() as usize
            );
        }

        Ok(dawg)
    }

    /// Decodes an automaton, checking the header against `V`.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Dawg<V>, DawgError> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;

        if &magic != DAWG_MAGIC {
            return Err(DawgError::BadMagic);
        }

        let version = reader.read_u16::<LittleEndian>()?;
        if version != DAWG_VERSION {
            return Err(DawgError::UnsupportedVersion(version));
        }

        let kind = reader.read_u16::<LittleEndian>()?;
        if kind != V::KIND as u16 {
            return Err(DawgError::PayloadMismatch {
                expected: V::KIND as u16,
                found: kind,
            });
        }

        let state_count = reader.read_u32::<LittleEndian>()?;
        let transition_count = reader.read_u32::<LittleEndian>()?;
        let value_count = reader.read_u32::<LittleEndian>()?;

        if state_count == 0 {
            return Err(DawgError::Corrupt("no root state".into()));
        }

        let mut states = Vec::with_capacity((state_count as usize).min(MAX_PREALLOCATION));
        for i in 0..state_count {
            let first = reader.read_u32::<LittleEndian>()?;
            let count = reader.read_u32::<LittleEndian>()?;
            let value = reader.read_u32::<LittleEndian>()?;

            if first as u64 + count as u64 > transition_count as u64 {
                return Err(DawgError::Corrupt(format!(
                    "state {} has transitions out of range",
                    i
                )));
            }

            if value != NO_VALUE && value >= value_count {
                return Err(DawgError::Corrupt(format!(
                    "state {} refers to missing value {}",
                    i, value
                )));
            }

            states.push(State {
                first,
                count,
                value,
            });
        }

        let mut transitions =
            Vec::with_capacity((transition_count as usize).min(MAX_PREALLOCATION));
        for _ in 0..transition_count {
            let raw = reader.read_u32::<LittleEndian>()?;
            let symbol = char::from_u32(raw).ok_or(DawgError::InvalidSymbol(raw))?;
            let target = reader.read_u32::<LittleEndian>()?;

            if target >= state_count {
                return Err(DawgError::Corrupt(format!(
                    "transition targets missing state {}",
                    target
                )));
            }

            transitions.push(Transition { symbol, target });
        }

        for (i, state) in states.iter().enumerate() {
            let start = state.first as usize;
            let end = start + state.count as usize;
            let sorted = transitions[start..end]
                .windows(2)
                .all(|w| w[0].symbol < w[1].symbol);

            if !sorted {
                return Err(DawgError::Corrupt(format!(
                    "transitions of state {} are not sorted",
                    i
                )));
            }
        }

        let mut values = Vec::with_capacity((value_count as usize).min(MAX_PREALLOCATION));
        for _ in 0..value_count {
            values.push(V::read_from(reader)?);
        }

        Ok(Dawg::from_parts(states, transitions, values))
    }

    /// Encodes the automaton in little-endian binary form.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(DAWG_MAGIC)?;
        writer.write_u16::<LittleEndian>(DAWG_VERSION)?;
        writer.write_u16::<LittleEndian>(V::KIND as u16)?;
        writer.write_u32::<LittleEndian>(self.state_count() as u32)?;
        writer.write_u32::<LittleEndian>(self.transition_count() as u32)?;
        writer.write_u32::<LittleEndian>(self.value_count() as u32)?;

        for state in self.states() {
            writer.write_u32::<LittleEndian>(state.first)?;
            writer.write_u32::<LittleEndian>(state.count)?;
            writer.write_u32::<LittleEndian>(state.value)?;
        }

        for transition in self.all_transitions() {
            writer.write_u32::<LittleEndian>(transition.symbol as u32)?;
            writer.write_u32::<LittleEndian>(transition.target)?;
        }

        for value in self.values() {
            value.write_to(writer)?;
        }

        Ok(())
    }

    /// Like [`Dawg::write_to`], into a fresh buffer.
    pub fn to_bytes(&self) -> std::io::Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(
            DAWG_HEADER_SIZE
                + self.state_count() * STATE_RECORD_SIZE
                + self.transition_count() * TRANSITION_RECORD_SIZE,
        );
        self.write_to(&mut buf)?;
        Ok(buf)
    }
}

/// Reads the payload kind from the header of an automaton file.
pub fn payload_kind(bytes: &[u8]) -> Result<PayloadKind, DawgError> {
    let mut reader = Cursor::new(bytes);
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;

    if &magic != DAWG_MAGIC {
        return Err(DawgError::BadMagic);
    }

    let version = reader.read_u16::<LittleEndian>()?;
    if version != DAWG_VERSION {
        return Err(DawgError::UnsupportedVersion(version));
    }

    let kind = reader.read_u16::<LittleEndian>()?;
    PayloadKind::from_u16(kind).ok_or_else(|| DawgError::Corrupt(format!("unknown payload kind {}", kind)))
}
