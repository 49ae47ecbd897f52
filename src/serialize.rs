// Copyright (c) 2025, Arcane Labs
// SPDX-License-Identifier: Apache-2.0

//! Optional wire formats. `serde` uses the `(low, high)` limb tuple, `borsh`
//! writes the 16 little-endian bytes, which matches its encoding of `u128`.

use crate::{I128, U128};

macro_rules! impl_serialize {
    ( $name:ident ) => {
        #[cfg(feature = "serde")]
        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
                where S: serde::Serializer
            {
                serde::Serialize::serialize(&(self.low(), self.high()), serializer)
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
                where D: serde::Deserializer<'de>
            {
                <(u64, u64) as serde::Deserialize>::deserialize(deserializer).map(|(low, high)| $name::from_parts(high, low))
            }
        }

        #[cfg(feature = "borsh")]
        impl borsh::BorshSerialize for $name {
            fn serialize<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
                writer.write_all(&self.to_le_bytes())
            }
        }

        #[cfg(feature = "borsh")]
        impl borsh::BorshDeserialize for $name {
            fn deserialize_reader<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
                let mut bytes = [0u8; 16];
                reader.read_exact(&mut bytes)?;
                Ok($name::from_le_bytes(bytes))
            }
        }
    };
}

impl_serialize!(U128);
impl_serialize!(I128);
