//! UUID value generator.

use crate::gen::Gen;
use arbitrary_core::{GenValue, TypeShape};
use rand::Rng;
use uuid::Uuid;

/// Generate random UUID v4 values from the session RNG.
pub fn uuid_v4() -> Gen {
    Gen::from_fn(TypeShape::Uuid, |params| {
        Ok(GenValue::Uuid(random_uuid_v4(params.rng())))
    })
}

/// Build a UUID v4 from the provided RNG.
pub(crate) fn random_uuid_v4<R: Rng>(rng: &mut R) -> Uuid {
    // Generate 16 random bytes
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);

    // Set version (4) and variant (RFC 4122) bits
    bytes[6] = (bytes[6] & 0x0f) | 0x40; // Version 4
    bytes[8] = (bytes[8] & 0x3f) | 0x80; // Variant RFC 4122

    Uuid::from_bytes(bytes)
}
