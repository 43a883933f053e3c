//! Record identifier generation.

use rand::Rng;

/// Four random lowercase hex digits
fn s4<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{:04x}", rng.gen::<u16>())
}

/// Generate a pseudo-GUID: `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`
///
/// Built from random hex groups, not an RFC 4122 UUID. Collisions are
/// unlikely but possible and nothing downstream detects them.
pub fn guid() -> String {
    let mut rng = rand::thread_rng();
    format!(
        "{}{}-{}-{}-{}-{}{}{}",
        s4(&mut rng),
        s4(&mut rng),
        s4(&mut rng),
        s4(&mut rng),
        s4(&mut rng),
        s4(&mut rng),
        s4(&mut rng),
        s4(&mut rng)
    )
}
