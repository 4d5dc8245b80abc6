//! Synthetic identity generation for the provision phase
//!
//! Identities are assembled from fixed word lists plus random digits, so the
//! service sees plausible-looking but disposable registrations. Clashes are
//! possible and harmless: a rejected registration is simply dropped.

use crate::domain::{EmailAddress, Identity, IdentityCount, Password, Username};
use rand::distributions::Alphanumeric;
use rand::Rng;

const FIRST_NAMES: &[&str] = &[
    "ada", "ben", "carol", "dana", "eli", "farah", "grace", "hugo", "iris", "jonas", "kira",
    "liam", "mona", "nils", "omar", "priya", "quinn", "rosa", "sam", "tara", "ulf", "vera",
    "wes", "yuki",
];

const LAST_NAMES: &[&str] = &[
    "adams", "baker", "chen", "diaz", "evans", "fischer", "garcia", "haas", "ito", "jones",
    "kim", "lopez", "meyer", "novak", "okafor", "patel", "quist", "rossi", "sato", "tran",
    "ueda", "weiss", "young", "zhang",
];

const MAIL_DOMAINS: &[&str] = &["example.com", "example.net", "example.org"];

const PASSWORD_LENGTH: usize = 16;

/// Synthesize one registration-ready identity.
///
/// The generated values are built from the word lists above and always pass
/// domain validation, so the conversions cannot fail.
pub fn identity<R: Rng>(rng: &mut R) -> Identity {
    let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
    let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
    let domain = MAIL_DOMAINS[rng.gen_range(0..MAIL_DOMAINS.len())];
    let suffix: u32 = rng.gen_range(0..100);

    let handle = format!("{first}.{last}{suffix:02}");
    let email = format!("{handle}@{domain}");
    let password: String = rng
        .sample_iter(&Alphanumeric)
        .take(PASSWORD_LENGTH)
        .map(char::from)
        .collect();

    Identity::new(
        Username::try_new(handle).expect("Synthesized username should be valid"),
        EmailAddress::try_new(email).expect("Synthesized email should be valid"),
        Password::try_new(password).expect("Synthesized password should be valid"),
    )
}

/// Synthesize a batch of identities.
pub fn identities<R: Rng>(rng: &mut R, count: IdentityCount) -> Vec<Identity> {
    (0..count.into_inner()).map(|_| identity(rng)).collect()
}
