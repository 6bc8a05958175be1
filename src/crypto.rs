use rand::Rng;
use rand::distributions::Alphanumeric;

/// Length of generated document ids.
pub const DOCUMENT_ID_LENGTH: usize = 20;

const JOIN_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generates a random alphanumeric token of the given length.
pub fn generate_token(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| char::from(rng.sample(Alphanumeric)))
        .collect()
}

/// Generates a document id for a new team record.
pub fn generate_document_id() -> String {
    generate_token(DOCUMENT_ID_LENGTH)
}

/// Generates a human-shareable join code.
///
/// Codes are upper-case letters and digits so they survive being read
/// aloud or typed on a phone in the paddock.
pub fn generate_join_code(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| char::from(JOIN_CODE_ALPHABET[rng.gen_range(0..JOIN_CODE_ALPHABET.len())]))
        .collect()
}
