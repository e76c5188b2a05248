// src/services/identity.rs

use sha2::{Digest, Sha256};

/// Quantos caracteres hex do hash viram o id do lead.
pub const FINGERPRINT_LEN: usize = 12;

/// Id estável de um lead importado: `nome|telefone|site|termo` → SHA-256 → 12 hex.
///
/// Campos vazios entram como string vazia (o separador continua lá), então
/// reimportar a mesma linha sempre gera o mesmo id.
pub fn lead_fingerprint(name: &str, phone: &str, website: &str, term: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{name}|{phone}|{website}|{term}").as_bytes());
    let mut digest = hex::encode(hasher.finalize());
    digest.truncate(FINGERPRINT_LEN);
    digest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_input_same_id() {
        let a = lead_fingerprint("Acme Corp", "(11) 90000-0000", "acme.com", "cleaning");
        let b = lead_fingerprint("Acme Corp", "(11) 90000-0000", "acme.com", "cleaning");
        assert_eq!(a, b);
        assert_eq!(a.len(), FINGERPRINT_LEN);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn each_field_changes_the_id() {
        let base = lead_fingerprint("Acme Corp", "(11) 90000-0000", "acme.com", "cleaning");
        assert_ne!(base, lead_fingerprint("Acme Co", "(11) 90000-0000", "acme.com", "cleaning"));
        assert_ne!(base, lead_fingerprint("Acme Corp", "(11) 90000-0001", "acme.com", "cleaning"));
        assert_ne!(base, lead_fingerprint("Acme Corp", "(11) 90000-0000", "acme.com.br", "cleaning"));
        assert_ne!(base, lead_fingerprint("Acme Corp", "(11) 90000-0000", "acme.com", "plumbing"));
    }

    #[test]
    fn empty_fields_keep_their_position() {
        assert_ne!(lead_fingerprint("A", "", "", ""), lead_fingerprint("A", "", "", "X"));
        assert_ne!(lead_fingerprint("A", "", "B", ""), lead_fingerprint("A", "B", "", ""));
    }

    #[test]
    fn matches_known_digest() {
        let expected = hex::encode(Sha256::digest(b"|||"));
        assert_eq!(lead_fingerprint("", "", "", ""), expected[..FINGERPRINT_LEN]);
    }
}
