// src/common/i18n.rs

use std::collections::HashMap;

pub const FALLBACK_LANG: &str = "en";

// Mensagens de erro por idioma. Chave = código do erro.
const PT: &[(&str, &str)] = &[
    ("validation", "Um ou mais campos são inválidos."),
    ("lead_not_found", "Lead não encontrado"),
    ("notes_required_for_loss", "Para marcar como perdido, é necessário adicionar uma observação."),
    ("discarded_on_create", "Um lead novo não pode nascer descartado."),
    ("import_failed", "Falha ao buscar leads do Sheets"),
];

const EN: &[(&str, &str)] = &[
    ("validation", "One or more fields are invalid."),
    ("lead_not_found", "Lead not found"),
    ("notes_required_for_loss", "A note is required before marking a lead as lost."),
    ("discarded_on_create", "A new lead cannot be created as discarded."),
    ("import_failed", "Failed to fetch leads from Sheets"),
];

#[derive(Debug, Clone)]
pub struct I18nStore {
    messages: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl Default for I18nStore {
    fn default() -> Self {
        let mut messages = HashMap::new();
        messages.insert("pt", PT.iter().copied().collect());
        messages.insert("en", EN.iter().copied().collect());
        Self { messages }
    }
}

impl I18nStore {
    /// Mensagem no idioma pedido; cai para inglês e, por último, para a própria chave.
    pub fn translate<'a>(&'a self, lang: &str, key: &'a str) -> &'a str {
        self.messages
            .get(lang)
            .and_then(|m| m.get(key))
            .or_else(|| self.messages.get(FALLBACK_LANG).and_then(|m| m.get(key)))
            .copied()
            .unwrap_or(key)
    }
}
