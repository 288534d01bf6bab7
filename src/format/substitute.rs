//! `${name}` placeholder substitution

use super::lexer::{placeholder_name, tokenize, Token};

/// Anything that can answer "what is the value of this placeholder?"
pub trait Values {
    fn lookup(&self, name: &str) -> Option<&str>;
}

impl Values for std::collections::HashMap<String, String> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).map(|s| s.as_str())
    }
}

impl Values for std::collections::BTreeMap<String, String> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).map(|s| s.as_str())
    }
}

impl Values for [(&str, &str)] {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
    }
}

/// Replace every `${name}` in `template` with its value.
///
/// Placeholders without a value are left in the output verbatim, so a broken
/// format string shows exactly which names failed to resolve.
pub fn substitute<V: Values + ?Sized>(template: &str, values: &V) -> String {
    let mut out = String::with_capacity(template.len());
    for (tok, span) in tokenize(template) {
        let slice = &template[span];
        match tok {
            Token::Placeholder => match values.lookup(placeholder_name(slice)) {
                Some(value) => out.push_str(value),
                None => out.push_str(slice),
            },
            _ => out.push_str(slice),
        }
    }
    out
}
