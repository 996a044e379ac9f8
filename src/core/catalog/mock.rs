use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde_json::{Map, Value};

/// Produces placeholder text for a secondary locale.
///
/// The output only has to be visibly different from the source text so that
/// untranslated strings stand out during QA.
pub trait MockTranslator: Send + Sync {
    fn translate(&self, locale: &str, text: &str) -> String;
}

/// `"<locale> <text with its characters shuffled>"`.
///
/// The shuffle is seeded from the text itself, so repeated runs write
/// identical files.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShuffleTranslator;

impl MockTranslator for ShuffleTranslator {
    fn translate(&self, locale: &str, text: &str) -> String {
        let mut chars: Vec<char> = text.chars().collect();
        let mut rng = StdRng::seed_from_u64(fnv1a(text.as_bytes()));
        chars.shuffle(&mut rng);
        format!("{} {}", locale, chars.into_iter().collect::<String>())
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0100_0000_01b3;

    bytes.iter().fold(OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(PRIME)
    })
}

/// Replace every string leaf of `catalog` with its mock translation.
///
/// Other scalars are copied as they are; arrays are mapped element-wise.
pub fn mock_translate(
    catalog: &Map<String, Value>,
    locale: &str,
    translator: &dyn MockTranslator,
) -> Map<String, Value> {
    catalog
        .iter()
        .map(|(key, value)| (key.clone(), mock_value(value, locale, translator)))
        .collect()
}

fn mock_value(value: &Value, locale: &str, translator: &dyn MockTranslator) -> Value {
    match value {
        Value::String(text) => Value::String(translator.translate(locale, text)),
        Value::Object(inner) => Value::Object(mock_translate(inner, locale, translator)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| mock_value(item, locale, translator))
                .collect(),
        ),
        other => other.clone(),
    }
}
