// ==========================================
// stockbook - SKU auto-generation
// ==========================================
// Prefix from the leading characters of type/model/material plus
// a random numeric suffix. Uniqueness is NOT guaranteed; callers
// that need a stable code should assign one explicitly.
// ==========================================

use rand::Rng;

/// Up to the first two alphanumeric characters, uppercased.
fn prefix_of(value: Option<&str>) -> String {
    value
        .unwrap_or("")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(2)
        .collect::<String>()
        .to_uppercase()
}

/// Generate a product code like "WI-MX-ST-4821".
///
/// Empty inputs fall back to a generic "PRD" prefix so the code
/// is never just the suffix.
pub fn generate(
    product_type: Option<&str>,
    model_no: Option<&str>,
    material: Option<&str>,
) -> String {
    let parts: Vec<String> = [product_type, model_no, material]
        .iter()
        .map(|v| prefix_of(*v))
        .filter(|p| !p.is_empty())
        .collect();

    let prefix = if parts.is_empty() {
        "PRD".to_string()
    } else {
        parts.join("-")
    };

    let suffix: u32 = rand::thread_rng().gen_range(1000..10000);
    format!("{}-{}", prefix, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_uses_field_prefixes() {
        let code = generate(Some("Widget"), Some("MX-9"), Some("Steel"));
        assert!(code.starts_with("WI-MX-ST-"), "got {}", code);
        let suffix = code.rsplit('-').next().unwrap();
        assert_eq!(suffix.len(), 4);
        assert!(suffix.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_generate_skips_empty_fields() {
        let code = generate(None, Some("A1"), None);
        assert!(code.starts_with("A1-"), "got {}", code);
    }

    #[test]
    fn test_generate_fallback_prefix() {
        let code = generate(None, None, None);
        assert!(code.starts_with("PRD-"), "got {}", code);
    }
}
